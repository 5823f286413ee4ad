//! Request handlers, one submodule per resource.
//!
//! Handlers delegate persistence to the repositories in `biogate_db`,
//! decisions to `biogate_core`, and map errors via [`AppError`](crate::error::AppError).

pub mod access;
pub mod auth;
pub mod device;
pub mod pages;
pub mod reports;
pub mod users;
