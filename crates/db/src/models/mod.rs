//! Row models and DTOs, one module per table.

pub mod access_event;
pub mod admin;
pub mod user;
