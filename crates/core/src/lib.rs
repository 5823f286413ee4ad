//! Domain logic for the biometric access-control backend.
//!
//! Everything in this crate is pure: no database, no HTTP, no clocks read
//! behind the caller's back. The API crate fetches rows, passes them in,
//! and persists whatever comes out.

pub mod access;
pub mod command;
pub mod directory;
pub mod error;
pub mod reporting;
pub mod roster;
pub mod types;
