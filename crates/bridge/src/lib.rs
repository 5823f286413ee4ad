//! `biogate-bridge` library crate.
//!
//! Relays between the fingerprint sensor on a serial line and the Biogate
//! API. The binary entrypoint lives in `main.rs`.

pub mod client;
pub mod config;
pub mod error;
pub mod frame;
pub mod link;
pub mod relay;
