//! In-process state shared with the sensor bridge.
//!
//! Both services are created once at startup, wrapped in `Arc`, and handed to
//! handlers through [`AppState`](crate::state::AppState). Neither survives a
//! restart.

pub mod mailbox;
pub mod roster;

pub use mailbox::CommandMailbox;
pub use roster::ActiveRoster;
