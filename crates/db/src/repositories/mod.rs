//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! a SQLite executor (pool or open transaction) as the first argument.

pub mod access_event_repo;
pub mod admin_repo;
pub mod user_repo;

pub use access_event_repo::AccessEventRepo;
pub use admin_repo::AdminRepo;
pub use user_repo::UserRepo;
