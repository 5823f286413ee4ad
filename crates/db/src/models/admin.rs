//! Dashboard operator model.

use biogate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `admins` table.
///
/// Contains the password hash -- never serialize it.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for creating an operator.
#[derive(Debug)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
}
