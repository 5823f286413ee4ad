//! Directory entry model and DTOs.

use biogate_core::types::{FingerId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `users` table. `id` is the sensor's fingerprint slot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: FingerId,
    pub name: String,
    /// Canonical role name (see `biogate_core::access::Role`).
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a directory entry at an already-chosen slot.
#[derive(Debug)]
pub struct CreateUser {
    pub id: FingerId,
    pub name: String,
    pub role: String,
}

/// DTO for patching a directory entry. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}
