//! Repository for the `admins` table.

use chrono::Utc;
use sqlx::sqlite::SqliteExecutor;

use crate::models::admin::{Admin, CreateAdmin};

const COLUMNS: &str = "id, username, password_hash, created_at";

/// Provides lookups and creation for dashboard operators.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new operator, returning the created row.
    pub async fn create<'e>(
        executor: impl SqliteExecutor<'e>,
        input: &CreateAdmin,
    ) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (username, password_hash, created_at)
             VALUES (?1, ?2, ?3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    /// Find an operator by username (case-sensitive).
    pub async fn find_by_username<'e>(
        executor: impl SqliteExecutor<'e>,
        username: &str,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE username = ?1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(username)
            .fetch_optional(executor)
            .await
    }

    /// Number of operators.
    pub async fn count<'e>(executor: impl SqliteExecutor<'e>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(executor)
            .await
    }
}
