//! Repository for the `users` table (the user directory).

use biogate_core::types::FingerId;
use chrono::Utc;
use sqlx::sqlite::SqliteExecutor;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, role, is_active, created_at";

/// Provides CRUD operations for directory entries.
pub struct UserRepo;

impl UserRepo {
    /// Insert an entry at `input.id`, returning the created row.
    pub async fn create<'e>(
        executor: impl SqliteExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, role, is_active, created_at)
             VALUES (?1, ?2, ?3, 1, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    /// Find an entry by fingerprint slot.
    pub async fn find_by_id<'e>(
        executor: impl SqliteExecutor<'e>,
        id: FingerId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an entry by exact name.
    pub async fn find_by_name<'e>(
        executor: impl SqliteExecutor<'e>,
        name: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE name = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// List all entries ordered by slot.
    pub async fn list<'e>(executor: impl SqliteExecutor<'e>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(executor).await
    }

    /// Highest slot in use, or `None` for an empty directory.
    pub async fn highest_id<'e>(
        executor: impl SqliteExecutor<'e>,
    ) -> Result<Option<FingerId>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<FingerId>>("SELECT MAX(id) FROM users")
            .fetch_one(executor)
            .await
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl SqliteExecutor<'e>,
        id: FingerId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE(?2, name),
                role = COALESCE(?3, role),
                is_active = COALESCE(?4, is_active)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_optional(executor)
            .await
    }

    /// Hard-delete an entry. Returns `true` if a row was removed.
    pub async fn delete<'e>(
        executor: impl SqliteExecutor<'e>,
        id: FingerId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
