//! First-start seeding.

use biogate_db::models::admin::CreateAdmin;
use biogate_db::repositories::AdminRepo;
use biogate_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured operator if no operator exists yet.
///
/// Returns `true` when an account was created.
pub async fn ensure_admin(pool: &DbPool, credentials: &BootstrapAdmin) -> AppResult<bool> {
    if AdminRepo::count(pool).await? > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(&credentials.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            username: credentials.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::warn!(
        username = %admin.username,
        "Created default operator account; change its password",
    );
    Ok(true)
}
