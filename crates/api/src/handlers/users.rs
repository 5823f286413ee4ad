//! Handlers for the `/api/users` resource (the user directory).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use biogate_core::access::Role;
use biogate_core::command::DeviceCommand;
use biogate_core::directory::{
    is_valid_finger_id, next_finger_id, DirectoryError, MAX_NAME_LENGTH,
};
use biogate_core::error::CoreError;
use biogate_core::types::FingerId;
use biogate_db::models::user::{CreateUser, UpdateUser, User};
use biogate_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::session::AdminSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /api/users`. The slot is assigned by the server.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
    pub role: Option<String>,
}

/// Body of `PUT /api/users/{id}`. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
}

fn not_found(id: FingerId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// Slots outside the sensor range cannot exist; answer 404 without a query.
fn check_slot(id: FingerId) -> AppResult<()> {
    if is_valid_finger_id(id) {
        Ok(())
    } else {
        Err(not_found(id))
    }
}

fn check_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

/// Trim a submitted name; blank names are rejected.
fn clean_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be blank".into(),
        )));
    }
    Ok(name.to_string())
}

/// Map a unique violation on insert/update to the directory's name error.
fn name_conflict(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        DirectoryError::NameTaken.into()
    } else {
        err.into()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<FingerId>,
) -> AppResult<Json<User>> {
    check_slot(id)?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(user))
}

/// POST /api/users
///
/// Assigns slot `highest + 1`. Fails with `"full"` past slot 127 and with
/// `"name already used"` on a duplicate name.
///
/// `BEGIN IMMEDIATE` takes the write lock before the highest slot is read;
/// overlapping creates wait on the busy timeout.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(operator): Extension<AdminSession>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    check_input(&input)?;
    let name = clean_name(&input.name)?;
    let role = input.role.as_deref().map(Role::parse).unwrap_or_default();

    let mut tx = state.pool.begin_with("BEGIN IMMEDIATE").await?;

    if UserRepo::find_by_name(&mut *tx, &name).await?.is_some() {
        return Err(DirectoryError::NameTaken.into());
    }

    let id = next_finger_id(UserRepo::highest_id(&mut *tx).await?)?;
    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            id,
            name,
            role: role.as_str().to_string(),
        },
    )
    .await
    .map_err(name_conflict)?;

    tx.commit().await?;

    tracing::info!(
        user_id = user.id,
        name = %user.name,
        role = %user.role,
        operator = %operator.username,
        "User created",
    );
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            user,
        }),
    ))
}

/// PUT /api/users/{id}
///
/// Partial update. Unknown ids yield 404 without touching anything.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(operator): Extension<AdminSession>,
    Path(id): Path<FingerId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    check_slot(id)?;
    check_input(&input)?;
    let name = input.name.as_deref().map(clean_name).transpose()?;

    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }

    if let Some(name) = &name {
        let taken = UserRepo::find_by_name(&state.pool, name)
            .await?
            .is_some_and(|other| other.id != id);
        if taken {
            return Err(DirectoryError::NameTaken.into());
        }
    }

    let patch = UpdateUser {
        name,
        role: input
            .role
            .as_deref()
            .map(|raw| Role::parse(raw).as_str().to_string()),
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &patch)
        .await
        .map_err(name_conflict)?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = id, operator = %operator.username, "User updated");
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// DELETE /api/users/{id}
///
/// Removes the entry and queues `DELETE:<id>` so the sensor frees the slot.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(operator): Extension<AdminSession>,
    Path(id): Path<FingerId>,
) -> AppResult<Json<DeleteResponse>> {
    check_slot(id)?;
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    state.mailbox.set(DeviceCommand::delete(id)).await;

    tracing::info!(
        user_id = id,
        operator = %operator.username,
        "User deleted, slot deletion queued for device",
    );
    Ok(Json(DeleteResponse {
        success: true,
        message: "User deleted and command sent",
    }))
}
