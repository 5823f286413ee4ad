//! Operator login and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use biogate_db::repositories::AdminRepo;
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::auth::session::{clear_session_cookie, issue_session_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::handlers::pages::render_login;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Form body of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /login
///
/// On success sets the session cookie and redirects to the dashboard; on
/// failure re-renders the login page with 401.
pub async fn login(
    State(state): State<AppState>,
    Form(input): Form<LoginForm>,
) -> AppResult<Response> {
    let Some(admin) = AdminRepo::find_by_username(&state.pool, &input.username).await? else {
        tracing::info!(username = %input.username, "Login failed: unknown operator");
        return Ok(rejected());
    };

    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %input.username, "Login failed: wrong password");
        return Ok(rejected());
    }

    let config = &state.config.session;
    let token = issue_session_token(admin.id, &admin.username, config)
        .map_err(|e| AppError::InternalError(format!("Session signing error: {e}")))?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Operator logged in");
    Ok((
        [(SET_COOKIE, session_cookie(&token, config))],
        Redirect::to("/"),
    )
        .into_response())
}

/// GET /logout
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        [(SET_COOKIE, clear_session_cookie(&state.config.session))],
        Redirect::to("/login"),
    )
        .into_response()
}

fn rejected() -> Response {
    (StatusCode::UNAUTHORIZED, render_login(Some(INVALID_CREDENTIALS))).into_response()
}
