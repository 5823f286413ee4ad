//! Operator session gate, layered per route group with
//! `axum::middleware::from_fn_with_state`.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use biogate_core::error::CoreError;
use biogate_core::types::DbId;

use crate::auth::session::{token_from_headers, validate_session_token};
use crate::error::AppError;
use crate::state::AppState;

/// Operator identity attached to gated requests as a request extension.
///
/// Handlers behind the gate can take `Extension<AdminSession>`.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: DbId,
    pub username: String,
}

fn resolve_session(state: &AppState, headers: &HeaderMap) -> Result<AdminSession, AppError> {
    let session = &state.config.session;
    let token = token_from_headers(headers, &session.cookie_name).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Login required".into()))
    })?;

    let claims = validate_session_token(token, session).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
    })?;

    Ok(AdminSession {
        admin_id: claims.sub,
        username: claims.username,
    })
}

/// Reject API requests without a valid session with 401 JSON.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = resolve_session(&state, request.headers())?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Send browsers without a valid session to the login page.
pub async fn require_session_page(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_session(&state, request.headers()) {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(_) => {
            tracing::debug!(path = %request.uri().path(), "No session, redirecting to login");
            Redirect::to("/login").into_response()
        }
    }
}
