//! Route definitions for the bridge's polling exchange.

use axum::routing::get;
use axum::Router;

use crate::handlers::device;
use crate::state::AppState;

/// Routes nested under `/api`.
///
/// ```text
/// GET  /command       -> get_command
/// POST /command       -> set_command
/// GET  /active_users  -> list_active_users
/// POST /active_users  -> replace_active_users
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/command",
            get(device::get_command).post(device::set_command),
        )
        .route(
            "/active_users",
            get(device::list_active_users).post(device::replace_active_users),
        )
}
