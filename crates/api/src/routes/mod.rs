pub mod access;
pub mod auth;
pub mod device;
pub mod health;
pub mod reports;
pub mod users;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::middleware::session::{require_session, require_session_page};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /command                  get (plain text), set          open (bridge)
/// /active_users             list joined roster, replace    open (bridge)
///
/// /users                    list, create                   session
/// /users/{id}               get, update, delete            session
/// /history                  last 20 events                 session
/// /stats                    counters                       session
/// /work_hours               per-person presence for a day  session
/// /export/csv               full log download              session
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let gated = Router::new()
        .merge(users::router())
        .merge(reports::router())
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new().merge(device::router()).merge(gated)
}

/// Browser-facing pages: `/login`, `/logout` and the gated dashboard at `/`.
pub fn page_routes(state: &AppState) -> Router<AppState> {
    let gated = Router::new()
        .route("/", get(pages::dashboard))
        .route_layer(from_fn_with_state(state.clone(), require_session_page));

    Router::new().merge(auth::router()).merge(gated)
}
