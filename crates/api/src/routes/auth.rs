//! Route definitions for operator login and logout.

use axum::routing::get;
use axum::Router;

use crate::handlers::{auth, pages};
use crate::state::AppState;

/// ```text
/// GET  /login   -> login_page
/// POST /login   -> login
/// GET  /logout  -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}
