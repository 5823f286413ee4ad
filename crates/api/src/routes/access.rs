//! Route definition for scan events from the bridge.

use axum::routing::post;
use axum::Router;

use crate::handlers::access;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /access  -> register_access
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/access", post(access::register_access))
}
