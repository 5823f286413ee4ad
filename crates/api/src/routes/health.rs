use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Command currently waiting in the device mailbox (`ACTION:ID`).
    pub pending_command: String,
}

/// GET /health -- service and database health plus the mailbox content.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = biogate_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        pending_command: state.mailbox.wire().await,
    })
}

/// Mount health check routes at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
