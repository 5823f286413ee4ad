//! Route definitions for access log reporting.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes nested under `/api`.
///
/// ```text
/// GET /history     -> history
/// GET /stats       -> stats
/// GET /work_hours  -> work_hours_report
/// GET /export/csv  -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(reports::history))
        .route("/stats", get(reports::stats))
        .route("/work_hours", get(reports::work_hours_report))
        .route("/export/csv", get(reports::export_csv))
}
