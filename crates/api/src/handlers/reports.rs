//! Read-only views over the access log: history, statistics, work hours and
//! CSV export.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use biogate_core::reporting::{
    csv_field, day_bounds, display_timestamp, hourly_activity, work_hours, HourBucket, LoggedScan,
};
use biogate_core::types::FingerId;
use biogate_db::models::access_event::{AccessEventWithUser, PredictionCount};
use biogate_db::repositories::{AccessEventRepo, UserRepo};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Number of events returned by the history endpoint.
const HISTORY_LIMIT: i64 = 20;

const CSV_HEADER: &str = "id,timestamp,finger_id,user_name,confidence,is_authorized,prediction\n";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One access event as shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub finger_id: FingerId,
    pub user_name: String,
    pub confidence: i64,
    pub is_authorized: bool,
    pub prediction: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub authorized: i64,
    pub denied: i64,
    /// Events recorded today (local calendar day).
    pub today: i64,
    pub by_prediction: Vec<PredictionCount>,
    /// Today's events per local hour, always 24 buckets.
    pub by_hour: Vec<HourBucket>,
}

#[derive(Debug, Serialize)]
pub struct WorkHoursEntry {
    pub finger_id: FingerId,
    pub name: String,
    pub first_in: String,
    pub last_out: String,
    pub scans: u32,
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
pub struct WorkHoursQuery {
    /// `YYYY-MM-DD`; defaults to today in local time.
    pub date: Option<String>,
}

/// Name shown for a slot with no directory entry.
fn unknown_name(finger_id: FingerId) -> String {
    format!("Unknown (ID #{finger_id})")
}

fn display_name(row: &AccessEventWithUser) -> String {
    row.user_name
        .clone()
        .unwrap_or_else(|| unknown_name(row.event.finger_id))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/history
///
/// The 20 most recent events, newest first.
pub async fn history(State(state): State<AppState>) -> AppResult<Json<Vec<HistoryEntry>>> {
    let offset = state.config.policy.utc_offset;
    let rows = AccessEventRepo::recent_with_users(&state.pool, HISTORY_LIMIT).await?;

    let entries = rows
        .iter()
        .map(|row| HistoryEntry {
            id: row.event.id,
            finger_id: row.event.finger_id,
            user_name: display_name(row),
            confidence: row.event.confidence,
            is_authorized: row.event.is_authorized,
            prediction: row.event.prediction.clone(),
            timestamp: display_timestamp(row.event.recorded_at, offset),
        })
        .collect();

    Ok(Json(entries))
}

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let policy = &state.config.policy;
    let today = policy.now().date_naive();
    let (from, to) = day_bounds(today, policy.utc_offset);

    let totals = AccessEventRepo::totals(&state.pool).await?;
    let by_prediction = AccessEventRepo::counts_by_prediction(&state.pool).await?;
    let todays: Vec<LoggedScan> = AccessEventRepo::list_between(&state.pool, from, to)
        .await?
        .iter()
        .map(LoggedScan::from)
        .collect();

    Ok(Json(StatsResponse {
        total: totals.total,
        authorized: totals.authorized,
        denied: totals.total - totals.authorized,
        today: todays.len() as i64,
        by_prediction,
        by_hour: hourly_activity(&todays, today, policy.utc_offset),
    }))
}

/// GET /api/work_hours?date=YYYY-MM-DD
///
/// First and last granted scan per person for one local day.
pub async fn work_hours_report(
    State(state): State<AppState>,
    Query(params): Query<WorkHoursQuery>,
) -> AppResult<Json<Vec<WorkHoursEntry>>> {
    let policy = &state.config.policy;
    let day = match params.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest(format!("Invalid date '{raw}', expected YYYY-MM-DD"))
        })?,
        None => policy.now().date_naive(),
    };
    let (from, to) = day_bounds(day, policy.utc_offset);

    let scans: Vec<LoggedScan> = AccessEventRepo::list_between(&state.pool, from, to)
        .await?
        .iter()
        .map(LoggedScan::from)
        .collect();

    let names: HashMap<FingerId, String> = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|user| (user.id, user.name))
        .collect();

    let entries = work_hours(&scans, day, policy.utc_offset)
        .into_iter()
        .map(|span| WorkHoursEntry {
            finger_id: span.finger_id,
            name: names
                .get(&span.finger_id)
                .cloned()
                .unwrap_or_else(|| unknown_name(span.finger_id)),
            first_in: display_timestamp(span.first_in, policy.utc_offset),
            last_out: display_timestamp(span.last_out, policy.utc_offset),
            scans: span.scans,
            hours: span.hours,
        })
        .collect();

    Ok(Json(entries))
}

/// GET /api/export/csv
///
/// The whole access log, oldest first, as a CSV attachment.
pub async fn export_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let offset = state.config.policy.utc_offset;
    let rows = AccessEventRepo::all_with_users(&state.pool).await?;

    let mut csv_output = String::from(CSV_HEADER);
    for row in &rows {
        let name = display_name(row);
        csv_output.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            row.event.id,
            display_timestamp(row.event.recorded_at, offset),
            row.event.finger_id,
            csv_field(&name),
            row.event.confidence,
            row.event.is_authorized,
            csv_field(&row.event.prediction),
        ));
    }

    tracing::info!(rows = rows.len(), "Access log exported");
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"access_log.csv\""),
        ],
        csv_output,
    ))
}
