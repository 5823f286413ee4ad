//! Access log models.

use biogate_core::reporting::LoggedScan;
use biogate_core::types::{DbId, FingerId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One row of the append-only `access_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccessEvent {
    pub id: DbId,
    pub finger_id: FingerId,
    pub confidence: i64,
    pub is_authorized: bool,
    pub prediction: String,
    pub recorded_at: Timestamp,
}

impl From<&AccessEvent> for LoggedScan {
    fn from(event: &AccessEvent) -> Self {
        LoggedScan {
            finger_id: event.finger_id,
            is_authorized: event.is_authorized,
            recorded_at: event.recorded_at,
        }
    }
}

/// An access event joined with the directory name of its slot, if any.
#[derive(Debug, Clone, FromRow)]
pub struct AccessEventWithUser {
    #[sqlx(flatten)]
    pub event: AccessEvent,
    pub user_name: Option<String>,
}

/// DTO for appending a decision to the log.
#[derive(Debug)]
pub struct CreateAccessEvent {
    pub finger_id: FingerId,
    pub confidence: i64,
    pub is_authorized: bool,
    pub prediction: String,
    pub recorded_at: Timestamp,
}

/// Whole-log counters.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct AccessTotals {
    pub total: i64,
    pub authorized: i64,
}

/// Number of events carrying one prediction label.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PredictionCount {
    pub prediction: String,
    pub count: i64,
}
