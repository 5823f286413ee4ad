//! Repository for the append-only `access_events` table.
//!
//! There is no update or delete: the log is written once per
//! scan and only read afterwards.

use biogate_core::types::Timestamp;
use sqlx::sqlite::SqliteExecutor;

use crate::models::access_event::{
    AccessEvent, AccessEventWithUser, AccessTotals, CreateAccessEvent, PredictionCount,
};

const COLUMNS: &str = "id, finger_id, confidence, is_authorized, prediction, recorded_at";

/// Event columns prefixed with the `e` alias plus the joined user name.
const JOINED_COLUMNS: &str = "e.id, e.finger_id, e.confidence, e.is_authorized, e.prediction, \
                              e.recorded_at, u.name AS user_name";

/// Provides append and read access to the access log.
pub struct AccessEventRepo;

impl AccessEventRepo {
    /// Append one decision, returning the stored row.
    pub async fn insert<'e>(
        executor: impl SqliteExecutor<'e>,
        input: &CreateAccessEvent,
    ) -> Result<AccessEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO access_events (finger_id, confidence, is_authorized, prediction, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessEvent>(&query)
            .bind(input.finger_id)
            .bind(input.confidence)
            .bind(input.is_authorized)
            .bind(&input.prediction)
            .bind(input.recorded_at)
            .fetch_one(executor)
            .await
    }

    /// Most recent events first, joined with directory names.
    pub async fn recent_with_users<'e>(
        executor: impl SqliteExecutor<'e>,
        limit: i64,
    ) -> Result<Vec<AccessEventWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM access_events e
             LEFT JOIN users u ON u.id = e.finger_id
             ORDER BY e.id DESC
             LIMIT ?1"
        );
        sqlx::query_as::<_, AccessEventWithUser>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// Every event, oldest first, joined with directory names (for export).
    pub async fn all_with_users<'e>(
        executor: impl SqliteExecutor<'e>,
    ) -> Result<Vec<AccessEventWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM access_events e
             LEFT JOIN users u ON u.id = e.finger_id
             ORDER BY e.id ASC"
        );
        sqlx::query_as::<_, AccessEventWithUser>(&query)
            .fetch_all(executor)
            .await
    }

    /// Events recorded in `[from, to)`, oldest first.
    ///
    /// `recorded_at` holds the RFC 3339 UTC text sqlx writes for
    /// `DateTime<Utc>`, which orders chronologically as text at full
    /// nanosecond precision. `julianday()` would round to milliseconds.
    pub async fn list_between<'e>(
        executor: impl SqliteExecutor<'e>,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<AccessEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM access_events
             WHERE recorded_at >= ?1 AND recorded_at < ?2
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, AccessEvent>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(executor)
            .await
    }

    /// Total and granted event counts over the whole log.
    pub async fn totals<'e>(executor: impl SqliteExecutor<'e>) -> Result<AccessTotals, sqlx::Error> {
        sqlx::query_as::<_, AccessTotals>(
            "SELECT COUNT(*) AS total, COALESCE(SUM(is_authorized), 0) AS authorized
             FROM access_events",
        )
        .fetch_one(executor)
        .await
    }

    /// Event counts per prediction label, most frequent first.
    pub async fn counts_by_prediction<'e>(
        executor: impl SqliteExecutor<'e>,
    ) -> Result<Vec<PredictionCount>, sqlx::Error> {
        sqlx::query_as::<_, PredictionCount>(
            "SELECT prediction, COUNT(*) AS count
             FROM access_events
             GROUP BY prediction
             ORDER BY count DESC, prediction ASC",
        )
        .fetch_all(executor)
        .await
    }
}
