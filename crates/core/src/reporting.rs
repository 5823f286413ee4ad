//! Derived views over the access log (work hours, hourly activity, CSV).
//!
//! Pure logic -- the caller fetches the scans for the window it cares about
//! and passes them in together with the site-local UTC offset.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::types::{FingerId, Timestamp};

/// Display format used by the dashboard and exports.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The parts of an access event reporting needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedScan {
    pub finger_id: FingerId,
    pub is_authorized: bool,
    pub recorded_at: Timestamp,
}

/// Presence of one person on one day, from first to last granted scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSpan {
    pub finger_id: FingerId,
    pub first_in: Timestamp,
    pub last_out: Timestamp,
    pub scans: u32,
    /// Hours between first and last granted scan, two decimals.
    pub hours: f64,
}

/// Number of scans recorded during one local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub count: i64,
}

/// UTC bounds `[start, end)` of a local calendar day.
pub fn day_bounds(day: NaiveDate, offset: FixedOffset) -> (Timestamp, Timestamp) {
    let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    // A fixed offset has no gaps or folds, so the mapping is unique.
    let start = offset
        .from_local_datetime(&midnight)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight));
    (start, start + Duration::days(1))
}

/// Compute per-user presence for `day` from granted scans.
///
/// Denied scans are ignored. Output is ordered by finger slot.
pub fn work_hours(scans: &[LoggedScan], day: NaiveDate, offset: FixedOffset) -> Vec<WorkSpan> {
    let mut spans: BTreeMap<FingerId, WorkSpan> = BTreeMap::new();

    for scan in scans {
        if !scan.is_authorized || scan.recorded_at.with_timezone(&offset).date_naive() != day {
            continue;
        }

        spans
            .entry(scan.finger_id)
            .and_modify(|span| {
                span.first_in = span.first_in.min(scan.recorded_at);
                span.last_out = span.last_out.max(scan.recorded_at);
                span.scans += 1;
            })
            .or_insert(WorkSpan {
                finger_id: scan.finger_id,
                first_in: scan.recorded_at,
                last_out: scan.recorded_at,
                scans: 1,
                hours: 0.0,
            });
    }

    spans
        .into_values()
        .map(|mut span| {
            let seconds = (span.last_out - span.first_in).num_seconds();
            span.hours = (seconds as f64 / 36.0).round() / 100.0;
            span
        })
        .collect()
}

/// Count the scans of `day` per local hour. Always returns 24 buckets.
pub fn hourly_activity(scans: &[LoggedScan], day: NaiveDate, offset: FixedOffset) -> Vec<HourBucket> {
    let mut counts = [0_i64; 24];
    for scan in scans {
        let local = scan.recorded_at.with_timezone(&offset);
        if local.date_naive() == day {
            if let Some(slot) = counts.get_mut(local.hour() as usize) {
                *slot += 1;
            }
        }
    }

    (0_u32..)
        .zip(counts)
        .map(|(hour, count)| HourBucket { hour, count })
        .collect()
}

/// Render a UTC timestamp in site-local time for humans.
pub fn display_timestamp(at: Timestamp, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format(DISPLAY_FORMAT).to_string()
}

/// Quote a CSV field when it contains a separator, quote, or line break.
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
