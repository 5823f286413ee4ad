//! Access decision engine.
//!
//! [`decide`] turns one fingerprint scan into a [`Verdict`]. It is a pure
//! function: the caller looks the finger slot up in the user directory,
//! converts the result into a [`Subject`], and persists the verdict.
//!
//! Rules are evaluated in order and the first applicable one wins:
//!
//! 1. unknown slot -> denied, `Unknown`
//! 2. inactive account -> denied, `Inactive Account`
//! 3. by role: administrators always pass, employees need enough
//!    confidence, visitors need to be inside visiting hours, and any other
//!    role is let through.
//!
//! A final check relabels every *granted* scan whose confidence is below the
//! alert threshold as `Limit Score Alert` without revoking it.

use std::fmt;
use std::ops::Range;

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Employees at or above this confidence are let in.
pub const DEFAULT_EMPLOYEE_MIN_CONFIDENCE: i64 = 80;

/// Granted scans below this confidence are flagged.
pub const DEFAULT_ALERT_BELOW_CONFIDENCE: i64 = 50;

/// Local hours (half-open) during which visitors are let in.
pub const DEFAULT_VISITOR_HOURS: Range<u32> = 8..18;

/// Site-local offset from UTC, in hours (Morocco, UTC+1).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 1;

const SECONDS_PER_HOUR: i32 = 3600;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of a directory entry.
///
/// Stored as free text, so anything that is not one of the known names is
/// kept verbatim in [`Role::Unrecognized`] and round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Administrator,
    #[default]
    Employee,
    Visitor,
    Unrecognized(String),
}

impl Role {
    /// Parse a stored or submitted role name.
    ///
    /// Matching is case-insensitive and also accepts the French labels the
    /// dashboard used in its first deployment.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "administrator" | "administrateur" => Role::Administrator,
            "employee" | "employé" | "employe" => Role::Employee,
            "visitor" | "visiteur" => Role::Visitor,
            _ => Role::Unrecognized(trimmed.to_string()),
        }
    }

    /// Canonical name, as persisted.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Administrator => "Administrator",
            Role::Employee => "Employee",
            Role::Visitor => "Visitor",
            Role::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Prediction / Verdict
// ---------------------------------------------------------------------------

/// Classification label attached to every access event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prediction {
    Normal,
    Unknown,
    InactiveAccount,
    AdminAccess,
    LowConfidence,
    OutsideHours,
    LimitScoreAlert,
}

impl Prediction {
    /// Human-readable label stored in the access log.
    pub fn label(self) -> &'static str {
        match self {
            Prediction::Normal => "Normal",
            Prediction::Unknown => "Unknown",
            Prediction::InactiveAccount => "Inactive Account",
            Prediction::AdminAccess => "Admin Access",
            Prediction::LowConfidence => "Low Confidence",
            Prediction::OutsideHours => "Outside Hours",
            Prediction::LimitScoreAlert => "Limit Score Alert",
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Directory facts the engine needs about a known finger slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub role: Role,
    pub is_active: bool,
}

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub authorized: bool,
    pub prediction: Prediction,
}

impl Verdict {
    fn granted(prediction: Prediction) -> Self {
        Self {
            authorized: true,
            prediction,
        }
    }

    fn denied(prediction: Prediction) -> Self {
        Self {
            authorized: false,
            prediction,
        }
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Tunable thresholds of the decision engine.
///
/// [`AccessPolicy::default`] reproduces the site rules: employees need 80,
/// visitors are admitted 08:00-18:00 local time, granted scans under 50 are
/// flagged, and local time is UTC+1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    pub employee_min_confidence: i64,
    pub alert_below_confidence: i64,
    pub visitor_hours: Range<u32>,
    pub utc_offset: FixedOffset,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            employee_min_confidence: DEFAULT_EMPLOYEE_MIN_CONFIDENCE,
            alert_below_confidence: DEFAULT_ALERT_BELOW_CONFIDENCE,
            visitor_hours: DEFAULT_VISITOR_HOURS,
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * SECONDS_PER_HOUR)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl AccessPolicy {
    /// Build a policy, rejecting hour windows and offsets that cannot exist.
    pub fn new(
        employee_min_confidence: i64,
        alert_below_confidence: i64,
        visitor_hours: Range<u32>,
        utc_offset_hours: i32,
    ) -> Result<Self, CoreError> {
        if visitor_hours.start >= visitor_hours.end || visitor_hours.end > 24 {
            return Err(CoreError::Validation(format!(
                "visitor hours {}..{} must be a non-empty window within 0..24",
                visitor_hours.start, visitor_hours.end
            )));
        }

        let utc_offset = utc_offset_hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                CoreError::Validation(format!("invalid UTC offset: {utc_offset_hours} hours"))
            })?;

        Ok(Self {
            employee_min_confidence,
            alert_below_confidence,
            visitor_hours,
            utc_offset,
        })
    }

    /// Convert a stored UTC timestamp into site-local time.
    pub fn local_time(&self, at: Timestamp) -> DateTime<FixedOffset> {
        at.with_timezone(&self.utc_offset)
    }

    /// Current site-local time.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.local_time(Utc::now())
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Decide whether a scan is let through and how it is labelled.
///
/// `subject` is `None` when the finger slot is not in the directory.
/// `confidence` is taken as reported by the sensor, without clamping.
pub fn decide(
    subject: Option<&Subject>,
    confidence: i64,
    now: DateTime<FixedOffset>,
    policy: &AccessPolicy,
) -> Verdict {
    let Some(subject) = subject else {
        return Verdict::denied(Prediction::Unknown);
    };

    if !subject.is_active {
        return Verdict::denied(Prediction::InactiveAccount);
    }

    let verdict = match &subject.role {
        Role::Administrator => Verdict::granted(Prediction::AdminAccess),
        Role::Employee if confidence >= policy.employee_min_confidence => {
            Verdict::granted(Prediction::Normal)
        }
        Role::Employee => Verdict::denied(Prediction::LowConfidence),
        Role::Visitor if policy.visitor_hours.contains(&now.hour()) => {
            Verdict::granted(Prediction::Normal)
        }
        Role::Visitor => Verdict::denied(Prediction::OutsideHours),
        // Roles the engine does not know about are let through.
        Role::Unrecognized(_) => Verdict::granted(Prediction::Normal),
    };

    // Flag, but do not revoke, low-confidence grants.
    if verdict.authorized && confidence < policy.alert_below_confidence {
        return Verdict::granted(Prediction::LimitScoreAlert);
    }

    verdict
}
