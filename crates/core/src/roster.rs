//! Snapshot of the finger slots currently enrolled on the device.

use serde::Serialize;

use crate::types::FingerId;

/// Placeholder shown for enrolled slots with no directory entry.
pub const UNKNOWN: &str = "Unknown";

/// One enrolled slot joined against the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub id: FingerId,
    pub name: String,
    pub role: String,
    pub is_active: bool,
}

impl RosterEntry {
    /// Entry for a slot the directory knows nothing about.
    pub fn unknown(id: FingerId) -> Self {
        Self {
            id,
            name: UNKNOWN.to_string(),
            role: UNKNOWN.to_string(),
            is_active: false,
        }
    }
}

/// Sort a device report ascending and drop repeated slots.
pub fn normalize(mut ids: Vec<FingerId>) -> Vec<FingerId> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Join every enrolled slot with its directory entry, in roster order.
pub fn join<F>(ids: &[FingerId], mut lookup: F) -> Vec<RosterEntry>
where
    F: FnMut(FingerId) -> Option<RosterEntry>,
{
    ids.iter()
        .map(|&id| lookup(id).unwrap_or_else(|| RosterEntry::unknown(id)))
        .collect()
}
