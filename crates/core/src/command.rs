//! Instructions pushed to the sensor through the polling mailbox.
//!
//! The device reads commands as plain text lines of the form
//! `ACTION:ID` (e.g. `DELETE:12`). `WAIT:0` means "nothing to do".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::FingerId;

/// Action name of the idle command.
pub const ACTION_WAIT: &str = "wait";

/// Action name asking the device to forget a fingerprint slot.
pub const ACTION_DELETE: &str = "delete";

/// A single pending instruction for the device.
///
/// Fields missing from a submitted body default to the idle command, so
/// `{}` and `{"action": "wait"}` both mean `WAIT:0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCommand {
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default)]
    pub id: FingerId,
}

fn default_action() -> String {
    ACTION_WAIT.to_string()
}

impl DeviceCommand {
    /// The "nothing to do" command.
    pub fn idle() -> Self {
        Self {
            action: default_action(),
            id: 0,
        }
    }

    /// Ask the device to free the hardware slot of a deleted user.
    pub fn delete(id: FingerId) -> Self {
        Self {
            action: ACTION_DELETE.to_string(),
            id,
        }
    }

    /// Wire form read by the device: upper-cased action, colon, id.
    pub fn wire_format(&self) -> String {
        format!("{}:{}", self.action.to_uppercase(), self.id)
    }

    pub fn is_idle(&self) -> bool {
        is_idle_wire(&self.wire_format())
    }
}

impl Default for DeviceCommand {
    fn default() -> Self {
        Self::idle()
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_format())
    }
}

/// Whether a polled `ACTION:ID` line is the idle command.
///
/// Case-insensitive and tolerant of surrounding whitespace, since the line
/// comes straight off an HTTP body.
pub fn is_idle_wire(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("WAIT:0")
}
