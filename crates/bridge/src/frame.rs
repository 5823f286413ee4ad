//! Line protocol spoken by the sensor firmware.
//!
//! Each line the device prints is either a tagged JSON report or free-form
//! diagnostic text:
//!
//! - `__ACCESS__:{"fingerID":3,"confidence":88}` -- one scan result
//! - `__USERS__:{"ids":[1,2,5]}` -- the slots currently enrolled
//! - anything else is firmware chatter, logged and dropped

use serde_json::Value;

use crate::error::BridgeError;

/// Tag of a scan result line.
pub const ACCESS_TAG: &str = "__ACCESS__:";
/// Tag of an enrolled-slot report line.
pub const USERS_TAG: &str = "__USERS__:";

/// One decoded line from the device.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Scan result, forwarded to `POST /access` as-is.
    Access(Value),
    /// Enrolled slots, forwarded to `POST /api/active_users` as-is.
    Users(Value),
    /// Untagged text.
    Log(String),
}

/// Decode a single line. Blank lines yield `Ok(None)`.
///
/// Payloads are only checked for being JSON; field validation is left to
/// the API.
pub fn parse_line(line: &str) -> Result<Option<Frame>, BridgeError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let frame = if let Some(payload) = line.strip_prefix(ACCESS_TAG) {
        Frame::Access(serde_json::from_str(payload)?)
    } else if let Some(payload) = line.strip_prefix(USERS_TAG) {
        Frame::Users(serde_json::from_str(payload)?)
    } else {
        Frame::Log(line.to_string())
    };
    Ok(Some(frame))
}
