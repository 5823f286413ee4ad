//! User directory rules.
//!
//! Directory entries are keyed by the sensor's fingerprint slot, which the
//! hardware limits to `1..=127`.

use crate::types::FingerId;

/// Highest slot the sensor can store.
pub const MAX_FINGER_ID: FingerId = 127;

/// Maximum length of a directory name.
pub const MAX_NAME_LENGTH: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Every slot up to [`MAX_FINGER_ID`] is taken.
    #[error("full")]
    Full,

    /// Another entry already uses this name.
    #[error("name already used")]
    NameTaken,
}

/// Slot assigned to the next created user.
///
/// Slots are handed out as `highest existing + 1`; gaps left by deletions
/// are not reused.
pub fn next_finger_id(highest: Option<FingerId>) -> Result<FingerId, DirectoryError> {
    let next = highest.map_or(1, |id| id + 1);
    if next > MAX_FINGER_ID {
        return Err(DirectoryError::Full);
    }
    Ok(next)
}

/// Whether `id` can exist in the directory at all.
pub fn is_valid_finger_id(id: FingerId) -> bool {
    (1..=MAX_FINGER_ID).contains(&id)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn first_user_gets_slot_one() {
        assert_eq!(next_finger_id(None), Ok(1));
    }

    #[test]
    fn next_slot_follows_the_highest_one() {
        assert_eq!(next_finger_id(Some(1)), Ok(2));
        // Slots 1..=4 were deleted; no reuse.
        assert_eq!(next_finger_id(Some(5)), Ok(6));
        assert_eq!(next_finger_id(Some(126)), Ok(127));
    }

    #[test]
    fn directory_is_full_after_slot_127() {
        assert_matches!(next_finger_id(Some(127)), Err(DirectoryError::Full));
    }

    #[test]
    fn error_messages_match_the_api_contract() {
        assert_eq!(DirectoryError::Full.to_string(), "full");
        assert_eq!(DirectoryError::NameTaken.to_string(), "name already used");
    }

    #[test]
    fn slot_range_is_one_to_127() {
        assert!(!is_valid_finger_id(0));
        assert!(is_valid_finger_id(1));
        assert!(is_valid_finger_id(127));
        assert!(!is_valid_finger_id(128));
    }
}
