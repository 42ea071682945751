//! Direct message rules and conversation identifiers.
//!
//! A conversation between two users is identified by their ids sorted
//! ascending and joined with `_`, so both participants derive the same key.

use crate::error::CoreError;
use crate::types::DbId;

pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// Stable conversation key for a pair of users.
pub fn conversation_id(a: DbId, b: DbId) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{lo}_{hi}")
}

/// Parse a conversation key back into its two participant ids.
pub fn parse_conversation_id(id: &str) -> Result<(DbId, DbId), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid conversation id '{id}'"));
    let (lo, hi) = id.split_once('_').ok_or_else(invalid)?;
    let lo: DbId = lo.parse().map_err(|_| invalid())?;
    let hi: DbId = hi.parse().map_err(|_| invalid())?;
    if lo >= hi {
        return Err(invalid());
    }
    Ok((lo, hi))
}

/// Whether `user_id` is one of the two participants of `conversation`.
pub fn is_participant(conversation: &str, user_id: DbId) -> bool {
    parse_conversation_id(conversation)
        .map(|(lo, hi)| lo == user_id || hi == user_id)
        .unwrap_or(false)
}

/// Trim and bound-check message content, returning the stored form.
pub fn validate_content(content: &str) -> Result<String, CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Message content cannot be empty".into()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message cannot exceed {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_recipient(sender: DbId, recipient: DbId) -> Result<(), CoreError> {
    if sender == recipient {
        return Err(CoreError::Validation(
            "Cannot send message to yourself".into(),
        ));
    }
    Ok(())
}
