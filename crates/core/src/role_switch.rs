//! Actor-to-producer role switch requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MAX_REASON_LENGTH: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchStatus {
    Pending,
    Approved,
    Rejected,
}

/// Admin decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDecision {
    Approve,
    Reject,
}

impl SwitchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SwitchStatus::Pending => "Pending",
            SwitchStatus::Approved => "Approved",
            SwitchStatus::Rejected => "Rejected",
        }
    }

    /// Apply an admin decision. Only pending requests may be reviewed.
    pub fn review(self, decision: SwitchDecision) -> Result<SwitchStatus, CoreError> {
        if self != SwitchStatus::Pending {
            return Err(CoreError::Validation(format!(
                "Request already {}",
                self.as_str().to_lowercase()
            )));
        }
        Ok(match decision {
            SwitchDecision::Approve => SwitchStatus::Approved,
            SwitchDecision::Reject => SwitchStatus::Rejected,
        })
    }
}

impl fmt::Display for SwitchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(SwitchStatus::Pending),
            "Approved" => Ok(SwitchStatus::Approved),
            "Rejected" => Ok(SwitchStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid switch request status '{other}'"
            ))),
        }
    }
}

/// Trim the actor's reason and reject blank or oversized text.
pub fn validate_reason(reason: &str) -> Result<String, CoreError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Reason is required".into()));
    }
    if trimmed.chars().count() > MAX_REASON_LENGTH {
        return Err(CoreError::Validation(format!(
            "Reason cannot exceed {MAX_REASON_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}
