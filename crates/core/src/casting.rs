//! Casting call schedule and eligibility rules.
//!
//! A casting call carries four dates that must satisfy
//! `submission_deadline < audition_date <= shoot_start_date <= shoot_end_date`
//! and must not lie in the past. Partial updates are validated by merging
//! the proposed changes into the stored schedule ([`CastingSchedule::merge`])
//! and running the same [`validate_schedule`] used on create.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::users::{MAX_AGE, MIN_AGE};

pub const MIN_HEIGHT_CM: i32 = 50;
pub const MAX_HEIGHT_CM: i32 = 300;

/// The four ordered dates of a casting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastingSchedule {
    pub submission_deadline: Timestamp,
    pub audition_date: Timestamp,
    pub shoot_start_date: Timestamp,
    pub shoot_end_date: Timestamp,
}

/// Proposed changes to a schedule; `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleChanges {
    pub submission_deadline: Option<Timestamp>,
    pub audition_date: Option<Timestamp>,
    pub shoot_start_date: Option<Timestamp>,
    pub shoot_end_date: Option<Timestamp>,
}

impl ScheduleChanges {
    pub fn is_empty(&self) -> bool {
        self.submission_deadline.is_none()
            && self.audition_date.is_none()
            && self.shoot_start_date.is_none()
            && self.shoot_end_date.is_none()
    }
}

impl CastingSchedule {
    /// Overlay `changes` on top of this schedule.
    pub fn merge(&self, changes: &ScheduleChanges) -> CastingSchedule {
        CastingSchedule {
            submission_deadline: changes
                .submission_deadline
                .unwrap_or(self.submission_deadline),
            audition_date: changes.audition_date.unwrap_or(self.audition_date),
            shoot_start_date: changes.shoot_start_date.unwrap_or(self.shoot_start_date),
            shoot_end_date: changes.shoot_end_date.unwrap_or(self.shoot_end_date),
        }
    }
}

/// Validate date ordering and reject dates in the past.
pub fn validate_schedule(schedule: &CastingSchedule, now: Timestamp) -> Result<(), CoreError> {
    let dated = [
        ("Submission deadline", schedule.submission_deadline),
        ("Audition date", schedule.audition_date),
        ("Shooting start date", schedule.shoot_start_date),
        ("Shooting end date", schedule.shoot_end_date),
    ];
    for (label, date) in dated {
        if date < now {
            return Err(CoreError::Validation(format!(
                "{label} cannot be in the past"
            )));
        }
    }

    if schedule.submission_deadline >= schedule.audition_date {
        return Err(CoreError::Validation(
            "Submission deadline must be before the audition date".into(),
        ));
    }
    if schedule.shoot_start_date < schedule.audition_date {
        return Err(CoreError::Validation(
            "Shooting start date must be on or after the audition date".into(),
        ));
    }
    if schedule.shoot_end_date < schedule.shoot_start_date {
        return Err(CoreError::Validation(
            "Shooting end date must be on or after the shooting start date".into(),
        ));
    }
    Ok(())
}

/// Validate an inclusive age range for the role.
pub fn validate_age_range(min: i32, max: i32) -> Result<(), CoreError> {
    if !(MIN_AGE..=MAX_AGE).contains(&min) || !(MIN_AGE..=MAX_AGE).contains(&max) {
        return Err(CoreError::Validation(format!(
            "Age range must lie between {MIN_AGE} and {MAX_AGE}"
        )));
    }
    if min > max {
        return Err(CoreError::Validation(
            "Minimum age must not exceed maximum age".into(),
        ));
    }
    Ok(())
}

/// Validate an optional height range in centimetres. Either bound may be open.
pub fn validate_height_range(min: Option<i32>, max: Option<i32>) -> Result<(), CoreError> {
    for bound in [min, max].into_iter().flatten() {
        if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&bound) {
            return Err(CoreError::Validation(format!(
                "Height must lie between {MIN_HEIGHT_CM} and {MAX_HEIGHT_CM} cm"
            )));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(CoreError::Validation(
                "Minimum height must not exceed maximum height".into(),
            ));
        }
    }
    Ok(())
}

/// Trim skill names and drop empty entries.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A call is hidden from the public once its audition date has passed.
pub fn is_expired(audition_date: Timestamp, now: Timestamp) -> bool {
    audition_date < now
}

/// Submissions are accepted until the deadline (inclusive).
pub fn accepts_submissions(submission_deadline: Timestamp, now: Timestamp) -> bool {
    now <= submission_deadline
}
