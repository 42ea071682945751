//! Audition submission rules: review statuses, skin tones and the physical
//! attribute bounds an actor must provide with a video.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::casting::{MAX_HEIGHT_CM, MIN_HEIGHT_CM};
use crate::error::CoreError;
use crate::users::validate_age;

pub const MIN_WEIGHT_KG: i32 = 10;
pub const MAX_WEIGHT_KG: i32 = 500;

pub const VALID_SKIN_TONES: &[&str] = &["fair", "light", "medium", "olive", "tan", "brown", "dark"];

/// Review status of a submitted audition video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 3] = [
        SubmissionStatus::Pending,
        SubmissionStatus::Accepted,
        SubmissionStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Accepted => "Accepted",
            SubmissionStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: Pending, Accepted, Rejected"
                ))
            })
    }
}

/// Physical attributes attached to a submission.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalAttributes<'a> {
    pub height_cm: i32,
    pub weight_kg: i32,
    pub age: i32,
    pub skin_tone: &'a str,
}

pub fn validate_physical(attrs: &PhysicalAttributes<'_>) -> Result<(), CoreError> {
    if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&attrs.height_cm) {
        return Err(CoreError::Validation(format!(
            "Height must be between {MIN_HEIGHT_CM} and {MAX_HEIGHT_CM} cm"
        )));
    }
    if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&attrs.weight_kg) {
        return Err(CoreError::Validation(format!(
            "Weight must be between {MIN_WEIGHT_KG} and {MAX_WEIGHT_KG} kg"
        )));
    }
    validate_age(attrs.age)?;
    validate_skin_tone(attrs.skin_tone)
}

pub fn validate_skin_tone(tone: &str) -> Result<(), CoreError> {
    if VALID_SKIN_TONES.contains(&tone) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Skin tone must be one of {}",
            VALID_SKIN_TONES.join(", ")
        )))
    }
}

/// A submission must list at least one non-blank skill.
pub fn validate_submission_skills(skills: &[String]) -> Result<Vec<String>, CoreError> {
    let skills = crate::casting::normalize_skills(skills);
    if skills.is_empty() {
        return Err(CoreError::Validation(
            "At least one skill is required".into(),
        ));
    }
    Ok(skills)
}
