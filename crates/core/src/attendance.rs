//! Heuristic audition attendance prediction.
//!
//! Starts from a 70% base probability and adjusts it for lead time, travel,
//! history, confirmation, scheduling and reminders. An audition the actor
//! cannot physically reach in time is reported as a certain no-show.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const BASE_PROBABILITY: f64 = 0.7;
const IMPOSSIBLE_CONFIDENCE: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confirmation {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInput {
    pub days_until: f64,
    /// Hours of travel to the audition venue.
    pub travel_time: f64,
    pub past_no_shows: f64,
    pub is_confirmed: Confirmation,
    pub time_of_day: TimeOfDay,
    pub is_weekend: bool,
    pub reminder_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePrediction {
    pub will_attend: bool,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AttendanceInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let numbers = [
            ("daysUntil", self.days_until),
            ("travelTime", self.travel_time),
            ("pastNoShows", self.past_no_shows),
        ];
        for (field, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Validation(format!("Invalid {field} value")));
            }
        }
        Ok(())
    }
}

pub fn predict(input: &AttendanceInput) -> Result<AttendancePrediction, CoreError> {
    input.validate()?;

    let hours_until = input.days_until * 24.0;
    if input.travel_time >= hours_until {
        return Ok(AttendancePrediction {
            will_attend: false,
            confidence: IMPOSSIBLE_CONFIDENCE,
            reason: Some(format!(
                "Travel time ({} hours) exceeds available time ({} hours)",
                input.travel_time, hours_until
            )),
        });
    }

    let mut p = BASE_PROBABILITY;
    if input.days_until > 7.0 {
        p -= 0.1;
    }
    p -= (input.travel_time / hours_until) * 0.5;
    p -= 0.2 * input.past_no_shows;
    if input.is_confirmed == Confirmation::Yes {
        p += 0.2;
    }
    if input.is_weekend {
        p -= 0.05;
    }
    if input.reminder_sent {
        p += 0.1;
    }
    match input.time_of_day {
        TimeOfDay::Morning => p -= 0.05,
        TimeOfDay::Evening => p -= 0.1,
        TimeOfDay::Afternoon => {}
    }
    let p = p.clamp(0.0, 1.0);

    Ok(AttendancePrediction {
        will_attend: p >= 0.5,
        confidence: (0.6 + (p - 0.5).abs()).min(1.0),
        reason: None,
    })
}
