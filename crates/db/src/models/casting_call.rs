//! Casting call entity model and DTOs.

use actory_core::casting::CastingSchedule;
use actory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `casting_calls` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CastingCall {
    pub id: DbId,
    pub role_name: String,
    pub description: String,
    pub age_min: i32,
    pub age_max: i32,
    pub height_min_cm: Option<i32>,
    pub height_max_cm: Option<i32>,
    pub location: String,
    pub skills: Vec<String>,
    pub submission_deadline: Timestamp,
    pub audition_date: Timestamp,
    pub shoot_start_date: Timestamp,
    pub shoot_end_date: Timestamp,
    pub producer_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CastingCall {
    pub fn schedule(&self) -> CastingSchedule {
        CastingSchedule {
            submission_deadline: self.submission_deadline,
            audition_date: self.audition_date,
            shoot_start_date: self.shoot_start_date,
            shoot_end_date: self.shoot_end_date,
        }
    }
}

/// A casting call joined with its producer's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CastingCallWithProducer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub call: CastingCall,
    pub producer_name: String,
    pub producer_company: Option<String>,
}

/// DTO for creating a casting call. `producer_id` is set from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCastingCall {
    pub role_name: String,
    pub description: String,
    pub age_min: i32,
    pub age_max: i32,
    pub height_min_cm: Option<i32>,
    pub height_max_cm: Option<i32>,
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub submission_deadline: Timestamp,
    pub audition_date: Timestamp,
    pub shoot_start_date: Timestamp,
    pub shoot_end_date: Timestamp,
}

impl CreateCastingCall {
    pub fn schedule(&self) -> CastingSchedule {
        CastingSchedule {
            submission_deadline: self.submission_deadline,
            audition_date: self.audition_date,
            shoot_start_date: self.shoot_start_date,
            shoot_end_date: self.shoot_end_date,
        }
    }
}

/// DTO for updating a casting call. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCastingCall {
    pub role_name: Option<String>,
    pub description: Option<String>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub height_min_cm: Option<i32>,
    pub height_max_cm: Option<i32>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub submission_deadline: Option<Timestamp>,
    pub audition_date: Option<Timestamp>,
    pub shoot_start_date: Option<Timestamp>,
    pub shoot_end_date: Option<Timestamp>,
}
