//! Audition submission model and DTOs.

use actory_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub video_url: String,
    pub media_public_id: Option<String>,
    pub portfolio_url: Option<String>,
    pub actor_id: DbId,
    pub casting_call_id: DbId,
    pub height_cm: i32,
    pub weight_kg: i32,
    pub age: i32,
    pub skin_tone: String,
    pub skills: Vec<String>,
    pub permanent_address: String,
    pub living_city: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub email: Option<String>,
    pub status: String,
    pub views: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A submission joined with the submitting actor and the call's role name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoWithContext {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    pub actor_name: String,
    pub actor_email: String,
    pub role_name: String,
}

/// DTO for a new submission. Actor and casting call ids come from the request
/// context, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub video_url: String,
    pub media_public_id: Option<String>,
    pub portfolio_url: Option<String>,
    pub height_cm: i32,
    pub weight_kg: i32,
    pub age: i32,
    pub skin_tone: String,
    pub skills: Vec<String>,
    pub permanent_address: String,
    pub living_city: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    /// Contact address for this submission; stored trimmed and lower-cased.
    #[serde(default)]
    pub email: Option<String>,
}

/// Admin moderation patch. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub portfolio_url: Option<String>,
    pub status: Option<String>,
}
