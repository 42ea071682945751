//! Portfolio videos, follow relations and profile statistics.

use actory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profile_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileVideo {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub duration_secs: Option<i32>,
    pub views: i32,
    pub is_active: bool,
    pub uploaded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a portfolio video. The title is already resolved.
#[derive(Debug, Clone)]
pub struct CreateProfileVideo {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub duration_secs: Option<i32>,
}

/// Aggregate counters shown on a profile page.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileStats {
    pub video_count: i64,
    pub total_views: i64,
    pub follower_count: i64,
    pub following_count: i64,
    pub submission_count: i64,
}
