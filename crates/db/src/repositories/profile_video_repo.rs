//! Repository for the `profile_videos` table and profile statistics.

use actory_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile_video::{CreateProfileVideo, ProfileStats, ProfileVideo};

const COLUMNS: &str = "id, user_id, title, description, category, url, thumbnail_url, \
    duration_secs, views, is_active, uploaded_at, created_at, updated_at";

pub struct ProfileVideoRepo;

impl ProfileVideoRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateProfileVideo,
    ) -> Result<ProfileVideo, sqlx::Error> {
        let query = format!(
            "INSERT INTO profile_videos
                (user_id, title, description, category, url, thumbnail_url, duration_secs)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileVideo>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.url)
            .bind(&input.thumbnail_url)
            .bind(input.duration_secs)
            .fetch_one(pool)
            .await
    }

    /// A user's portfolio, newest upload first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        active_only: bool,
    ) -> Result<Vec<ProfileVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profile_videos
             WHERE user_id = $1 AND (is_active OR NOT $2)
             ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProfileVideo>(&query)
            .bind(user_id)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Bump the view counter and return the new total, or `None` if missing.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE profile_videos SET views = views + 1 WHERE id = $1 RETURNING views",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profile_videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Counters shown on a profile page. Video counters cover active videos only.
    pub async fn stats(pool: &PgPool, user_id: DbId) -> Result<ProfileStats, sqlx::Error> {
        sqlx::query_as::<_, ProfileStats>(
            "SELECT
                (SELECT COUNT(*) FROM profile_videos WHERE user_id = $1 AND is_active)
                    AS video_count,
                (SELECT COALESCE(SUM(views), 0)::BIGINT FROM profile_videos
                    WHERE user_id = $1 AND is_active) AS total_views,
                (SELECT COUNT(*) FROM follows WHERE followee_id = $1) AS follower_count,
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1) AS following_count,
                (SELECT COUNT(*) FROM videos WHERE actor_id = $1) AS submission_count",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
