//! Repository for the `videos` (audition submission) table.

use actory_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, UpdateVideo, Video, VideoWithContext};

const COLUMNS: &str = "id, title, video_url, media_public_id, portfolio_url, actor_id, \
    casting_call_id, height_cm, weight_kg, age, skin_tone, skills, permanent_address, \
    living_city, date_of_birth, phone_number, email, status, views, created_at, updated_at";

const CONTEXT_SELECT: &str = "SELECT v.id, v.title, v.video_url, v.media_public_id, \
    v.portfolio_url, v.actor_id, v.casting_call_id, v.height_cm, v.weight_kg, v.age, \
    v.skin_tone, v.skills, v.permanent_address, v.living_city, v.date_of_birth, \
    v.phone_number, v.email, v.status, v.views, v.created_at, v.updated_at, \
    u.name AS actor_name, u.email AS actor_email, c.role_name \
    FROM videos v \
    JOIN users u ON u.id = v.actor_id \
    JOIN casting_calls c ON c.id = v.casting_call_id";

pub struct VideoRepo;

impl VideoRepo {
    pub async fn create(
        pool: &PgPool,
        actor_id: DbId,
        casting_call_id: DbId,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos
                (title, video_url, media_public_id, portfolio_url, actor_id, casting_call_id,
                 height_cm, weight_kg, age, skin_tone, skills, permanent_address, living_city,
                 date_of_birth, phone_number, email)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.video_url)
            .bind(&input.media_public_id)
            .bind(&input.portfolio_url)
            .bind(actor_id)
            .bind(casting_call_id)
            .bind(input.height_cm)
            .bind(input.weight_kg)
            .bind(input.age)
            .bind(&input.skin_tone)
            .bind(&input.skills)
            .bind(&input.permanent_address)
            .bind(&input.living_city)
            .bind(input.date_of_birth)
            .bind(&input.phone_number)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Submissions for one casting call, newest first.
    pub async fn list_for_call(
        pool: &PgPool,
        casting_call_id: DbId,
    ) -> Result<Vec<VideoWithContext>, sqlx::Error> {
        let query = format!(
            "{CONTEXT_SELECT} WHERE v.casting_call_id = $1 ORDER BY v.created_at DESC, v.id DESC"
        );
        sqlx::query_as::<_, VideoWithContext>(&query)
            .bind(casting_call_id)
            .fetch_all(pool)
            .await
    }

    /// An actor's own submissions, newest first.
    pub async fn list_for_actor(
        pool: &PgPool,
        actor_id: DbId,
    ) -> Result<Vec<VideoWithContext>, sqlx::Error> {
        let query =
            format!("{CONTEXT_SELECT} WHERE v.actor_id = $1 ORDER BY v.created_at DESC, v.id DESC");
        sqlx::query_as::<_, VideoWithContext>(&query)
            .bind(actor_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<VideoWithContext>, sqlx::Error> {
        let query = format!("{CONTEXT_SELECT} ORDER BY v.created_at DESC, v.id DESC");
        sqlx::query_as::<_, VideoWithContext>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("UPDATE videos SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Moderation patch. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                portfolio_url = COALESCE($3, portfolio_url),
                status = COALESCE($4, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.portfolio_url)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
