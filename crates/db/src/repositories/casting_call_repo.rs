//! Repository for the `casting_calls` table.

use actory_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::casting_call::{
    CastingCall, CastingCallWithProducer, CreateCastingCall, UpdateCastingCall,
};

const COLUMNS: &str = "id, role_name, description, age_min, age_max, height_min_cm, \
    height_max_cm, location, skills, submission_deadline, audition_date, shoot_start_date, \
    shoot_end_date, producer_id, created_at, updated_at";

/// Casting call columns qualified with `c.` plus the producer's display fields.
const JOINED_COLUMNS: &str = "c.id, c.role_name, c.description, c.age_min, c.age_max, \
    c.height_min_cm, c.height_max_cm, c.location, c.skills, c.submission_deadline, \
    c.audition_date, c.shoot_start_date, c.shoot_end_date, c.producer_id, c.created_at, \
    c.updated_at, u.name AS producer_name, u.company_name AS producer_company";

pub struct CastingCallRepo;

impl CastingCallRepo {
    pub async fn create(
        pool: &PgPool,
        producer_id: DbId,
        input: &CreateCastingCall,
    ) -> Result<CastingCall, sqlx::Error> {
        let query = format!(
            "INSERT INTO casting_calls
                (role_name, description, age_min, age_max, height_min_cm, height_max_cm,
                 location, skills, submission_deadline, audition_date, shoot_start_date,
                 shoot_end_date, producer_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CastingCall>(&query)
            .bind(&input.role_name)
            .bind(&input.description)
            .bind(input.age_min)
            .bind(input.age_max)
            .bind(input.height_min_cm)
            .bind(input.height_max_cm)
            .bind(&input.location)
            .bind(&input.skills)
            .bind(input.submission_deadline)
            .bind(input.audition_date)
            .bind(input.shoot_start_date)
            .bind(input.shoot_end_date)
            .bind(producer_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CastingCall>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM casting_calls WHERE id = $1");
        sqlx::query_as::<_, CastingCall>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a call with producer details, hiding it once the audition has passed.
    pub async fn find_open(
        pool: &PgPool,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<CastingCallWithProducer>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM casting_calls c JOIN users u ON u.id = c.producer_id
             WHERE c.id = $1 AND c.audition_date >= $2"
        );
        sqlx::query_as::<_, CastingCallWithProducer>(&query)
            .bind(id)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Public listing: calls whose audition has not passed, soonest first.
    pub async fn list_open(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<CastingCallWithProducer>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM casting_calls c JOIN users u ON u.id = c.producer_id
             WHERE c.audition_date >= $1
             ORDER BY c.audition_date ASC, c.id ASC"
        );
        sqlx::query_as::<_, CastingCallWithProducer>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Every call regardless of dates, newest first (moderation view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CastingCallWithProducer>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM casting_calls c JOIN users u ON u.id = c.producer_id
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, CastingCallWithProducer>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a call. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCastingCall,
    ) -> Result<Option<CastingCall>, sqlx::Error> {
        let query = format!(
            "UPDATE casting_calls SET
                role_name = COALESCE($2, role_name),
                description = COALESCE($3, description),
                age_min = COALESCE($4, age_min),
                age_max = COALESCE($5, age_max),
                height_min_cm = COALESCE($6, height_min_cm),
                height_max_cm = COALESCE($7, height_max_cm),
                location = COALESCE($8, location),
                skills = COALESCE($9, skills),
                submission_deadline = COALESCE($10, submission_deadline),
                audition_date = COALESCE($11, audition_date),
                shoot_start_date = COALESCE($12, shoot_start_date),
                shoot_end_date = COALESCE($13, shoot_end_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CastingCall>(&query)
            .bind(id)
            .bind(&input.role_name)
            .bind(&input.description)
            .bind(input.age_min)
            .bind(input.age_max)
            .bind(input.height_min_cm)
            .bind(input.height_max_cm)
            .bind(&input.location)
            .bind(&input.skills)
            .bind(input.submission_deadline)
            .bind(input.audition_date)
            .bind(input.shoot_start_date)
            .bind(input.shoot_end_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a call and, through the foreign key, its submissions.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM casting_calls WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove calls whose shoot has finished. Returns the number removed.
    pub async fn delete_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM casting_calls WHERE shoot_end_date < $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
