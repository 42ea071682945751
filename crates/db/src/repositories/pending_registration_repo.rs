//! Repository for the `pending_registrations` table.

use actory_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::pending_registration::{PendingRegistration, UpsertPendingRegistration};
use crate::models::user::User;
use crate::repositories::user_repo::COLUMNS as USER_COLUMNS;

const COLUMNS: &str = "id, email, name, password_hash, role, phone, location, age, gender, \
    experience_level, bio, company_name, website, skills, otp, expire_at, created_at, updated_at";

/// Holds sign-ups between `register` and `verify-email`.
pub struct PendingRegistrationRepo;

impl PendingRegistrationRepo {
    /// Insert or replace the pending registration for an email.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertPendingRegistration,
    ) -> Result<PendingRegistration, sqlx::Error> {
        let u = &input.user;
        let query = format!(
            "INSERT INTO pending_registrations
                (email, name, password_hash, role, phone, location, age, gender,
                 experience_level, bio, company_name, website, skills, otp, expire_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             ON CONFLICT (email) DO UPDATE SET
                name = EXCLUDED.name,
                password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role,
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                experience_level = EXCLUDED.experience_level,
                bio = EXCLUDED.bio,
                company_name = EXCLUDED.company_name,
                website = EXCLUDED.website,
                skills = EXCLUDED.skills,
                otp = EXCLUDED.otp,
                expire_at = EXCLUDED.expire_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PendingRegistration>(&query)
            .bind(&u.email)
            .bind(&u.name)
            .bind(&u.password_hash)
            .bind(&u.role)
            .bind(&u.phone)
            .bind(&u.location)
            .bind(u.age)
            .bind(&u.gender)
            .bind(&u.experience_level)
            .bind(&u.bio)
            .bind(&u.company_name)
            .bind(&u.website)
            .bind(&u.skills)
            .bind(&input.otp)
            .bind(input.expire_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<PendingRegistration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pending_registrations WHERE email = $1");
        sqlx::query_as::<_, PendingRegistration>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replace the code and expiry of an existing pending registration.
    ///
    /// Returns `None` when no registration is pending for the email.
    pub async fn refresh_otp(
        pool: &PgPool,
        email: &str,
        otp: &str,
        expire_at: Timestamp,
    ) -> Result<Option<PendingRegistration>, sqlx::Error> {
        let query = format!(
            "UPDATE pending_registrations SET otp = $2, expire_at = $3
             WHERE email = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PendingRegistration>(&query)
            .bind(email)
            .bind(otp)
            .bind(expire_at)
            .fetch_optional(pool)
            .await
    }

    /// Turn a matching, unexpired pending registration into a verified user.
    ///
    /// Runs in one transaction: the pending row is locked, the user inserted
    /// and the pending row deleted. Returns `None` when the email/code pair
    /// does not match or has expired.
    pub async fn confirm(
        pool: &PgPool,
        email: &str,
        otp: &str,
        now: Timestamp,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM pending_registrations
             WHERE email = $1 AND otp = $2 AND expire_at > $3
             FOR UPDATE"
        );
        let Some(pending) = sqlx::query_as::<_, PendingRegistration>(&query)
            .bind(email)
            .bind(otp)
            .bind(now)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let pending_id = pending.id;
        let input = pending.into_create_user();
        let insert = format!(
            "INSERT INTO users
                (name, email, password_hash, role, phone, location, age, gender,
                 experience_level, bio, company_name, website, skills, is_email_verified)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&insert)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.phone)
            .bind(&input.location)
            .bind(input.age)
            .bind(&input.gender)
            .bind(&input.experience_level)
            .bind(&input.bio)
            .bind(&input.company_name)
            .bind(&input.website)
            .bind(&input.skills)
            .bind(input.is_email_verified)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM pending_registrations WHERE id = $1")
            .bind(pending_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(user))
    }

    /// Purge registrations whose code has expired. Returns the number removed.
    pub async fn delete_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pending_registrations WHERE expire_at <= $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
