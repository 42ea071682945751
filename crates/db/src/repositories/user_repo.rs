//! Repository for the `users` table.

use actory_core::roles::{ROLE_ACTOR, ROLE_PRODUCER};
use actory_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserSummary};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, email, password_hash, role, phone, location, age, \
    gender, experience_level, bio, profile_image, company_name, website, skills, \
    is_email_verified, is_verified, reset_password_token, reset_password_expire, \
    created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (name, email, password_hash, role, phone, location, age, gender,
                 experience_level, bio, company_name, website, skills, is_email_verified)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
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
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by (already normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Case-insensitive substring match on name among actors and producers.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<UserSummary>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, role, profile_image, is_verified
             FROM users
             WHERE name ILIKE $1 AND role IN ($2, $3)
             ORDER BY name
             LIMIT 50",
        )
        .bind(pattern)
        .bind(ROLE_ACTOR)
        .bind(ROLE_PRODUCER)
        .fetch_all(pool)
        .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                phone = COALESCE($4, phone),
                location = COALESCE($5, location),
                age = COALESCE($6, age),
                gender = COALESCE($7, gender),
                experience_level = COALESCE($8, experience_level),
                bio = COALESCE($9, bio),
                company_name = COALESCE($10, company_name),
                website = COALESCE($11, website),
                skills = COALESCE($12, skills),
                is_verified = COALESCE($13, is_verified)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
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
            .bind(input.is_verified)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a user. Owned rows cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the password hash and clear any outstanding reset token.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                password_hash = $2,
                reset_password_token = NULL,
                reset_password_expire = NULL
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store (or clear, with `None`) the hashed reset token and its expiry.
    pub async fn set_reset_token(
        pool: &PgPool,
        id: DbId,
        token_hash: Option<&str>,
        expires_at: Option<Timestamp>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET reset_password_token = $2, reset_password_expire = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find the user holding an unexpired reset token with the given hash.
    pub async fn find_by_reset_token(
        pool: &PgPool,
        token_hash: &str,
        now: Timestamp,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE reset_password_token = $1 AND reset_password_expire > $2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(token_hash)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_profile_image(
        pool: &PgPool,
        id: DbId,
        profile_image: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET profile_image = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(profile_image)
            .fetch_optional(pool)
            .await
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
