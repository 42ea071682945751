//! Repository for the `follows` table. Both operations are idempotent.

use actory_core::types::DbId;
use sqlx::PgPool;

pub struct FollowRepo;

impl FollowRepo {
    pub async fn follow(
        pool: &PgPool,
        follower_id: DbId,
        followee_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO follows (follower_id, followee_id) VALUES ($1, $2)
             ON CONFLICT (follower_id, followee_id) DO NOTHING",
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn unfollow(
        pool: &PgPool,
        follower_id: DbId,
        followee_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
            .bind(follower_id)
            .bind(followee_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn is_following(
        pool: &PgPool,
        follower_id: DbId,
        followee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)",
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(pool)
        .await
    }
}
