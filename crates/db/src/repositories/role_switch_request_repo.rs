//! Repository for the `role_switch_requests` table.

use actory_core::role_switch::SwitchStatus;
use actory_core::roles::ROLE_PRODUCER;
use actory_core::types::DbId;
use sqlx::PgPool;

use crate::models::role_switch_request::{RoleSwitchRequest, RoleSwitchRequestWithActor};

const COLUMNS: &str =
    "id, actor_id, reason, status, reviewed_by, reviewed_at, created_at, updated_at";

pub struct RoleSwitchRequestRepo;

impl RoleSwitchRequestRepo {
    /// Open a new pending request. A second pending request for the same actor
    /// violates `uq_role_switch_requests_pending`.
    pub async fn create(
        pool: &PgPool,
        actor_id: DbId,
        reason: &str,
    ) -> Result<RoleSwitchRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO role_switch_requests (actor_id, reason)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoleSwitchRequest>(&query)
            .bind(actor_id)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RoleSwitchRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM role_switch_requests WHERE id = $1");
        sqlx::query_as::<_, RoleSwitchRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_pending_for_actor(
        pool: &PgPool,
        actor_id: DbId,
    ) -> Result<Option<RoleSwitchRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM role_switch_requests
             WHERE actor_id = $1 AND status = 'Pending'"
        );
        sqlx::query_as::<_, RoleSwitchRequest>(&query)
            .bind(actor_id)
            .fetch_optional(pool)
            .await
    }

    /// All requests with the requesting actor, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<RoleSwitchRequestWithActor>, sqlx::Error> {
        sqlx::query_as::<_, RoleSwitchRequestWithActor>(
            "SELECT r.id, r.actor_id, r.reason, r.status, r.reviewed_by, r.reviewed_at,
                    r.created_at, r.updated_at,
                    u.name AS actor_name, u.email AS actor_email
             FROM role_switch_requests r
             JOIN users u ON u.id = r.actor_id
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Close a pending request with `outcome`, stamping the reviewer.
    ///
    /// An approval also promotes the actor to Producer in the same
    /// transaction. Returns `None` if the request was no longer pending.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        outcome: SwitchStatus,
        reviewer_id: DbId,
    ) -> Result<Option<RoleSwitchRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE role_switch_requests SET
                status = $2,
                reviewed_by = $3,
                reviewed_at = NOW()
             WHERE id = $1 AND status = 'Pending'
             RETURNING {COLUMNS}"
        );
        let Some(request) = sqlx::query_as::<_, RoleSwitchRequest>(&query)
            .bind(id)
            .bind(outcome.as_str())
            .bind(reviewer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if outcome == SwitchStatus::Approved {
            sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
                .bind(request.actor_id)
                .bind(ROLE_PRODUCER)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(request))
    }
}
