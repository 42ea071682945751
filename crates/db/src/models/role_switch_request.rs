//! Actor-to-producer role switch requests.

use actory_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `role_switch_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleSwitchRequest {
    pub id: DbId,
    pub actor_id: DbId,
    pub reason: String,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A request joined with the requesting actor's name and email.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleSwitchRequestWithActor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: RoleSwitchRequest,
    pub actor_name: String,
    pub actor_email: String,
}
