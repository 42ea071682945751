//! Direct message model and conversation summaries.

use actory_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub conversation_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub content: String,
    pub conversation_id: String,
}

/// One row per conversation the caller takes part in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub other_user_id: DbId,
    pub other_user_name: String,
    pub other_user_role: String,
    pub other_user_image: String,
    pub last_message: String,
    pub last_message_at: Timestamp,
    pub last_sender_id: DbId,
    pub message_count: i64,
    pub unread_count: i64,
}
