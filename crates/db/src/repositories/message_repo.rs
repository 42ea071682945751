//! Repository for the `messages` table.

use actory_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{ConversationSummary, CreateMessage, Message};

const COLUMNS: &str = "id, sender_id, recipient_id, content, is_read, read_at, \
    conversation_id, created_at, updated_at";

pub struct MessageRepo;

impl MessageRepo {
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (sender_id, recipient_id, content, conversation_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.sender_id)
            .bind(input.recipient_id)
            .bind(&input.content)
            .bind(&input.conversation_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A whole thread, oldest first.
    pub async fn list_conversation(
        pool: &PgPool,
        conversation_id: &str,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE conversation_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .fetch_all(pool)
            .await
    }

    /// Mark every unread message addressed to `recipient_id` in a thread as read.
    pub async fn mark_conversation_read(
        pool: &PgPool,
        conversation_id: &str,
        recipient_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true, read_at = NOW()
             WHERE conversation_id = $1 AND recipient_id = $2 AND NOT is_read",
        )
        .bind(conversation_id)
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!(
            "UPDATE messages SET is_read = true, read_at = COALESCE(read_at, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of distinct users with at least one unread message for `user_id`.
    pub async fn unread_sender_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT sender_id) FROM messages
             WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// One summary row per conversation `user_id` takes part in, most recent first.
    pub async fn conversations(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        sqlx::query_as::<_, ConversationSummary>(
            "WITH mine AS (
                SELECT m.*,
                       CASE WHEN m.sender_id = $1 THEN m.recipient_id ELSE m.sender_id END
                           AS other_id
                FROM messages m
                WHERE m.sender_id = $1 OR m.recipient_id = $1
            ),
            ranked AS (
                SELECT conversation_id, other_id, content, created_at, sender_id,
                       ROW_NUMBER() OVER w_latest AS rn,
                       COUNT(*) OVER w_all AS message_count,
                       COUNT(*) FILTER (WHERE recipient_id = $1 AND NOT is_read)
                           OVER w_all AS unread_count
                FROM mine
                WINDOW w_latest AS (PARTITION BY conversation_id ORDER BY created_at DESC, id DESC),
                       w_all AS (PARTITION BY conversation_id)
            )
            SELECT r.conversation_id,
                   r.other_id AS other_user_id,
                   u.name AS other_user_name,
                   u.role AS other_user_role,
                   u.profile_image AS other_user_image,
                   r.content AS last_message,
                   r.created_at AS last_message_at,
                   r.sender_id AS last_sender_id,
                   r.message_count,
                   r.unread_count
            FROM ranked r
            JOIN users u ON u.id = r.other_id
            WHERE r.rn = 1
            ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
