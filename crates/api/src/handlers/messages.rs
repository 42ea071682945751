//! Direct messaging between users.
//!
//! Conversations are not stored separately; a thread is every message
//! carrying the same derived conversation id.

use actory_core::messaging::{
    conversation_id, is_participant, parse_conversation_id, validate_content, validate_recipient,
};
use actory_core::types::DbId;
use actory_db::models::message::{ConversationSummary, CreateMessage, Message};
use actory_db::repositories::{MessageRepo, UserRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: DbId,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    /// Distinct senders with at least one unread message for the caller.
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/messages
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    validate_recipient(auth.user_id, input.recipient_id)?;
    let content = validate_content(&input.content)?;

    UserRepo::find_by_id(&state.pool, input.recipient_id)
        .await?
        .ok_or(AppError::not_found("User", input.recipient_id))?;

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            sender_id: auth.user_id,
            recipient_id: input.recipient_id,
            content,
            conversation_id: conversation_id(auth.user_id, input.recipient_id),
        },
    )
    .await?;

    tracing::debug!(
        message_id = message.id,
        conversation_id = %message.conversation_id,
        "Message sent",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(message))))
}

/// GET /api/v1/messages/conversations
pub async fn conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ListResponse<ConversationSummary>>> {
    let list = MessageRepo::conversations(&state.pool, auth.user_id).await?;
    Ok(Json(ListResponse::new(list)))
}

/// GET /api/v1/messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = MessageRepo::unread_sender_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse::new(UnreadCount { count })))
}

/// GET /api/v1/messages/{conversation_id}
///
/// Marks the caller's incoming messages in the thread as read before
/// returning it oldest first.
pub async fn get_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation): Path<String>,
) -> AppResult<Json<ListResponse<Message>>> {
    parse_conversation_id(&conversation)?;
    if !is_participant(&conversation, auth.user_id) {
        return Err(AppError::forbidden(
            "Not authorized to view this conversation",
        ));
    }

    MessageRepo::mark_conversation_read(&state.pool, &conversation, auth.user_id).await?;
    let messages = MessageRepo::list_conversation(&state.pool, &conversation).await?;
    Ok(Json(ListResponse::new(messages)))
}

/// PUT /api/v1/messages/{message_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Message>>> {
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Message", id))?;
    if message.recipient_id != auth.user_id {
        return Err(AppError::forbidden(
            "Not authorized to mark this message as read",
        ));
    }

    let message = MessageRepo::mark_read(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Message", id))?;
    Ok(Json(DataResponse::new(message)))
}
