//! Route definitions for the `/messages` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`. All require authentication.
///
/// ```text
/// POST   /                      -> send
/// GET    /conversations         -> conversations
/// GET    /unread-count          -> unread_count
/// GET    /{id}                  -> get_conversation (conversation id; participants only)
/// PUT    /{id}/read             -> mark_read (message id; recipient only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(messages::send))
        .route("/conversations", get(messages::conversations))
        .route("/unread-count", get(messages::unread_count))
        .route("/{id}", get(messages::get_conversation))
        .route("/{id}/read", put(messages::mark_read))
}
