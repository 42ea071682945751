//! Route definitions for the `/videos` resource.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// ```text
/// GET    /mine               -> mine (actor)
/// GET    /upload-signature   -> upload_signature (actor)
/// PATCH  /{id}/status        -> update_status (producer owning the call)
/// DELETE /{id}               -> delete (owning actor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mine", get(videos::mine))
        .route("/upload-signature", get(videos::upload_signature))
        .route("/{id}/status", patch(videos::update_status))
        .route("/{id}", delete(videos::delete))
}
