//! Route definitions for the `/profile` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET    /me                  -> get_me (auth)
/// PUT    /me                  -> update_me (auth)
/// GET    /search              -> search (public, ?username=)
/// POST   /videos              -> add_video (actor)
/// PUT    /videos/{id}/view    -> record_view (public)
/// DELETE /videos/{id}         -> delete_video (admin)
/// GET    /{id}                -> get_public (public, optional auth)
/// POST   /{id}/follow         -> follow (auth)
/// DELETE /{id}/unfollow       -> unfollow (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile::get_me).put(profile::update_me))
        .route("/search", get(profile::search))
        .route("/videos", post(profile::add_video))
        .route("/videos/{id}/view", put(profile::record_view))
        .route("/videos/{id}", delete(profile::delete_video))
        .route("/{id}", get(profile::get_public))
        .route("/{id}/follow", post(profile::follow))
        .route("/{id}/unfollow", delete(profile::unfollow))
}
