//! Route definitions for the `/casting` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{casting, videos};
use crate::state::AppState;

/// Routes mounted at `/casting`.
///
/// ```text
/// GET    /                -> list_open (public)
/// POST   /                -> create (producer)
/// GET    /{id}            -> get (public, 404 once expired)
/// PUT    /{id}            -> update (owning producer)
/// DELETE /{id}            -> delete (owning producer)
/// GET    /{id}/videos     -> videos::list_for_call (owning producer)
/// POST   /{id}/videos     -> videos::submit (actor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(casting::list_open).post(casting::create))
        .route(
            "/{id}",
            get(casting::get)
                .put(casting::update)
                .delete(casting::delete),
        )
        .route(
            "/{id}/videos",
            get(videos::list_for_call).post(videos::submit),
        )
}
