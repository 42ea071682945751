//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `Admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /switch-requests                -> list_switch_requests
/// PUT    /switch-requests/{id}/approve   -> approve_switch_request
/// PUT    /switch-requests/{id}/reject    -> reject_switch_request
/// GET    /users                          -> list_users
/// PUT    /users/{id}                     -> update_user
/// DELETE /users/{id}                     -> delete_user
/// GET    /castingcalls                   -> list_casting_calls
/// PUT    /castingcalls/{id}              -> update_casting_call
/// DELETE /castingcalls/{id}              -> delete_casting_call
/// GET    /videos                         -> list_videos
/// PUT    /videos/{id}                    -> update_video
/// DELETE /videos/{id}                    -> delete_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/switch-requests", get(admin::list_switch_requests))
        .route(
            "/switch-requests/{id}/approve",
            put(admin::approve_switch_request),
        )
        .route(
            "/switch-requests/{id}/reject",
            put(admin::reject_switch_request),
        )
        .route("/users", get(admin::list_users))
        .route(
            "/users/{id}",
            put(admin::update_user).delete(admin::delete_user),
        )
        .route("/castingcalls", get(admin::list_casting_calls))
        .route(
            "/castingcalls/{id}",
            put(admin::update_casting_call).delete(admin::delete_casting_call),
        )
        .route("/videos", get(admin::list_videos))
        .route(
            "/videos/{id}",
            put(admin::update_video).delete(admin::delete_video),
        )
}
