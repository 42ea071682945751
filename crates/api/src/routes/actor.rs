//! Route definitions for the `/actor` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::actor;
use crate::state::AppState;

/// Routes mounted at `/actor`.
///
/// ```text
/// POST   /request-switch     -> request_switch (actor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/request-switch", post(actor::request_switch))
}
