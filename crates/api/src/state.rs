use std::sync::Arc;

use actory_mailer::EmailDelivery;

use crate::config::ServerConfig;
use crate::signaling::SignalingHub;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: actory_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Video call rooms and the outboxes of connected call clients.
    pub signaling: Arc<SignalingHub>,
    /// SMTP delivery. `None` when `SMTP_HOST` is unset; codes and links are
    /// then only logged.
    pub mailer: Option<Arc<EmailDelivery>>,
}
