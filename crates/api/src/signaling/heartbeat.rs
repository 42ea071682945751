use std::sync::Arc;
use std::time::Duration;

use crate::signaling::hub::SignalingHub;

/// Interval between heartbeat pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn a background task that pings every call socket periodically.
///
/// The returned `JoinHandle` is aborted during shutdown.
pub fn start_heartbeat(hub: Arc<SignalingHub>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            interval.tick().await;
            let count = hub.connection_count().await;
            tracing::debug!(count, "Call socket heartbeat ping");
            hub.ping_all().await;
        }
    })
}
