//! WebRTC call signaling relay.
//!
//! - [`protocol`] -- JSON frames exchanged with browsers.
//! - [`rooms`] -- room state machine (admin, members, join approvals).
//! - [`hub`] -- registry plus per-socket outboxes, shared via `AppState`.
//! - [`handler`] -- the WebSocket upgrade endpoint.
//! - [`heartbeat`] -- periodic pings to keep sockets alive.
//!
//! Rooms live in memory only and vanish with the process.

pub mod handler;
pub mod heartbeat;
pub mod hub;
pub mod protocol;
pub mod rooms;

pub use handler::call_ws_handler;
pub use heartbeat::start_heartbeat;
pub use hub::SignalingHub;
