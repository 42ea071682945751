use std::collections::HashMap;

use actory_core::types::{DbId, Timestamp};
use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, Mutex, RwLock};

use super::protocol::{ClientEvent, ServerEvent};
use super::rooms::{Delivery, Registry};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type CallSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single call socket.
pub struct CallConnection {
    /// Authenticated user, when the socket was opened with a valid token.
    pub user_id: Option<DbId>,
    /// Channel sender for outbound messages to this connection.
    pub sender: CallSender,
    pub connected_at: Timestamp,
}

/// Owns the room registry and the outbox of every connected call socket.
///
/// Room transitions run under one async mutex and their deliveries are queued
/// before it is released, so each outbox receives frames in transition order.
/// Locks are always taken registry first, then connections.
pub struct SignalingHub {
    registry: Mutex<Registry>,
    connections: RwLock<HashMap<String, CallConnection>>,
}

impl SignalingHub {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new socket and greet it with its connection id.
    ///
    /// Returns the receiver half of the outbox so the caller can forward
    /// messages to the WebSocket sink.
    pub async fn connect(
        &self,
        conn_id: &str,
        user_id: Option<DbId>,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut registry = self.registry.lock().await;
        registry.connect(conn_id, user_id.map(serde_json::Value::from));

        let mut conns = self.connections.write().await;
        conns.insert(
            conn_id.to_string(),
            CallConnection {
                user_id,
                sender: tx,
                connected_at: chrono::Utc::now(),
            },
        );
        deliver(
            &conns,
            vec![Delivery {
                to: conn_id.to_string(),
                event: ServerEvent::Connected {
                    socket_id: conn_id.to_string(),
                },
            }],
        );
        rx
    }

    /// Parse one inbound text frame and apply it.
    pub async fn dispatch(&self, conn_id: &str, text: &str) {
        let mut registry = self.registry.lock().await;
        let deliveries = match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => {
                tracing::debug!(conn_id = %conn_id, ?event, "Signaling event");
                registry.handle(conn_id, event)
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "Malformed signaling frame");
                vec![Delivery {
                    to: conn_id.to_string(),
                    event: ServerEvent::Error {
                        message: "Malformed signaling message".into(),
                    },
                }]
            }
        };
        deliver(&*self.connections.read().await, deliveries);
    }

    /// Remove a socket from all rooms and drop its outbox.
    pub async fn disconnect(&self, conn_id: &str) {
        let mut registry = self.registry.lock().await;
        let deliveries = registry.disconnect(conn_id);

        let mut conns = self.connections.write().await;
        if let Some(conn) = conns.remove(conn_id) {
            tracing::debug!(
                conn_id = %conn_id,
                user_id = ?conn.user_id,
                connected_secs = (chrono::Utc::now() - conn.connected_at).num_seconds(),
                remaining = conns.len(),
                "Removed call connection",
            );
        }
        deliver(&conns, deliveries);
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn room_count(&self) -> usize {
        self.registry.lock().await.room_count()
    }

    /// Send a Close frame to every connection, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut registry = self.registry.lock().await;
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        *registry = Registry::new();
        tracing::info!(count, "Closed all call connections");
    }

    /// Send a Ping frame to every connected client.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for SignalingHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode each delivery and queue it on the recipient's outbox.
fn deliver(conns: &HashMap<String, CallConnection>, deliveries: Vec<Delivery>) {
    for Delivery { to, event } in deliveries {
        let Some(conn) = conns.get(&to) else {
            tracing::debug!(conn_id = %to, "Dropping frame for closed connection");
            continue;
        };
        match serde_json::to_string(&event) {
            Ok(text) => {
                let _ = conn.sender.send(Message::Text(text.into()));
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode signaling frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::*;

    fn text(msg: Message) -> Value {
        match msg {
            Message::Text(t) => serde_json::from_str(t.as_str()).unwrap(),
            other => panic!("expected text frame, got {other:?}"),
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Message>) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            frames.push(text(msg));
        }
        frames
    }

    #[tokio::test]
    async fn connect_greets_with_socket_id() {
        let hub = SignalingHub::new();
        let mut rx = hub.connect("c1", Some(5)).await;
        let hello = text(rx.recv().await.unwrap());
        assert_eq!(hello["event"], "vc:connected");
        assert_eq!(hello["data"]["socketId"], "c1");
        assert_eq!(hub.connection_count().await, 1);
    }

    #[tokio::test]
    async fn create_then_disconnect_cleans_up() {
        let hub = SignalingHub::new();
        let mut rx = hub.connect("c1", None).await;
        rx.recv().await.unwrap();

        hub.dispatch("c1", r#"{"event":"vc:create","data":{"user":{"name":"Host"}}}"#)
            .await;
        let created = text(rx.recv().await.unwrap());
        assert_eq!(created["event"], "vc:created");
        assert_eq!(created["data"]["admin"], true);
        assert_eq!(hub.room_count().await, 1);

        hub.disconnect("c1").await;
        assert_eq!(hub.room_count().await, 0);
        assert_eq!(hub.connection_count().await, 0);
    }

    #[tokio::test]
    async fn malformed_frame_yields_error_event() {
        let hub = SignalingHub::new();
        let mut rx = hub.connect("c1", None).await;
        rx.recv().await.unwrap();

        hub.dispatch("c1", "not json").await;
        let err = text(rx.recv().await.unwrap());
        assert_eq!(err["event"], "vc:error");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_joins_reach_members_in_transition_order() {
        const JOINERS: usize = 8;
        let hub = Arc::new(SignalingHub::new());

        let mut admin_rx = hub.connect("host", None).await;
        hub.dispatch("host", r#"{"event":"vc:create","data":{}}"#).await;
        let created = drain(&mut admin_rx)
            .into_iter()
            .find(|f| f["event"] == "vc:created")
            .unwrap();
        let room = created["data"]["roomId"].as_str().unwrap().to_string();

        let admit = |id: String| {
            let hub = Arc::clone(&hub);
            let room = room.clone();
            async move {
                let rx = hub.connect(&id, None).await;
                let request = json!({ "event": "vc:request-join", "data": { "roomId": room } });
                hub.dispatch(&id, &request.to_string()).await;
                let approve = json!({
                    "event": "vc:approve",
                    "data": { "roomId": room, "socketId": id },
                });
                hub.dispatch("host", &approve.to_string()).await;
                rx
            }
        };

        let mut member_rx = admit("member".into()).await;
        let join = json!({ "event": "vc:join", "data": { "roomId": room } }).to_string();
        hub.dispatch("member", &join).await;

        let mut joiner_rx = Vec::new();
        for i in 0..JOINERS {
            joiner_rx.push(admit(format!("j{i}")).await);
        }
        drain(&mut member_rx);

        let tasks: Vec<_> = (0..JOINERS)
            .map(|i| {
                let hub = Arc::clone(&hub);
                let join = join.clone();
                tokio::spawn(async move { hub.dispatch(&format!("j{i}"), &join).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let announced: Vec<String> = drain(&mut member_rx)
            .into_iter()
            .filter(|f| f["event"] == "vc:user-joined")
            .map(|f| f["data"]["socketId"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(announced.len(), JOINERS);

        // Whoever was announced earlier must already be in a later joiner's list.
        for pair in announced.windows(2) {
            let later: usize = pair[1][1..].parse().unwrap();
            let list = drain(&mut joiner_rx[later])
                .into_iter()
                .find(|f| f["event"] == "vc:participants-list")
                .unwrap();
            let ids: Vec<&str> = list["data"]["participants"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["socketId"].as_str().unwrap())
                .collect();
            assert!(ids.contains(&pair[0].as_str()), "{} missing from {ids:?}", pair[0]);
        }
    }
}
