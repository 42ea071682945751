use std::sync::Arc;

use actory_core::types::DbId;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::middleware::auth::MaybeAuthUser;
use crate::signaling::hub::SignalingHub;
use crate::state::AppState;

/// GET /api/v1/ws/calls
///
/// Upgrades to the call signaling socket. A valid `?token=` attaches the
/// signed-in user to the connection; anonymous guests are allowed.
pub async fn call_ws_handler(
    ws: WebSocketUpgrade,
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let user_id = auth.map(|a| a.user_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state.signaling, user_id))
}

/// Manage a single call socket after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with the hub.
///   2. Spawns a sender task that forwards messages from the outbox.
///   3. Dispatches inbound text frames on the current task.
///   4. Runs disconnect bookkeeping on close.
async fn handle_socket(socket: WebSocket, hub: Arc<SignalingHub>, user_id: Option<DbId>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, ?user_id, "Call socket connected");

    let mut rx = hub.connect(&conn_id, user_id).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "Call socket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Text(text)) => hub.dispatch(&conn_id, text.as_str()).await,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "Call socket receive error");
                break;
            }
        }
    }

    hub.disconnect(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Call socket disconnected");
}
