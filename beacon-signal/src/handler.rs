//! WebSocket transport binding.
//!
//! One task per accepted connection. Outbound messages flow through a
//! bounded per-connection channel into a dedicated send task, so the
//! router never blocks on a slow socket; inbound frames are processed
//! in arrival order by the receive loop below.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::identity::PeerId;
use crate::lifecycle::{self, Peer};
use crate::message::ServerMessage;
use crate::state::SignalState;

/// WebSocket upgrade handler for `GET /ws`.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<SignalState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drives one connection from accept to cleanup.
async fn handle_socket(socket: WebSocket, state: Arc<SignalState>) {
    let peer_id = PeerId::generate();
    info!(peer = %peer_id, "connection accepted");

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(state.config.max_queue_size);
    let mut peer = Peer::new(peer_id.clone(), tx);

    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Forward queued server messages to the socket.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!("failed to serialize server message: {e}"),
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                match admit_frame(text.as_bytes(), state.config.max_frame_bytes) {
                    Some(frame) => state.router.handle_frame(&mut peer, frame).await,
                    None => {
                        warn!(peer = %peer_id, len = text.len(), "dropping inadmissible frame");
                    }
                }
            }
            Ok(Message::Binary(data)) => {
                match admit_frame(&data, state.config.max_frame_bytes) {
                    Some(frame) => state.router.handle_frame(&mut peer, frame).await,
                    None => {
                        warn!(peer = %peer_id, len = data.len(), "dropping inadmissible frame");
                    }
                }
            }
            Ok(Message::Close(_)) => {
                debug!(peer = %peer_id, "close frame received");
                break;
            }
            Ok(Message::Ping(_) | Message::Pong(_)) => {}
            Err(e) => {
                debug!(peer = %peer_id, error = %e, "websocket error");
                break;
            }
        }
    }

    // Reached on every exit path; detach is idempotent with an explicit
    // leave that may already have run.
    lifecycle::detach(state.registry(), &mut peer).await;
    send_task.abort();
    info!(peer = %peer_id, "connection closed");
}

/// Frame admission shared by text and binary frames: enforces the
/// configured size limit and requires valid UTF-8.
fn admit_frame(data: &[u8], max_frame_bytes: usize) -> Option<&str> {
    if data.len() > max_frame_bytes {
        return None;
    }
    std::str::from_utf8(data).ok()
}
