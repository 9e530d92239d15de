//! Inbound frame dispatch.
//!
//! The router is a dispatch table keyed on the message `type`. It does
//! no validation beyond parsing: malformed frames, absent targets, and
//! closed receivers all degrade to logged no-ops. No error is ever
//! surfaced back across the wire.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::SignalConfig;
use crate::identity::PeerId;
use crate::lifecycle::{self, Peer};
use crate::message::{ClientMessage, ServerMessage};
use crate::registry::RoomRegistry;

/// Dispatches parsed client messages against the room registry.
#[derive(Debug)]
pub struct MessageRouter {
    registry: Arc<RoomRegistry>,
    default_room: String,
}

impl MessageRouter {
    /// Creates a router over `registry`.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>, config: &SignalConfig) -> Self {
        Self {
            registry,
            default_room: config.default_room.clone(),
        }
    }

    /// The shared room registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Handles one inbound text frame from `peer`.
    pub async fn handle_frame(&self, peer: &mut Peer, frame: &str) {
        let msg = match serde_json::from_str::<ClientMessage>(frame) {
            Ok(msg) => msg,
            Err(e) => {
                debug!(peer = %peer.id(), error = %e, "dropping unparsable frame");
                return;
            }
        };

        match msg {
            ClientMessage::Join { room_id } => self.handle_join(peer, room_id).await,
            ClientMessage::Signal { target, data } => {
                self.handle_signal(peer, target, data).await;
            }
            ClientMessage::Chat { text } => self.handle_chat(peer, text).await,
            ClientMessage::Leave => lifecycle::detach(&self.registry, peer).await,
        }
    }

    async fn handle_join(&self, peer: &mut Peer, room_id: Option<String>) {
        let room_id = room_id
            .filter(|room| !room.is_empty())
            .unwrap_or_else(|| self.default_room.clone());

        let others = lifecycle::join(&self.registry, peer, room_id.clone()).await;
        debug!(peer = %peer.id(), room = %room_id, others = others.len(), "peer joined room");

        let roster = ServerMessage::Participants { ids: others };
        let _ = peer.sender().send(roster).await;

        let joined = ServerMessage::PeerJoined {
            id: peer.id().clone(),
        };
        self.broadcast(&room_id, peer.id(), joined).await;
    }

    async fn handle_signal(&self, peer: &Peer, target: Option<String>, data: Value) {
        let Some(room_id) = peer.current_room() else {
            trace!(peer = %peer.id(), "dropping signal from unjoined peer");
            return;
        };
        let Some(target) = target else {
            trace!(peer = %peer.id(), "dropping signal without target");
            return;
        };

        let target = PeerId::from(target);
        let Some(sender) = self.registry.lookup(room_id, &target) else {
            debug!(peer = %peer.id(), %target, room = %room_id, "dropping signal for absent target");
            return;
        };

        let forwarded = ServerMessage::Signal {
            from: peer.id().clone(),
            data,
        };
        let _ = sender.send(forwarded).await;
    }

    async fn handle_chat(&self, peer: &Peer, text: String) {
        let Some(room_id) = peer.current_room() else {
            trace!(peer = %peer.id(), "dropping chat from unjoined peer");
            return;
        };
        let room_id = room_id.to_owned();

        let msg = ServerMessage::Chat {
            from: peer.id().clone(),
            text,
        };
        self.broadcast(&room_id, peer.id(), msg).await;
    }

    /// Best-effort fan-out to every room member except `from`.
    async fn broadcast(&self, room_id: &str, from: &PeerId, msg: ServerMessage) {
        for (member, sender) in self.registry.peers_except(room_id, from) {
            if sender.send(msg.clone()).await.is_err() {
                debug!(peer = %member, room = %room_id, "dropping broadcast for closed connection");
            }
        }
    }
}
