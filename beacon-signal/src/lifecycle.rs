//! Connection lifecycle state machine.
//!
//! Each connection is either unjoined or joined to exactly one room.
//! Transitions happen only here; the router never mutates room state
//! directly. `detach` is idempotent, which makes an explicit `leave`
//! followed by the transport-close cleanup produce a single `peer-left`
//! broadcast.

use tracing::debug;

use crate::identity::PeerId;
use crate::message::ServerMessage;
use crate::registry::{PeerSender, RoomRegistry};

/// Room binding of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerState {
    /// Not a member of any room.
    Unjoined,
    /// Member of the named room.
    Joined(String),
}

/// One accepted transport session.
///
/// Owned exclusively by its connection task; only the send handle is
/// shared (through the registry) with other tasks.
#[derive(Debug)]
pub struct Peer {
    id: PeerId,
    state: PeerState,
    sender: PeerSender,
}

impl Peer {
    /// Creates an unjoined peer.
    #[must_use]
    pub fn new(id: PeerId, sender: PeerSender) -> Self {
        Self {
            id,
            state: PeerState::Unjoined,
            sender,
        }
    }

    /// The peer's identity.
    #[must_use]
    pub fn id(&self) -> &PeerId {
        &self.id
    }

    /// The peer's current room binding.
    #[must_use]
    pub fn state(&self) -> &PeerState {
        &self.state
    }

    /// The room the peer is currently joined to, if any.
    #[must_use]
    pub fn current_room(&self) -> Option<&str> {
        match &self.state {
            PeerState::Unjoined => None,
            PeerState::Joined(room_id) => Some(room_id),
        }
    }

    /// The peer's outbound send handle.
    #[must_use]
    pub fn sender(&self) -> &PeerSender {
        &self.sender
    }
}

/// Binds `peer` to `room_id`, detaching it from any previous room first.
/// Re-joining the current room refreshes the membership entry without a
/// `peer-left` round trip.
///
/// Returns a snapshot of the identities already present in the new room.
pub async fn join(registry: &RoomRegistry, peer: &mut Peer, room_id: String) -> Vec<PeerId> {
    if peer.current_room() != Some(room_id.as_str()) {
        detach(registry, peer).await;
    }
    let others = registry.join(&room_id, peer.id.clone(), peer.sender.clone());
    peer.state = PeerState::Joined(room_id);
    others
}

/// Detaches `peer` from its current room and notifies the remaining
/// members with `peer-left`.
///
/// A peer that is already unjoined is left as-is.
pub async fn detach(registry: &RoomRegistry, peer: &mut Peer) {
    let PeerState::Joined(room_id) = std::mem::replace(&mut peer.state, PeerState::Unjoined)
    else {
        return;
    };

    registry.leave(&room_id, &peer.id);
    debug!(peer = %peer.id, room = %room_id, "peer detached from room");

    let departed = ServerMessage::PeerLeft {
        id: peer.id.clone(),
    };
    for (member, sender) in registry.peers_except(&room_id, &peer.id) {
        if sender.send(departed.clone()).await.is_err() {
            debug!(peer = %member, room = %room_id, "dropping peer-left for closed connection");
        }
    }
}
