//! Wire protocol message types.
//!
//! Every message is a single JSON text frame with a `type` discriminator.
//! The `data` payload of `signal` messages (session descriptions, ICE
//! candidates) is never inspected; it is carried as a raw JSON value and
//! re-encoded verbatim on forward.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::PeerId;

/// Client-to-server message types.
///
/// Clients may attach extra fields (the reference client sends `roomId`
/// on `signal` and `leave`); unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Bind the connection to a room.
    #[serde(rename_all = "camelCase")]
    Join {
        /// Target room; absent or empty means the default room.
        #[serde(default)]
        room_id: Option<String>,
    },
    /// Forward an opaque negotiation payload to one peer in the
    /// sender's room.
    Signal {
        /// Identity of the receiving peer.
        #[serde(default)]
        target: Option<String>,
        /// Opaque payload, forwarded untouched.
        #[serde(default)]
        data: Value,
    },
    /// Broadcast a text message to the rest of the room.
    Chat {
        /// Message body.
        text: String,
    },
    /// Detach from the current room.
    Leave,
}

/// Server-to-client message types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Reply to a joining peer: the other members already in the room.
    Participants {
        /// Identities of the other current members.
        ids: Vec<PeerId>,
    },
    /// Broadcast to a room when a new peer joins it.
    PeerJoined {
        /// Identity of the new peer.
        id: PeerId,
    },
    /// Broadcast to a room when a peer leaves or disconnects.
    PeerLeft {
        /// Identity of the departed peer.
        id: PeerId,
    },
    /// A relayed negotiation payload.
    Signal {
        /// Identity of the sending peer.
        from: PeerId,
        /// Opaque payload, forwarded untouched.
        data: Value,
    },
    /// A relayed chat message.
    Chat {
        /// Identity of the sending peer.
        from: PeerId,
        /// Message body.
        text: String,
    },
}
