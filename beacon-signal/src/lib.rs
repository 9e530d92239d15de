//! # Beacon Signal
//!
//! Signaling coordinator for the Beacon rendezvous relay.
//!
//! Browser peers connect over a WebSocket, join a named room, and
//! exchange WebRTC negotiation payloads (session descriptions, ICE
//! candidates) and small chat messages through the relay. The relay
//! never inspects negotiation payloads; it only routes them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Signaling Relay                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐              │
//! │  │ Peer #1  │   │ Peer #2  │   │ Peer #3  │   ...        │
//! │  └────┬─────┘   └────┬─────┘   └────┬─────┘              │
//! │       │              │              │                    │
//! │       └──────────────┼──────────────┘                    │
//! │                      ▼                                   │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                 Message Router                     │  │
//! │  │  join → roster reply + peer-joined broadcast       │  │
//! │  │  signal → targeted forward, payload untouched      │  │
//! │  │  chat → room broadcast                             │  │
//! │  │  leave → detach + peer-left broadcast              │  │
//! │  └────────────────────────┬───────────────────────────┘  │
//! │                           ▼                              │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                 Room Registry                      │  │
//! │  │  room id → member identities and send handles      │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol
//!
//! Every frame is a JSON object with a `type` discriminator:
//!
//! - `{"type":"join","roomId":"r1"}` — bind to a room (`"lobby"` when
//!   `roomId` is absent or empty)
//! - `{"type":"signal","target":"<id>","data":{...}}` — forward an
//!   opaque payload to one peer in the sender's room
//! - `{"type":"chat","text":"..."}` — broadcast text to the room
//! - `{"type":"leave"}` — detach from the current room
//!
//! Delivery is best effort: unparsable frames, absent targets, and
//! closed sockets all degrade to silent drops. The protocol has no
//! error message type.

#![warn(missing_docs)]

pub mod config;
pub mod handler;
pub mod identity;
pub mod lifecycle;
pub mod message;
pub mod registry;
pub mod router;
pub mod routes;
pub mod state;

pub use config::SignalConfig;
pub use identity::PeerId;
pub use lifecycle::{Peer, PeerState};
pub use message::{ClientMessage, ServerMessage};
pub use registry::{RoomInfo, RoomRegistry};
pub use router::MessageRouter;
pub use routes::create_router;
pub use state::SignalState;
