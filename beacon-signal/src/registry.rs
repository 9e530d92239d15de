//! Room membership registry.
//!
//! The registry is the only state shared between connection tasks. It
//! maps room ids to member identities and their send handles, and it
//! does no network I/O itself: delivery happens in the router and
//! lifecycle layers over snapshots taken here.

use std::collections::HashMap;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::identity::PeerId;
use crate::message::ServerMessage;

/// Sending half of a connection's outbound message queue.
pub type PeerSender = mpsc::Sender<ServerMessage>;

/// A named group of connections eligible to exchange messages.
#[derive(Debug, Default)]
struct Room {
    members: HashMap<PeerId, PeerSender>,
}

/// Read-only room view for operational tooling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    /// Room identifier.
    pub room_id: String,
    /// Number of current members.
    pub member_count: usize,
}

/// Process-wide mapping of room id to membership.
///
/// Rooms are created lazily on first join and removed as soon as their
/// last member leaves; reused room names never leak entries.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Room>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Inserts `sender` under `id` into the room named `room_id`,
    /// creating the room if absent.
    ///
    /// Returns a snapshot of the identities already present, excluding
    /// the joining identity.
    pub fn join(&self, room_id: &str, id: PeerId, sender: PeerSender) -> Vec<PeerId> {
        let mut room = self.rooms.entry(room_id.to_owned()).or_default();
        let others: Vec<PeerId> = room
            .members
            .keys()
            .filter(|member| **member != id)
            .cloned()
            .collect();
        room.members.insert(id, sender);
        others
    }

    /// Removes `id` from the room named `room_id`, dropping the room
    /// when it empties.
    ///
    /// Absent rooms and identities are tolerated silently; double-leave
    /// is a no-op.
    pub fn leave(&self, room_id: &str, id: &PeerId) {
        let emptied = match self.rooms.get_mut(room_id) {
            Some(mut room) => {
                room.members.remove(id);
                room.members.is_empty()
            }
            None => return,
        };
        if emptied {
            // re-checked under the shard lock: a concurrent join wins
            self.rooms
                .remove_if(room_id, |_, room| room.members.is_empty());
        }
    }

    /// Resolves the send handle registered under `id` in `room_id`.
    #[must_use]
    pub fn lookup(&self, room_id: &str, id: &PeerId) -> Option<PeerSender> {
        self.rooms
            .get(room_id)
            .and_then(|room| room.members.get(id).cloned())
    }

    /// Snapshot of the member identities of `room_id`.
    #[must_use]
    pub fn snapshot(&self, room_id: &str) -> Vec<PeerId> {
        self.rooms
            .get(room_id)
            .map(|room| room.members.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Snapshot of members and their send handles, excluding `except`.
    ///
    /// Fan-out iterates this snapshot so no registry lock is held while
    /// sending.
    #[must_use]
    pub fn peers_except(&self, room_id: &str, except: &PeerId) -> Vec<(PeerId, PeerSender)> {
        self.rooms
            .get(room_id)
            .map(|room| {
                room.members
                    .iter()
                    .filter(|(member, _)| *member != except)
                    .map(|(member, sender)| (member.clone(), sender.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Read-only `{roomId, memberCount}` enumeration of all rooms.
    #[must_use]
    pub fn rooms(&self) -> Vec<RoomInfo> {
        self.rooms
            .iter()
            .map(|entry| RoomInfo {
                room_id: entry.key().clone(),
                member_count: entry.value().members.len(),
            })
            .collect()
    }

    /// Number of rooms with at least one member.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> PeerSender {
        mpsc::channel(8).0
    }

    #[test]
    fn test_join_returns_existing_members() {
        let registry = RoomRegistry::new();

        let others = registry.join("r1", PeerId::from("A"), sender());
        assert!(others.is_empty());

        let others = registry.join("r1", PeerId::from("B"), sender());
        assert_eq!(others, vec![PeerId::from("A")]);
    }

    #[test]
    fn test_join_excludes_self_on_rejoin() {
        let registry = RoomRegistry::new();
        registry.join("r1", PeerId::from("A"), sender());

        let others = registry.join("r1", PeerId::from("A"), sender());
        assert!(others.is_empty());
        assert_eq!(registry.snapshot("r1").len(), 1);
    }

    #[test]
    fn test_leave_removes_empty_room() {
        let registry = RoomRegistry::new();
        let id = PeerId::from("A");
        registry.join("r1", id.clone(), sender());
        assert_eq!(registry.room_count(), 1);

        registry.leave("r1", &id);
        assert_eq!(registry.room_count(), 0);
        assert!(registry.snapshot("r1").is_empty());
    }

    #[test]
    fn test_leave_keeps_occupied_room() {
        let registry = RoomRegistry::new();
        let a = PeerId::from("A");
        registry.join("r1", a.clone(), sender());
        registry.join("r1", PeerId::from("B"), sender());

        registry.leave("r1", &a);
        assert_eq!(registry.room_count(), 1);
        assert_eq!(registry.snapshot("r1"), vec![PeerId::from("B")]);
    }

    #[test]
    fn test_leave_tolerates_absent_room_and_identity() {
        let registry = RoomRegistry::new();
        registry.leave("nowhere", &PeerId::from("A"));

        let id = PeerId::from("A");
        registry.join("r1", id.clone(), sender());
        registry.leave("r1", &PeerId::from("B"));
        assert_eq!(registry.snapshot("r1").len(), 1);

        registry.leave("r1", &id);
        registry.leave("r1", &id);
        assert_eq!(registry.room_count(), 0);
    }

    #[test]
    fn test_no_empty_room_survives_any_sequence() {
        let registry = RoomRegistry::new();
        let ids: Vec<PeerId> = (0..4).map(|i| PeerId::from(format!("p{i}"))).collect();

        for id in &ids {
            registry.join("r1", id.clone(), sender());
            assert!(registry.rooms().iter().all(|r| r.member_count > 0));
        }
        for id in &ids {
            registry.leave("r1", id);
            assert!(registry.rooms().iter().all(|r| r.member_count > 0));
        }
        assert_eq!(registry.room_count(), 0);
    }

    #[test]
    fn test_lookup() {
        let registry = RoomRegistry::new();
        let id = PeerId::from("A");
        registry.join("r1", id.clone(), sender());

        assert!(registry.lookup("r1", &id).is_some());
        assert!(registry.lookup("r1", &PeerId::from("Z")).is_none());
        assert!(registry.lookup("r2", &id).is_none());
    }

    #[test]
    fn test_peers_except() {
        let registry = RoomRegistry::new();
        let a = PeerId::from("A");
        registry.join("r1", a.clone(), sender());
        registry.join("r1", PeerId::from("B"), sender());
        registry.join("r1", PeerId::from("C"), sender());

        let peers = registry.peers_except("r1", &a);
        assert_eq!(peers.len(), 2);
        assert!(peers.iter().all(|(id, _)| *id != a));
    }

    #[test]
    fn test_rooms_enumeration() {
        let registry = RoomRegistry::new();
        registry.join("r1", PeerId::from("A"), sender());
        registry.join("r1", PeerId::from("B"), sender());
        registry.join("r2", PeerId::from("C"), sender());

        let mut rooms = registry.rooms();
        rooms.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room_id, "r1");
        assert_eq!(rooms[0].member_count, 2);
        assert_eq!(rooms[1].room_id, "r2");
        assert_eq!(rooms[1].member_count, 1);
    }

    #[test]
    fn test_room_info_wire_shape() {
        let info = RoomInfo {
            room_id: "r1".to_owned(),
            member_count: 2,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"roomId":"r1","memberCount":2}"#);
    }
}
