use beacon_core::{ConnectionId, RoomId};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

#[derive(Default)]
struct RegistryState {
    /// Forward index: room -> members.
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
    /// Reverse index: connection -> joined rooms. Mutated in the same
    /// critical section as `rooms` so the two never disagree.
    memberships: HashMap<ConnectionId, HashSet<RoomId>>,
}

/// In-memory source of truth for room membership.
///
/// All operations are total: any string room id and any connection id are
/// accepted, and none of them can fail. Critical sections touch only the
/// two maps and never block on I/O.
#[derive(Default)]
pub struct RoomRegistry {
    state: Mutex<RegistryState>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room, creating the room if absent.
    ///
    /// Idempotent. Returns the pre-join membership snapshot, excluding the
    /// joiner itself.
    pub fn join(&self, room: &RoomId, conn: ConnectionId) -> Vec<ConnectionId> {
        let mut state = self.lock();

        let members = state.rooms.entry(room.clone()).or_default();
        let snapshot: Vec<ConnectionId> =
            members.iter().copied().filter(|m| *m != conn).collect();
        members.insert(conn);

        state.memberships.entry(conn).or_default().insert(room.clone());

        snapshot
    }

    /// Remove a connection from a room. No-op (returns false) when the
    /// connection is not a member. A room left with no members is removed.
    pub fn leave(&self, room: &RoomId, conn: &ConnectionId) -> bool {
        let mut state = self.lock();

        let Some(members) = state.rooms.get_mut(room) else {
            return false;
        };
        if !members.remove(conn) {
            return false;
        }
        if members.is_empty() {
            state.rooms.remove(room);
        }

        if let Some(joined) = state.memberships.get_mut(conn) {
            joined.remove(room);
            if joined.is_empty() {
                state.memberships.remove(conn);
            }
        }

        true
    }

    /// Remove a connection from every room it belongs to.
    ///
    /// Returns each left room paired with a snapshot of its remaining
    /// members, for disconnect notifications. A connection with no
    /// memberships yields an empty list, so duplicate disconnects are
    /// harmless.
    pub fn leave_all(&self, conn: &ConnectionId) -> Vec<(RoomId, Vec<ConnectionId>)> {
        let mut state = self.lock();

        let Some(joined) = state.memberships.remove(conn) else {
            return Vec::new();
        };

        let mut left = Vec::with_capacity(joined.len());
        for room in joined {
            let emptied = match state.rooms.get_mut(&room) {
                Some(members) => {
                    members.remove(conn);
                    members.is_empty()
                }
                None => continue,
            };
            if emptied {
                state.rooms.remove(&room);
            }

            let remaining = state
                .rooms
                .get(&room)
                .map(|m| m.iter().copied().collect())
                .unwrap_or_default();
            left.push((room, remaining));
        }

        left
    }

    /// Owned membership snapshot; an unknown room yields an empty list.
    pub fn members(&self, room: &RoomId) -> Vec<ConnectionId> {
        let state = self.lock();
        state
            .rooms
            .get(room)
            .map(|m| m.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.lock().rooms.len()
    }

    /// Drop all rooms and memberships. Called on shutdown.
    pub fn clear(&self) {
        let mut state = self.lock();
        let rooms = state.rooms.len();
        state.rooms.clear();
        state.memberships.clear();
        if rooms > 0 {
            info!("Cleared {} active room(s) from the registry", rooms);
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
