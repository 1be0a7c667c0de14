//! Concurrent room storage with per-room fine-grained locking.
//!
//! [`RoomStore`] maps room ids to their level state, with each entry
//! individually protected by a [`tokio::sync::RwLock`]. Rooms are created
//! lazily on first reference and never explicitly destroyed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::instrument::Instrument;
use super::level::Level;
use super::room_id::RoomId;
use super::room_state::{LevelSnapshot, RoomState};

/// Central store for all live rooms.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<RoomState>>` for fine-grained per-room locking.
///
/// # Concurrency
///
/// - Reads of the same room are concurrent.
/// - Adjusts on different rooms are concurrent.
/// - Adjusts on the same room are serialized: each read-modify-write runs
///   atomically under the room's write lock.
#[derive(Debug)]
pub struct RoomStore {
    rooms: RwLock<HashMap<RoomId, Arc<RwLock<RoomState>>>>,
}

impl RoomStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the room's state handle, creating it with default levels on
    /// first reference. Idempotent; never fails.
    pub async fn ensure(&self, room: &RoomId) -> Arc<RwLock<RoomState>> {
        let mut map = self.rooms.write().await;
        let entry = map
            .entry(room.clone())
            .or_insert_with(|| Arc::new(RwLock::new(RoomState::new())));
        Arc::clone(entry)
    }

    /// Returns the room's current level snapshot, creating the room if it
    /// does not exist yet.
    pub async fn snapshot(&self, room: &RoomId) -> LevelSnapshot {
        let state = self.ensure(room).await;
        let state = state.read().await;
        state.snapshot()
    }

    /// Clamp-adjusts one instrument's level in a room.
    ///
    /// Returns `(previous, next, snapshot)` where the snapshot reflects the
    /// post-adjust state, captured under the same write lock so concurrent
    /// adjusts on the room serialize cleanly.
    pub async fn adjust(
        &self,
        room: &RoomId,
        instrument: Instrument,
        delta: i64,
    ) -> (Level, Level, LevelSnapshot) {
        let state = self.ensure(room).await;
        let mut state = state.write().await;
        let (prev, next) = state.adjust(instrument, delta);
        (prev, next, state.snapshot())
    }

    /// Overwrites the room's levels with fresh defaults, returning the new
    /// snapshot. The room stays in the store.
    pub async fn reset(&self, room: &RoomId) -> LevelSnapshot {
        let state = self.ensure(room).await;
        let mut state = state.write().await;
        state.reset();
        state.snapshot()
    }

    /// Returns the room's snapshot without creating it. Read-only path used
    /// by the REST surface.
    pub async fn get(&self, room: &RoomId) -> Option<LevelSnapshot> {
        let handle = {
            let map = self.rooms.read().await;
            map.get(room).cloned()
        };
        match handle {
            Some(state) => Some(state.read().await.snapshot()),
            None => None,
        }
    }

    /// Returns every live room with its current snapshot.
    pub async fn list(&self) -> Vec<(RoomId, LevelSnapshot)> {
        let map = self.rooms.read().await;
        let mut out = Vec::with_capacity(map.len());
        for (room, state) in map.iter() {
            let state = state.read().await;
            out.push((room.clone(), state.snapshot()));
        }
        out
    }

    /// Returns the number of live rooms.
    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Returns `true` if no room has been touched yet.
    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }
}

impl Default for RoomStore {
    fn default() -> Self {
        Self::new()
    }
}
