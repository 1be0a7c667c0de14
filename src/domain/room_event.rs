//! Broadcast events scoped to a room.
//!
//! Every state mutation or loggable action publishes a [`RoomEvent`]
//! through the [`super::EventBus`]. Connections subscribe to the bus and
//! forward only the events whose room matches their session's current room.

use super::log_entry::LogEntry;
use super::room_id::RoomId;
use super::room_state::LevelSnapshot;

/// Payload broadcast to every member of a room.
#[derive(Debug, Clone)]
pub enum RoomBroadcast {
    /// Full current level snapshot (`state:levels` on the wire).
    Levels(LevelSnapshot),
    /// One appended log entry (`log:append` on the wire).
    Log(LogEntry),
}

/// A broadcast payload addressed to one room.
#[derive(Debug, Clone)]
pub struct RoomEvent {
    /// Room the payload is scoped to.
    pub room: RoomId,
    /// The payload itself.
    pub broadcast: RoomBroadcast,
}

impl RoomEvent {
    /// Wraps a level snapshot for the given room.
    #[must_use]
    pub fn levels(room: RoomId, snapshot: LevelSnapshot) -> Self {
        Self {
            room,
            broadcast: RoomBroadcast::Levels(snapshot),
        }
    }

    /// Wraps a log entry for the given room.
    #[must_use]
    pub fn log(room: RoomId, entry: LogEntry) -> Self {
        Self {
            room,
            broadcast: RoomBroadcast::Log(entry),
        }
    }
}
