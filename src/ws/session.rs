//! Per-connection session state.
//!
//! A [`RoomSession`] is created implicitly when a WebSocket connection is
//! established and is exclusively owned by that connection's task. It tracks
//! the connection's identity, current room, and role, and acts as the
//! server-side event filter: a connection only receives broadcasts for the
//! room its session currently points at.

use std::fmt;

use crate::domain::{Role, RoomId};

/// Unique identifier for a WebSocket connection.
///
/// Wraps a UUID v4, generated once when the connection is established and
/// stamped on every log entry the connection originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(uuid::Uuid);

impl ConnId {
    /// Creates a new random connection id.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ephemeral state of one connection: current room membership and role.
///
/// A connection belongs to at most one room at a time. The session starts
/// unjoined with the default role and transitions on join events; it is
/// dropped when the connection closes.
#[derive(Debug)]
pub struct RoomSession {
    /// Connection identity, immutable for the connection lifetime.
    pub id: ConnId,
    /// Room the connection is currently joined to, if any.
    pub room: Option<RoomId>,
    /// Role the connection joined with.
    pub role: Role,
}

impl RoomSession {
    /// Creates an unjoined session with a fresh connection id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ConnId::new(),
            room: None,
            role: Role::default(),
        }
    }

    /// Returns `true` if a broadcast for `room` should reach this connection.
    #[must_use]
    pub fn matches(&self, room: &RoomId) -> bool {
        self.room.as_ref() == Some(room)
    }
}

impl Default for RoomSession {
    fn default() -> Self {
        Self::new()
    }
}
