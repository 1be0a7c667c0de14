//! Room identifiers.
//!
//! [`RoomId`] wraps the free-form room name clients coordinate under. Room
//! names are never validated against a whitelist: any non-empty string is a
//! room. Missing or empty names normalize to the default room.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the room used when a client never specifies one.
pub const DEFAULT_ROOM: &str = "main";

/// Identifier of a room: the isolation boundary for state and broadcasts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a room id from a raw name. Empty names yield the default room.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self(DEFAULT_ROOM.to_string())
        } else {
            Self(name)
        }
    }

    /// Normalizes an untrusted optional payload field: absent or empty
    /// names become `None` so the resolution chain can continue.
    #[must_use]
    pub fn from_raw(raw: Option<String>) -> Option<Self> {
        raw.filter(|s| !s.is_empty()).map(Self)
    }

    /// Resolves the target room for an event: explicit payload room first,
    /// then the session's current room, then the default room.
    #[must_use]
    pub fn resolve(explicit: Option<Self>, current: Option<&Self>) -> Self {
        explicit.or_else(|| current.cloned()).unwrap_or_default()
    }

    /// Returns the room name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
