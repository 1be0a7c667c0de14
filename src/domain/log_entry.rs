//! Append-only room log entries.
//!
//! A [`LogEntry`] is a transient notification of an action taken in a room:
//! it is broadcast once via `log:append` and never stored. Entries carry a
//! fresh unique id and a local wall-clock `HH:MM` stamp.

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::role::Role;

/// One broadcast-only log line. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Unique entry id (UUID v4).
    pub id: String,
    /// Local wall-clock time of the action, formatted `HH:MM`.
    pub at: String,
    /// Role the entry is attributed to.
    pub from: Role,
    /// Human-readable line shown in the room log.
    pub text: String,
    /// Connection id of the originating client.
    pub sender_id: String,
}

impl LogEntry {
    /// Builds a new entry stamped with the current local time.
    #[must_use]
    pub fn new(from: Role, text: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            at: Local::now().format("%H:%M").to_string(),
            from,
            text: text.into(),
            sender_id: sender_id.into(),
        }
    }
}
