//! Connection roles.
//!
//! A connection is either a requester (stage side, `"A"` on the wire) or an
//! operator (sound-booth side, `"B"` on the wire). The role is a closed
//! two-variant enum: any wire tag other than the operator tag normalizes to
//! requester.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a connection within a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Stage-side role issuing informational requests. Wire tag `"A"`.
    #[serde(rename = "A")]
    Requester,
    /// Booth-side role performing level mutations and acks. Wire tag `"B"`.
    #[serde(rename = "B")]
    Operator,
}

impl Role {
    /// Normalizes an untrusted wire tag into a role.
    ///
    /// Exactly `"B"` maps to [`Role::Operator`]; anything else, including a
    /// missing tag, maps to [`Role::Requester`].
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("B") => Self::Operator,
            _ => Self::Requester,
        }
    }

    /// Returns the wire tag for this role.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Requester => "A",
            Self::Operator => "B",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Requester
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
