//! The fixed instrument registry.
//!
//! [`Instrument`] enumerates the seven instruments a room coordinates.
//! The set is defined at startup and immutable for the process lifetime;
//! wire keys are the lowercase variant names and every instrument carries
//! a human-readable display label.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display label used when an inbound instrument key is not recognized.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One of the seven instruments whose level a room tracks.
///
/// Declaration order is the canonical registry order and drives the
/// iteration order of level snapshots (the derived `Ord`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    /// Keyboard.
    Keyboard,
    /// Organ.
    Organ,
    /// Guitar.
    Guitar,
    /// Drum kit.
    Drum,
    /// Conga drum.
    Conga,
    /// Stage monitor speaker.
    Monitor,
    /// Song leader's microphone.
    Songleader,
}

impl Instrument {
    /// The ordered registry of all instruments.
    pub const ALL: [Self; 7] = [
        Self::Keyboard,
        Self::Organ,
        Self::Guitar,
        Self::Drum,
        Self::Conga,
        Self::Monitor,
        Self::Songleader,
    ];

    /// Returns the wire key for this instrument (e.g. `"songleader"`).
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Organ => "organ",
            Self::Guitar => "guitar",
            Self::Drum => "drum",
            Self::Conga => "conga",
            Self::Monitor => "monitor",
            Self::Songleader => "songleader",
        }
    }

    /// Returns the display label for this instrument.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Keyboard => "Keyboard",
            Self::Organ => "Organ",
            Self::Guitar => "Guitar",
            Self::Drum => "Drums",
            Self::Conga => "Conga Drum",
            Self::Monitor => "Monitor Speaker",
            Self::Songleader => "Song Leader",
        }
    }

    /// Looks up an instrument by wire key. Unknown keys return `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().find(|i| i.key() == key).copied()
    }

    /// Returns the display label for an optional instrument, falling back
    /// to [`UNKNOWN_LABEL`] when absent.
    ///
    /// Inbound payloads are untrusted; a missing or unrecognized key
    /// degrades to the fallback label instead of failing.
    #[must_use]
    pub fn label_or_unknown(instrument: Option<Self>) -> &'static str {
        instrument.map_or(UNKNOWN_LABEL, |i| i.label())
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
