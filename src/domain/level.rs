//! Clamped instrument level values.
//!
//! [`Level`] is a newtype wrapper around `u8` constrained to the inclusive
//! range 0..=10. Every mutation clamps: levels never wrap and out-of-range
//! deltas never error.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lower bound of the level range.
pub const MIN_LEVEL: u8 = 0;
/// Upper bound of the level range.
pub const MAX_LEVEL: u8 = 10;

/// A single instrument's volume level, always within 0..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    /// The level every instrument starts at when a room is created or reset.
    pub const INITIAL: Self = Self(5);

    /// Creates a level, clamping the input into 0..=10.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.clamp(MIN_LEVEL, MAX_LEVEL))
    }

    /// Returns the raw level value.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Applies a signed delta with a hard floor and ceiling.
    ///
    /// `adjust(0)` is the identity; arbitrarily large deltas in either
    /// direction saturate at the range bounds.
    #[must_use]
    pub fn adjust(self, delta: i64) -> Self {
        let next = i64::from(self.0)
            .saturating_add(delta)
            .clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL));
        // The clamp above guarantees the value fits in u8.
        Self(u8::try_from(next).unwrap_or(MIN_LEVEL))
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
