//! Per-room level state.
//!
//! [`RoomState`] holds the current level of every instrument in one room.
//! The invariant is that every instrument key is always present and every
//! level is within 0..=10 (enforced by [`Level`]).

use std::collections::BTreeMap;

use super::instrument::Instrument;
use super::level::Level;

/// Full mapping of instrument to current level, as broadcast in
/// `state:levels` frames. Always a complete snapshot, never a delta.
pub type LevelSnapshot = BTreeMap<Instrument, Level>;

/// Returns a snapshot with every instrument at the initial level.
#[must_use]
pub fn default_levels() -> LevelSnapshot {
    Instrument::ALL
        .iter()
        .map(|&i| (i, Level::INITIAL))
        .collect()
}

/// Mutable level state of a single room.
#[derive(Debug, Clone)]
pub struct RoomState {
    levels: LevelSnapshot,
}

impl RoomState {
    /// Creates room state with every instrument at the initial level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: default_levels(),
        }
    }

    /// Returns a copy of the current levels.
    #[must_use]
    pub fn snapshot(&self) -> LevelSnapshot {
        self.levels.clone()
    }

    /// Clamp-adjusts one instrument's level, returning `(previous, next)`.
    ///
    /// A missing entry defaults to the initial level before the adjust;
    /// with the fixed instrument set this is defensive and should not occur.
    pub fn adjust(&mut self, instrument: Instrument, delta: i64) -> (Level, Level) {
        let prev = self
            .levels
            .get(&instrument)
            .copied()
            .unwrap_or(Level::INITIAL);
        let next = prev.adjust(delta);
        self.levels.insert(instrument, next);
        (prev, next)
    }

    /// Replaces the levels wholesale with fresh defaults.
    pub fn reset(&mut self) {
        self.levels = default_levels();
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}
