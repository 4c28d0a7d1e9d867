//! Engine counters for diagnostics and tests.

use serde::{Deserialize, Serialize};

/// Counters accumulated over the lifetime of an engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Accepted moves (one per undoable unit).
    pub moves: u32,

    /// Elementary single-card steps those moves expanded into.
    pub steps: u32,

    /// Moves that parked cards in free cells.
    pub column_moves: u32,

    /// Moves placed against the tableau rules with the override flag.
    pub forced_moves: u32,

    /// Move attempts that were illegal.
    pub rejected_moves: u32,

    /// Pointer events dropped while animations were pending.
    pub ignored_events: u32,

    pub undos: u32,
    pub redos: u32,

    /// New deals, redeals and explicit deal orders.
    pub deals: u32,

    /// Successful imports (text or binary).
    pub imports: u32,

    /// Frames in which an animation advanced.
    pub animation_frames: u64,
}

impl EngineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Average elementary steps per accepted move.
    #[must_use]
    pub fn steps_per_move(&self) -> f64 {
        if self.moves == 0 {
            0.0
        } else {
            f64::from(self.steps) / f64::from(self.moves)
        }
    }
}
