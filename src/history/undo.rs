//! Undo/redo stacks of board snapshots.
//!
//! Each committed move records the snapshot taken *before* it. Undoing pops
//! that snapshot and pushes the current one onto the redo stack; redoing does
//! the reverse. A new commit discards the redo stack.
//!
//! Both stacks are persistent vectors, so cloning a `History` (for example to
//! keep a copy while probing moves) shares structure instead of copying every
//! snapshot.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    undo: Vector<Snapshot>,
    redo: Vector<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state preceding a move. Clears the redo stack.
    pub fn commit(&mut self, before: Snapshot) {
        self.undo.push_back(before);
        self.redo.clear();
    }

    /// Step back. `current` is the state being left; it becomes redoable.
    ///
    /// Returns the state to restore, or `None` (leaving both stacks as they
    /// were) when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push_back(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop_back()?;
        self.undo.push_back(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
