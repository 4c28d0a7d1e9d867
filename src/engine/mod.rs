//! The game engine and what it hands to the host.
//!
//! ## Key Types
//!
//! - `Engine`: Owns the board, history and animations; resolves input
//! - `PointerOutcome` / `MoveSummary`: What an input event did
//! - `Frame` / `Sprite` / `Surface`: Per-frame draw list and its target
//! - `EngineStats`: Diagnostic counters

pub mod game;
pub mod render;
pub mod stats;

pub use game::{Engine, MoveSummary, PointerOutcome};
pub use render::{CardFace, Frame, Sprite, Surface};
pub use stats::EngineStats;
