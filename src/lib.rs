//! # freecell-engine
//!
//! A FreeCell solitaire engine: authoritative game state, move legality with
//! multi-card supermoves, snapshot-based undo/redo and a per-frame animation
//! scheduler. Drawing pixels and wiring pointer events belong to the host.
//!
//! ## Design Principles
//!
//! 1. **State First**: Accepted moves update the board immediately.
//!    Animations are cosmetic catch-up and never read back.
//!
//! 2. **Pure Rules**: Move legality and supermove planning are functions of a
//!    `Board`; the engine only sequences them.
//!
//! 3. **Configuration Over Constants**: Layout, animation speeds, the deal
//!    seed and import strictness live in `EngineConfig`.
//!
//! ## Modules
//!
//! - `core`: Cards, suits, geometry, RNG, configuration
//! - `zones`: Stacks and the 16-stack board
//! - `rules`: Run detection, capacity, destination legality, move plans
//! - `history`: Snapshots, undo/redo, save/load
//! - `animation`: FIFO animation queue
//! - `engine`: The game engine, frames and stats

pub mod animation;
pub mod core;
pub mod engine;
pub mod history;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    AnimationConfig, Card, CardInfo, Color, DealRng, DealRngState, EngineConfig, InvalidCard,
    LayoutConfig, Point, Rect, Suit, CARDS_PER_SUIT, DECK_SIZE,
};

pub use crate::zones::{Board, CardStack, StackId, StackKind};

pub use crate::rules::{plan_move, MoveKind, MovePlan, Step};

pub use crate::history::{History, Snapshot, SnapshotError, SNAPSHOT_VERSION};

pub use crate::animation::{AnimationScheduler, MoveAnimation};

pub use crate::engine::{
    CardFace, Engine, EngineStats, Frame, MoveSummary, PointerOutcome, Sprite, Surface,
};
