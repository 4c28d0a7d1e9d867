//! Cosmetic card movement, decoupled from game state.

pub mod scheduler;

pub use scheduler::{AnimationScheduler, MoveAnimation};
