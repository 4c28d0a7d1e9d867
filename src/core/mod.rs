//! Core types: cards, geometry, RNG and configuration.
//!
//! Everything here is independent of the board layout and the move rules.

pub mod card;
pub mod config;
pub mod geometry;
pub mod rng;

pub use card::{Card, CardInfo, Color, InvalidCard, Suit, CARDS_PER_SUIT, DECK_SIZE};
pub use config::{AnimationConfig, EngineConfig, LayoutConfig};
pub use geometry::{Point, Rect};
pub use rng::{DealRng, DealRngState};
