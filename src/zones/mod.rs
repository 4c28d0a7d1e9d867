//! Card locations: individual stacks and the board that owns all 16 of them.
//!
//! ## Key Types
//!
//! - `CardStack`: Ordered pile with on-screen geometry, no rules
//! - `StackKind`: Free cell, foundation or tableau
//! - `StackId`: Stable `kind-index` identifier
//! - `Board`: The 16 stacks, dealing, layout and hit-testing

pub mod board;
pub mod stack;

pub use board::{Board, StackId, FOUNDATION_COUNT, FREE_CELL_COUNT, STACK_COUNT, TABLEAU_COUNT};
pub use stack::{CardStack, StackKind};
