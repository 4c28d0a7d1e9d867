//! FreeCell move rules.
//!
//! The engine calls into this module to decide whether a move is legal and
//! how it is carried out, but never interprets card relationships itself:
//! - Run detection and supermove capacity
//! - Destination legality (free cell, foundation, tableau)
//! - Column-move expansion into single-card steps

pub mod moves;

pub use moves::{
    apply_plan, capacity, foundation_accepts, movable_run, plan_move, run_length, MoveKind, MovePlan,
    Step, MAX_STEPS,
};
