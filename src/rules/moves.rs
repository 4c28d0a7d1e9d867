//! Move legality, run detection and supermove planning.
//!
//! All functions here are pure: they read a [`Board`] and return a
//! [`MovePlan`] describing the elementary single-card steps that realize a
//! move. Applying the plan is the caller's job.
//!
//! ## Supermoves
//!
//! A run of `k` cards moves by parking its top `k - 1` cards in empty free
//! cells, moving the next card to the destination, then unparking the cards
//! onto it in reverse order. The capacity is therefore
//! `empty_free_cells + 1`, for empty and non-empty destinations alike.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Card;
use crate::zones::{Board, CardStack, StackId, StackKind, FREE_CELL_COUNT};

/// Upper bound on elementary steps of one move: park, place, unpark.
pub const MAX_STEPS: usize = 2 * FREE_CELL_COUNT + 1;

/// One card moved from the top of one stack to the top of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub from: StackId,
    pub to: StackId,
}

/// How a move is realized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// One card, moved directly.
    Single,
    /// A run moved through `parked` free cells.
    Column { parked: usize },
    /// One card placed against the tableau rules by the override flag.
    Forced,
}

/// A legal move, expanded into elementary steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub from: StackId,
    pub to: StackId,
    /// Number of cards that end up on `to`.
    pub cards: usize,
    pub kind: MoveKind,
    pub steps: SmallVec<[Step; MAX_STEPS]>,
}

impl MovePlan {
    /// Whether cards pass through free cells on the way.
    #[must_use]
    pub fn uses_free_cells(&self) -> bool {
        matches!(self.kind, MoveKind::Column { parked } if parked > 0)
    }

    fn single(from: StackId, to: StackId, kind: MoveKind) -> Self {
        let mut steps = SmallVec::new();
        steps.push(Step { from, to });
        Self { from, to, cards: 1, kind, steps }
    }
}

/// Length of the descending, alternating-color run at the top of `stack`,
/// ignoring supermove capacity. Zero for an empty stack.
#[must_use]
pub fn run_length(stack: &CardStack) -> usize {
    let cards = stack.cards();
    if cards.is_empty() {
        return 0;
    }
    1 + cards
        .windows(2)
        .rev()
        .take_while(|pair| pair[0].accepts(Some(pair[1])))
        .count()
}

/// Supermove capacity: how many cards one move can carry.
#[must_use]
pub fn capacity(board: &Board) -> usize {
    board.empty_free_cells() + 1
}

/// Length of the run a move out of `from` may carry: the top run capped by
/// [`capacity`]. Free cells and foundations only ever give up one card.
#[must_use]
pub fn movable_run(board: &Board, from: StackId) -> usize {
    let stack = board.stack(from);
    match from.kind {
        _ if stack.is_empty() => 0,
        StackKind::Tableau => run_length(stack).min(capacity(board)),
        StackKind::FreeCell | StackKind::Foundation => 1,
    }
}

/// Whether `card` may go onto foundation `to` right now.
#[must_use]
pub fn foundation_accepts(board: &Board, to: StackId, card: Card) -> bool {
    let foundation = board.stack(to);
    if foundation.suit() != Some(card.suit()) {
        return false;
    }
    match foundation.top() {
        None => card.rank() == 0,
        Some(top) => card.rank() == top.rank() + 1,
    }
}

/// Resolve a move from `from` to `to`.
///
/// Returns `None` when the move is illegal or either id is out of range.
/// `force` allows one card onto a
/// non-empty tableau column that does not accept it, and lets an over-long
/// run onto an empty column move its longest sub-run that fits.
#[must_use]
pub fn plan_move(board: &Board, from: StackId, to: StackId, force: bool) -> Option<MovePlan> {
    if from == to || !from.is_valid() || !to.is_valid() {
        return None;
    }
    let source = board.stack(from);
    let moving = source.top()?;
    let dest = board.stack(to);

    match to.kind {
        StackKind::FreeCell => dest.is_empty().then(|| MovePlan::single(from, to, MoveKind::Single)),
        StackKind::Foundation => foundation_accepts(board, to, moving)
            .then(|| MovePlan::single(from, to, MoveKind::Single)),
        StackKind::Tableau => match dest.top() {
            None => {
                let run = match from.kind {
                    StackKind::Tableau => run_length(source),
                    _ => 1,
                };
                let capacity = capacity(board);
                let count = if run <= capacity {
                    run
                } else if force {
                    capacity
                } else {
                    return None;
                };
                Some(column_move(board, from, to, count))
            }
            Some(dest_top) => {
                let max = movable_run(board, from);
                (1..=max)
                    .rev()
                    .find(|&k| dest_top.accepts(source.at(-(k as isize))))
                    .map(|k| column_move(board, from, to, k))
                    .or_else(|| force.then(|| MovePlan::single(from, to, MoveKind::Forced)))
            }
        },
    }
}

/// Expand a move of the top `count` cards into steps through free cells.
///
/// The caller guarantees `count - 1 <= empty free cells`.
fn column_move(board: &Board, from: StackId, to: StackId, count: usize) -> MovePlan {
    if count <= 1 {
        return MovePlan::single(from, to, MoveKind::Single);
    }

    let cells: SmallVec<[StackId; FREE_CELL_COUNT]> =
        board.empty_free_cell_ids().take(count - 1).collect();

    let mut steps: SmallVec<[Step; MAX_STEPS]> = SmallVec::new();
    steps.extend(cells.iter().map(|&cell| Step { from, to: cell }));
    steps.push(Step { from, to });
    steps.extend(cells.iter().rev().map(|&cell| Step { from: cell, to }));

    MovePlan {
        from,
        to,
        cards: cells.len() + 1,
        kind: MoveKind::Column { parked: cells.len() },
        steps,
    }
}

/// Apply every step of `plan` to `board`, returning the cards in the order
/// they were moved.
pub fn apply_plan(board: &mut Board, plan: &MovePlan) -> SmallVec<[Card; MAX_STEPS]> {
    plan.steps
        .iter()
        .filter_map(|step| board.move_top(step.from, step.to))
        .collect()
}
