//! The game engine: selection state machine, move execution, undo/redo,
//! dealing and save/load.
//!
//! ## States
//!
//! - **Idle**: nothing selected
//! - **Selected**: a non-empty stack is the move source
//! - **Locked**: animations are pending, pointer input is ignored
//!
//! Accepted moves update the board at once and queue one animation per
//! elementary step, so the board is always in a consistent state even while
//! cards are still travelling on screen.
//!
//! ```
//! use freecell_engine::{Card, Engine, EngineConfig, PointerOutcome, StackId};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.deal_with_order(&Card::deck().collect::<Vec<_>>()).unwrap();
//!
//! let column = engine.board().stack(StackId::tableau(0)).top_card_rect();
//! let cell = engine.board().stack(StackId::free_cell(0)).top_card_rect();
//!
//! assert_eq!(
//!     engine.on_pointer(column.left + 1.0, column.top + 1.0, false),
//!     PointerOutcome::Selected(StackId::tableau(0))
//! );
//! assert!(matches!(
//!     engine.on_pointer(cell.left + 1.0, cell.top + 1.0, false),
//!     PointerOutcome::Moved(_)
//! ));
//! assert!(engine.is_locked());
//! ```

use crate::animation::{AnimationScheduler, MoveAnimation};
use crate::core::{Card, DealRng, DealRngState, EngineConfig};
use crate::history::{validate_deal, History, Snapshot, SnapshotError};
use crate::rules::{plan_move, MoveKind, MovePlan};
use crate::zones::{Board, StackId};

use super::render::{Frame, Surface};
use super::stats::EngineStats;

/// An accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveSummary {
    pub from: StackId,
    pub to: StackId,
    /// Cards that ended up on `to`.
    pub cards: usize,
    pub kind: MoveKind,
    /// Elementary single-card steps, parking included.
    pub steps: usize,
}

impl From<&MovePlan> for MoveSummary {
    fn from(plan: &MovePlan) -> Self {
        Self {
            from: plan.from,
            to: plan.to,
            cards: plan.cards,
            kind: plan.kind,
            steps: plan.steps.len(),
        }
    }
}

/// Result of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Animations pending; nothing happened.
    Ignored,
    /// Selection cleared, or an empty stack clicked with nothing selected.
    Cleared,
    Selected(StackId),
    Moved(MoveSummary),
    /// The move was illegal. The clicked stack is selected instead when it
    /// has cards.
    Rejected { reselected: Option<StackId> },
}

/// A FreeCell game.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    board: Board,
    /// Current deal permutation; `redeal` replays it.
    deal: Vec<Card>,
    rng: DealRng,
    selection: Option<StackId>,
    history: History,
    animations: AnimationScheduler,
    /// Set by state changes, consumed by `advance`.
    redraw: bool,
    stats: EngineStats,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Build the board and deal a shuffled hand.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let mut board = Board::new();
        board.layout(config.screen_width, &config.layout);
        let mut engine = Self {
            rng: DealRng::new(config.seed),
            config,
            board,
            deal: Card::deck().collect(),
            selection: None,
            history: History::new(),
            animations: AnimationScheduler::new(),
            redraw: true,
            stats: EngineStats::new(),
        };
        engine.new_deal();
        engine
    }

    // === Dealing ===

    /// Shuffle a fresh permutation and deal it.
    pub fn new_deal(&mut self) {
        self.deal = self.rng.next_deal();
        self.redeal();
    }

    /// Deal the current permutation again.
    pub fn redeal(&mut self) {
        self.board.deal(&self.deal);
        self.reset_table();
        self.stats.deals += 1;
    }

    /// Deal a caller-supplied permutation of the 52 cards.
    pub fn deal_with_order(&mut self, order: &[Card]) -> Result<(), SnapshotError> {
        validate_deal(order)?;
        self.deal = order.to_vec();
        self.redeal();
        Ok(())
    }

    /// Position in the deal sequence, for saving alongside a game.
    #[must_use]
    pub fn rng_state(&self) -> DealRngState {
        self.rng.state()
    }

    /// Continue the deal sequence from a saved position.
    pub fn restore_rng(&mut self, state: &DealRngState) {
        self.rng = DealRng::from_state(state);
    }

    fn reset_table(&mut self) {
        self.history.clear();
        self.selection = None;
        self.animations.clear();
        self.redraw = true;
    }

    // === Input ===

    /// Handle a click at `(x, y)`. `force` is the override modifier.
    pub fn on_pointer(&mut self, x: f64, y: f64, force: bool) -> PointerOutcome {
        if self.is_locked() {
            self.stats.ignored_events += 1;
            return PointerOutcome::Ignored;
        }
        self.redraw = true;

        let hit = self.board.hit_test(x, y);
        match (self.selection.take(), hit) {
            (_, None) => PointerOutcome::Cleared,
            (Some(selected), Some(id)) if selected == id => PointerOutcome::Cleared,
            (None, Some(id)) => {
                if self.board.stack(id).is_empty() {
                    PointerOutcome::Cleared
                } else {
                    self.selection = Some(id);
                    PointerOutcome::Selected(id)
                }
            }
            (Some(selected), Some(id)) => match self.try_move(selected, id, force) {
                Some(summary) => PointerOutcome::Moved(summary),
                None => {
                    let reselected = (!self.board.stack(id).is_empty()).then_some(id);
                    self.selection = reselected;
                    PointerOutcome::Rejected { reselected }
                }
            },
        }
    }

    /// Move from one stack to another by id, with the same rules as a pair
    /// of clicks. Returns `None` and changes nothing when the move is illegal.
    ///
    /// Unlike pointer input this is not refused while animations are
    /// pending; the new legs queue behind the current ones.
    pub fn try_move(&mut self, from: StackId, to: StackId, force: bool) -> Option<MoveSummary> {
        let Some(plan) = plan_move(&self.board, from, to, force) else {
            self.stats.rejected_moves += 1;
            return None;
        };

        let before = self.snapshot();
        self.history.commit(before);

        let factor = if plan.uses_free_cells() {
            self.config.animation.fast_speed_factor
        } else {
            self.config.animation.speed_factor
        };
        let speed = self.config.screen_width * factor;
        for step in &plan.steps {
            let start = self.board.stack(step.from).top_card_rect();
            if let Some(card) = self.board.move_top(step.from, step.to) {
                let end = self.board.stack(step.to).top_card_rect();
                self.animations.enqueue(MoveAnimation::new(card, start, end, speed));
            }
        }

        self.stats.moves += 1;
        self.stats.steps += plan.steps.len() as u32;
        match plan.kind {
            MoveKind::Column { parked } if parked > 0 => self.stats.column_moves += 1,
            MoveKind::Forced => self.stats.forced_moves += 1,
            _ => {}
        }

        self.selection = None;
        self.redraw = true;
        Some(MoveSummary::from(&plan))
    }

    // === Undo / Redo ===

    /// Step back one move. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.restore(&previous);
        self.stats.undos += 1;
        true
    }

    /// Replay an undone move. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.restore(&next);
        self.stats.redos += 1;
        true
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        snapshot.restore(&mut self.board);
        self.selection = None;
        self.animations.clear();
        self.redraw = true;
    }

    // === Save / Load ===

    /// The current board and deal.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.board, &self.deal)
    }

    /// Serialize the current state as JSON text.
    #[must_use]
    pub fn export_state(&self) -> String {
        self.snapshot().to_json()
    }

    /// Replace the current state with an exported one. History is cleared.
    ///
    /// On error nothing changes.
    pub fn import_state(&mut self, text: &str) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::from_json(text, self.config.strict_import)?;
        self.install(&snapshot);
        Ok(())
    }

    /// Serialize the current state as compact binary.
    pub fn export_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        self.snapshot().to_bytes()
    }

    /// Binary counterpart of [`Engine::import_state`].
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::from_bytes(bytes, self.config.strict_import)?;
        self.install(&snapshot);
        Ok(())
    }

    fn install(&mut self, snapshot: &Snapshot) {
        snapshot.restore(&mut self.board);
        if !snapshot.deal().is_empty() {
            self.deal = snapshot.deal().to_vec();
        }
        self.reset_table();
        self.stats.imports += 1;
    }

    // === Frames ===

    /// Advance animations by `elapsed` seconds. Returns whether the host
    /// should redraw.
    pub fn advance(&mut self, elapsed: f64) -> bool {
        let animated = self.animations.advance(elapsed);
        if animated {
            self.stats.animation_frames += 1;
        }
        let redraw = animated || self.redraw;
        self.redraw = false;
        redraw
    }

    /// Re-layout for a new surface width. Pending animations snap.
    pub fn set_screen_width(&mut self, width: f64) {
        self.config.screen_width = width;
        self.board.layout(width, &self.config.layout);
        self.animations.clear();
        self.redraw = true;
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame::build(&self.board, &self.animations, self.selection)
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.frame().draw_onto(surface);
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn selection(&self) -> Option<StackId> {
        self.selection
    }

    /// Pointer input is ignored while this holds.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.animations.is_pending()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    #[must_use]
    pub fn deal_order(&self) -> &[Card] {
        &self.deal
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn animations(&self) -> &AnimationScheduler {
        &self.animations
    }

    #[must_use]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
