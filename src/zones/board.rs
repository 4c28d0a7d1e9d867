//! The FreeCell board: 4 free cells, 4 foundations and 8 tableau columns.
//!
//! ## Stack Ids
//!
//! Every stack has a stable `StackId { kind, index }`. Board order (the
//! `slot`) is free cells, then foundations, then tableau columns, and is the
//! order used for iteration, snapshots and drawing.
//!
//! ```
//! use freecell_engine::zones::{Board, StackId};
//! use freecell_engine::core::Card;
//!
//! let mut board = Board::new();
//! let order: Vec<Card> = Card::deck().collect();
//! board.deal(&order);
//!
//! assert_eq!(board.stack(StackId::tableau(0)).len(), 7);
//! assert_eq!(board.stack(StackId::tableau(7)).len(), 6);
//! assert_eq!(board.empty_free_cells(), 4);
//! assert_eq!(StackId::tableau(3).to_string(), "tableau-3");
//! ```

use serde::{Deserialize, Serialize};

use super::stack::{CardStack, StackKind};
use crate::core::{Card, LayoutConfig, Suit, CARDS_PER_SUIT};

/// Number of free cells.
pub const FREE_CELL_COUNT: usize = 4;

/// Number of foundations (one per suit).
pub const FOUNDATION_COUNT: usize = 4;

/// Number of tableau columns.
pub const TABLEAU_COUNT: usize = 8;

/// Total number of stacks on the board.
pub const STACK_COUNT: usize = FREE_CELL_COUNT + FOUNDATION_COUNT + TABLEAU_COUNT;

/// Stable identifier of a stack: its kind and its index within that kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StackId {
    pub kind: StackKind,
    pub index: u8,
}

impl StackId {
    #[must_use]
    pub const fn free_cell(index: usize) -> Self {
        Self { kind: StackKind::FreeCell, index: index as u8 }
    }

    #[must_use]
    pub const fn foundation(index: usize) -> Self {
        Self { kind: StackKind::Foundation, index: index as u8 }
    }

    #[must_use]
    pub const fn tableau(index: usize) -> Self {
        Self { kind: StackKind::Tableau, index: index as u8 }
    }

    /// Number of stacks of a kind.
    #[must_use]
    pub const fn count_of(kind: StackKind) -> usize {
        match kind {
            StackKind::FreeCell => FREE_CELL_COUNT,
            StackKind::Foundation => FOUNDATION_COUNT,
            StackKind::Tableau => TABLEAU_COUNT,
        }
    }

    /// Checked constructor.
    #[must_use]
    pub fn new(kind: StackKind, index: usize) -> Option<Self> {
        (index < Self::count_of(kind)).then_some(Self { kind, index: index as u8 })
    }

    /// Whether the index is in range for the kind. Ids built from the
    /// unchecked constructors or public fields may not be.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self.index as usize) < Self::count_of(self.kind)
    }

    /// Position in board order (0..16).
    #[must_use]
    pub const fn slot(self) -> usize {
        let base = match self.kind {
            StackKind::FreeCell => 0,
            StackKind::Foundation => FREE_CELL_COUNT,
            StackKind::Tableau => FREE_CELL_COUNT + FOUNDATION_COUNT,
        };
        base + self.index as usize
    }

    /// Inverse of [`StackId::slot`].
    #[must_use]
    pub const fn from_slot(slot: usize) -> Option<Self> {
        if slot < FREE_CELL_COUNT {
            Some(Self::free_cell(slot))
        } else if slot < FREE_CELL_COUNT + FOUNDATION_COUNT {
            Some(Self::foundation(slot - FREE_CELL_COUNT))
        } else if slot < STACK_COUNT {
            Some(Self::tableau(slot - FREE_CELL_COUNT - FOUNDATION_COUNT))
        } else {
            None
        }
    }

    /// All 16 ids in board order.
    pub fn all() -> impl Iterator<Item = StackId> {
        (0..STACK_COUNT).filter_map(Self::from_slot)
    }

    /// Snapshot key, `kind-index`.
    #[must_use]
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for StackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind, self.index)
    }
}

impl std::str::FromStr for StackId {
    type Err = ();

    /// Parse a `kind-index` key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, index) = s.rsplit_once('-').ok_or(())?;
        let kind = StackKind::from_name(kind).ok_or(())?;
        let index: usize = index.parse().map_err(|_| ())?;
        StackId::new(kind, index).ok_or(())
    }
}

/// All 16 stacks of a FreeCell game.
#[derive(Clone, Debug)]
pub struct Board {
    stacks: [CardStack; STACK_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board. Foundation `i` targets suit `i`.
    #[must_use]
    pub fn new() -> Self {
        let stacks = std::array::from_fn(|slot| {
            let id = StackId::from_slot(slot).unwrap_or(StackId::tableau(0));
            let suit = match id.kind {
                StackKind::Foundation => Suit::from_index(id.index as usize),
                _ => None,
            };
            CardStack::new(id.kind, suit)
        });
        Self { stacks }
    }

    #[must_use]
    pub fn stack(&self, id: StackId) -> &CardStack {
        &self.stacks[id.slot()]
    }

    pub fn stack_mut(&mut self, id: StackId) -> &mut CardStack {
        &mut self.stacks[id.slot()]
    }

    /// Stacks paired with their ids, in board order.
    pub fn iter(&self) -> impl Iterator<Item = (StackId, &CardStack)> {
        StackId::all().zip(self.stacks.iter())
    }

    /// Empty every stack.
    pub fn clear(&mut self) {
        self.stacks.iter_mut().for_each(CardStack::clear);
    }

    /// Clear the board and deal `order` round-robin into the tableau:
    /// card `i` goes to column `i % 8`.
    pub fn deal(&mut self, order: &[Card]) {
        self.clear();
        for (i, &card) in order.iter().enumerate() {
            self.stack_mut(StackId::tableau(i % TABLEAU_COUNT)).push(card);
        }
    }

    /// Position every stack for a surface `screen_width` wide.
    pub fn layout(&mut self, screen_width: f64, layout: &LayoutConfig) {
        let card_width = screen_width / layout.cards_across;
        let card_height = card_width / layout.card_graphic_width * layout.card_graphic_height;
        let separator = layout.separator * card_width / layout.card_graphic_width;
        let inset = (card_height - card_width) / 2.0;

        let column_pitch = screen_width / layout.tableau_spacing;
        for i in 0..TABLEAU_COUNT {
            let left = (i as f64 * column_pitch + inset).round();
            let top = separator * 2.0 + card_height;
            self.stack_mut(StackId::tableau(i))
                .set_geometry(left, top, card_width, card_height, layout.tableau_fan);
        }

        let cell_pitch = screen_width / layout.top_row_spacing;
        for i in 0..FREE_CELL_COUNT {
            let left = (i as f64 * cell_pitch + inset).round();
            self.stack_mut(StackId::free_cell(i))
                .set_geometry(left, separator, card_width, card_height, layout.tableau_fan);
        }
        for i in 0..FOUNDATION_COUNT {
            let left = ((i + FREE_CELL_COUNT) as f64 + 0.5) * cell_pitch + inset;
            self.stack_mut(StackId::foundation(i))
                .set_geometry(left.round(), separator, card_width, card_height, layout.tableau_fan);
        }
    }

    /// The stack under `(x, y)`, if any. Later stacks in board order win
    /// when bounding boxes overlap.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<StackId> {
        self.iter()
            .filter(|(_, stack)| stack.contains_point(x, y))
            .map(|(id, _)| id)
            .last()
    }

    /// Number of empty free cells.
    #[must_use]
    pub fn empty_free_cells(&self) -> usize {
        self.empty_free_cell_ids().count()
    }

    /// Empty free cells, lowest index first.
    pub fn empty_free_cell_ids(&self) -> impl Iterator<Item = StackId> + '_ {
        (0..FREE_CELL_COUNT)
            .map(StackId::free_cell)
            .filter(move |&id| self.stack(id).is_empty())
    }

    /// Move the top card of `from` onto `to` without any rule check.
    ///
    /// Returns the moved card, or `None` when `from` is empty or equals `to`.
    pub fn move_top(&mut self, from: StackId, to: StackId) -> Option<Card> {
        if from == to {
            return None;
        }
        let card = self.stack_mut(from).pop()?;
        self.stack_mut(to).push(card);
        Some(card)
    }

    /// Where a card currently is: stack and index from the bottom.
    #[must_use]
    pub fn locate(&self, card: Card) -> Option<(StackId, usize)> {
        self.iter().find_map(|(id, stack)| {
            stack.cards().iter().position(|&c| c == card).map(|i| (id, i))
        })
    }

    /// Total number of cards on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.stacks.iter().map(CardStack::len).sum()
    }

    /// Whether foundation `index` reads Ace, Two, .. of its own suit.
    #[must_use]
    pub fn foundation_is_ordered(&self, index: usize) -> bool {
        let stack = self.stack(StackId::foundation(index));
        let Some(suit) = stack.suit() else {
            return stack.is_empty();
        };
        stack
            .cards()
            .iter()
            .enumerate()
            .all(|(rank, &card)| card.suit() == suit && card.rank() as usize == rank)
    }

    /// All foundations complete.
    #[must_use]
    pub fn is_won(&self) -> bool {
        (0..FOUNDATION_COUNT)
            .all(|i| self.stack(StackId::foundation(i)).len() == CARDS_PER_SUIT as usize)
    }
}
