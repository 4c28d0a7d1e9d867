//! An ordered pile of cards with its on-screen geometry.
//!
//! A `CardStack` knows nothing about move legality. It stores cards
//! bottom (index 0) to top (last) and remembers where it sits on screen so
//! the board can hit-test it and the renderer can place its cards.

use serde::{Deserialize, Serialize};

use crate::core::{Card, Rect, Suit};

/// The three kinds of piles on a FreeCell board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StackKind {
    /// Single-card holding cell.
    FreeCell,
    /// Suit pile built up from Ace to King.
    Foundation,
    /// Playing column.
    Tableau,
}

impl StackKind {
    /// All kinds, in board order.
    pub const ALL: [StackKind; 3] = [StackKind::FreeCell, StackKind::Foundation, StackKind::Tableau];

    /// Name used in snapshot keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StackKind::FreeCell => "freecell",
            StackKind::Foundation => "foundation",
            StackKind::Tableau => "tableau",
        }
    }

    /// Parse a snapshot key name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for StackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered pile of cards.
///
/// ## Usage
///
/// ```
/// use freecell_engine::core::{Card, Suit};
/// use freecell_engine::zones::{CardStack, StackKind};
///
/// let mut stack = CardStack::new(StackKind::Tableau, None);
/// stack.push(Card::from_parts(Suit::Hearts, 4));
/// stack.push(Card::from_parts(Suit::Clubs, 3));
///
/// assert_eq!(stack.at(-1), Some(Card::from_parts(Suit::Clubs, 3)));
/// assert_eq!(stack.at(0), Some(Card::from_parts(Suit::Hearts, 4)));
/// assert_eq!(stack.at(-3), None);
/// ```
#[derive(Clone, Debug)]
pub struct CardStack {
    kind: StackKind,

    /// Target suit (foundations only).
    suit: Option<Suit>,

    cards: Vec<Card>,

    left: f64,
    top: f64,
    card_width: f64,
    card_height: f64,

    /// Vertical distance between consecutive cards (0 for non-fanned piles).
    y_offset: f64,
}

impl CardStack {
    /// Create an empty stack with zero geometry.
    #[must_use]
    pub fn new(kind: StackKind, suit: Option<Suit>) -> Self {
        Self {
            kind,
            suit,
            cards: Vec::new(),
            left: 0.0,
            top: 0.0,
            card_width: 0.0,
            card_height: 0.0,
            y_offset: 0.0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> StackKind {
        self.kind
    }

    /// Target suit of a foundation; `None` for other kinds.
    #[must_use]
    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Card at `index`; negative indices count from the top (`-1` is the top
    /// card). Out of range returns `None`.
    #[must_use]
    pub fn at(&self, index: isize) -> Option<Card> {
        let resolved = if index < 0 {
            self.cards.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        self.cards.get(resolved).copied()
    }

    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Replace the contents wholesale (snapshot restore).
    pub fn set_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.clear();
        self.cards.extend(cards);
    }

    /// Place the stack on screen. Tableau stacks fan their cards downward by
    /// `card_height * fan`; other kinds stack cards exactly on top of each other.
    pub fn set_geometry(&mut self, left: f64, top: f64, card_width: f64, card_height: f64, fan: f64) {
        self.left = left;
        self.top = top;
        self.card_width = card_width;
        self.card_height = card_height;
        self.y_offset = if self.kind == StackKind::Tableau {
            card_height * fan
        } else {
            0.0
        };
    }

    #[must_use]
    pub fn y_offset(&self) -> f64 {
        self.y_offset
    }

    /// Bounding rectangle of the whole stack (one card-sized slot when empty).
    #[must_use]
    pub fn rect(&self) -> Rect {
        let spread = self.y_offset * self.cards.len().saturating_sub(1) as f64;
        Rect::new(self.left, self.top, self.card_width, self.card_height + spread)
    }

    /// Rectangle of the card at `index`. Valid past the top too: `card_rect(len())`
    /// is where the next pushed card will land.
    #[must_use]
    pub fn card_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.left,
            self.top + self.y_offset * index as f64,
            self.card_width,
            self.card_height,
        )
    }

    /// Rectangle of the top card, or of the empty slot.
    #[must_use]
    pub fn top_card_rect(&self) -> Rect {
        self.card_rect(self.cards.len().saturating_sub(1))
    }

    /// Hit-test against the bounding rectangle.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.rect().contains(x, y)
    }
}
