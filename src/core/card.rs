//! Card identity: rank, suit, color and the tableau acceptance rule.
//!
//! A card is an integer in `0..52`. The suit is `id / 13` and the rank is
//! `id % 13`, so card 0 is the Ace of Clubs and card 51 the King of Hearts.
//!
//! ```
//! use freecell_engine::core::{Card, Color, Suit};
//!
//! let seven_spades = Card::from_parts(Suit::Spades, 6);
//! let eight_diamonds = Card::from_parts(Suit::Diamonds, 7);
//!
//! assert_eq!(seven_spades.color(), Color::Black);
//! assert!(eight_diamonds.accepts(Some(seven_spades)));
//! assert_eq!(seven_spades.to_string(), "7♠");
//! ```

use serde::{Deserialize, Serialize};

/// Number of cards per suit.
pub const CARDS_PER_SUIT: u8 = 13;

/// Number of cards in the deck.
pub const DECK_SIZE: usize = 52;

const RANK_SYMBOLS: [char; 13] = ['A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K'];
const SUIT_SYMBOLS: [char; 4] = ['C', 'D', 'S', 'H'];
const SUIT_GLYPHS: [char; 4] = ['♣', '♦', '♠', '♥'];
const RANK_NAMES: [&str; 13] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Jack", "Queen",
    "King",
];
const SUIT_NAMES: [&str; 4] = ["Clubs", "Diamonds", "Spades", "Hearts"];

/// Card suit. The discriminant is the suit index used in card ids and
/// foundation ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Spades = 2,
    Hearts = 3,
}

impl Suit {
    /// All suits in index order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];

    /// Suit from its index (0..4).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Spades),
            3 => Some(Suit::Hearts),
            _ => None,
        }
    }

    /// Suit index (0..4).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Suit color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Diamonds | Suit::Hearts => Color::Red,
        }
    }

    /// English name ("Clubs").
    #[must_use]
    pub const fn name(self) -> &'static str {
        SUIT_NAMES[self as usize]
    }
}

/// Suit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

impl Color {
    /// The other color.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }
}

/// Named view of a card's derived properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardInfo {
    /// 0 = Ace .. 12 = King.
    pub rank: u8,
    pub suit: Suit,
    pub color: Color,
}

/// A playing card, identified by an integer in `0..52`.
///
/// Cards are immutable; only their location on the board changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Create a card from its id. Returns `None` for ids outside `0..52`.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < DECK_SIZE {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Create a card from suit and rank (0 = Ace).
    ///
    /// Panics if `rank >= 13`.
    #[must_use]
    pub const fn from_parts(suit: Suit, rank: u8) -> Self {
        assert!(rank < CARDS_PER_SUIT, "rank out of range");
        Self(suit as u8 * CARDS_PER_SUIT + rank)
    }

    /// All 52 cards in id order.
    pub fn deck() -> impl DoubleEndedIterator<Item = Card> + ExactSizeIterator {
        (0..DECK_SIZE as u8).map(Card)
    }

    /// Raw id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        match Suit::from_index((self.0 / CARDS_PER_SUIT) as usize) {
            Some(suit) => suit,
            None => unreachable!(),
        }
    }

    /// 0 = Ace .. 12 = King.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 % CARDS_PER_SUIT
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit().color()
    }

    #[must_use]
    pub const fn info(self) -> CardInfo {
        CardInfo {
            rank: self.rank(),
            suit: self.suit(),
            color: self.color(),
        }
    }

    /// Whether `other` may sit directly on top of this card in a tableau run:
    /// opposite color and exactly one rank lower. An Ace accepts nothing.
    #[must_use]
    pub fn accepts(self, other: Option<Card>) -> bool {
        let Some(other) = other else {
            return false;
        };
        if self.color() == other.color() {
            return false;
        }
        let rank = self.rank();
        rank >= 1 && rank == other.rank() + 1
    }

    /// Two-letter ASCII symbol, e.g. `"AC"`, `"TH"`.
    #[must_use]
    pub fn symbol(self) -> String {
        let mut s = String::with_capacity(2);
        s.push(RANK_SYMBOLS[self.rank() as usize]);
        s.push(SUIT_SYMBOLS[self.suit().index()]);
        s
    }

    /// English name, e.g. `"Queen of Hearts"`.
    #[must_use]
    pub fn name(self) -> String {
        format!("{} of {}", RANK_NAMES[self.rank() as usize], self.suit().name())
    }
}

impl TryFrom<u8> for Card {
    type Error = InvalidCard;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Card::new(id).ok_or(InvalidCard::OutOfRange(id))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            RANK_SYMBOLS[self.rank() as usize],
            SUIT_GLYPHS[self.suit().index()]
        )
    }
}

impl std::str::FromStr for Card {
    type Err = InvalidCard;

    /// Parse the two-letter ASCII symbol produced by [`Card::symbol`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(InvalidCard::BadSymbol(s.to_string()));
        };
        let rank = RANK_SYMBOLS.iter().position(|&c| c == r.to_ascii_uppercase());
        let suit = SUIT_SYMBOLS.iter().position(|&c| c == su.to_ascii_uppercase());
        match (rank, suit.and_then(Suit::from_index)) {
            (Some(rank), Some(suit)) => Ok(Card::from_parts(suit, rank as u8)),
            _ => Err(InvalidCard::BadSymbol(s.to_string())),
        }
    }
}

/// A value that does not name one of the 52 cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidCard {
    /// Id outside `0..52`.
    OutOfRange(u8),
    /// Unparseable symbol.
    BadSymbol(String),
}

impl std::fmt::Display for InvalidCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidCard::OutOfRange(id) => write!(f, "card id {id} is outside 0..52"),
            InvalidCard::BadSymbol(s) => write!(f, "`{s}` is not a card symbol"),
        }
    }
}

impl std::error::Error for InvalidCard {}
