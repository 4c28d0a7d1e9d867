//! Versioned board snapshots: the unit of undo/redo and of save/load.
//!
//! ## Text Format (version 1)
//!
//! A flat JSON object. Each of the 16 stacks is a `kind-index` key mapping to
//! its card ids bottom to top; `version` carries the schema version and
//! `deal` the 52-card deal permutation:
//!
//! ```json
//! {"version":1,"deal":[0,1,..],"freecell-0":[],"tableau-0":[0,8,16],..}
//! ```
//!
//! Missing stack keys are empty stacks. A missing `deal` decodes to an empty
//! deal, which the engine reads as "keep the current one".
//!
//! ## Validation
//!
//! Strict decoding rejects anything that is not a reachable board: every card
//! exactly once, at most one card per free cell, foundations built up from the
//! Ace in their own suit, and a deal that is a permutation of the deck.
//! Lenient decoding only rejects what cannot be represented.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Card, DECK_SIZE};
use crate::zones::{Board, StackId, StackKind, STACK_COUNT};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

const VERSION_KEY: &str = "version";
const DEAL_KEY: &str = "deal";

/// Immutable record of every stack's contents plus the deal permutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    version: u32,
    /// Stack contents in board order, bottom to top.
    stacks: [Vec<Card>; STACK_COUNT],
    /// Deal permutation; empty when unknown.
    deal: Vec<Card>,
}

impl Snapshot {
    /// Capture the board and the deal it came from.
    #[must_use]
    pub fn capture(board: &Board, deal: &[Card]) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            stacks: std::array::from_fn(|slot| {
                StackId::from_slot(slot)
                    .map(|id| board.stack(id).cards().to_vec())
                    .unwrap_or_default()
            }),
            deal: deal.to_vec(),
        }
    }

    /// Overwrite every stack of `board` with this snapshot's contents.
    pub fn restore(&self, board: &mut Board) {
        for id in StackId::all() {
            board.stack_mut(id).set_cards(self.stacks[id.slot()].iter().copied());
        }
    }

    /// Contents of one stack, bottom to top.
    #[must_use]
    pub fn stack(&self, id: StackId) -> &[Card] {
        &self.stacks[id.slot()]
    }

    /// Deal permutation; empty when the payload carried none.
    #[must_use]
    pub fn deal(&self) -> &[Card] {
        &self.deal
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Check the board invariants.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut seen = FxHashSet::default();
        for card in self.stacks.iter().flatten() {
            if !seen.insert(*card) {
                return Err(SnapshotError::DuplicateCard(*card));
            }
        }
        if seen.len() != DECK_SIZE {
            return Err(SnapshotError::MissingCards(DECK_SIZE - seen.len()));
        }

        for id in StackId::all() {
            let cards = self.stack(id);
            match id.kind {
                StackKind::FreeCell if cards.len() > 1 => {
                    return Err(SnapshotError::FreeCellOverflow { stack: id, len: cards.len() });
                }
                StackKind::Foundation => {
                    let ordered = cards.iter().enumerate().all(|(rank, card)| {
                        card.suit().index() == id.index as usize && card.rank() as usize == rank
                    });
                    if !ordered {
                        return Err(SnapshotError::FoundationOutOfOrder(id));
                    }
                }
                _ => {}
            }
        }

        if !self.deal.is_empty() {
            validate_deal(&self.deal)?;
        }
        Ok(())
    }

    /// Encode as the version 1 JSON text format.
    #[must_use]
    pub fn to_json(&self) -> String {
        let ids = |cards: &[Card]| Value::from(cards.iter().map(|c| c.id()).collect::<Vec<_>>());

        let mut doc = Map::new();
        doc.insert(VERSION_KEY.to_string(), Value::from(self.version));
        doc.insert(DEAL_KEY.to_string(), ids(&self.deal));
        for id in StackId::all() {
            doc.insert(id.key(), ids(self.stack(id)));
        }
        Value::Object(doc).to_string()
    }

    /// Decode the JSON text format. `strict` enables full validation.
    pub fn from_json(text: &str, strict: bool) -> Result<Self, SnapshotError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        let Value::Object(doc) = value else {
            return Err(SnapshotError::Malformed("snapshot is not a JSON object".to_string()));
        };

        let version = doc
            .get(VERSION_KEY)
            .and_then(Value::as_u64)
            .ok_or_else(|| SnapshotError::Malformed("missing or non-numeric version".to_string()))?;
        check_version(u32::try_from(version).unwrap_or(u32::MAX))?;

        let mut stacks: [Vec<Card>; STACK_COUNT] = Default::default();
        let mut deal = Vec::new();
        for (key, value) in &doc {
            if key == VERSION_KEY {
                continue;
            }
            if key == DEAL_KEY {
                deal = decode_cards(key, value)?;
                continue;
            }
            match key.parse::<StackId>() {
                Ok(id) => stacks[id.slot()] = decode_cards(key, value)?,
                Err(()) if strict => return Err(SnapshotError::UnknownStack(key.clone())),
                Err(()) => {}
            }
        }

        let snapshot = Self { version: SNAPSHOT_VERSION, stacks, deal };
        if strict {
            snapshot.validate()?;
        }
        Ok(snapshot)
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    /// Decode the binary format. `strict` enables full validation.
    pub fn from_bytes(bytes: &[u8], strict: bool) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        check_version(snapshot.version)?;
        if strict {
            snapshot.validate()?;
        }
        Ok(snapshot)
    }
}

/// Check that `deal` holds each of the 52 cards exactly once.
pub fn validate_deal(deal: &[Card]) -> Result<(), SnapshotError> {
    let distinct: FxHashSet<Card> = deal.iter().copied().collect();
    if deal.len() != DECK_SIZE || distinct.len() != DECK_SIZE {
        return Err(SnapshotError::InvalidDeal);
    }
    Ok(())
}

fn check_version(found: u32) -> Result<(), SnapshotError> {
    if found == SNAPSHOT_VERSION {
        Ok(())
    } else {
        Err(SnapshotError::UnsupportedVersion { found, expected: SNAPSHOT_VERSION })
    }
}

fn decode_cards(key: &str, value: &Value) -> Result<Vec<Card>, SnapshotError> {
    let Value::Array(items) = value else {
        return Err(SnapshotError::Malformed(format!("`{key}` is not an array")));
    };
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|id| u8::try_from(id).ok())
                .and_then(Card::new)
                .ok_or_else(|| SnapshotError::InvalidCard { stack: key.to_string(), value: item.to_string() })
        })
        .collect()
}

/// Why a snapshot could not be imported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    /// Not decodable at all.
    Malformed(String),
    UnsupportedVersion { found: u32, expected: u32 },
    /// A key that names no stack.
    UnknownStack(String),
    /// A value that names no card.
    InvalidCard { stack: String, value: String },
    DuplicateCard(Card),
    /// Number of cards absent from the board.
    MissingCards(usize),
    FreeCellOverflow { stack: StackId, len: usize },
    FoundationOutOfOrder(StackId),
    /// Deal is not a permutation of the 52 cards.
    InvalidDeal,
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "invalid snapshot: {reason}"),
            Self::UnsupportedVersion { found, expected } => {
                write!(f, "unsupported snapshot version {found} (expected {expected})")
            }
            Self::UnknownStack(key) => write!(f, "invalid snapshot: unknown stack `{key}`"),
            Self::InvalidCard { stack, value } => {
                write!(f, "invalid snapshot: `{value}` in `{stack}` is not a card id")
            }
            Self::DuplicateCard(card) => write!(f, "invalid snapshot: {card} appears more than once"),
            Self::MissingCards(count) => write!(f, "invalid snapshot: {count} cards are missing"),
            Self::FreeCellOverflow { stack, len } => {
                write!(f, "invalid snapshot: {stack} holds {len} cards")
            }
            Self::FoundationOutOfOrder(stack) => {
                write!(f, "invalid snapshot: {stack} is not built up from the Ace in suit")
            }
            Self::InvalidDeal => write!(f, "invalid snapshot: deal is not a permutation of 52 cards"),
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn dealt_board() -> (Board, Vec<Card>) {
        let order: Vec<Card> = Card::deck().rev().collect();
        let mut board = Board::new();
        board.deal(&order);
        (board, order)
    }

    #[test]
    fn test_capture_restore() {
        let (mut board, order) = dealt_board();
        let snapshot = Snapshot::capture(&board, &order);

        board.move_top(StackId::tableau(3), StackId::free_cell(0));
        assert_ne!(Snapshot::capture(&board, &order), snapshot);

        snapshot.restore(&mut board);
        assert_eq!(Snapshot::capture(&board, &order), snapshot);
        assert!(board.stack(StackId::free_cell(0)).is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let (board, order) = dealt_board();
        let snapshot = Snapshot::capture(&board, &order);

        let text = snapshot.to_json();
        let decoded = Snapshot::from_json(&text, true).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_json_keys() {
        let (board, order) = dealt_board();
        let text = Snapshot::capture(&board, &order).to_json();
        let value: Value = serde_json::from_str(&text).unwrap();
        let doc = value.as_object().unwrap();

        assert_eq!(doc.len(), STACK_COUNT + 2);
        assert_eq!(doc["version"], Value::from(1));
        assert_eq!(doc["deal"].as_array().unwrap().len(), 52);
        assert_eq!(doc["tableau-0"].as_array().unwrap().len(), 7);
        assert!(doc["freecell-3"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_bytes_round_trip() {
        let (board, order) = dealt_board();
        let snapshot = Snapshot::capture(&board, &order);

        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(Snapshot::from_bytes(&bytes, true).unwrap(), snapshot);
        assert!(matches!(Snapshot::from_bytes(&bytes[..10], true), Err(SnapshotError::Malformed(_))));
    }

    #[test]
    fn test_missing_keys_are_empty_stacks() {
        let mut doc = Map::new();
        doc.insert("version".into(), Value::from(1));
        doc.insert("tableau-0".into(), Value::from((0u8..52).collect::<Vec<_>>()));
        let text = Value::Object(doc).to_string();

        let snapshot = Snapshot::from_json(&text, true).unwrap();
        assert_eq!(snapshot.stack(StackId::tableau(0)).len(), 52);
        assert!(snapshot.stack(StackId::tableau(1)).is_empty());
        assert!(snapshot.deal().is_empty());
    }

    #[test]
    fn test_rejects_duplicates_and_missing() {
        let (board, order) = dealt_board();
        let mut snapshot = Snapshot::capture(&board, &order);

        let moved = snapshot.stacks[StackId::tableau(0).slot()].pop().unwrap();
        assert_eq!(snapshot.validate(), Err(SnapshotError::MissingCards(1)));

        let copied = snapshot.stacks[StackId::tableau(2).slot()][0];
        snapshot.stacks[StackId::tableau(1).slot()].push(copied);
        snapshot.stacks[StackId::tableau(0).slot()].push(moved);
        assert!(matches!(snapshot.validate(), Err(SnapshotError::DuplicateCard(_))));
    }

    #[test]
    fn test_rejects_overfull_free_cell() {
        let (mut board, order) = dealt_board();
        board.move_top(StackId::tableau(0), StackId::free_cell(1));
        board.move_top(StackId::tableau(0), StackId::free_cell(1));
        let snapshot = Snapshot::capture(&board, &order);

        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::FreeCellOverflow { stack: StackId::free_cell(1), len: 2 })
        );
        // Lenient decoding lets it through
        assert!(Snapshot::from_json(&snapshot.to_json(), false).is_ok());
        assert!(Snapshot::from_json(&snapshot.to_json(), true).is_err());
    }

    #[test]
    fn test_rejects_unordered_foundation() {
        let (mut board, order) = dealt_board();
        // Tableau 0's top card is id 3 (Four of Clubs) under the reversed deal
        board.move_top(StackId::tableau(0), StackId::foundation(0));
        let snapshot = Snapshot::capture(&board, &order);
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::FoundationOutOfOrder(StackId::foundation(0)))
        );
    }

    #[test]
    fn test_rejects_bad_payloads() {
        assert!(matches!(Snapshot::from_json("not json", true), Err(SnapshotError::Malformed(_))));
        assert!(matches!(Snapshot::from_json("[1,2]", true), Err(SnapshotError::Malformed(_))));
        assert!(matches!(Snapshot::from_json("{}", true), Err(SnapshotError::Malformed(_))));
        assert_eq!(
            Snapshot::from_json(r#"{"version":2}"#, false),
            Err(SnapshotError::UnsupportedVersion { found: 2, expected: 1 })
        );
        assert_eq!(
            Snapshot::from_json(r#"{"version":1,"tableau-0":[52]}"#, false),
            Err(SnapshotError::InvalidCard { stack: "tableau-0".into(), value: "52".into() })
        );
        assert_eq!(
            Snapshot::from_json(r#"{"version":1,"startingCards":[]}"#, true),
            Err(SnapshotError::UnknownStack("startingCards".into()))
        );
    }

    #[test]
    fn test_validate_deal() {
        let deck: Vec<Card> = Card::deck().collect();
        assert!(validate_deal(&deck).is_ok());
        assert_eq!(validate_deal(&deck[1..]), Err(SnapshotError::InvalidDeal));

        let mut doubled = deck.clone();
        doubled[0] = doubled[1];
        assert_eq!(validate_deal(&doubled), Err(SnapshotError::InvalidDeal));
    }

    #[test]
    fn test_error_display() {
        let err = SnapshotError::UnsupportedVersion { found: 3, expected: 1 };
        assert_eq!(err.to_string(), "unsupported snapshot version 3 (expected 1)");
    }
}
