//! Engine integration tests: pointer-driven move resolution.
//!
//! Boards are built by importing a snapshot, so each test states exactly
//! which cards sit where. Cards not named by a test are piled on tableau 0.

use freecell_engine::{
    Board, Card, Engine, EngineConfig, MoveKind, PointerOutcome, Snapshot, StackId, Suit,
};

fn card(suit: Suit, rank: u8) -> Card {
    Card::from_parts(suit, rank)
}

fn identity_engine() -> Engine {
    let mut engine = Engine::new(EngineConfig::default());
    engine
        .deal_with_order(&Card::deck().collect::<Vec<_>>())
        .expect("identity order is a valid deal");
    engine
}

/// Engine whose board holds `stacks` as given and every other card on tableau 0.
fn engine_with(stacks: &[(StackId, Vec<Card>)]) -> Engine {
    let placed: Vec<Card> = stacks.iter().flat_map(|(_, cards)| cards.iter().copied()).collect();
    let mut board = Board::new();
    board
        .stack_mut(StackId::tableau(0))
        .set_cards(Card::deck().filter(|c| !placed.contains(c)));
    for (id, cards) in stacks {
        board.stack_mut(*id).set_cards(cards.iter().copied());
    }

    let mut engine = identity_engine();
    engine
        .import_state(&Snapshot::capture(&board, &[]).to_json())
        .expect("test board is valid");
    engine
}

fn click(engine: &mut Engine, id: StackId) -> PointerOutcome {
    click_with(engine, id, false)
}

fn click_with(engine: &mut Engine, id: StackId, force: bool) -> PointerOutcome {
    let rect = engine.board().stack(id).top_card_rect();
    engine.on_pointer(rect.left + 1.0, rect.top + 1.0, force)
}

fn settle(engine: &mut Engine) {
    while engine.advance(0.05) {}
}

fn ids(engine: &Engine, id: StackId) -> Vec<u8> {
    engine.board().stack(id).cards().iter().map(|c| c.id()).collect()
}

/// K♦ under a 9♠ 8♥ 7♣ run.
fn run_of_three() -> Vec<Card> {
    vec![
        card(Suit::Diamonds, 12),
        card(Suit::Spades, 8),
        card(Suit::Hearts, 7),
        card(Suit::Clubs, 6),
    ]
}

fn kings() -> Vec<Card> {
    vec![card(Suit::Clubs, 12), card(Suit::Spades, 12), card(Suit::Hearts, 12)]
}

// =============================================================================
// Scenarios
// =============================================================================

/// Identity deal: select the top of tableau 0, drop it on an empty free cell.
#[test]
fn test_identity_deal_to_free_cell() {
    let mut engine = identity_engine();
    assert_eq!(ids(&engine, StackId::tableau(0)), vec![0, 8, 16, 24, 32, 40, 48]);

    assert_eq!(click(&mut engine, StackId::tableau(0)), PointerOutcome::Selected(StackId::tableau(0)));
    let highlighted: Vec<_> = engine.frame().sprites().iter().filter(|s| s.highlighted).copied().collect();
    assert_eq!(highlighted.len(), 1);

    let outcome = click(&mut engine, StackId::free_cell(2));
    assert!(matches!(outcome, PointerOutcome::Moved(summary) if summary.cards == 1));
    assert_eq!(ids(&engine, StackId::free_cell(2)), vec![48]);
    assert_eq!(ids(&engine, StackId::tableau(0)), vec![0, 8, 16, 24, 32, 40]);
    assert!(engine.history().can_undo());
}

/// 7♠ onto 8♦ moves one card.
#[test]
fn test_single_card_onto_alternating_color() {
    let seven_spades = card(Suit::Spades, 6);
    let eight_diamonds = card(Suit::Diamonds, 7);
    let mut engine = engine_with(&[
        (StackId::tableau(1), vec![eight_diamonds]),
        (StackId::tableau(2), vec![seven_spades]),
    ]);

    click(&mut engine, StackId::tableau(2));
    let outcome = click(&mut engine, StackId::tableau(1));
    let PointerOutcome::Moved(summary) = outcome else {
        panic!("expected a move, got {outcome:?}");
    };
    assert_eq!(summary.cards, 1);
    assert_eq!(summary.kind, MoveKind::Single);
    assert_eq!(engine.board().stack(StackId::tableau(1)).cards(), &[eight_diamonds, seven_spades]);
    assert!(engine.board().stack(StackId::tableau(2)).is_empty());
}

/// A run of three with two free cells moves onto an empty column through them.
#[test]
fn test_run_of_three_via_two_free_cells() {
    let kings = kings();
    let mut engine = engine_with(&[
        (StackId::tableau(1), run_of_three()),
        (StackId::free_cell(0), vec![kings[0]]),
        (StackId::free_cell(1), vec![kings[1]]),
        (StackId::tableau(2), vec![]),
    ]);

    click(&mut engine, StackId::tableau(1));
    let outcome = click(&mut engine, StackId::tableau(2));
    let PointerOutcome::Moved(summary) = outcome else {
        panic!("expected a move, got {outcome:?}");
    };
    assert_eq!(summary.kind, MoveKind::Column { parked: 2 });
    assert_eq!(summary.cards, 3);
    assert_eq!(summary.steps, 5);

    assert_eq!(engine.board().stack(StackId::tableau(2)).cards(), &run_of_three()[1..]);
    assert_eq!(engine.board().stack(StackId::tableau(1)).cards(), &[card(Suit::Diamonds, 12)]);
    assert_eq!(engine.board().stack(StackId::free_cell(0)).cards(), &[kings[0]]);
    assert_eq!(engine.board().empty_free_cells(), 2);
    assert_eq!(engine.animations().len(), 5);
    assert_eq!(engine.stats().column_moves, 1);
}

/// A run of three with one free cell is over capacity for an empty column.
#[test]
fn test_run_of_three_over_capacity() {
    let kings = kings();
    let mut engine = engine_with(&[
        (StackId::tableau(1), run_of_three()),
        (StackId::free_cell(0), vec![kings[0]]),
        (StackId::free_cell(1), vec![kings[1]]),
        (StackId::free_cell(2), vec![kings[2]]),
        (StackId::tableau(2), vec![]),
    ]);
    let before = engine.export_state();

    click(&mut engine, StackId::tableau(1));
    let outcome = click(&mut engine, StackId::tableau(2));
    // Empty destination: nothing to reselect, engine is Idle
    assert_eq!(outcome, PointerOutcome::Rejected { reselected: None });
    assert_eq!(engine.selection(), None);
    assert_eq!(engine.export_state(), before);
    assert!(!engine.history().can_undo());

    // The override moves the longest sub-run that fits
    click(&mut engine, StackId::tableau(1));
    let outcome = click_with(&mut engine, StackId::tableau(2), true);
    assert!(matches!(outcome, PointerOutcome::Moved(summary) if summary.cards == 2));
    assert_eq!(engine.board().stack(StackId::tableau(2)).cards(), &run_of_three()[2..]);
}

// =============================================================================
// Selection
// =============================================================================

/// An illegal destination becomes the new selection, and the next click
/// moves from it.
#[test]
fn test_selection_chaining() {
    let mut engine = engine_with(&[
        (StackId::tableau(1), vec![card(Suit::Hearts, 4)]),
        (StackId::tableau(2), vec![card(Suit::Diamonds, 9)]),
        (StackId::tableau(3), vec![card(Suit::Spades, 5)]),
    ]);

    click(&mut engine, StackId::tableau(1));
    // 5♥ onto T♦: illegal, T♦ is selected instead
    let outcome = click(&mut engine, StackId::tableau(2));
    assert_eq!(outcome, PointerOutcome::Rejected { reselected: Some(StackId::tableau(2)) });

    // T♦ cannot go on 6♠ either; 6♠ is selected
    click(&mut engine, StackId::tableau(3));
    assert_eq!(engine.selection(), Some(StackId::tableau(3)));

    // 6♠ to a free cell
    assert!(matches!(click(&mut engine, StackId::free_cell(0)), PointerOutcome::Moved(_)));
    settle(&mut engine);

    // 5♥ onto 6♠ in the free cell is never legal; 6♠ becomes the selection
    click(&mut engine, StackId::tableau(1));
    assert_eq!(
        click(&mut engine, StackId::free_cell(0)),
        PointerOutcome::Rejected { reselected: Some(StackId::free_cell(0)) }
    );
}

/// Clicking outside every stack clears the selection.
#[test]
fn test_click_outside_clears() {
    let mut engine = identity_engine();
    click(&mut engine, StackId::tableau(4));
    assert_eq!(engine.on_pointer(10_000.0, 10_000.0, false), PointerOutcome::Cleared);
    assert_eq!(engine.selection(), None);
}

/// Same-stack moves are rejected without touching history.
#[test]
fn test_same_stack_is_noop() {
    let mut engine = identity_engine();
    assert_eq!(engine.try_move(StackId::tableau(3), StackId::tableau(3), true), None);
    assert!(!engine.history().can_undo());
    assert_eq!(engine.stats().moves, 0);
}

// =============================================================================
// Rules through the engine
// =============================================================================

/// A move into an occupied free cell is rejected even with the override.
#[test]
fn test_occupied_free_cell_rejected() {
    let mut engine = identity_engine();
    engine.try_move(StackId::tableau(0), StackId::free_cell(0), false).expect("empty cell");
    assert_eq!(engine.try_move(StackId::tableau(1), StackId::free_cell(0), true), None);
    assert_eq!(engine.board().stack(StackId::free_cell(0)).len(), 1);
}

/// Foundations build up in suit from the Ace.
#[test]
fn test_foundation_build_up() {
    let mut engine = engine_with(&[
        (StackId::tableau(1), vec![card(Suit::Spades, 1), card(Suit::Spades, 0)]),
    ]);

    assert_eq!(engine.try_move(StackId::tableau(1), StackId::foundation(0), false), None);
    engine
        .try_move(StackId::tableau(1), StackId::foundation(Suit::Spades.index()), false)
        .expect("ace onto its foundation");
    engine
        .try_move(StackId::tableau(1), StackId::foundation(Suit::Spades.index()), false)
        .expect("two onto the ace");
    assert!(engine.board().foundation_is_ordered(Suit::Spades.index()));
    assert_eq!(engine.board().stack(StackId::foundation(2)).len(), 2);
}

/// The override drops one card onto a column that does not accept it.
#[test]
fn test_forced_move() {
    let mut engine = engine_with(&[
        (StackId::tableau(1), vec![card(Suit::Clubs, 3)]),
        (StackId::tableau(2), vec![card(Suit::Spades, 9)]),
    ]);

    assert_eq!(engine.try_move(StackId::tableau(1), StackId::tableau(2), false), None);
    let summary = engine
        .try_move(StackId::tableau(1), StackId::tableau(2), true)
        .expect("forced");
    assert_eq!(summary.kind, MoveKind::Forced);
    assert_eq!(engine.stats().forced_moves, 1);
}

/// Playing out a solved board wins the game.
#[test]
fn test_win_detection() {
    // Each suit stacked King-down in its own column, Ace on top
    let columns: Vec<(StackId, Vec<Card>)> = Suit::ALL
        .into_iter()
        .enumerate()
        .map(|(i, suit)| (StackId::tableau(i + 1), (0..13).rev().map(|r| card(suit, r)).collect()))
        .collect();
    let mut engine = engine_with(&columns);
    assert!(!engine.is_won());

    for (i, suit) in Suit::ALL.into_iter().enumerate() {
        for _ in 0..13 {
            engine
                .try_move(StackId::tableau(i + 1), StackId::foundation(suit.index()), false)
                .expect("next card goes up");
        }
    }
    assert!(engine.is_won());
    assert_eq!(engine.stats().moves, 52);
}

/// `new_deal` reshuffles, `redeal` replays, both clear history.
#[test]
fn test_new_deal_and_redeal() {
    let mut engine = Engine::new(EngineConfig::default().with_seed(3));
    let first = engine.deal_order().to_vec();
    let dealt = engine.export_state();

    let top = engine.board().stack(StackId::tableau(0)).top();
    engine.try_move(StackId::tableau(0), StackId::free_cell(0), false);
    assert_eq!(engine.board().stack(StackId::free_cell(0)).top(), top);

    engine.redeal();
    assert_eq!(engine.export_state(), dealt);
    assert!(!engine.history().can_undo());

    engine.new_deal();
    assert_ne!(engine.deal_order(), first.as_slice());
    assert_eq!(engine.board().card_count(), 52);
    assert_eq!(engine.stats().deals, 3);
}
