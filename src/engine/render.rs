//! Per-frame draw lists.
//!
//! A [`Frame`] is computed from the board, the animation queue and the
//! selection, then handed to a [`Surface`]. The surface never sees mutable
//! engine state.
//!
//! ## Draw Order
//!
//! Stacks in board order, then cards in flight in queue order. An empty
//! stack, or one whose only visible card is in flight, draws a back: the suit
//! back on foundations, a blank back elsewhere. Tableau columns draw every
//! card that is not in flight; other stacks draw only their top one.

use rustc_hash::FxHashSet;

use crate::animation::AnimationScheduler;
use crate::core::{Card, Rect, Suit};
use crate::zones::{Board, StackId, StackKind};

/// What to draw in a sprite's rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Card(Card),
    /// Placeholder on an empty foundation.
    SuitBack(Suit),
    /// Placeholder on an empty free cell or tableau column.
    Blank,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub face: CardFace,
    pub rect: Rect,
    /// Top card of the selected stack.
    pub highlighted: bool,
}

/// Drawing target provided by the host.
pub trait Surface {
    fn draw(&mut self, sprite: &Sprite);

    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) {}
}

impl Surface for Vec<Sprite> {
    fn draw(&mut self, sprite: &Sprite) {
        self.push(*sprite);
    }

    fn begin_frame(&mut self) {
        self.clear();
    }
}

/// Immutable draw list for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    sprites: Vec<Sprite>,
}

impl Frame {
    #[must_use]
    pub fn build(board: &Board, animations: &AnimationScheduler, selection: Option<StackId>) -> Self {
        let mut sprites = Vec::new();
        let highlight = selection.and_then(|id| board.stack(id).top());

        for (id, stack) in board.iter() {
            let resting: Vec<(usize, Card)> = stack
                .cards()
                .iter()
                .copied()
                .enumerate()
                .filter(|&(_, card)| !animations.is_moving(card))
                .collect();

            if resting.is_empty() {
                let face = match (id.kind, stack.suit()) {
                    (StackKind::Foundation, Some(suit)) => CardFace::SuitBack(suit),
                    _ => CardFace::Blank,
                };
                sprites.push(Sprite { face, rect: stack.card_rect(0), highlighted: false });
                continue;
            }

            // Cards stacked exactly on top of each other only show the top one
            let shown = if stack.y_offset() == 0.0 {
                &resting[resting.len() - 1..]
            } else {
                &resting[..]
            };
            sprites.extend(shown.iter().map(|&(index, card)| Sprite {
                face: CardFace::Card(card),
                rect: stack.card_rect(index),
                highlighted: highlight == Some(card),
            }));
        }

        let mut drawn = FxHashSet::default();
        for animation in animations.iter() {
            let card = animation.card();
            if !drawn.insert(card) {
                continue;
            }
            if let Some(rect) = animations.visual_rect(card) {
                sprites.push(Sprite { face: CardFace::Card(card), rect, highlighted: false });
            }
        }

        Self { sprites }
    }

    #[must_use]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite showing `card`, if it is drawn this frame.
    #[must_use]
    pub fn sprite_of(&self, card: Card) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.face == CardFace::Card(card))
    }

    /// Send every sprite to `surface`, in draw order.
    pub fn draw_onto<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.begin_frame();
        for sprite in &self.sprites {
            surface.draw(sprite);
        }
        surface.end_frame();
    }
}
