//! FIFO queue of card animations, advanced once per frame.
//!
//! Only the head animation moves. When it arrives, it is dropped and the next
//! one becomes the head on the following frame, starting from its own
//! recorded start rectangle. Animations never feed back into game state.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Card, Point, Rect};

/// One card travelling in a straight line between two rectangles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveAnimation {
    card: Card,
    start: Rect,
    position: Point,
    end: Rect,
    /// Pixels per second.
    speed: f64,
}

impl MoveAnimation {
    #[must_use]
    pub fn new(card: Card, start: Rect, end: Rect, speed: f64) -> Self {
        Self { card, start, position: start.origin(), end, speed }
    }

    #[must_use]
    pub fn card(&self) -> Card {
        self.card
    }

    #[must_use]
    pub fn start(&self) -> Rect {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Rect {
        self.end
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Where the card is drawn right now.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.start.at(self.position)
    }

    /// Advance by `elapsed` seconds. Returns `false` once the card has
    /// reached its destination. Negative or NaN `elapsed` counts as zero.
    pub fn process(&mut self, elapsed: f64) -> bool {
        let elapsed = if elapsed >= 0.0 { elapsed } else { 0.0 };
        let target = self.end.origin();
        let remaining = self.position.distance(target);
        let travel = self.speed * elapsed;
        if remaining <= travel {
            self.position = target;
            return false;
        }
        let t = travel / remaining;
        self.position = Point::new(
            self.position.x + (target.x - self.position.x) * t,
            self.position.y + (target.y - self.position.y) * t,
        );
        true
    }
}

/// Pending animations, head first.
#[derive(Clone, Debug, Default)]
pub struct AnimationScheduler {
    queue: VecDeque<MoveAnimation>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, animation: MoveAnimation) {
        self.queue.push_back(animation);
    }

    /// Process the head animation for one frame.
    ///
    /// Returns `true` if an animation was processed, including on the frame
    /// where it completes.
    pub fn advance(&mut self, elapsed: f64) -> bool {
        let Some(head) = self.queue.front_mut() else {
            return false;
        };
        if !head.process(elapsed) {
            self.queue.pop_front();
        }
        true
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop everything; cards snap to their logical positions.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[must_use]
    pub fn head(&self) -> Option<&MoveAnimation> {
        self.queue.front()
    }

    /// Pending animations, head first.
    pub fn iter(&self) -> impl Iterator<Item = &MoveAnimation> {
        self.queue.iter()
    }

    /// Whether `card` still has a leg to travel.
    #[must_use]
    pub fn is_moving(&self, card: Card) -> bool {
        self.queue.iter().any(|a| a.card == card)
    }

    /// Where `card` is drawn while it has pending legs: the head at its
    /// interpolated position, a queued card at the start of its first leg.
    #[must_use]
    pub fn visual_rect(&self, card: Card) -> Option<Rect> {
        let (index, animation) = self.queue.iter().enumerate().find(|(_, a)| a.card == card)?;
        Some(if index == 0 { animation.rect() } else { animation.start })
    }
}
