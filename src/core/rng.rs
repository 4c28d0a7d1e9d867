//! Deterministic shuffling for deals.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same sequence of deals
//! - **Resumable**: The stream position can be saved and restored, so a
//!   host can persist "which deal comes next" alongside a game
//!
//! ```
//! use freecell_engine::core::DealRng;
//!
//! let mut a = DealRng::new(7);
//! let mut b = DealRng::new(7);
//! assert_eq!(a.next_deal(), b.next_deal());
//! assert_ne!(a.next_deal(), DealRng::new(7).next_deal());
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::card::Card;

/// Seeded RNG used to shuffle deal permutations.
///
/// Uses ChaCha8 so a seed reproduces the same hands on every platform.
#[derive(Clone, Debug)]
pub struct DealRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DealRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// A fresh deck in shuffled order.
    pub fn next_deal(&mut self) -> Vec<Card> {
        let mut order: Vec<Card> = Card::deck().collect();
        self.shuffle(&mut order);
        order
    }

    /// Current stream position, for saving.
    #[must_use]
    pub fn state(&self) -> DealRngState {
        DealRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a saved stream.
    #[must_use]
    pub fn from_state(state: &DealRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
