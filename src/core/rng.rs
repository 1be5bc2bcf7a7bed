//! Seeded shuffling for the library.
//!
//! A seed fixes the deck order, so a table can be dealt again from its
//! configuration alone. Mid-game the generator is saved by its stream
//! position ([`GameRngState`]) and travels inside the encoded game state.
//!
//! ```
//! use gtr_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! let mut left = vec![1, 2, 3, 4, 5];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream owned by a game.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "GameRngState", into = "GameRngState")]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed the stream was started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle cards (or anything else) in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.stream);
    }
}

/// Saved stream: the seed plus the ChaCha8 word position, constant in size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

impl From<GameRngState> for GameRng {
    fn from(saved: GameRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(saved.seed);
        stream.set_word_pos(saved.word_pos);
        Self {
            stream,
            seed: saved.seed,
        }
    }
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        Self {
            seed: rng.seed,
            word_pos: rng.stream.get_word_pos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardName, CardRegistry};

    #[test]
    fn test_seed_fixes_deck_order() {
        let deck = CardRegistry::new().orders_deck();

        let mut first = deck.clone();
        let mut second = deck.clone();
        let mut other = deck.clone();
        GameRng::new(3).shuffle(&mut first);
        GameRng::new(3).shuffle(&mut second);
        GameRng::new(4).shuffle(&mut other);

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_ne!(first, deck);
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut deck = CardRegistry::new().orders_deck();
        GameRng::new(11).shuffle(&mut deck);

        let temples = deck.iter().filter(|c| c.name == CardName::Temple).count();
        assert_eq!(deck.len(), 144);
        assert_eq!(temples, CardName::Temple.copies());
    }

    #[test]
    fn test_saved_stream_resumes_mid_game() {
        let mut rng = GameRng::new(42);
        let mut warmup: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut warmup);

        let json = serde_json::to_string(&rng).unwrap();
        let mut resumed: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(resumed.seed(), 42);

        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        rng.shuffle(&mut a);
        resumed.shuffle(&mut b);
        assert_eq!(a, b);
    }
}
