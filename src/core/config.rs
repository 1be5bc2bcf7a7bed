//! Game configuration.
//!
//! `GameConfig` collects the table-level knobs fixed at game creation:
//! player count, seed and the starting counts the rulebook prescribes.
//! Everything else (structure powers, capacities) is derived from game
//! state by the legality layer.

use serde::{Deserialize, Serialize};

/// Complete game configuration.
///
/// ```
/// use gtr_engine::core::GameConfig;
///
/// let config = GameConfig::new(3).with_seed(11).with_jack_count(4);
/// assert_eq!(config.player_count, 3);
/// assert_eq!(config.jack_count, 4);
/// assert_eq!(config.out_of_town_sites(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-5).
    pub player_count: usize,

    /// Seed for the library shuffle.
    pub seed: u64,

    /// Cards dealt to each player at setup.
    pub starting_hand_size: usize,

    /// Jacks in the shared jack pile before each player takes one.
    pub jack_count: usize,

    /// Hand limit before Shrine/Temple bonuses.
    pub base_hand_limit: usize,

    /// Influence every player starts with.
    pub base_influence: usize,
}

impl GameConfig {
    /// Largest supported table.
    pub const MAX_PLAYERS: usize = 5;

    /// Total sites per material, split between in-town and out-of-town.
    pub const SITES_PER_MATERIAL: usize = 6;

    /// Create a configuration with the standard rulebook counts.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count >= 2, "Must have at least 2 players");
        assert!(
            player_count <= Self::MAX_PLAYERS,
            "At most 5 players supported"
        );

        Self {
            player_count,
            seed: 0,
            starting_hand_size: 5,
            jack_count: 6,
            base_hand_limit: 5,
            base_influence: 2,
        }
    }

    /// Set the library shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the number of Jacks in the jack pile.
    #[must_use]
    pub fn with_jack_count(mut self, count: usize) -> Self {
        self.jack_count = count;
        self
    }

    /// Set the base hand limit.
    #[must_use]
    pub fn with_base_hand_limit(mut self, limit: usize) -> Self {
        self.base_hand_limit = limit;
        self
    }

    /// In-town sites per material.
    #[must_use]
    pub fn in_town_sites(&self) -> usize {
        self.player_count
    }

    /// Out-of-town sites per material.
    #[must_use]
    pub fn out_of_town_sites(&self) -> usize {
        Self::SITES_PER_MATERIAL - self.player_count
    }
}
