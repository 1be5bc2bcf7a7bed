//! Game setup: mint, shuffle, deal, seed the pool.

use super::agenda::Step;
use super::game::Game;
use crate::cards::{Card, CardRegistry};
use crate::core::{GameConfig, GameState, PlayerId};
use crate::effects::{BuildingPowers, NoPowers};

/// Builder for a new game.
///
/// ```
/// use gtr_engine::core::GameConfig;
/// use gtr_engine::resolution::GameBuilder;
///
/// let game = GameBuilder::new(GameConfig::new(3).with_seed(7)).build();
/// let state = game.state();
///
/// assert!(state.player_ids().all(|p| state.player(p).hand.len() == 6));
/// assert!(state.pool.len() >= 3);
/// assert_eq!(state.jack_pile.len(), 3);
/// ```
pub struct GameBuilder {
    config: GameConfig,
    powers: Box<dyn BuildingPowers>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            powers: Box::new(NoPowers),
        }
    }

    /// Run `powers` whenever a building completes.
    #[must_use]
    pub fn with_powers(mut self, powers: impl BuildingPowers + 'static) -> Self {
        self.powers = Box::new(powers);
        self
    }

    /// Deal the table and wait for the first leader.
    #[must_use]
    pub fn build(self) -> Game {
        let mut state = GameState::new(self.config.clone());
        let mut registry = CardRegistry::new();

        let mut deck = registry.orders_deck();
        state.rng.shuffle(&mut deck);
        state.library.extend(deck);
        state.jack_pile.extend(registry.jacks(self.config.jack_count));

        for player in state.player_ids().collect::<Vec<_>>() {
            for _ in 0..self.config.starting_hand_size {
                if let Some(card) = state.library.pop() {
                    state.player_mut(player).hand.push(card);
                }
            }
            if let Some(jack) = state.jack_pile.pop() {
                state.player_mut(player).hand.push(jack);
            }
        }

        state.leader = seed_pool(&mut state);
        tracing::info!(
            players = self.config.player_count,
            seed = self.config.seed,
            leader = %state.leader,
            "game set up"
        );

        state.agenda.push_back(Step::StartTurn);
        Game::with_powers(state, self.powers)
    }
}

/// Every contender draws a card into the pool; the alphabetically first
/// card leads. Tied players draw again. Returns the first leader.
fn seed_pool(state: &mut GameState) -> PlayerId {
    let mut contenders: Vec<PlayerId> = state.player_ids().collect();
    loop {
        let mut draws: Vec<(PlayerId, Card)> = Vec::with_capacity(contenders.len());
        for &player in &contenders {
            let Some(card) = state.library.pop() else {
                return contenders.first().copied().unwrap_or(PlayerId::new(0));
            };
            state.pool.push(card);
            draws.push((player, card));
        }

        let Some(first) = draws.iter().map(|(_, c)| c.name.as_str()).min() else {
            return PlayerId::new(0);
        };
        contenders = draws
            .iter()
            .filter(|(_, c)| c.name.as_str() == first)
            .map(|&(p, _)| p)
            .collect();

        if let [leader] = contenders.as_slice() {
            return *leader;
        }
        tracing::debug!(tied = contenders.len(), card = first, "pool draw tied");
    }
}
