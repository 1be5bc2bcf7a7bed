//! Building powers.
//!
//! The turn protocol applies what every building shares: laying the
//! foundation, adding materials, completion and the influence it brings.
//! Structure flags (Palace, Dock, Circus, ...) are read by the legality
//! layer through [`RuleQueries`](crate::rules::RuleQueries). Anything a
//! building does beyond that is a pluggable hook run on completion.
//!
//! ## Key Types
//!
//! - `BuildingPowers`: hook invoked when a building completes
//! - `NoPowers`: the default hook, does nothing
//!
//! Any `Fn(&mut GameState, PlayerId, CardName)` closure is a
//! `BuildingPowers` too.

use crate::cards::CardName;
use crate::core::{GameState, PlayerId};

/// Effects a completed building has on the game.
pub trait BuildingPowers {
    /// Called once, right after `player` completes `building` and its site
    /// was added to their influence.
    fn on_complete(&self, state: &mut GameState, player: PlayerId, building: CardName);
}

/// Buildings with no completion effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPowers;

impl BuildingPowers for NoPowers {
    fn on_complete(&self, _state: &mut GameState, _player: PlayerId, _building: CardName) {}
}

impl<F> BuildingPowers for F
where
    F: Fn(&mut GameState, PlayerId, CardName),
{
    fn on_complete(&self, state: &mut GameState, player: PlayerId, building: CardName) {
        self(state, player, building);
    }
}
