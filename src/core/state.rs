//! Game state: the tabletop plus turn bookkeeping.
//!
//! ## PlayerState
//!
//! Everything a seat owns: hand, stockpile, vault, camp, clientele,
//! buildings, influence sites and the transient Fountain card.
//!
//! ## GameState
//!
//! Complete game state including:
//! - Per-player state
//! - Shared zones (pool, library, jack pile) and site counts
//! - Leader, turn number, the role led this turn
//! - The turn agenda, the action log and the result once the game ends
//! - RNG
//!
//! Zones use `im` persistent vectors, so cloning a state for a builder
//! snapshot or a what-if validation is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::error::GameError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, CardName, Material, Role};
use crate::resolution::Agenda;
use crate::rules::{GameResult, RuleQueries};
use crate::zones::{Building, Zone};

/// Per-player state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hand: Zone,
    pub stockpile: Zone,
    pub vault: Zone,
    pub camp: Zone,
    pub clientele: Zone,

    /// Buildings in play, complete or not.
    pub buildings: Vec<Building>,

    /// One site per completed building.
    pub influence: Vec<Material>,

    /// Card drawn by a Fountain, held until the Craftsman resolves.
    pub fountain_card: Option<Card>,

    /// Whether this player performed a Craftsman this turn (Academy).
    pub performed_craftsman: bool,
}

impl PlayerState {
    /// Create an empty player state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// This player's building with the given name.
    #[must_use]
    pub fn building(&self, name: CardName) -> Option<&Building> {
        self.buildings.iter().find(|b| b.name() == name)
    }

    /// Whether this player already has a building with the given name.
    #[must_use]
    pub fn has_building(&self, name: CardName) -> bool {
        self.building(name).is_some()
    }

    /// Whether this player has completed the named building.
    #[must_use]
    pub fn has_completed(&self, name: CardName) -> bool {
        self.building(name).is_some_and(|b| b.complete)
    }
}

/// Full game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,

    players: PlayerMap<PlayerState>,

    /// Face-up cards anyone may take.
    pub pool: Zone,

    /// Face-down draw pile; top is the back.
    pub library: Zone,

    /// Jacks not in anybody's hand.
    pub jack_pile: Zone,

    /// Remaining in-town sites per material, indexed by `Material::index`.
    pub in_town: [usize; 6],

    /// Remaining out-of-town sites per material.
    pub out_of_town: [usize; 6],

    /// Player leading this turn.
    pub leader: PlayerId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Role led this turn, once chosen.
    pub role_led: Option<Role>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Steps left in the current turn.
    pub agenda: Agenda,

    /// Append-only action log.
    pub history: Vector<ActionRecord>,

    /// Set once the game has ended.
    pub result: Option<GameResult>,
}

impl GameState {
    /// Create an empty table for the given configuration.
    ///
    /// Zones start empty; `GameBuilder` deals the cards.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let player_count = config.player_count;
        Self {
            in_town: [config.in_town_sites(); 6],
            out_of_town: [config.out_of_town_sites(); 6],
            rng: GameRng::new(config.seed),
            players: PlayerMap::with_default(player_count),
            pool: Zone::new(),
            library: Zone::new(),
            jack_pile: Zone::new(),
            leader: PlayerId::new(0),
            turn_number: 1,
            role_led: None,
            agenda: Agenda::new(),
            history: Vector::new(),
            result: None,
            config,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    /// Whether `player` sits at this table.
    #[must_use]
    pub fn has_seat(&self, player: PlayerId) -> bool {
        player.index() < self.player_count()
    }

    /// Get a player's state.
    ///
    /// # Panics
    ///
    /// If `player` has no seat; check [`GameState::has_seat`] first for ids
    /// from outside the game.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// Get a player's state mutably.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    // === Derived limits ===

    /// Base influence plus the value of every influence site.
    #[must_use]
    pub fn influence(&self, player: PlayerId) -> usize {
        self.config.base_influence
            + self.players[player]
                .influence
                .iter()
                .map(|m| m.value())
                .sum::<usize>()
    }

    /// Hand size a thinker draws up to.
    #[must_use]
    pub fn hand_limit(&self, player: PlayerId) -> usize {
        let mut limit = self.config.base_hand_limit;
        if self.owns_active_structure(player, CardName::Shrine) {
            limit += 2;
        }
        if self.owns_active_structure(player, CardName::Temple) {
            limit += 4;
        }
        limit
    }

    /// Maximum number of clients.
    #[must_use]
    pub fn clientele_limit(&self, player: PlayerId) -> usize {
        let mut limit = self.influence(player);
        if self.owns_active_structure(player, CardName::Insula) {
            limit += 2;
        }
        if self.owns_active_structure(player, CardName::Aqueduct) {
            limit *= 2;
        }
        limit
    }

    /// Maximum number of vault cards.
    #[must_use]
    pub fn vault_limit(&self, player: PlayerId) -> usize {
        let mut limit = self.influence(player);
        if self.owns_active_structure(player, CardName::Market) {
            limit += 2;
        }
        limit
    }

    /// Cards needed for one petition.
    #[must_use]
    pub fn petition_size(&self, player: PlayerId) -> usize {
        if self.owns_active_structure(player, CardName::Circus) {
            2
        } else {
            3
        }
    }

    /// Final score: influence plus vault value.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> usize {
        self.influence(player) + self.players[player].vault.total_value()
    }

    // === Sites ===

    /// Whether an in-town site of this material is left.
    #[must_use]
    pub fn has_in_town_site(&self, material: Material) -> bool {
        self.in_town[material.index()] > 0
    }

    /// Whether an out-of-town site of this material is left.
    #[must_use]
    pub fn has_out_of_town_site(&self, material: Material) -> bool {
        self.out_of_town[material.index()] > 0
    }

    // === Library ===

    /// Draw the top library card. Ends the game when the library is empty.
    pub fn draw_from_library(&mut self) -> Option<Card> {
        let card = self.library.pop();
        if card.is_none() {
            self.finish();
        }
        card
    }

    /// Draw into a player's hand. Returns false if the library ran dry.
    pub fn draw_to_hand(&mut self, player: PlayerId) -> bool {
        match self.draw_from_library() {
            Some(card) => {
                self.players[player].hand.push(card);
                true
            }
            None => false,
        }
    }

    /// End the game and score it.
    pub fn finish(&mut self) {
        if self.result.is_some() {
            return;
        }
        let scores: Vec<(PlayerId, usize)> =
            self.player_ids().map(|p| (p, self.score(p))).collect();
        let result = GameResult::from_scores(&scores);
        tracing::info!(turn = self.turn_number, ?result, "game over");
        self.agenda.clear();
        self.result = Some(result);
    }

    // === Action Log ===

    /// Record an action in history and return its sequence number.
    pub fn record(&mut self, player: PlayerId, action: Action) -> u32 {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
        sequence
    }

    // === Persistence ===

    /// Encode the complete state as an opaque blob.
    pub fn encode(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a blob produced by [`GameState::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl RuleQueries for GameState {
    fn owns_active_structure(&self, player: PlayerId, structure: CardName) -> bool {
        if self.players[player].has_completed(structure) {
            return true;
        }
        player.others(self.player_count()).any(|other| {
            self.players[other]
                .building(structure)
                .is_some_and(|b| b.complete && b.public)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(name: CardName, id: u32) -> Building {
        let material = name.material().unwrap_or(Material::Rubble);
        let mut building = Building::new(Card::new(id, name), material);
        building.complete = true;
        building
    }

    #[test]
    fn test_new_state_sites() {
        let state = GameState::new(GameConfig::new(3));

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.in_town, [3; 6]);
        assert_eq!(state.out_of_town, [3; 6]);
        assert_eq!(state.turn_number, 1);
        assert!(!state.is_over());
    }

    #[test]
    fn test_influence_and_limits() {
        let mut state = GameState::new(GameConfig::new(2));
        let p0 = PlayerId::new(0);

        assert_eq!(state.influence(p0), 2);
        assert_eq!(state.clientele_limit(p0), 2);
        assert_eq!(state.vault_limit(p0), 2);

        state.player_mut(p0).influence.push(Material::Marble);
        state.player_mut(p0).buildings.push(completed(CardName::Insula, 1));
        assert_eq!(state.influence(p0), 5);
        assert_eq!(state.clientele_limit(p0), 7);

        state.player_mut(p0).buildings.push(completed(CardName::Aqueduct, 2));
        assert_eq!(state.clientele_limit(p0), 14);

        state.player_mut(p0).buildings.push(completed(CardName::Market, 3));
        assert_eq!(state.vault_limit(p0), 7);
    }

    #[test]
    fn test_hand_limit_bonuses() {
        let mut state = GameState::new(GameConfig::new(2));
        let p1 = PlayerId::new(1);

        assert_eq!(state.hand_limit(p1), 5);
        state.player_mut(p1).buildings.push(completed(CardName::Shrine, 1));
        assert_eq!(state.hand_limit(p1), 7);
        state.player_mut(p1).buildings.push(completed(CardName::Temple, 2));
        assert_eq!(state.hand_limit(p1), 11);
    }

    #[test]
    fn test_incomplete_building_is_inactive() {
        let mut state = GameState::new(GameConfig::new(2));
        let p0 = PlayerId::new(0);
        state
            .player_mut(p0)
            .buildings
            .push(Building::new(Card::new(1, CardName::Circus), Material::Wood));

        assert!(!state.owns_active_structure(p0, CardName::Circus));
        assert_eq!(state.petition_size(p0), 3);
    }

    #[test]
    fn test_stairway_opens_opponent_building() {
        let mut state = GameState::new(GameConfig::new(3));
        let mut dock = completed(CardName::Dock, 1);
        dock.public = true;
        state.player_mut(PlayerId::new(2)).buildings.push(dock);

        assert!(state.owns_active_structure(PlayerId::new(0), CardName::Dock));
        assert!(state.owns_active_structure(PlayerId::new(2), CardName::Dock));
        assert!(!state.owns_active_structure(PlayerId::new(0), CardName::Palace));
    }

    #[test]
    fn test_empty_library_ends_game() {
        let mut state = GameState::new(GameConfig::new(2));
        state.player_mut(PlayerId::new(1)).vault.push(Card::new(1, CardName::Temple));

        assert!(!state.draw_to_hand(PlayerId::new(0)));
        assert_eq!(state.result, Some(GameResult::Winner(PlayerId::new(1))));
    }

    #[test]
    fn test_encode_decode() {
        let mut state = GameState::new(GameConfig::new(2).with_seed(5));
        state.pool.push(Card::new(7, CardName::Road));
        state.record(PlayerId::new(0), Action::ThinkerOrLead { think: true });

        let bytes = state.encode().unwrap();
        let decoded = GameState::decode(&bytes).unwrap();

        assert_eq!(decoded.pool, state.pool);
        assert_eq!(decoded.history, state.history);
        assert_eq!(decoded.config(), state.config());
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(GameState::decode(&[1, 2, 3]), Err(GameError::Codec(_))));
    }
}
