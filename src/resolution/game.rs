//! The turn protocol.
//!
//! [`Game`] owns the state and the building-power hook. It reports which
//! decisions it waits for, accepts finished actions, validates them,
//! applies them and expands automatic agenda steps until the next
//! decision is due.
//!
//! ## Turn shape
//!
//! ```text
//! StartTurn -> ThinkerOrLead
//!   think -> Think -> Cleanup
//!   lead  -> LeadRole -> Follow (barrier)
//!            -> Think per declining follower
//!            -> Performance per unit and matching client, leader first
//!            -> Cleanup
//! Cleanup -> Sewer prompts -> CampToPool (Senate offers) -> Academy -> EndTurn
//! ```
//!
//! ## Atomicity
//!
//! An action is checked completely before anything changes. A rejected
//! action leaves the state as it was and the same decision stays pending.

use im::Vector;

use super::agenda::{PendingDecision, Step};
use crate::builders::{builder_for, ActionBuilder, DecisionContext};
use crate::cards::{Card, CardName, Material, Role};
use crate::core::{Action, ActionRecord, DecisionError, GameError, GameState, PlayerId};
use crate::effects::{BuildingPowers, NoPowers};
use crate::rules::{validate, GameResult, RuleQueries};
use crate::zones::Building;

/// A game in progress.
///
/// ```
/// use gtr_engine::core::{Action, ActionKind, GameConfig};
/// use gtr_engine::resolution::GameBuilder;
///
/// let mut game = GameBuilder::new(GameConfig::new(2).with_seed(1)).build();
/// let leader = game.state().leader;
///
/// game.handle(leader, Action::ThinkerOrLead { think: true }).unwrap();
/// assert_eq!(game.expected()[0].kind, ActionKind::ThinkerType);
/// ```
pub struct Game {
    state: GameState,
    powers: Box<dyn BuildingPowers>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Resume a game from its state, without building powers.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self::with_powers(state, Box::new(NoPowers))
    }

    /// Resume a game from its state with a building-power hook.
    #[must_use]
    pub fn with_powers(state: GameState, powers: Box<dyn BuildingPowers>) -> Self {
        let mut game = Self { state, powers };
        game.advance();
        game
    }

    // === Queries ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Decisions the game is waiting for. Empty once the game is over.
    #[must_use]
    pub fn expected(&self) -> Vec<PendingDecision> {
        if self.state.is_over() {
            return Vec::new();
        }
        self.state
            .agenda
            .front()
            .map(Step::pending)
            .unwrap_or_default()
    }

    /// Every accepted action, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.state.history
    }

    /// Result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.state.result.as_ref()
    }

    /// Builder for one of the pending decisions.
    pub fn builder(
        &self,
        decision: PendingDecision,
    ) -> Result<Box<dyn ActionBuilder>, DecisionError> {
        if !self.expected().contains(&decision) {
            return Err(DecisionError::InvalidOperation("decision is not pending"));
        }
        let ctx = DecisionContext::new(&self.state, decision.player);
        builder_for(decision.kind, &ctx)
    }

    // === Persistence ===

    /// Encode the game state as an opaque blob.
    pub fn encode(&self) -> Result<Vec<u8>, GameError> {
        self.state.encode()
    }

    /// Resume a game from a blob produced by [`Game::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(Self::from_state(GameState::decode(bytes)?))
    }

    // === Protocol ===

    /// Hand a finished action to the game.
    ///
    /// Fails with `NotExpected` if `player` owes no decision of this kind,
    /// `Illegal` if the action breaks a rule and `GameOver` once the game
    /// ended. On failure nothing changes.
    pub fn handle(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }

        let kind = action.kind();
        if !self.expected().contains(&PendingDecision::new(player, kind)) {
            tracing::warn!(%player, %kind, "unexpected action");
            return Err(GameError::NotExpected { player, kind });
        }
        if let Err(err) = validate(&self.state, player, &action) {
            tracing::warn!(%player, %kind, %err, "action rejected");
            return Err(err);
        }

        tracing::debug!(%player, %kind, "action accepted");
        self.state.record(player, action.clone());
        self.apply(player, action);
        self.advance();
        Ok(())
    }

    /// Expand automatic steps until a decision is due or the game ends.
    fn advance(&mut self) {
        loop {
            if self.state.is_over() {
                self.state.agenda.clear();
                return;
            }
            match self.state.agenda.front() {
                None => self.state.agenda.push_back(Step::StartTurn),
                Some(step) if step.is_automatic() => {
                    if let Some(step) = self.state.agenda.pop() {
                        self.expand(step);
                    }
                }
                Some(_) => return,
            }
        }
    }

    fn expand(&mut self, step: Step) {
        let n = self.state.player_count();
        match step {
            Step::StartTurn => {
                let leader = self.state.leader;
                tracing::info!(turn = self.state.turn_number, %leader, "turn started");
                self.state
                    .agenda
                    .push_front_all([Step::ThinkerOrLead { player: leader }]);
            }
            Step::Think { player } => {
                let mut steps = Vec::new();
                let has_cards = !self.state.player(player).hand.is_empty();
                if has_cards && self.state.owns_active_structure(player, CardName::Latrine) {
                    steps.push(Step::Latrine { player });
                }
                if has_cards && self.state.owns_active_structure(player, CardName::Vomitorium) {
                    steps.push(Step::Vomitorium { player });
                }
                steps.push(Step::ThinkerType { player });
                self.state.agenda.push_front_all(steps);
            }
            Step::Performance { player, role } => {
                let has = |s| self.state.owns_active_structure(player, s);
                let steps = match role {
                    Role::Patron if has(CardName::Bar) && has(CardName::Aqueduct) => {
                        vec![Step::BarOrAqueduct { player }]
                    }
                    Role::Craftsman
                        if has(CardName::Fountain) && !self.state.library.is_empty() =>
                    {
                        vec![Step::Fountain { player }]
                    }
                    Role::Architect if has(CardName::Stairway) => vec![
                        Step::Perform {
                            player,
                            role,
                            bar_first: false,
                        },
                        Step::Stairway { player },
                    ],
                    _ => vec![Step::Perform {
                        player,
                        role,
                        bar_first: false,
                    }],
                };
                self.state.agenda.push_front_all(steps);
            }
            Step::Cleanup => {
                let leader = self.state.leader;
                let mut steps = Vec::new();
                for player in leader.starting_here(n) {
                    let me = self.state.player(player);
                    if me.camp.iter().any(|c| !c.is_jack())
                        && self.state.owns_active_structure(player, CardName::Sewer)
                    {
                        steps.push(Step::Sewer { player });
                    }
                }
                steps.push(Step::CampToPool);
                for player in leader.starting_here(n) {
                    if self.state.player(player).performed_craftsman
                        && self.state.owns_active_structure(player, CardName::Academy)
                    {
                        steps.push(Step::AcademyThinker { player });
                    }
                }
                steps.push(Step::EndTurn);
                self.state.agenda.push_front_all(steps);
            }
            Step::CampToPool => {
                let mut offers = Vec::new();
                for player in self.state.leader.starting_here(n) {
                    let camp = self.state.player_mut(player).camp.take_all();
                    for card in camp {
                        if !card.is_jack() {
                            self.state.pool.push(card);
                            continue;
                        }
                        let candidates: Vec<PlayerId> = player
                            .others(n)
                            .filter(|&o| self.state.owns_active_structure(o, CardName::Senate))
                            .collect();
                        if candidates.is_empty() {
                            self.state.jack_pile.push(card);
                        } else {
                            offers.push(Step::Senate {
                                jack: card,
                                candidates,
                            });
                        }
                    }
                }
                self.state.agenda.push_front_all(offers);
            }
            Step::EndTurn => {
                for player in PlayerId::all(n) {
                    let me = self.state.player_mut(player);
                    me.performed_craftsman = false;
                    if let Some(card) = me.fountain_card.take() {
                        me.hand.push(card);
                    }
                }
                self.state.leader = self.state.leader.next(n);
                self.state.turn_number += 1;
                self.state.role_led = None;
                self.state.agenda.push_back(Step::StartTurn);
            }
            decision => {
                // Decision steps are never popped here; keep them queued.
                self.state.agenda.push_front_all([decision]);
            }
        }
    }

    // === Applying actions ===

    fn apply(&mut self, player: PlayerId, action: Action) {
        match action {
            Action::ThinkerOrLead { think } => {
                self.state.agenda.pop();
                if think {
                    self.state
                        .agenda
                        .push_front_all([Step::Think { player }, Step::Cleanup]);
                } else {
                    self.state.agenda.push_front_all([Step::LeadRole { player }]);
                }
            }
            Action::UseLatrine { discard } => {
                self.state.agenda.pop();
                if let Some(card) = discard {
                    if self.state.player_mut(player).hand.remove(card) {
                        self.discard(card);
                    }
                }
            }
            Action::UseVomitorium { discard_all } => {
                self.state.agenda.pop();
                if discard_all {
                    for card in self.state.player_mut(player).hand.take_all() {
                        self.discard(card);
                    }
                }
            }
            Action::ThinkerType { for_jack } => {
                self.state.agenda.pop();
                self.think(player, for_jack);
            }
            Action::SkipThinker { skip } => {
                self.state.agenda.pop();
                if !skip {
                    self.state
                        .agenda
                        .push_front_all([Step::ThinkerType { player }]);
                }
            }
            Action::LeadRole { role, units } => {
                self.state.agenda.pop();
                let cards: Vec<Card> = units
                    .iter()
                    .flat_map(|u| u.cards().iter().copied())
                    .collect();
                self.to_camp(player, &cards);
                self.state.role_led = Some(role);
                tracing::info!(%player, %role, units = units.len(), "role led");

                let waiting: Vec<PlayerId> = player.others(self.state.player_count()).collect();
                self.state.agenda.push_front_all([Step::Follow {
                    lead_units: units.len(),
                    waiting,
                    answers: Vec::new(),
                }]);
            }
            action @ Action::FollowRole { .. } => {
                let complete = match self.state.agenda.front_mut() {
                    Some(Step::Follow {
                        waiting, answers, ..
                    }) => {
                        waiting.retain(|&p| p != player);
                        answers.push((player, action));
                        waiting.is_empty()
                    }
                    _ => false,
                };
                if complete {
                    if let Some(Step::Follow {
                        lead_units,
                        answers,
                        ..
                    }) = self.state.agenda.pop()
                    {
                        self.resolve_follow(lead_units, &answers);
                    }
                }
            }
            Action::BarOrAqueduct { bar_first } => {
                self.state.agenda.pop();
                self.state.agenda.push_front_all([Step::Perform {
                    player,
                    role: Role::Patron,
                    bar_first,
                }]);
            }
            Action::UseFountain { use_fountain } => {
                self.state.agenda.pop();
                if use_fountain {
                    if let Some(card) = self.state.draw_from_library() {
                        self.state.player_mut(player).fountain_card = Some(card);
                    }
                }
                self.state.agenda.push_front_all([Step::Perform {
                    player,
                    role: Role::Craftsman,
                    bar_first: false,
                }]);
            }
            Action::Laborer {
                from_hand,
                from_pool,
            } => {
                self.state.agenda.pop();
                if let Some(card) = from_pool {
                    if self.state.pool.remove(card) {
                        self.state.player_mut(player).stockpile.push(card);
                    }
                }
                if let Some(card) = from_hand {
                    let me = self.state.player_mut(player);
                    if me.hand.remove(card) {
                        me.stockpile.push(card);
                    }
                }
            }
            Action::Patron {
                from_pool,
                from_deck,
                from_hand,
            } => {
                let bar_first = match self.state.agenda.pop() {
                    Some(Step::Perform { bar_first, .. }) => bar_first,
                    _ => true,
                };
                if let Some(card) = from_pool {
                    if self.state.pool.remove(card) {
                        self.state.player_mut(player).clientele.push(card);
                    }
                }
                if bar_first {
                    self.client_from_deck(player, from_deck);
                    self.client_from_hand(player, from_hand);
                } else {
                    self.client_from_hand(player, from_hand);
                    self.client_from_deck(player, from_deck);
                }
            }
            Action::Craftsman {
                building,
                material,
                site,
            } => {
                self.state.agenda.pop();
                match (building, material) {
                    (Some(card), None) => {
                        self.take_for_craftsman(player, card);
                        self.start_building(player, card, site, Role::Craftsman);
                        self.state.player_mut(player).performed_craftsman = true;
                    }
                    (Some(foundation), Some(card)) => {
                        self.take_for_craftsman(player, card);
                        self.add_material(player, foundation, card);
                        self.state.player_mut(player).performed_craftsman = true;
                    }
                    _ => {}
                }
                let me = self.state.player_mut(player);
                if let Some(card) = me.fountain_card.take() {
                    me.hand.push(card);
                }
            }
            Action::Architect {
                building,
                material,
                site,
                from_pool,
            } => {
                self.state.agenda.pop();
                match (building, material) {
                    (Some(card), None) => {
                        if self.state.player_mut(player).hand.remove(card) {
                            self.start_building(player, card, site, Role::Architect);
                        }
                    }
                    (Some(foundation), Some(card)) => {
                        if self.take_material(player, card, from_pool) {
                            self.add_material(player, foundation, card);
                        }
                    }
                    _ => {}
                }
            }
            Action::Legionary { card } => {
                self.state.agenda.pop();
                if let Some(material) = card.and_then(|c| c.material()) {
                    self.demand(player, material);
                }
            }
            Action::Merchant {
                from_stockpile,
                from_deck,
                from_hand,
            } => {
                self.state.agenda.pop();
                if let Some(card) = from_stockpile {
                    let me = self.state.player_mut(player);
                    if me.stockpile.remove(card) {
                        me.vault.push(card);
                    }
                }
                if from_deck {
                    if let Some(card) = self.state.draw_from_library() {
                        self.state.player_mut(player).vault.push(card);
                    }
                }
                if let Some(card) = from_hand {
                    let me = self.state.player_mut(player);
                    if me.hand.remove(card) {
                        me.vault.push(card);
                    }
                }
            }
            Action::Stairway {
                owner,
                building,
                material,
                from_pool,
            } => {
                self.state.agenda.pop();
                if let (Some(owner), Some(foundation), Some(card)) = (owner, building, material) {
                    if self.take_material(player, card, from_pool) {
                        if let Some(target) = self
                            .state
                            .player_mut(owner)
                            .buildings
                            .iter_mut()
                            .find(|b| b.foundation.id == foundation.id)
                        {
                            target.add_material(card);
                            target.public = true;
                        }
                        tracing::debug!(%player, %owner, building = %foundation, "building opened");
                    }
                }
            }
            Action::UseSewer { cards } => {
                self.state.agenda.pop();
                let me = self.state.player_mut(player);
                for card in cards {
                    if me.camp.remove(card) {
                        me.stockpile.push(card);
                    }
                }
            }
            Action::UseSenate { take } => {
                let settled = match self.state.agenda.front_mut() {
                    Some(Step::Senate { jack, candidates }) => {
                        if !candidates.is_empty() {
                            candidates.remove(0);
                        }
                        if take {
                            Some((Some(player), *jack))
                        } else if candidates.is_empty() {
                            Some((None, *jack))
                        } else {
                            None
                        }
                    }
                    _ => None,
                };
                if let Some((taker, jack)) = settled {
                    self.state.agenda.pop();
                    match taker {
                        Some(taker) => self.state.player_mut(taker).hand.push(jack),
                        None => self.state.jack_pile.push(jack),
                    }
                }
            }
            Action::GiveCard { cards } => {
                if let Some(Step::GiveCard { to, .. }) = self.state.agenda.pop() {
                    for card in cards {
                        if self.state.player_mut(player).hand.remove(card) {
                            self.state.player_mut(to).stockpile.push(card);
                        }
                    }
                }
            }
        }
    }

    /// Every follower has answered: move cards, queue thinkers and every
    /// performance of the led role, then cleanup.
    fn resolve_follow(&mut self, lead_units: usize, answers: &[(PlayerId, Action)]) {
        let Some(role) = self.state.role_led else {
            return;
        };
        let n = self.state.player_count();
        let leader = self.state.leader;

        let mut steps = Vec::new();
        let mut performers = vec![(leader, lead_units)];
        for follower in leader.others(n) {
            let Some((_, answer)) = answers.iter().find(|(p, _)| *p == follower) else {
                continue;
            };
            match answer {
                Action::FollowRole { think: true, .. } => {
                    steps.push(Step::Think { player: follower });
                }
                Action::FollowRole { units, .. } => {
                    let cards: Vec<Card> = answer.unit_cards().copied().collect();
                    self.to_camp(follower, &cards);
                    performers.push((follower, units.len()));
                }
                _ => {}
            }
        }

        for (player, units) in performers {
            let count = units + self.client_performances(player, role);
            steps.extend(std::iter::repeat(Step::Performance { player, role }).take(count));
        }
        steps.push(Step::Cleanup);

        tracing::debug!(%role, steps = steps.len(), "following resolved");
        self.state.agenda.push_front_all(steps);
    }

    /// Clients that perform the led role for `player`.
    fn client_performances(&self, player: PlayerId, role: Role) -> usize {
        let ludus = self.state.owns_active_structure(player, CardName::LudusMagna);
        let matching = self
            .state
            .player(player)
            .clientele
            .iter()
            .filter(|c| c.role() == Some(role) || (ludus && c.role() == Some(Role::Merchant)))
            .count();
        if self.state.owns_active_structure(player, CardName::CircusMaximus) {
            matching * 2
        } else {
            matching
        }
    }

    // === Zone helpers ===

    fn to_camp(&mut self, player: PlayerId, cards: &[Card]) {
        let me = self.state.player_mut(player);
        for &card in cards {
            if me.hand.remove(card) {
                me.camp.push(card);
            }
        }
    }

    /// Discarded Jacks return to the jack pile, everything else to the pool.
    fn discard(&mut self, card: Card) {
        if card.is_jack() {
            self.state.jack_pile.push(card);
        } else {
            self.state.pool.push(card);
        }
    }

    fn think(&mut self, player: PlayerId, for_jack: bool) {
        if for_jack {
            if let Some(jack) = self.state.jack_pile.pop() {
                self.state.player_mut(player).hand.push(jack);
            }
            return;
        }
        let hand = self.state.player(player).hand.len();
        let count = self.state.hand_limit(player).saturating_sub(hand).max(1);
        for _ in 0..count {
            if !self.state.draw_to_hand(player) {
                break;
            }
        }
    }

    fn client_from_deck(&mut self, player: PlayerId, from_deck: bool) {
        if !from_deck {
            return;
        }
        if let Some(card) = self.state.draw_from_library() {
            self.state.player_mut(player).clientele.push(card);
        }
    }

    fn client_from_hand(&mut self, player: PlayerId, from_hand: Option<Card>) {
        if let Some(card) = from_hand {
            let me = self.state.player_mut(player);
            if me.hand.remove(card) {
                me.clientele.push(card);
            }
        }
    }

    /// Remove a Craftsman card from the Fountain holder or the hand.
    fn take_for_craftsman(&mut self, player: PlayerId, card: Card) {
        let me = self.state.player_mut(player);
        if me.fountain_card.is_some_and(|c| c.id == card.id) {
            me.fountain_card = None;
        } else {
            me.hand.remove(card);
        }
    }

    /// Remove a material from the stockpile, or from the pool.
    fn take_material(&mut self, player: PlayerId, card: Card, from_pool: bool) -> bool {
        if from_pool {
            self.state.pool.remove(card)
        } else {
            self.state.player_mut(player).stockpile.remove(card)
        }
    }

    // === Buildings ===

    fn start_building(&mut self, player: PlayerId, card: Card, site: Option<Material>, role: Role) {
        let Some(site) = site else {
            return;
        };
        let i = site.index();
        if self.state.in_town[i] > 0 {
            self.state.in_town[i] -= 1;
        } else {
            self.state.out_of_town[i] = self.state.out_of_town[i].saturating_sub(1);
            self.state.agenda.consume_performance(player, role);
        }
        self.state
            .player_mut(player)
            .buildings
            .push(Building::new(card, site));
        tracing::debug!(%player, building = %card, %site, "building started");
    }

    fn add_material(&mut self, player: PlayerId, foundation: Card, material: Card) {
        let completed = self
            .state
            .player_mut(player)
            .buildings
            .iter_mut()
            .find(|b| b.foundation.id == foundation.id)
            .and_then(|b| b.add_material(material).then(|| (b.site, b.name())));

        if let Some((site, name)) = completed {
            self.state.player_mut(player).influence.push(site);
            tracing::info!(%player, building = %name, "building completed");
            self.powers.on_complete(&mut self.state, player, name);
        }
    }

    // === Legionary ===

    /// Take a matching card from the pool and demand one from every
    /// opponent in reach.
    fn demand(&mut self, player: PlayerId, material: Material) {
        let n = self.state.player_count();
        if let Some(card) = self.state.pool.of_material(material).first().copied() {
            self.state.pool.remove(card);
            self.state.player_mut(player).stockpile.push(card);
        }

        let bridge = self.state.owns_active_structure(player, CardName::Bridge);
        let left = player.next(n);
        let right = player.previous(n);
        let victims: Vec<Step> = player
            .others(n)
            .filter(|&o| bridge || o == left || o == right)
            .filter(|&o| {
                let wall = self.state.owns_active_structure(o, CardName::Wall);
                let palisade = self.state.owns_active_structure(o, CardName::Palisade);
                !(wall || (palisade && !bridge))
            })
            .map(|o| Step::GiveCard {
                from: o,
                to: player,
                material,
            })
            .collect();

        tracing::debug!(%player, %material, demands = victims.len(), "legionary demand");
        self.state.agenda.push_front_all(victims);
    }
}
