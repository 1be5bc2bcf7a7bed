//! Enumeration of legal single-choice options.
//!
//! Candidates are generated per kind from the cards a player could use,
//! one per distinct card name, and then filtered through
//! [`validate`](super::validate). The compound kinds (leading, following,
//! Laborer) have dedicated builders and enumerate nothing here.

use serde::{Deserialize, Serialize};

use super::legality::{candidate_sites, validate};
use super::RuleQueries;
use crate::cards::{Card, CardName};
use crate::core::{Action, ActionKind, GameState, PlayerId};
use crate::resolution::Step;

/// A complete action paired with the label shown for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledAction {
    pub action: Action,
    pub label: String,
}

impl LabeledAction {
    #[must_use]
    pub fn new(action: Action, label: impl Into<String>) -> Self {
        Self {
            action,
            label: label.into(),
        }
    }
}

/// One card per distinct name, in presentation order.
fn distinct(cards: impl IntoIterator<Item = Card>) -> Vec<Card> {
    let mut cards: Vec<Card> = cards.into_iter().collect();
    cards.sort();
    cards.dedup_by(|a, b| a.name == b.name);
    cards
}

fn with_none(cards: Vec<Card>) -> Vec<Option<Card>> {
    std::iter::once(None).chain(cards.into_iter().map(Some)).collect()
}

fn join_or(parts: Vec<String>, skip: &str) -> String {
    if parts.is_empty() {
        skip.to_string()
    } else {
        parts.join(", ")
    }
}

/// Every legal action of `kind` for `player`, labelled.
///
/// ```
/// use gtr_engine::core::{Action, ActionKind, GameConfig, GameState, PlayerId};
/// use gtr_engine::rules::legal_options;
///
/// let state = GameState::new(GameConfig::new(2));
/// let options = legal_options(&state, PlayerId::new(0), ActionKind::ThinkerOrLead);
///
/// // An empty hand cannot lead.
/// assert_eq!(options.len(), 1);
/// assert_eq!(options[0].action, Action::ThinkerOrLead { think: true });
/// ```
#[must_use]
pub fn legal_options(
    state: &GameState,
    player: PlayerId,
    kind: ActionKind,
) -> Vec<LabeledAction> {
    if !state.has_seat(player) {
        return Vec::new();
    }
    let candidates = match kind {
        ActionKind::ThinkerOrLead => vec![
            LabeledAction::new(Action::ThinkerOrLead { think: true }, "Thinker"),
            LabeledAction::new(Action::ThinkerOrLead { think: false }, "Lead a role"),
        ],
        ActionKind::ThinkerType => {
            let hand = state.player(player).hand.len();
            let n = state.hand_limit(player).saturating_sub(hand).max(1);
            let plural = if n == 1 { "" } else { "s" };
            vec![
                LabeledAction::new(Action::ThinkerType { for_jack: true }, "Thinker for Jack"),
                LabeledAction::new(
                    Action::ThinkerType { for_jack: false },
                    format!("Thinker for {n} card{plural}"),
                ),
            ]
        }
        ActionKind::SkipThinker => vec![
            LabeledAction::new(Action::SkipThinker { skip: false }, "Perform thinker"),
            LabeledAction::new(Action::SkipThinker { skip: true }, "Skip thinker"),
        ],
        ActionKind::UseLatrine => {
            let hand = distinct(state.player(player).hand.iter().copied());
            std::iter::once(LabeledAction::new(
                Action::UseLatrine { discard: None },
                "Skip discard",
            ))
            .chain(hand.into_iter().map(|card| {
                LabeledAction::new(
                    Action::UseLatrine {
                        discard: Some(card),
                    },
                    format!("Discard {card}"),
                )
            }))
            .collect()
        }
        ActionKind::UseVomitorium => vec![
            LabeledAction::new(Action::UseVomitorium { discard_all: true }, "Discard all"),
            LabeledAction::new(Action::UseVomitorium { discard_all: false }, "Skip Vomitorium"),
        ],
        ActionKind::UseFountain => vec![
            LabeledAction::new(Action::UseFountain { use_fountain: true }, "Use Fountain"),
            LabeledAction::new(
                Action::UseFountain {
                    use_fountain: false,
                },
                "Don't use Fountain",
            ),
        ],
        ActionKind::BarOrAqueduct => vec![
            LabeledAction::new(Action::BarOrAqueduct { bar_first: true }, "Bar then Aqueduct"),
            LabeledAction::new(Action::BarOrAqueduct { bar_first: false }, "Aqueduct then Bar"),
        ],
        ActionKind::UseSenate => vec![
            LabeledAction::new(Action::UseSenate { take: true }, "Take Jack with Senate"),
            LabeledAction::new(Action::UseSenate { take: false }, "Don't take Jack"),
        ],
        ActionKind::Patron => patron_options(state, player),
        ActionKind::Merchant => merchant_options(state, player),
        ActionKind::Craftsman => craftsman_options(state, player),
        ActionKind::Architect => architect_options(state, player),
        ActionKind::Legionary => legionary_options(state, player),
        ActionKind::UseSewer => sewer_options(state, player),
        ActionKind::Stairway => stairway_options(state, player),
        ActionKind::GiveCard => give_card_options(state, player),
        ActionKind::LeadRole | ActionKind::FollowRole | ActionKind::Laborer => Vec::new(),
    };

    candidates
        .into_iter()
        .filter(|option| validate(state, player, &option.action).is_ok())
        .collect()
}

fn non_jacks(cards: impl IntoIterator<Item = Card>) -> Vec<Card> {
    distinct(cards.into_iter().filter(|c| !c.is_jack()))
}

fn patron_options(state: &GameState, player: PlayerId) -> Vec<LabeledAction> {
    let me = state.player(player);
    let pool = with_none(non_jacks(state.pool.iter().copied()));
    let deck: &[bool] = if state.owns_active_structure(player, CardName::Bar) {
        &[false, true]
    } else {
        &[false]
    };
    let hand = if state.owns_active_structure(player, CardName::Aqueduct) {
        with_none(non_jacks(me.hand.iter().copied()))
    } else {
        vec![None]
    };

    let mut options = Vec::new();
    for &from_pool in &pool {
        for &from_deck in deck {
            for &from_hand in &hand {
                let mut parts = Vec::new();
                if let Some(card) = from_pool {
                    parts.push(format!("Client {card} from pool"));
                }
                if from_deck {
                    parts.push("client from deck".to_string());
                }
                if let Some(card) = from_hand {
                    parts.push(format!("client {card} from hand"));
                }
                options.push(LabeledAction::new(
                    Action::Patron {
                        from_pool,
                        from_deck,
                        from_hand,
                    },
                    join_or(parts, "Skip Patron"),
                ));
            }
        }
    }
    options
}

fn merchant_options(state: &GameState, player: PlayerId) -> Vec<LabeledAction> {
    let me = state.player(player);
    let stockpile = with_none(distinct(me.stockpile.iter().copied()));
    let deck: &[bool] = if state.owns_active_structure(player, CardName::Atrium) {
        &[false, true]
    } else {
        &[false]
    };
    let hand = if state.owns_active_structure(player, CardName::Basilica) {
        with_none(non_jacks(me.hand.iter().copied()))
    } else {
        vec![None]
    };

    let mut options = Vec::new();
    for &from_stockpile in &stockpile {
        for &from_deck in deck {
            for &from_hand in &hand {
                let mut parts = Vec::new();
                if let Some(card) = from_stockpile {
                    parts.push(format!("Vault {card} from stockpile"));
                }
                if from_deck {
                    parts.push("vault from deck".to_string());
                }
                if let Some(card) = from_hand {
                    parts.push(format!("vault {card} from hand"));
                }
                options.push(LabeledAction::new(
                    Action::Merchant {
                        from_stockpile,
                        from_deck,
                        from_hand,
                    },
                    join_or(parts, "Skip Merchant"),
                ));
            }
        }
    }
    options
}

fn craftsman_options(state: &GameState, player: PlayerId) -> Vec<LabeledAction> {
    let me = state.player(player);
    let sources = match me.fountain_card {
        Some(card) => vec![card],
        None => non_jacks(me.hand.iter().copied()),
    };

    let mut options = vec![LabeledAction::new(
        Action::Craftsman {
            building: None,
            material: None,
            site: None,
        },
        "Skip action",
    )];
    for &card in &sources {
        for site in candidate_sites(card) {
            options.push(LabeledAction::new(
                Action::Craftsman {
                    building: Some(card),
                    material: None,
                    site: Some(site),
                },
                format!("Start {card} on a {site} site"),
            ));
        }
    }
    for building in me.buildings.iter().filter(|b| !b.complete) {
        for &card in &sources {
            options.push(LabeledAction::new(
                Action::Craftsman {
                    building: Some(building.foundation),
                    material: Some(card),
                    site: None,
                },
                format!("Add {card} to {}", building.name()),
            ));
        }
    }
    options
}

fn architect_options(state: &GameState, player: PlayerId) -> Vec<LabeledAction> {
    let me = state.player(player);
    let mut materials: Vec<(Card, bool)> = distinct(me.stockpile.iter().copied())
        .into_iter()
        .map(|c| (c, false))
        .collect();
    if state.owns_active_structure(player, CardName::Archway) {
        materials.extend(non_jacks(state.pool.iter().copied()).into_iter().map(|c| (c, true)));
    }

    let mut options = vec![LabeledAction::new(
        Action::Architect {
            building: None,
            material: None,
            site: None,
            from_pool: false,
        },
        "Skip action",
    )];
    for card in non_jacks(me.hand.iter().copied()) {
        for site in candidate_sites(card) {
            options.push(LabeledAction::new(
                Action::Architect {
                    building: Some(card),
                    material: None,
                    site: Some(site),
                    from_pool: false,
                },
                format!("Start {card} on a {site} site"),
            ));
        }
    }
    for building in me.buildings.iter().filter(|b| !b.complete) {
        for &(card, from_pool) in &materials {
            let source = if from_pool { "pool" } else { "stockpile" };
            options.push(LabeledAction::new(
                Action::Architect {
                    building: Some(building.foundation),
                    material: Some(card),
                    site: None,
                    from_pool,
                },
                format!("Add {card} from {source} to {}", building.name()),
            ));
        }
    }
    options
}

fn legionary_options(state: &GameState, player: PlayerId) -> Vec<LabeledAction> {
    let hand = non_jacks(state.player(player).hand.iter().copied());
    std::iter::once(LabeledAction::new(
        Action::Legionary { card: None },
        "Skip Legionary",
    ))
    .chain(hand.into_iter().filter_map(|card| {
        let material = card.material()?;
        Some(LabeledAction::new(
            Action::Legionary { card: Some(card) },
            format!("Demand {material} with {card}"),
        ))
    }))
    .collect()
}

fn sewer_options(state: &GameState, player: PlayerId) -> Vec<LabeledAction> {
    let eligible: Vec<Card> = state
        .player(player)
        .camp
        .sorted()
        .into_iter()
        .filter(|c| !c.is_jack())
        .collect();

    let mut options = vec![LabeledAction::new(
        Action::UseSewer { cards: Vec::new() },
        "Skip Sewer",
    )];
    for card in distinct(eligible.iter().copied()) {
        options.push(LabeledAction::new(
            Action::UseSewer { cards: vec![card] },
            format!("Keep {card}"),
        ));
    }
    if eligible.len() > 1 {
        options.push(LabeledAction::new(
            Action::UseSewer { cards: eligible },
            "Keep all camp cards",
        ));
    }
    options
}

fn stairway_options(state: &GameState, player: PlayerId) -> Vec<LabeledAction> {
    let me = state.player(player);
    let mut materials: Vec<(Card, bool)> = distinct(me.stockpile.iter().copied())
        .into_iter()
        .map(|c| (c, false))
        .collect();
    if state.owns_active_structure(player, CardName::Archway) {
        materials.extend(non_jacks(state.pool.iter().copied()).into_iter().map(|c| (c, true)));
    }

    let mut options = vec![LabeledAction::new(
        Action::Stairway {
            owner: None,
            building: None,
            material: None,
            from_pool: false,
        },
        "Skip Stairway",
    )];
    for owner in player.others(state.player_count()) {
        for building in state.player(owner).buildings.iter().filter(|b| b.complete && !b.public) {
            for &(card, from_pool) in &materials {
                options.push(LabeledAction::new(
                    Action::Stairway {
                        owner: Some(owner),
                        building: Some(building.foundation),
                        material: Some(card),
                        from_pool,
                    },
                    format!("Add {card} to {owner}'s {}", building.name()),
                ));
            }
        }
    }
    options
}

fn give_card_options(state: &GameState, player: PlayerId) -> Vec<LabeledAction> {
    let Some(Step::GiveCard { material, .. }) = state.agenda.front() else {
        return Vec::new();
    };
    let matching = distinct(state.player(player).hand.of_material(*material));
    if matching.is_empty() {
        return vec![LabeledAction::new(
            Action::GiveCard { cards: Vec::new() },
            format!("No {material} to give"),
        )];
    }
    matching
        .into_iter()
        .map(|card| {
            LabeledAction::new(Action::GiveCard { cards: vec![card] }, format!("Give {card}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Material;
    use crate::core::GameConfig;
    use crate::zones::Building;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn labels(options: &[LabeledAction]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    fn completed(name: CardName, id: u32) -> Building {
        let site = name.material().unwrap_or(Material::Rubble);
        let mut building = Building::new(Card::new(id, name), site);
        building.complete = true;
        building
    }

    #[test]
    fn test_thinker_or_lead_with_cards() {
        let mut state = GameState::new(GameConfig::new(2));
        state.player_mut(p(0)).hand.push(Card::new(1, CardName::Road));

        let options = legal_options(&state, p(0), ActionKind::ThinkerOrLead);
        assert_eq!(labels(&options), vec!["Thinker", "Lead a role"]);
    }

    #[test]
    fn test_thinker_type_needs_jacks() {
        let mut state = GameState::new(GameConfig::new(2));
        let options = legal_options(&state, p(0), ActionKind::ThinkerType);
        assert_eq!(labels(&options), vec!["Thinker for 5 cards"]);

        state.jack_pile.push(Card::new(1, CardName::Jack));
        for id in 2..7 {
            state.player_mut(p(0)).hand.push(Card::new(id, CardName::Road));
        }
        let options = legal_options(&state, p(0), ActionKind::ThinkerType);
        assert_eq!(labels(&options), vec!["Thinker for Jack", "Thinker for 1 card"]);
    }

    #[test]
    fn test_legionary_dedupes_by_name() {
        let mut state = GameState::new(GameConfig::new(2));
        state.player_mut(p(0)).hand.extend([
            Card::new(1, CardName::Road),
            Card::new(2, CardName::Road),
            Card::new(3, CardName::Jack),
            Card::new(4, CardName::Wall),
        ]);

        let options = legal_options(&state, p(0), ActionKind::Legionary);
        assert_eq!(
            labels(&options),
            vec!["Skip Legionary", "Demand Rubble with Road", "Demand Brick with Wall"]
        );
    }

    #[test]
    fn test_patron_options_respect_limit_and_structures() {
        let mut state = GameState::new(GameConfig::new(2));
        state.pool.extend([Card::new(1, CardName::Temple), Card::new(2, CardName::Dock)]);

        let options = legal_options(&state, p(0), ActionKind::Patron);
        assert_eq!(
            labels(&options),
            vec!["Skip Patron", "Client Dock from pool", "Client Temple from pool"]
        );

        state.player_mut(p(0)).buildings.push(completed(CardName::Bar, 10));
        state
            .player_mut(p(0))
            .clientele
            .push(Card::new(3, CardName::Road));
        let options = legal_options(&state, p(0), ActionKind::Patron);
        // One slot left: never two new clients at once.
        assert_eq!(options.len(), 4);
        assert!(options.iter().any(|o| o.label == "client from deck"));
    }

    #[test]
    fn test_craftsman_options() {
        let mut state = GameState::new(GameConfig::new(2));
        let foundation = Card::new(10, CardName::Bar);
        state
            .player_mut(p(0))
            .buildings
            .push(Building::new(foundation, Material::Rubble));
        state.player_mut(p(0)).hand.extend([
            Card::new(1, CardName::Road),
            Card::new(2, CardName::Bar),
            Card::new(3, CardName::Jack),
        ]);

        let options = legal_options(&state, p(0), ActionKind::Craftsman);
        assert_eq!(
            labels(&options),
            vec![
                "Skip action",
                "Start Road on a Rubble site",
                "Add Bar to Bar",
                "Add Road to Bar"
            ]
        );
    }

    #[test]
    fn test_fountain_card_is_the_only_source() {
        let mut state = GameState::new(GameConfig::new(2));
        state.player_mut(p(0)).hand.push(Card::new(1, CardName::Road));
        state.player_mut(p(0)).fountain_card = Some(Card::new(2, CardName::Dock));

        let options = legal_options(&state, p(0), ActionKind::Craftsman);
        assert_eq!(labels(&options), vec!["Skip action", "Start Dock on a Wood site"]);
    }

    #[test]
    fn test_give_card_without_match() {
        let mut state = GameState::new(GameConfig::new(2));
        state.player_mut(p(1)).hand.push(Card::new(1, CardName::Dock));
        state.agenda.push_back(Step::GiveCard {
            from: p(1),
            to: p(0),
            material: Material::Brick,
        });

        let options = legal_options(&state, p(1), ActionKind::GiveCard);
        assert_eq!(labels(&options), vec!["No Brick to give"]);
    }

    #[test]
    fn test_sewer_options() {
        let mut state = GameState::new(GameConfig::new(2));
        state.player_mut(p(0)).buildings.push(completed(CardName::Sewer, 10));
        state.player_mut(p(0)).camp.extend([
            Card::new(1, CardName::Road),
            Card::new(2, CardName::Jack),
            Card::new(3, CardName::Wall),
        ]);

        let options = legal_options(&state, p(0), ActionKind::UseSewer);
        assert_eq!(
            labels(&options),
            vec!["Skip Sewer", "Keep Road", "Keep Wall", "Keep all camp cards"]
        );
    }

    #[test]
    fn test_compound_kinds_enumerate_nothing() {
        let state = GameState::new(GameConfig::new(2));
        assert!(legal_options(&state, p(0), ActionKind::LeadRole).is_empty());
        assert!(legal_options(&state, p(0), ActionKind::Laborer).is_empty());
    }

    #[test]
    fn test_unknown_seat_has_no_options() {
        let state = GameState::new(GameConfig::new(2));
        assert!(legal_options(&state, p(2), ActionKind::ThinkerOrLead).is_empty());
        assert!(legal_options(&state, p(9), ActionKind::Merchant).is_empty());
    }
}
