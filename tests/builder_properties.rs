//! Property tests over randomly driven lead and follow builders.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use gtr_engine::builders::{ActionBuilder, Choice, FollowRoleBuilder, LeadRoleBuilder};
use gtr_engine::cards::{Card, CardName, Material, Role};
use gtr_engine::core::{Action, GameConfig, GameState, PlayerId};
use gtr_engine::rules::validate;
use gtr_engine::zones::{Building, HandSnapshot};

fn card_name() -> impl Strategy<Value = CardName> {
    (0..=CardName::BUILDINGS.len()).prop_map(|i| {
        CardName::BUILDINGS
            .get(i)
            .copied()
            .unwrap_or(CardName::Jack)
    })
}

fn hand() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_name(), 1..9).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Card::new(i as u32, name))
            .collect()
    })
}

fn role() -> impl Strategy<Value = Role> {
    (0..Role::ALL.len()).prop_map(|i| Role::ALL[i])
}

/// Three cards per petition, or two with a Circus.
fn petition_size() -> impl Strategy<Value = usize> {
    2usize..=3
}

/// Feed picks until the builder finishes. Rejected picks must leave the
/// menu exactly as it was.
fn drive(builder: &mut dyn ActionBuilder, picks: &[usize]) -> Result<(), TestCaseError> {
    for &pick in picks {
        if builder.is_done() {
            break;
        }
        let before: Vec<Choice> = builder.choices().to_vec();
        let prompt = builder.prompt().to_string();
        if let Err(err) = builder.make_choice(pick) {
            prop_assert!(err.is_recoverable());
            prop_assert_eq!(builder.choices(), before.as_slice());
            prop_assert_eq!(builder.prompt(), prompt.as_str());
        }
    }
    Ok(())
}

/// Unit cards never repeat, and petitions are well formed.
fn check_units(action: &Action, petition_size: usize) -> Result<(), TestCaseError> {
    let mut seen = FxHashSet::default();
    for card in action.unit_cards() {
        prop_assert!(seen.insert(card.id), "card {} used twice", card.id);
    }
    for unit in action.units() {
        if unit.is_petition() {
            let cards = unit.cards();
            prop_assert_eq!(cards.len(), petition_size);
            prop_assert!(cards.iter().all(|c| !c.is_jack()));
            prop_assert!(cards.iter().all(|c| c.role() == cards[0].role()));
        }
    }
    Ok(())
}

fn table_with_hand(cards: &[Card], petition_size: usize) -> GameState {
    let mut state = GameState::new(GameConfig::new(2));
    let me = state.player_mut(PlayerId::new(0));
    me.hand.extend(cards.iter().copied());
    if petition_size == 2 {
        let mut circus = Building::new(Card::new(500, CardName::Circus), Material::Wood);
        circus.complete = true;
        me.buildings.push(circus);
    }
    state
}

proptest! {
    #[test]
    fn prop_lead_units_are_disjoint(
        cards in hand(),
        palace in any::<bool>(),
        size in petition_size(),
        picks in prop::collection::vec(0usize..14, 0..40),
    ) {
        let hand = HandSnapshot::from_cards(cards.clone());
        let mut builder = LeadRoleBuilder::new(hand, palace, size).unwrap();
        drive(&mut builder, &picks)?;

        if let Some(action) = builder.action() {
            check_units(action, size)?;
            prop_assert!(!action.units().is_empty());
            if !palace {
                prop_assert_eq!(action.units().len(), 1);
                let state = table_with_hand(&cards, size);
                prop_assert!(validate(&state, PlayerId::new(0), action).is_ok());
            }
        }
    }

    #[test]
    fn prop_follow_respects_role(
        cards in hand(),
        led in role(),
        palace in any::<bool>(),
        size in petition_size(),
        picks in prop::collection::vec(0usize..14, 0..40),
    ) {
        let hand = HandSnapshot::from_cards(cards);
        let mut builder = FollowRoleBuilder::new(led, hand, palace, size).unwrap();
        drive(&mut builder, &picks)?;

        let Some(action) = builder.action() else {
            prop_assert!(!builder.is_done());
            return Ok(());
        };
        match action {
            Action::FollowRole { think: false, units } => {
                check_units(action, size)?;
                for unit in units.iter().filter(|u| !u.is_petition()) {
                    prop_assert!(unit.cards().iter().all(|c| c.plays_as(led)));
                }
            }
            Action::FollowRole { think: true, units } => prop_assert!(units.is_empty()),
            other => prop_assert!(false, "unexpected action {:?}", other),
        }
    }

    #[test]
    fn prop_out_of_range_changes_nothing(cards in hand(), extra in 0usize..5) {
        let mut builder = LeadRoleBuilder::new(HandSnapshot::from_cards(cards), false, 3).unwrap();
        let before = builder.choices().to_vec();
        let len = before.len();

        let err = builder.make_choice(len + extra).unwrap_err();
        prop_assert!(err.is_recoverable());
        prop_assert_eq!(builder.choices(), before.as_slice());
        prop_assert_eq!(builder.state(), Some("SELECT_CARD"));
    }

    #[test]
    fn prop_choices_are_stable_between_picks(cards in hand(), led in role()) {
        let hand = HandSnapshot::from_cards(cards);
        let builder = FollowRoleBuilder::new(led, hand, false, 3).unwrap();
        prop_assert_eq!(builder.choices(), builder.choices());
        prop_assert_eq!(builder.choices().to_vec(), builder.choices().to_vec());
    }
}
