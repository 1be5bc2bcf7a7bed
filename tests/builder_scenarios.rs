//! Worked decision scenarios, driven through the public builder API.

use gtr_engine::builders::{ActionBuilder, FollowRoleBuilder, LaborerBuilder, LeadRoleBuilder};
use gtr_engine::cards::{Card, CardName, Role};
use gtr_engine::core::{Action, ActionUnit, DecisionError};
use gtr_engine::fsm::StateMachine;
use gtr_engine::zones::HandSnapshot;

fn labels(builder: &dyn ActionBuilder) -> Vec<(String, bool)> {
    builder
        .choices()
        .iter()
        .map(|c| (c.label.clone(), c.selectable))
        .collect()
}

fn owned(entries: &[(&str, bool)]) -> Vec<(String, bool)> {
    entries.iter().map(|&(l, s)| (l.to_string(), s)).collect()
}

/// Laborer without a Dock: one pool pick finishes the action.
#[test]
fn test_laborer_takes_road_from_pool() {
    let road = Card::new(11, CardName::Road);
    let pool = vec![Card::new(10, CardName::Dock), road];
    let hand = HandSnapshot::from_cards([
        Card::new(0, CardName::Jack),
        Card::new(1, CardName::Dock),
    ]);

    let mut builder = LaborerBuilder::new(pool, hand, false).unwrap();
    assert_eq!(
        labels(&builder),
        owned(&[("Dock", true), ("Road", true), ("Skip card from pool", true)])
    );

    builder.make_choice(1).unwrap();
    assert!(builder.is_done());
    assert_eq!(
        builder.take_action(),
        Some(Action::Laborer {
            from_hand: None,
            from_pool: Some(road),
        })
    );
}

/// A petition of three Roads led with no role known yet asks for a role.
#[test]
fn test_lead_petition_asks_for_role() {
    let roads = [
        Card::new(1, CardName::Road),
        Card::new(2, CardName::Road),
        Card::new(3, CardName::Road),
    ];
    let hand = HandSnapshot::from_cards(
        std::iter::once(Card::new(0, CardName::Jack)).chain(roads),
    );
    let mut builder = LeadRoleBuilder::new(hand, false, 3).unwrap();

    // Jack, Road, Road, Road, Petition
    builder.make_choice(4).unwrap();
    assert_eq!(builder.state(), Some("FIRST_PETITION"));
    builder.make_choice(1).unwrap();
    assert_eq!(builder.state(), Some("MORE_PETITIONS"));
    builder.make_choice(2).unwrap();
    builder.make_choice(3).unwrap();
    assert_eq!(builder.state(), Some("PETITION_ROLE"));

    let craftsman = Role::ALL
        .iter()
        .position(|&r| r == Role::Craftsman)
        .unwrap();
    builder.make_choice(craftsman).unwrap();

    assert!(builder.is_done());
    assert_eq!(
        builder.take_action(),
        Some(Action::LeadRole {
            role: Role::Craftsman,
            units: vec![ActionUnit::petition(&roads)],
        })
    );
}

/// Following Legionary with no Brick card and no Jack: only a petition
/// or thinking remain.
#[test]
fn test_follow_without_matching_cards_thinks() {
    let hand = HandSnapshot::from_cards([
        Card::new(1, CardName::Dock),
        Card::new(2, CardName::Road),
        Card::new(3, CardName::Temple),
    ]);
    let mut builder = FollowRoleBuilder::new(Role::Legionary, hand, false, 3).unwrap();

    assert_eq!(
        labels(&builder),
        owned(&[
            ("Dock", false),
            ("Road", false),
            ("Temple", false),
            ("Petition", true),
            ("Thinker instead", true),
        ])
    );

    builder.make_choice(4).unwrap();
    assert_eq!(
        builder.take_action(),
        Some(Action::FollowRole {
            think: true,
            units: vec![],
        })
    );
}

#[derive(Default)]
struct Visits {
    arrived_at_b: usize,
}

fn to_b(_: &mut Visits, _: usize) -> Result<&'static str, DecisionError> {
    Ok("B")
}

fn arrive_b(v: &mut Visits) {
    v.arrived_at_b += 1;
}

/// A terminal state refuses further input.
#[test]
fn test_machine_refuses_input_once_finished() {
    let mut fsm: StateMachine<Visits> = StateMachine::new();
    fsm.add_state("A", None, Some(to_b), false).unwrap();
    fsm.add_state("B", Some(arrive_b), None, true).unwrap();
    fsm.set_start("A").unwrap();

    let mut visits = Visits::default();
    fsm.pump(&mut visits, 7).unwrap();
    assert_eq!(fsm.current(), Some("B"));
    assert_eq!(visits.arrived_at_b, 1);

    let err = fsm.pump(&mut visits, 0).unwrap_err();
    assert!(matches!(err, DecisionError::InvalidOperation(_)));
    assert_eq!(visits.arrived_at_b, 1);
}
