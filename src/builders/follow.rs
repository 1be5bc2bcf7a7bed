//! Follow-role builder.
//!
//! The role is fixed by the leader, so there is no Jack prompt and a
//! finished petition never asks for a role. A follower who has not yet
//! committed a unit may think instead, producing a FollowRole action with
//! `think` set and no units.

use super::petition::{
    self, RoleDraft, FINISHED, FIRST_PETITION, PALACE_CARDS, SELECT_CARD, START,
};
use super::{ActionBuilder, Choice, Entry, Menu};
use crate::cards::Role;
use crate::core::{Action, ActionKind, DecisionError};
use crate::fsm::StateMachine;
use crate::zones::HandSnapshot;

/// Builds a [`Action::FollowRole`].
#[derive(Debug)]
pub struct FollowRoleBuilder {
    fsm: StateMachine<RoleDraft>,
    draft: RoleDraft,
}

impl FollowRoleBuilder {
    /// Create a builder following `role`.
    pub fn new(
        role: Role,
        hand: HandSnapshot,
        has_palace: bool,
        petition_size: usize,
    ) -> Result<Self, DecisionError> {
        let mut fsm = StateMachine::new();
        fsm.add_state(START, None, Some(start_transition), false)?;
        fsm.add_state(
            SELECT_CARD,
            Some(select_card_arrival),
            Some(select_card_transition),
            false,
        )?;
        fsm.add_state(
            PALACE_CARDS,
            Some(palace_cards_arrival),
            Some(palace_cards_transition),
            false,
        )?;
        petition::install(&mut fsm)?;
        fsm.add_state(FINISHED, Some(finished_arrival), None, true)?;
        fsm.set_start(START)?;

        let mut builder = Self {
            fsm,
            draft: RoleDraft::new(hand, Some(role), has_palace, petition_size),
        };
        builder.fsm.pump(&mut builder.draft, 0)?;
        Ok(builder)
    }

    /// Name of the current state.
    #[must_use]
    pub fn state(&self) -> Option<&'static str> {
        self.fsm.current()
    }
}

impl ActionBuilder for FollowRoleBuilder {
    fn kind(&self) -> ActionKind {
        ActionKind::FollowRole
    }

    fn choices(&self) -> &[Choice] {
        self.draft.menu.choices()
    }

    fn prompt(&self) -> &str {
        &self.draft.prompt
    }

    fn make_choice(&mut self, index: usize) -> Result<(), DecisionError> {
        self.fsm.pump(&mut self.draft, index)
    }

    fn is_done(&self) -> bool {
        self.fsm.is_finished()
    }

    fn action(&self) -> Option<&Action> {
        self.draft.action.as_ref()
    }

    fn take_action(&mut self) -> Option<Action> {
        self.draft.action.take()
    }
}

/// List hand cards, selectable when they can follow the role.
fn role_card_menu(d: &RoleDraft) -> Menu {
    let mut menu = Menu::new();
    for &card in d.hand.cards() {
        let playable = d.role.is_some_and(|role| card.plays_as(role));
        menu.push_card(card, playable && !d.hand.is_consumed(card));
    }
    menu
}

fn start_transition(_: &mut RoleDraft, _: usize) -> Result<&'static str, DecisionError> {
    Ok(SELECT_CARD)
}

fn select_card_arrival(d: &mut RoleDraft) {
    let mut menu = role_card_menu(d);
    menu.push("Petition", true, Entry::Petition);
    menu.push("Thinker instead", true, Entry::Thinker);
    d.menu = menu;
    d.prompt = "Select card to follow with".to_string();
}

fn select_card_transition(d: &mut RoleDraft, index: usize) -> Result<&'static str, DecisionError> {
    match d.menu.select(index)? {
        Entry::Petition => Ok(FIRST_PETITION),
        Entry::Thinker => Ok(FINISHED),
        Entry::Card(card) => {
            d.commit_single(card);
            Ok(d.hub())
        }
        _ => Err(DecisionError::InvalidChoice {
            index,
            len: d.menu.choices().len(),
        }),
    }
}

fn palace_cards_arrival(d: &mut RoleDraft) {
    let mut menu = role_card_menu(d);
    menu.push("Petition", true, Entry::Petition);
    menu.push("Skip further Palace actions", true, Entry::SkipPalace);
    d.menu = menu;
    d.prompt = format!(
        "Select additional palace actions ({} actions)",
        d.units.len()
    );
}

fn palace_cards_transition(d: &mut RoleDraft, index: usize) -> Result<&'static str, DecisionError> {
    match d.menu.select(index)? {
        Entry::Petition => Ok(FIRST_PETITION),
        Entry::SkipPalace => Ok(FINISHED),
        Entry::Card(card) => {
            d.commit_single(card);
            Ok(PALACE_CARDS)
        }
        _ => Err(DecisionError::InvalidChoice {
            index,
            len: d.menu.choices().len(),
        }),
    }
}

fn finished_arrival(d: &mut RoleDraft) {
    d.menu = Menu::new();
    d.prompt.clear();
    d.action = Some(Action::FollowRole {
        think: d.units.is_empty(),
        units: d.units.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardName};
    use crate::core::ActionUnit;

    fn selectable(builder: &FollowRoleBuilder) -> Vec<bool> {
        builder.choices().iter().map(|c| c.selectable).collect()
    }

    #[test]
    fn test_only_matching_cards_and_jacks_follow() {
        let hand = HandSnapshot::from_cards([
            Card::new(1, CardName::Road),
            Card::new(2, CardName::Wall),
            Card::new(3, CardName::Jack),
        ]);
        let builder = FollowRoleBuilder::new(Role::Legionary, hand, false, 3).unwrap();

        assert_eq!(builder.prompt(), "Select card to follow with");
        assert_eq!(selectable(&builder), vec![true, false, true, true, true]);
        assert_eq!(builder.choices()[4].label, "Thinker instead");
    }

    #[test]
    fn test_follow_with_single_card() {
        let wall = Card::new(2, CardName::Wall);
        let hand = HandSnapshot::from_cards([Card::new(1, CardName::Road), wall]);
        let mut builder = FollowRoleBuilder::new(Role::Legionary, hand, false, 3).unwrap();

        builder.make_choice(1).unwrap();
        assert_eq!(
            builder.take_action(),
            Some(Action::FollowRole {
                think: false,
                units: vec![ActionUnit::single(wall)],
            })
        );
    }

    #[test]
    fn test_petition_never_asks_for_role() {
        let hand = HandSnapshot::from_cards([
            Card::new(1, CardName::Dock),
            Card::new(2, CardName::Market),
        ]);
        let mut builder = FollowRoleBuilder::new(Role::Patron, hand, false, 2).unwrap();

        // Dock, Market, Petition, Thinker instead
        builder.make_choice(2).unwrap();
        assert_eq!(builder.state(), Some(FIRST_PETITION));
        builder.make_choice(0).unwrap();
        builder.make_choice(1).unwrap();

        assert!(builder.is_done());
        let action = builder.take_action().unwrap();
        assert_eq!(action.units().len(), 1);
        assert!(action.units()[0].is_petition());
    }

    #[test]
    fn test_palace_hub_offers_skip_not_thinker() {
        let hand = HandSnapshot::from_cards([
            Card::new(1, CardName::Road),
            Card::new(2, CardName::Bar),
        ]);
        let mut builder = FollowRoleBuilder::new(Role::Laborer, hand, true, 3).unwrap();

        builder.make_choice(0).unwrap();
        assert_eq!(builder.state(), Some(PALACE_CARDS));

        let labels: Vec<&str> = builder.choices().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Bar", "Road", "Petition", "Skip further Palace actions"]
        );
        assert_eq!(selectable(&builder), vec![false, true, true, true]);

        builder.make_choice(1).unwrap();
        builder.make_choice(3).unwrap();
        let action = builder.take_action().unwrap();
        assert_eq!(action.units().len(), 2);
        assert!(matches!(action, Action::FollowRole { think: false, .. }));
    }
}
