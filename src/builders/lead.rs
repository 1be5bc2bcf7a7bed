//! Lead-role builder.
//!
//! ```text
//! START -> SELECT_CARD -> JACK_ROLE ------------------------> hub
//!                      -> FIRST_PETITION -> MORE_PETITIONS -> PETITION_ROLE -> hub
//!                      -> hub
//! hub = PALACE_CARDS with a Palace, else FINISHED
//! ```
//!
//! Any hand card may lead: a building card leads its own role, a Jack asks
//! for one. With a Palace, further cards of the resolved role (or Jacks)
//! and petitions add units until the player stops.

use super::petition::{
    self, RoleDraft, FINISHED, FIRST_PETITION, JACK_ROLE, PALACE_CARDS, SELECT_CARD, START,
};
use super::{ActionBuilder, Choice, Entry, Menu};
use crate::core::{Action, ActionKind, DecisionError};
use crate::fsm::StateMachine;
use crate::zones::HandSnapshot;

/// Builds a [`Action::LeadRole`].
///
/// ```
/// use gtr_engine::builders::{ActionBuilder, LeadRoleBuilder};
/// use gtr_engine::cards::{Card, CardName, Role};
/// use gtr_engine::core::Action;
/// use gtr_engine::zones::HandSnapshot;
///
/// let hand = HandSnapshot::from_cards([Card::new(1, CardName::Dock)]);
/// let mut builder = LeadRoleBuilder::new(hand, false, 3).unwrap();
///
/// builder.make_choice(0).unwrap();
/// assert!(builder.is_done());
/// assert!(matches!(
///     builder.action(),
///     Some(Action::LeadRole { role: Role::Craftsman, .. })
/// ));
/// ```
#[derive(Debug)]
pub struct LeadRoleBuilder {
    fsm: StateMachine<RoleDraft>,
    draft: RoleDraft,
}

impl LeadRoleBuilder {
    /// Create a builder over a hand snapshot.
    pub fn new(
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
            JACK_ROLE,
            Some(jack_role_arrival),
            Some(jack_role_transition),
            false,
        )?;
        fsm.add_state(
            PALACE_CARDS,
            Some(palace_cards_arrival),
            Some(palace_cards_transition),
            false,
        )?;
        petition::install(&mut fsm)?;
        petition::install_role_prompt(&mut fsm)?;
        fsm.add_state(FINISHED, Some(finished_arrival), None, true)?;
        fsm.set_start(START)?;

        let mut builder = Self {
            fsm,
            draft: RoleDraft::new(hand, None, has_palace, petition_size),
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

impl ActionBuilder for LeadRoleBuilder {
    fn kind(&self) -> ActionKind {
        ActionKind::LeadRole
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

fn start_transition(_: &mut RoleDraft, _: usize) -> Result<&'static str, DecisionError> {
    Ok(SELECT_CARD)
}

fn select_card_arrival(d: &mut RoleDraft) {
    let mut menu = Menu::new();
    for &card in d.hand.cards() {
        menu.push_card(card, !d.hand.is_consumed(card));
    }
    menu.push("Petition", true, Entry::Petition);
    d.menu = menu;
    d.prompt = "Select card to lead".to_string();
}

fn select_card_transition(d: &mut RoleDraft, index: usize) -> Result<&'static str, DecisionError> {
    match d.menu.select(index)? {
        Entry::Petition => Ok(FIRST_PETITION),
        Entry::Card(card) => match card.role() {
            None => {
                d.pending_jack = Some(card);
                Ok(JACK_ROLE)
            }
            Some(role) => {
                d.role = Some(role);
                d.commit_single(card);
                Ok(d.hub())
            }
        },
        _ => Err(DecisionError::InvalidChoice {
            index,
            len: d.menu.choices().len(),
        }),
    }
}

fn jack_role_arrival(d: &mut RoleDraft) {
    let mut menu = Menu::new();
    menu.push_roles();
    d.menu = menu;
    d.prompt = "Select role for Jack".to_string();
}

fn jack_role_transition(d: &mut RoleDraft, index: usize) -> Result<&'static str, DecisionError> {
    let role = match d.menu.select(index)? {
        Entry::Role(role) => role,
        _ => {
            return Err(DecisionError::InvalidChoice {
                index,
                len: d.menu.choices().len(),
            })
        }
    };
    let jack = d
        .pending_jack
        .take()
        .ok_or(DecisionError::InvalidOperation("no Jack awaiting a role"))?;
    d.role = Some(role);
    d.commit_single(jack);
    Ok(d.hub())
}

fn palace_cards_arrival(d: &mut RoleDraft) {
    let mut menu = Menu::new();
    for &card in d.hand.cards() {
        let playable = d.role.is_some_and(|role| card.plays_as(role));
        menu.push_card(card, playable && !d.hand.is_consumed(card));
    }
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
    d.action = d.role.map(|role| Action::LeadRole {
        role,
        units: d.units.clone(),
    });
}
