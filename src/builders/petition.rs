//! Petition sub-protocol shared by leading and following.
//!
//! A petition substitutes `petition_size` non-Jack cards of one role for a
//! single role card. The first card fixes the petition's role; later picks
//! must share it. Whether the finished petition needs a role prompt depends
//! only on whether the draft already knows its role: a follower always
//! does, a leader does once the first unit is in.
//!
//! States installed here:
//!
//! - `FIRST_PETITION`: pick the first card, or cancel
//! - `MORE_PETITIONS`: pick further same-role cards, or cancel
//!
//! On completion the draft moves to `PETITION_ROLE` when the role is still
//! open, otherwise the petition becomes a unit and the draft returns to
//! its hub. Cancelling drops the queued cards and returns to the hub if a
//! unit exists, else to `SELECT_CARD`.

use super::{Entry, Menu};
use crate::cards::{Card, Role};
use crate::core::{Action, ActionUnit, DecisionError};
use crate::fsm::StateMachine;
use crate::zones::HandSnapshot;

pub const START: &str = "START";
pub const SELECT_CARD: &str = "SELECT_CARD";
pub const JACK_ROLE: &str = "JACK_ROLE";
pub const FIRST_PETITION: &str = "FIRST_PETITION";
pub const MORE_PETITIONS: &str = "MORE_PETITIONS";
pub const PETITION_ROLE: &str = "PETITION_ROLE";
pub const PALACE_CARDS: &str = "PALACE_CARDS";
pub const FINISHED: &str = "FINISHED";

/// Builder context shared by the lead and follow builders.
#[derive(Clone, Debug)]
pub struct RoleDraft {
    pub(crate) hand: HandSnapshot,
    pub(crate) role: Option<Role>,
    pub(crate) has_palace: bool,
    pub(crate) petition_size: usize,
    pub(crate) units: Vec<ActionUnit>,
    pub(crate) petition: Vec<Card>,
    pub(crate) pending_jack: Option<Card>,
    pub(crate) menu: Menu,
    pub(crate) prompt: String,
    pub(crate) action: Option<Action>,
}

impl RoleDraft {
    pub(crate) fn new(
        hand: HandSnapshot,
        role: Option<Role>,
        has_palace: bool,
        petition_size: usize,
    ) -> Self {
        Self {
            hand,
            role,
            has_palace,
            petition_size,
            units: Vec::new(),
            petition: Vec::new(),
            pending_jack: None,
            menu: Menu::new(),
            prompt: String::new(),
            action: None,
        }
    }

    /// Where a completed unit leads.
    pub(crate) fn hub(&self) -> &'static str {
        if self.has_palace {
            PALACE_CARDS
        } else {
            FINISHED
        }
    }

    /// Where a cancelled petition leads.
    fn cancel_target(&self) -> &'static str {
        if self.units.is_empty() {
            SELECT_CARD
        } else {
            PALACE_CARDS
        }
    }

    /// Commit one card as a unit.
    pub(crate) fn commit_single(&mut self, card: Card) {
        self.hand.consume(card);
        self.units.push(ActionUnit::single(card));
    }

    /// Commit the queued petition as a unit.
    pub(crate) fn commit_petition(&mut self) {
        for card in &self.petition {
            self.hand.consume(*card);
        }
        self.units.push(ActionUnit::petition(&self.petition));
        self.petition.clear();
    }

    /// Whether `card` may join the queued petition.
    fn petition_accepts(&self, card: Card) -> bool {
        if card.is_jack() || self.hand.is_consumed(card) || self.petition.contains(&card) {
            return false;
        }
        match self.petition.first() {
            Some(first) => first.role() == card.role(),
            None => true,
        }
    }

    fn petition_menu(&mut self) {
        let mut menu = Menu::new();
        for &card in self.hand.cards() {
            menu.push_card(card, self.petition_accepts(card));
        }
        menu.push("Cancel petition", true, Entry::CancelPetition);
        self.menu = menu;
        self.prompt = format!(
            "Select cards for petition ({} of {})",
            self.petition.len(),
            self.petition_size
        );
    }
}

/// Register the petition states.
pub(crate) fn install(fsm: &mut StateMachine<RoleDraft>) -> Result<(), DecisionError> {
    fsm.add_state(
        FIRST_PETITION,
        Some(petition_arrival),
        Some(petition_transition),
        false,
    )?;
    fsm.add_state(
        MORE_PETITIONS,
        Some(petition_arrival),
        Some(petition_transition),
        false,
    )?;
    Ok(())
}

/// Register `PETITION_ROLE` for drafts whose role may still be open.
pub(crate) fn install_role_prompt(fsm: &mut StateMachine<RoleDraft>) -> Result<(), DecisionError> {
    fsm.add_state(
        PETITION_ROLE,
        Some(petition_role_arrival),
        Some(petition_role_transition),
        false,
    )
}

fn petition_arrival(d: &mut RoleDraft) {
    d.petition_menu();
}

fn petition_transition(d: &mut RoleDraft, index: usize) -> Result<&'static str, DecisionError> {
    match d.menu.select(index)? {
        Entry::CancelPetition => {
            d.petition.clear();
            Ok(d.cancel_target())
        }
        Entry::Card(card) => {
            d.petition.push(card);
            if d.petition.len() < d.petition_size {
                return Ok(MORE_PETITIONS);
            }
            if d.role.is_none() {
                return Ok(PETITION_ROLE);
            }
            d.commit_petition();
            Ok(d.hub())
        }
        _ => Err(DecisionError::InvalidChoice {
            index,
            len: d.menu.choices().len(),
        }),
    }
}

fn petition_role_arrival(d: &mut RoleDraft) {
    let mut menu = Menu::new();
    menu.push_roles();
    d.menu = menu;
    d.prompt = "Select role for Petition".to_string();
}

fn petition_role_transition(
    d: &mut RoleDraft,
    index: usize,
) -> Result<&'static str, DecisionError> {
    match d.menu.select(index)? {
        Entry::Role(role) => {
            d.role = Some(role);
            d.commit_petition();
            Ok(d.hub())
        }
        _ => Err(DecisionError::InvalidChoice {
            index,
            len: d.menu.choices().len(),
        }),
    }
}
