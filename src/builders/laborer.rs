//! Laborer builder.
//!
//! ```text
//! START -> FROM_POOL -> FROM_HAND (with a Dock) -> FINISHED
//!                    -> FINISHED
//! ```

use super::{ActionBuilder, Choice, Entry, Menu};
use crate::cards::Card;
use crate::core::{Action, ActionKind, DecisionError};
use crate::fsm::StateMachine;
use crate::zones::HandSnapshot;

const START: &str = "START";
const FROM_POOL: &str = "FROM_POOL";
const FROM_HAND: &str = "FROM_HAND";
const FINISHED: &str = "FINISHED";

#[derive(Clone, Debug)]
struct LaborerDraft {
    pool: Vec<Card>,
    hand: HandSnapshot,
    has_dock: bool,
    pool_card: Option<Card>,
    hand_card: Option<Card>,
    menu: Menu,
    prompt: String,
    action: Option<Action>,
}

/// Builds a [`Action::Laborer`].
///
/// ```
/// use gtr_engine::builders::{ActionBuilder, LaborerBuilder};
/// use gtr_engine::cards::{Card, CardName};
/// use gtr_engine::core::Action;
/// use gtr_engine::zones::HandSnapshot;
///
/// let road = Card::new(2, CardName::Road);
/// let pool = vec![Card::new(1, CardName::Dock), road];
/// let hand = HandSnapshot::from_cards([
///     Card::new(3, CardName::Jack),
///     Card::new(4, CardName::Dock),
/// ]);
/// let mut builder = LaborerBuilder::new(pool, hand, false).unwrap();
///
/// let labels: Vec<_> = builder.choices().iter().map(|c| c.label.as_str()).collect();
/// assert_eq!(labels, vec!["Dock", "Road", "Skip card from pool"]);
///
/// builder.make_choice(1).unwrap();
/// assert_eq!(
///     builder.action(),
///     Some(&Action::Laborer { from_hand: None, from_pool: Some(road) })
/// );
/// ```
#[derive(Debug)]
pub struct LaborerBuilder {
    fsm: StateMachine<LaborerDraft>,
    draft: LaborerDraft,
}

impl LaborerBuilder {
    /// Create a builder over the pool and a hand snapshot.
    pub fn new(
        mut pool: Vec<Card>,
        hand: HandSnapshot,
        has_dock: bool,
    ) -> Result<Self, DecisionError> {
        pool.sort();

        let mut fsm = StateMachine::new();
        fsm.add_state(START, None, Some(start_transition), false)?;
        fsm.add_state(FROM_POOL, Some(from_pool_arrival), Some(from_pool_transition), false)?;
        fsm.add_state(FROM_HAND, Some(from_hand_arrival), Some(from_hand_transition), false)?;
        fsm.add_state(FINISHED, Some(finished_arrival), None, true)?;
        fsm.set_start(START)?;

        let mut builder = Self {
            fsm,
            draft: LaborerDraft {
                pool,
                hand,
                has_dock,
                pool_card: None,
                hand_card: None,
                menu: Menu::new(),
                prompt: String::new(),
                action: None,
            },
        };
        builder.fsm.pump(&mut builder.draft, 0)?;
        Ok(builder)
    }
}

impl ActionBuilder for LaborerBuilder {
    fn kind(&self) -> ActionKind {
        ActionKind::Laborer
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

fn start_transition(_: &mut LaborerDraft, _: usize) -> Result<&'static str, DecisionError> {
    Ok(FROM_POOL)
}

fn from_pool_arrival(d: &mut LaborerDraft) {
    let mut menu = Menu::new();
    for &card in &d.pool {
        menu.push_card(card, true);
    }
    menu.push("Skip card from pool", true, Entry::Skip);
    d.menu = menu;
    d.prompt = "Performing Laborer. Select card from pool".to_string();
}

fn from_pool_transition(d: &mut LaborerDraft, index: usize) -> Result<&'static str, DecisionError> {
    match d.menu.select(index)? {
        Entry::Card(card) => d.pool_card = Some(card),
        Entry::Skip => {}
        _ => {
            return Err(DecisionError::InvalidChoice {
                index,
                len: d.menu.choices().len(),
            })
        }
    }
    Ok(if d.has_dock { FROM_HAND } else { FINISHED })
}

fn from_hand_arrival(d: &mut LaborerDraft) {
    let mut menu = Menu::new();
    for &card in d.hand.cards() {
        menu.push_card(card, !card.is_jack());
    }
    menu.push("Skip card from hand", true, Entry::Skip);
    d.menu = menu;
    d.prompt = "Performing Laborer. Select card from hand".to_string();
}

fn from_hand_transition(d: &mut LaborerDraft, index: usize) -> Result<&'static str, DecisionError> {
    match d.menu.select(index)? {
        Entry::Card(card) => {
            d.hand.consume(card);
            d.hand_card = Some(card);
        }
        Entry::Skip => {}
        _ => {
            return Err(DecisionError::InvalidChoice {
                index,
                len: d.menu.choices().len(),
            })
        }
    }
    Ok(FINISHED)
}

fn finished_arrival(d: &mut LaborerDraft) {
    d.menu = Menu::new();
    d.prompt.clear();
    d.action = Some(Action::Laborer {
        from_hand: d.hand_card,
        from_pool: d.pool_card,
    });
}
