//! Action builders.
//!
//! A builder turns a sequence of menu selections into exactly one
//! [`Action`]. The caller shows [`ActionBuilder::choices`] and the prompt,
//! feeds indices to [`ActionBuilder::make_choice`] and collects the action
//! once [`ActionBuilder::is_done`] reports true.
//!
//! ## Indexing
//!
//! Indices address the full `choices()` list, unselectable entries
//! included. Picking an out-of-range index or an unselectable entry fails
//! with [`DecisionError::InvalidChoice`] and leaves the builder unchanged.
//!
//! ## Builders
//!
//! - [`SingleChoiceBuilder`]: one pick from precomputed legal actions
//! - [`LaborerBuilder`]: pool card, then a hand card with a Dock
//! - [`LeadRoleBuilder`]: card or petition, Jack role, Palace extras
//! - [`FollowRoleBuilder`]: like leading with a fixed role, or think instead
//!
//! [`builder_for`] maps every [`ActionKind`] to its builder.

pub mod follow;
pub mod laborer;
pub mod lead;
pub mod petition;
pub mod single;

pub use follow::FollowRoleBuilder;
pub use laborer::LaborerBuilder;
pub use lead::LeadRoleBuilder;
pub use single::SingleChoiceBuilder;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardName, Role};
use crate::core::{Action, ActionKind, DecisionError, GameState, PlayerId};
use crate::rules::{legal_options, RuleQueries};
use crate::zones::HandSnapshot;

/// One entry of a choice list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub selectable: bool,
}

impl Choice {
    #[must_use]
    pub fn new(label: impl Into<String>, selectable: bool) -> Self {
        Self {
            label: label.into(),
            selectable,
        }
    }
}

/// A multi-step decision producing one action.
pub trait ActionBuilder {
    /// Kind of the action being built.
    fn kind(&self) -> ActionKind;

    /// Choices for the current step. Calling this never changes state.
    fn choices(&self) -> &[Choice];

    /// Prompt for the current step.
    fn prompt(&self) -> &str;

    /// Select an entry of `choices()` by index.
    fn make_choice(&mut self, index: usize) -> Result<(), DecisionError>;

    /// Whether the action is complete.
    fn is_done(&self) -> bool;

    /// The finished action, once done.
    fn action(&self) -> Option<&Action>;

    /// Take the finished action out of the builder.
    fn take_action(&mut self) -> Option<Action>;
}

/// What a menu entry stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    Card(Card),
    Role(Role),
    Petition,
    CancelPetition,
    SkipPalace,
    Thinker,
    Skip,
}

/// Choices shown for one state paired with what each one means.
#[derive(Clone, Debug, Default)]
pub(crate) struct Menu {
    choices: Vec<Choice>,
    entries: Vec<Entry>,
}

impl Menu {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, label: impl Into<String>, selectable: bool, entry: Entry) {
        self.choices.push(Choice::new(label, selectable));
        self.entries.push(entry);
    }

    /// List a card under its name.
    pub(crate) fn push_card(&mut self, card: Card, selectable: bool) {
        self.push(card.name.as_str(), selectable, Entry::Card(card));
    }

    /// List every role, all selectable.
    pub(crate) fn push_roles(&mut self) {
        for role in Role::ALL {
            self.push(role.to_string(), true, Entry::Role(role));
        }
    }

    pub(crate) fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Resolve an index to its entry without side effects.
    pub(crate) fn select(&self, index: usize) -> Result<Entry, DecisionError> {
        let invalid = DecisionError::InvalidChoice {
            index,
            len: self.choices.len(),
        };
        match (self.choices.get(index), self.entries.get(index)) {
            (Some(choice), Some(entry)) if choice.selectable => Ok(*entry),
            _ => Err(invalid),
        }
    }
}

/// The slice of game state a builder is constructed from.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    pub state: &'a GameState,
    pub player: PlayerId,
}

impl<'a> DecisionContext<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, player: PlayerId) -> Self {
        Self { state, player }
    }

    /// Whether the deciding player can use the structure.
    #[must_use]
    pub fn has(&self, structure: CardName) -> bool {
        self.state.owns_active_structure(self.player, structure)
    }

    /// Snapshot of the deciding player's hand.
    #[must_use]
    pub fn hand(&self) -> HandSnapshot {
        HandSnapshot::of(&self.state.player(self.player).hand)
    }
}

/// Construct the builder for a decision.
///
/// ```
/// use gtr_engine::builders::{builder_for, DecisionContext};
/// use gtr_engine::core::{ActionKind, GameConfig};
/// use gtr_engine::resolution::GameBuilder;
///
/// let game = GameBuilder::new(GameConfig::new(2).with_seed(3)).build();
/// let pending = game.expected()[0];
/// assert_eq!(pending.kind, ActionKind::ThinkerOrLead);
///
/// let ctx = DecisionContext::new(game.state(), pending.player);
/// let builder = builder_for(pending.kind, &ctx).unwrap();
/// assert_eq!(builder.choices().len(), 2);
/// ```
pub fn builder_for(
    kind: ActionKind,
    ctx: &DecisionContext<'_>,
) -> Result<Box<dyn ActionBuilder>, DecisionError> {
    if !ctx.state.has_seat(ctx.player) {
        return Err(DecisionError::UnknownPlayer(ctx.player));
    }
    let builder: Box<dyn ActionBuilder> = match kind {
        ActionKind::LeadRole => Box::new(LeadRoleBuilder::new(
            ctx.hand(),
            ctx.has(CardName::Palace),
            ctx.state.petition_size(ctx.player),
        )?),
        ActionKind::FollowRole => {
            let role = ctx
                .state
                .role_led
                .ok_or(DecisionError::InvalidOperation("no role has been led"))?;
            Box::new(FollowRoleBuilder::new(
                role,
                ctx.hand(),
                ctx.has(CardName::Palace),
                ctx.state.petition_size(ctx.player),
            )?)
        }
        ActionKind::Laborer => Box::new(LaborerBuilder::new(
            ctx.state.pool.sorted(),
            ctx.hand(),
            ctx.has(CardName::Dock),
        )?),
        ActionKind::ThinkerOrLead
        | ActionKind::ThinkerType
        | ActionKind::SkipThinker
        | ActionKind::Patron
        | ActionKind::Craftsman
        | ActionKind::Architect
        | ActionKind::Legionary
        | ActionKind::Merchant
        | ActionKind::UseLatrine
        | ActionKind::UseVomitorium
        | ActionKind::UseFountain
        | ActionKind::UseSewer
        | ActionKind::Stairway
        | ActionKind::UseSenate
        | ActionKind::BarOrAqueduct
        | ActionKind::GiveCard => Box::new(SingleChoiceBuilder::new(
            kind,
            legal_options(ctx.state, ctx.player, kind),
        )),
    };
    tracing::debug!(player = %ctx.player, %kind, "builder created");
    Ok(builder)
}
