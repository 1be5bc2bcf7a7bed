//! Single-choice builder: one pick from a list of finished actions.

use super::{ActionBuilder, Choice};
use crate::core::{Action, ActionKind, DecisionError};
use crate::rules::LabeledAction;

/// Offers precomputed actions of one kind; the first valid pick finishes.
#[derive(Clone, Debug)]
pub struct SingleChoiceBuilder {
    kind: ActionKind,
    options: Vec<Action>,
    choices: Vec<Choice>,
    prompt: String,
    action: Option<Action>,
    done: bool,
}

impl SingleChoiceBuilder {
    /// Create a builder from labelled actions.
    pub fn new(kind: ActionKind, options: Vec<LabeledAction>) -> Self {
        let (options, choices) = options
            .into_iter()
            .map(|o| (o.action, Choice::new(o.label, true)))
            .unzip();
        Self {
            kind,
            options,
            choices,
            prompt: prompt_for(kind).to_string(),
            action: None,
            done: false,
        }
    }
}

impl ActionBuilder for SingleChoiceBuilder {
    fn kind(&self) -> ActionKind {
        self.kind
    }

    fn choices(&self) -> &[Choice] {
        &self.choices
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn make_choice(&mut self, index: usize) -> Result<(), DecisionError> {
        if self.done {
            return Err(DecisionError::InvalidOperation("decision already made"));
        }
        let action = self
            .options
            .get(index)
            .cloned()
            .ok_or(DecisionError::InvalidChoice {
                index,
                len: self.options.len(),
            })?;
        self.action = Some(action);
        self.done = true;
        Ok(())
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    fn take_action(&mut self) -> Option<Action> {
        self.action.take()
    }
}

fn prompt_for(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::ThinkerOrLead => "Think or lead a role",
        ActionKind::ThinkerType => "Draw a Jack or draw cards",
        ActionKind::SkipThinker => "Academy: take a thinker action?",
        ActionKind::LeadRole => "Select card to lead",
        ActionKind::FollowRole => "Select card to follow with",
        ActionKind::Laborer => "Performing Laborer",
        ActionKind::Patron => "Performing Patron. Select clients",
        ActionKind::Craftsman => "Performing Craftsman",
        ActionKind::Architect => "Performing Architect",
        ActionKind::Legionary => "Performing Legionary. Select card to demand",
        ActionKind::Merchant => "Performing Merchant. Select cards for vault",
        ActionKind::UseLatrine => "Latrine: discard a card before thinking?",
        ActionKind::UseVomitorium => "Vomitorium: discard your hand before thinking?",
        ActionKind::UseFountain => "Fountain: draw a card for this Craftsman?",
        ActionKind::UseSewer => "Sewer: select camp cards for your stockpile",
        ActionKind::Stairway => "Stairway: add a material to an opponent's building?",
        ActionKind::UseSenate => "Senate: take the Jack?",
        ActionKind::BarOrAqueduct => "Resolve Bar or Aqueduct first",
        ActionKind::GiveCard => "Legionary demand: select card to give",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<LabeledAction> {
        vec![
            LabeledAction::new(Action::UseSenate { take: true }, "Take the Jack"),
            LabeledAction::new(Action::UseSenate { take: false }, "Leave the Jack"),
        ]
    }

    #[test]
    fn test_all_options_selectable() {
        let builder = SingleChoiceBuilder::new(ActionKind::UseSenate, options());
        assert_eq!(builder.choices().len(), 2);
        assert!(builder.choices().iter().all(|c| c.selectable));
        assert_eq!(builder.prompt(), "Senate: take the Jack?");
    }

    #[test]
    fn test_one_pick_finishes() {
        let mut builder = SingleChoiceBuilder::new(ActionKind::UseSenate, options());
        builder.make_choice(1).unwrap();

        assert!(builder.is_done());
        assert_eq!(builder.take_action(), Some(Action::UseSenate { take: false }));
        assert!(builder.make_choice(0).is_err());
    }

    #[test]
    fn test_out_of_range_is_recoverable() {
        let mut builder = SingleChoiceBuilder::new(ActionKind::UseSenate, options());
        let err = builder.make_choice(2).unwrap_err();

        assert!(err.is_recoverable());
        assert!(!builder.is_done());
        assert_eq!(builder.action(), None);
    }
}
