//! Error types.
//!
//! Two layers fail differently:
//!
//! - [`DecisionError`] comes from decision state machines and builders.
//!   `InvalidChoice` is a user error and always recoverable; the other
//!   variants are programming errors.
//! - [`GameError`] comes from the turn protocol when a finished action is
//!   handed in. Every variant leaves the game state untouched.

use super::action::ActionKind;
use super::player::PlayerId;

/// Errors raised while driving a decision.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    /// Index out of range or pointing at an unselectable entry.
    #[error("invalid choice {index} ({len} entries offered)")]
    InvalidChoice { index: usize, len: usize },

    /// A state name was registered twice.
    #[error("state {0} is already registered")]
    DuplicateState(&'static str),

    /// A state name was used without being registered.
    #[error("state {0} is not registered")]
    UnknownState(&'static str),

    /// The machine was driven when it could not accept input.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// The deciding player has no seat at the table.
    #[error("{0} has no seat at this table")]
    UnknownPlayer(PlayerId),
}

impl DecisionError {
    /// Whether the caller should simply re-prompt.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DecisionError::InvalidChoice { .. })
    }
}

/// Errors raised when an action is handed to the game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The player does not owe a decision of this kind right now.
    #[error("{player} is not expected to send {kind}")]
    NotExpected { player: PlayerId, kind: ActionKind },

    /// The action breaks a rule. The same decision is still expected.
    #[error("illegal action: {0}")]
    Illegal(String),

    /// The game has ended.
    #[error("the game is over")]
    GameOver,

    /// An encoded game state could not be read or written.
    #[error("game state codec: {0}")]
    Codec(#[from] bincode::Error),
}

impl GameError {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        GameError::Illegal(reason.into())
    }
}
