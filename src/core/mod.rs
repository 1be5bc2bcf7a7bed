//! Core engine types: players, state, actions, errors, RNG, configuration.
//!
//! Everything here is independent of how decisions are built or resolved;
//! the builders and the turn protocol consume these types.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord, ActionUnit};
pub use config::GameConfig;
pub use error::{DecisionError, GameError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, PlayerState};
