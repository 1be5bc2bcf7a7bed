//! Turn resolution.
//!
//! ## Key Types
//!
//! - `Agenda`, `Step`: the queue of decisions and automatic steps of a turn
//! - `PendingDecision`: a (player, kind) pair the game waits for
//! - `Game`: validates and applies actions, expands the agenda
//! - `GameBuilder`: deals a new game

pub mod agenda;
pub mod game;
pub mod setup;

pub use agenda::{Agenda, PendingDecision, Step};
pub use game::Game;
pub use setup::GameBuilder;
