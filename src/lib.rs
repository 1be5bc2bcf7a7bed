//! # gtr-engine
//!
//! Decision-resolution core for a Glory to Rome style card game.
//!
//! ## Design Principles
//!
//! 1. **Decisions are menus**: every choice a player makes is built step by
//!    step from a list of labelled options by an [`ActionBuilder`], and a
//!    finished builder yields exactly one [`Action`].
//!
//! 2. **N-Player First**: every API takes `player_count` as context.
//!    No convenience methods that assume 2 players.
//!
//! 3. **All-or-nothing actions**: the game checks a finished action
//!    completely before applying it. A rejected action changes nothing.
//!
//! ## Architecture
//!
//! - **Agenda**: a turn is a queue of decision and automatic steps. The
//!   game expands automatic steps until a decision is due, so callers only
//!   ever see `expected()` decisions.
//!
//! - **Persistent Data Structures**: zones use `im` vectors, so cloning a
//!   state for a builder snapshot is cheap.
//!
//! - **Deterministic**: the library is shuffled with a seeded ChaCha8 RNG
//!   and the whole state round-trips through `bincode`.
//!
//! ## Modules
//!
//! - `cards`: material/role enums, the building catalog, card identities
//! - `core`: players, state, actions, errors, RNG, configuration
//! - `zones`: card multisets, hand snapshots, buildings
//! - `fsm`: the named-state machine builders run on
//! - `builders`: one builder per decision kind
//! - `rules`: legality and legal-option enumeration
//! - `effects`: building-power hook
//! - `resolution`: agenda, turn protocol, setup
//!
//! ## Quick start
//!
//! ```
//! use gtr_engine::{builder_for, DecisionContext, GameBuilder, GameConfig};
//!
//! let mut game = GameBuilder::new(GameConfig::new(2).with_seed(5)).build();
//! let pending = game.expected()[0];
//!
//! let ctx = DecisionContext::new(game.state(), pending.player);
//! let mut builder = builder_for(pending.kind, &ctx).unwrap();
//! builder.make_choice(0).unwrap();
//! let action = builder.take_action().unwrap();
//!
//! game.handle(pending.player, action).unwrap();
//! assert_eq!(game.history().len(), 1);
//! ```

pub mod builders;
pub mod cards;
pub mod core;
pub mod effects;
pub mod fsm;
pub mod resolution;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, ActionUnit, DecisionError, GameConfig, GameError,
    GameRng, GameRngState, GameState, PlayerId, PlayerMap, PlayerState,
};

pub use crate::cards::{Card, CardId, CardName, CardRegistry, Material, Role};

pub use crate::zones::{Building, HandSnapshot, Zone};

pub use crate::builders::{builder_for, ActionBuilder, Choice, DecisionContext};

pub use crate::rules::{legal_options, validate, GameResult, LabeledAction, RuleQueries};

pub use crate::effects::{BuildingPowers, NoPowers};

pub use crate::resolution::{Agenda, Game, GameBuilder, PendingDecision, Step};
