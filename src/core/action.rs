//! Action representation.
//!
//! An `Action` is the single artifact the decision layer hands across the
//! system boundary: a fully specified, immutable answer to one decision.
//! Each variant's payload shape is fixed by its [`ActionKind`].
//!
//! Leading and following carry [`ActionUnit`]s. A unit is either one card
//! played directly or a completed petition of 2 or 3 same-role cards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::{Card, Material, Role};

/// The kind of decision an action answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    ThinkerOrLead,
    ThinkerType,
    SkipThinker,
    LeadRole,
    FollowRole,
    Laborer,
    Patron,
    Craftsman,
    Architect,
    Legionary,
    Merchant,
    UseLatrine,
    UseVomitorium,
    UseFountain,
    UseSewer,
    Stairway,
    UseSenate,
    BarOrAqueduct,
    GiveCard,
}

impl ActionKind {
    /// The action kind that performs a role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Patron => ActionKind::Patron,
            Role::Laborer => ActionKind::Laborer,
            Role::Architect => ActionKind::Architect,
            Role::Craftsman => ActionKind::Craftsman,
            Role::Legionary => ActionKind::Legionary,
            Role::Merchant => ActionKind::Merchant,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// One indivisible contribution toward a led or followed role.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionUnit(SmallVec<[Card; 3]>);

impl ActionUnit {
    /// A single card played directly.
    #[must_use]
    pub fn single(card: Card) -> Self {
        let mut cards = SmallVec::new();
        cards.push(card);
        Self(cards)
    }

    /// A completed petition.
    #[must_use]
    pub fn petition(cards: &[Card]) -> Self {
        Self(SmallVec::from_slice(cards))
    }

    /// Cards in this unit.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for units produced by builders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this unit is a petition rather than a direct play.
    #[must_use]
    pub fn is_petition(&self) -> bool {
        self.0.len() > 1
    }
}

/// A complete answer to one decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Think (`true`) or lead a role (`false`).
    ThinkerOrLead { think: bool },

    /// Draw a Jack (`true`) or draw up to the hand limit (`false`).
    ThinkerType { for_jack: bool },

    /// Decline (`true`) or take an optional thinker action.
    SkipThinker { skip: bool },

    /// Lead `role` with the given units.
    LeadRole { role: Role, units: Vec<ActionUnit> },

    /// Follow the led role, or think instead (`think` with no units).
    FollowRole { think: bool, units: Vec<ActionUnit> },

    /// Take a card from the pool and, with a Dock, one from hand.
    Laborer {
        from_hand: Option<Card>,
        from_pool: Option<Card>,
    },

    /// Take clients: from the pool, from the deck (Bar), from hand (Aqueduct).
    Patron {
        from_pool: Option<Card>,
        from_deck: bool,
        from_hand: Option<Card>,
    },

    /// Start a building (`building` + `site`) or add `material` from hand
    /// to `building`. All `None` skips.
    Craftsman {
        building: Option<Card>,
        material: Option<Card>,
        site: Option<Material>,
    },

    /// Like Craftsman, but materials come from the stockpile (or the pool
    /// with an Archway, flagged by `from_pool`).
    Architect {
        building: Option<Card>,
        material: Option<Card>,
        site: Option<Material>,
        from_pool: bool,
    },

    /// Reveal a hand card and demand its material. `None` skips.
    Legionary { card: Option<Card> },

    /// Move cards to the vault: from the stockpile, from the deck (Atrium),
    /// from hand (Basilica).
    Merchant {
        from_stockpile: Option<Card>,
        from_deck: bool,
        from_hand: Option<Card>,
    },

    /// Discard one card before thinking. `None` skips.
    UseLatrine { discard: Option<Card> },

    /// Discard the whole hand before thinking.
    UseVomitorium { discard_all: bool },

    /// Draw the top card of the library to use for this Craftsman.
    UseFountain { use_fountain: bool },

    /// Move own camp cards to the stockpile instead of the pool.
    UseSewer { cards: Vec<Card> },

    /// Add a material to an opponent's completed building.
    Stairway {
        owner: Option<PlayerId>,
        building: Option<Card>,
        material: Option<Card>,
        from_pool: bool,
    },

    /// Take a Jack leaving another player's camp.
    UseSenate { take: bool },

    /// Resolve the Bar (`true`) or the Aqueduct first.
    BarOrAqueduct { bar_first: bool },

    /// Cards surrendered to a Legionary demand. Empty means none matched.
    GiveCard { cards: Vec<Card> },
}

impl Action {
    /// The kind of decision this action answers.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ThinkerOrLead { .. } => ActionKind::ThinkerOrLead,
            Action::ThinkerType { .. } => ActionKind::ThinkerType,
            Action::SkipThinker { .. } => ActionKind::SkipThinker,
            Action::LeadRole { .. } => ActionKind::LeadRole,
            Action::FollowRole { .. } => ActionKind::FollowRole,
            Action::Laborer { .. } => ActionKind::Laborer,
            Action::Patron { .. } => ActionKind::Patron,
            Action::Craftsman { .. } => ActionKind::Craftsman,
            Action::Architect { .. } => ActionKind::Architect,
            Action::Legionary { .. } => ActionKind::Legionary,
            Action::Merchant { .. } => ActionKind::Merchant,
            Action::UseLatrine { .. } => ActionKind::UseLatrine,
            Action::UseVomitorium { .. } => ActionKind::UseVomitorium,
            Action::UseFountain { .. } => ActionKind::UseFountain,
            Action::UseSewer { .. } => ActionKind::UseSewer,
            Action::Stairway { .. } => ActionKind::Stairway,
            Action::UseSenate { .. } => ActionKind::UseSenate,
            Action::BarOrAqueduct { .. } => ActionKind::BarOrAqueduct,
            Action::GiveCard { .. } => ActionKind::GiveCard,
        }
    }

    /// Action units of a LeadRole or FollowRole action; empty otherwise.
    #[must_use]
    pub fn units(&self) -> &[ActionUnit] {
        match self {
            Action::LeadRole { units, .. } | Action::FollowRole { units, .. } => units,
            _ => &[],
        }
    }

    /// The flattened card sequence of all units, in order.
    pub fn unit_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.units().iter().flat_map(|unit| unit.cards().iter())
    }
}

/// A recorded action with metadata for the per-game action log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Position in the game-wide log.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardName;

    fn road(id: u32) -> Card {
        Card::new(id, CardName::Road)
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Action::ThinkerOrLead { think: true }.kind(), ActionKind::ThinkerOrLead);
        assert_eq!(
            Action::Laborer { from_hand: None, from_pool: None }.kind(),
            ActionKind::Laborer
        );
        assert_eq!(Action::GiveCard { cards: vec![] }.kind(), ActionKind::GiveCard);
    }

    #[test]
    fn test_for_role() {
        for role in Role::ALL {
            let kind = ActionKind::for_role(role);
            assert_eq!(format!("{kind}"), format!("{role}"));
        }
    }

    #[test]
    fn test_units_flatten_in_order() {
        let action = Action::LeadRole {
            role: Role::Laborer,
            units: vec![
                ActionUnit::single(road(1)),
                ActionUnit::petition(&[road(2), road(3), road(4)]),
            ],
        };

        let ids: Vec<u32> = action.unit_cards().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(!action.units()[0].is_petition());
        assert!(action.units()[1].is_petition());
    }

    #[test]
    fn test_non_role_action_has_no_units() {
        assert!(Action::UseSenate { take: true }.units().is_empty());
    }

    #[test]
    fn test_action_record_serialization() {
        let action = Action::FollowRole {
            think: false,
            units: vec![ActionUnit::single(road(5))],
        };
        let record = ActionRecord::new(PlayerId::new(1), action, 2, 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
