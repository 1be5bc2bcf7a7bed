//! Card instances.
//!
//! A `Card` is one physical copy: its name plus an identity that tells
//! duplicate copies apart. Builders track consumed cards by identity, so
//! two "Road" cards in the same hand never alias.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::definition::{CardName, Material, Role};

/// Identity of a physical card, unique within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// An immutable card token.
///
/// Cards sort Jacks first, then by name, then by identity; every choice
/// list is presented in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: CardName,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(id: u32, name: CardName) -> Self {
        Self {
            id: CardId(id),
            name,
        }
    }

    /// Whether this card is the wildcard.
    #[must_use]
    pub const fn is_jack(&self) -> bool {
        self.name.is_jack()
    }

    /// Material, `None` for Jacks.
    #[must_use]
    pub const fn material(&self) -> Option<Material> {
        self.name.material()
    }

    /// Role, `None` for Jacks.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.name.role()
    }

    /// Value of the card's material.
    #[must_use]
    pub fn value(&self) -> usize {
        self.name.value()
    }

    /// Whether this card can lead or follow `role` as a single card.
    #[must_use]
    pub fn plays_as(&self, role: Role) -> bool {
        self.is_jack() || self.role() == Some(role)
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_jack()
            .cmp(&self.is_jack())
            .then_with(|| self.name.as_str().cmp(other.name.as_str()))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name.as_str())
    }
}
