//! Immutable hand snapshots for builders.
//!
//! A builder never looks at the live hand. It copies the hand once, sorted
//! in presentation order, and records which cards it has committed by
//! identity. Committing is the only mutation.

use rustc_hash::FxHashSet;

use super::zone::Zone;
use crate::cards::{Card, CardId};

/// A sorted copy of a hand plus the set of consumed card identities.
#[derive(Clone, Debug, Default)]
pub struct HandSnapshot {
    cards: Vec<Card>,
    consumed: FxHashSet<CardId>,
}

impl HandSnapshot {
    /// Snapshot a zone.
    #[must_use]
    pub fn of(zone: &Zone) -> Self {
        Self::from_cards(zone.iter().copied())
    }

    /// Snapshot an arbitrary card list.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.sort();
        Self {
            cards,
            consumed: FxHashSet::default(),
        }
    }

    /// Every card, consumed or not, in presentation order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether the card was already committed.
    #[must_use]
    pub fn is_consumed(&self, card: Card) -> bool {
        self.consumed.contains(&card.id)
    }

    /// Commit a card. Returns false if it was already consumed or is not
    /// part of the snapshot.
    pub fn consume(&mut self, card: Card) -> bool {
        self.cards.iter().any(|c| c.id == card.id) && self.consumed.insert(card.id)
    }

    /// Number of committed cards.
    #[must_use]
    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }
}
