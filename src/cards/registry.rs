//! Card minting.
//!
//! The `CardRegistry` hands out card identities. Every physical card in a
//! game is minted here exactly once, so identities never collide.

use serde::{Deserialize, Serialize};

use super::definition::CardName;
use super::instance::Card;

/// Allocator of card identities.
///
/// ## Example
///
/// ```
/// use gtr_engine::cards::{CardName, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// let deck = registry.orders_deck();
/// let jacks = registry.jacks(6);
///
/// assert_eq!(deck.len(), 144);
/// assert!(jacks.iter().all(|c| c.name == CardName::Jack));
/// assert_eq!(registry.minted(), 150);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardRegistry {
    next_id: u32,
}

impl CardRegistry {
    /// Create a registry that starts at identity 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint one card.
    pub fn mint(&mut self, name: CardName) -> Card {
        let card = Card::new(self.next_id, name);
        self.next_id += 1;
        card
    }

    /// Mint the full, unshuffled Orders deck.
    pub fn orders_deck(&mut self) -> Vec<Card> {
        let mut deck = Vec::new();
        for &name in CardName::BUILDINGS {
            for _ in 0..name.copies() {
                deck.push(self.mint(name));
            }
        }
        deck
    }

    /// Mint `count` Jacks.
    pub fn jacks(&mut self, count: usize) -> Vec<Card> {
        (0..count).map(|_| self.mint(CardName::Jack)).collect()
    }

    /// Number of cards minted so far.
    #[must_use]
    pub fn minted(&self) -> u32 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_identities_are_unique() {
        let mut registry = CardRegistry::new();
        let mut cards = registry.orders_deck();
        cards.extend(registry.jacks(6));

        let ids: FxHashSet<_> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), cards.len());
    }

    #[test]
    fn test_deck_copies() {
        let mut registry = CardRegistry::new();
        let deck = registry.orders_deck();

        let roads = deck.iter().filter(|c| c.name == CardName::Road).count();
        let temples = deck.iter().filter(|c| c.name == CardName::Temple).count();
        assert_eq!(roads, 6);
        assert_eq!(temples, 2);
    }

    #[test]
    fn test_jacks_follow_the_deck() {
        let mut registry = CardRegistry::new();
        registry.orders_deck();
        let jacks = registry.jacks(2);
        assert_eq!(jacks[0].id.raw(), 144);
        assert_eq!(jacks[1].id.raw(), 145);
    }
}
