//! Card zones.
//!
//! A `Zone` is a multiset of cards backed by `im::Vector`, so snapshots for
//! builders and cloned game states share structure. Order only matters for
//! the library, whose top is the back of the vector.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Material};

/// A collection of cards.
///
/// ## Usage
///
/// ```
/// use gtr_engine::cards::{Card, CardName};
/// use gtr_engine::zones::Zone;
///
/// let mut hand = Zone::new();
/// hand.push(Card::new(1, CardName::Road));
/// hand.push(Card::new(0, CardName::Jack));
///
/// assert_eq!(hand.len(), 2);
/// assert!(hand.remove(Card::new(1, CardName::Road)));
/// assert_eq!(hand.sorted()[0].name, CardName::Jack);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    cards: Vector<Card>,
}

impl Zone {
    /// Create an empty zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the zone is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check whether this exact card (by identity) is here.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.iter().any(|c| c.id == card.id)
    }

    /// Iterate in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Add a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove a card by identity.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| c.id == card.id) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Take the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Remove and return every card.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards).into_iter().collect()
    }

    /// Cards in presentation order (Jacks first, then by name).
    #[must_use]
    pub fn sorted(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.cards.iter().copied().collect();
        cards.sort();
        cards
    }

    /// Cards of one material, in presentation order.
    #[must_use]
    pub fn of_material(&self, material: Material) -> Vec<Card> {
        self.sorted()
            .into_iter()
            .filter(|c| c.material() == Some(material))
            .collect()
    }

    /// Count the Jacks here.
    #[must_use]
    pub fn jack_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_jack()).count()
    }

    /// Sum of material values.
    #[must_use]
    pub fn total_value(&self) -> usize {
        self.cards.iter().map(Card::value).sum()
    }
}

impl FromIterator<Card> for Zone {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl Extend<Card> for Zone {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        for card in iter {
            self.push(card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardName;

    #[test]
    fn test_remove_by_identity() {
        let a = Card::new(1, CardName::Road);
        let b = Card::new(2, CardName::Road);
        let mut zone: Zone = [a, b].into_iter().collect();

        assert!(zone.remove(b));
        assert!(!zone.remove(b));
        assert!(zone.contains(a));
        assert_eq!(zone.len(), 1);
    }

    #[test]
    fn test_pop_takes_top() {
        let mut library: Zone = [Card::new(1, CardName::Road), Card::new(2, CardName::Dock)]
            .into_iter()
            .collect();

        assert_eq!(library.pop(), Some(Card::new(2, CardName::Dock)));
        assert_eq!(library.pop(), Some(Card::new(1, CardName::Road)));
        assert_eq!(library.pop(), None);
    }

    #[test]
    fn test_of_material_and_value() {
        let zone: Zone = [
            Card::new(1, CardName::Temple),
            Card::new(2, CardName::Road),
            Card::new(3, CardName::Statue),
            Card::new(4, CardName::Jack),
        ]
        .into_iter()
        .collect();

        let marble: Vec<_> = zone.of_material(Material::Marble).iter().map(|c| c.name).collect();
        assert_eq!(marble, vec![CardName::Statue, CardName::Temple]);
        assert_eq!(zone.total_value(), 7);
        assert_eq!(zone.jack_count(), 1);
    }

    #[test]
    fn test_take_all_empties() {
        let mut zone: Zone = [Card::new(1, CardName::Road)].into_iter().collect();
        let cards = zone.take_all();
        assert_eq!(cards.len(), 1);
        assert!(zone.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut zone: Zone = [Card::new(1, CardName::Road)].into_iter().collect();
        let snapshot = zone.clone();
        zone.push(Card::new(2, CardName::Bar));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(zone.len(), 2);
    }
}
