//! Buildings under construction and completed.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardName, Material};

/// A building: foundation card, the site it sits on and its materials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// The card naming the building.
    pub foundation: Card,

    /// Site material. Fixes how many materials complete it.
    pub site: Material,

    /// Materials added so far.
    pub materials: Vec<Card>,

    /// Whether the building was completed.
    pub complete: bool,

    /// Whether an opponent's Stairway opened this building to everyone.
    pub public: bool,
}

impl Building {
    /// Lay a foundation on a site.
    #[must_use]
    pub fn new(foundation: Card, site: Material) -> Self {
        Self {
            foundation,
            site,
            materials: Vec::new(),
            complete: false,
            public: false,
        }
    }

    /// Building name.
    #[must_use]
    pub fn name(&self) -> CardName {
        self.foundation.name
    }

    /// Materials still needed.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.site.value().saturating_sub(self.materials.len())
    }

    /// Add a material. Returns true if this completed the building.
    pub fn add_material(&mut self, card: Card) -> bool {
        self.materials.push(card);
        if !self.complete && self.missing() == 0 {
            self.complete = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_follows_site_value() {
        let mut insula = Building::new(Card::new(1, CardName::Insula), Material::Rubble);
        assert_eq!(insula.missing(), 1);
        assert!(insula.add_material(Card::new(2, CardName::Road)));
        assert!(insula.complete);

        let mut statue = Building::new(Card::new(3, CardName::Statue), Material::Concrete);
        assert!(!statue.add_material(Card::new(4, CardName::Bridge)));
        assert!(statue.add_material(Card::new(5, CardName::Sewer)));
        assert_eq!(statue.name(), CardName::Statue);
    }

    #[test]
    fn test_extra_material_does_not_recomplete() {
        let mut bar = Building::new(Card::new(1, CardName::Bar), Material::Rubble);
        assert!(bar.add_material(Card::new(2, CardName::Road)));
        assert!(!bar.add_material(Card::new(3, CardName::Road)));
    }
}
