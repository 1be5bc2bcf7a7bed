//! Static card data: materials, roles and the building catalog.
//!
//! Every Orders card is a building with exactly one material. The material
//! fixes the card's role and its value. The Jack is the only card with no
//! material; it stands in for any role and never names a building.

use serde::{Deserialize, Serialize};

/// Building material. Also the kind of site a building is laid on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Material {
    Rubble,
    Wood,
    Concrete,
    Brick,
    Stone,
    Marble,
}

impl Material {
    /// Every material, in rulebook order.
    pub const ALL: [Material; 6] = [
        Material::Rubble,
        Material::Wood,
        Material::Concrete,
        Material::Brick,
        Material::Stone,
        Material::Marble,
    ];

    /// Influence gained by completing a building on this site, and the
    /// number of materials needed to complete it.
    #[must_use]
    pub const fn value(self) -> usize {
        match self {
            Material::Rubble | Material::Wood => 1,
            Material::Concrete | Material::Brick => 2,
            Material::Stone | Material::Marble => 3,
        }
    }

    /// The role a card of this material leads or follows.
    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Material::Rubble => Role::Laborer,
            Material::Wood => Role::Craftsman,
            Material::Concrete => Role::Architect,
            Material::Brick => Role::Legionary,
            Material::Stone => Role::Merchant,
            Material::Marble => Role::Patron,
        }
    }

    /// Position in [`Material::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// One of the six roles a card can lead or follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Patron,
    Laborer,
    Architect,
    Craftsman,
    Legionary,
    Merchant,
}

impl Role {
    /// Every role, in the order they are offered to players.
    pub const ALL: [Role; 6] = [
        Role::Patron,
        Role::Laborer,
        Role::Architect,
        Role::Craftsman,
        Role::Legionary,
        Role::Merchant,
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

macro_rules! catalog {
    ($($name:ident => $material:ident, $label:literal;)*) => {
        /// Name of a card: the wildcard Jack or one of the buildings.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum CardName {
            Jack,
            $($name,)*
        }

        impl CardName {
            /// Every building, grouped by material.
            pub const BUILDINGS: &'static [CardName] = &[$(CardName::$name,)*];

            /// Material of the card, `None` for the Jack.
            #[must_use]
            pub const fn material(self) -> Option<Material> {
                match self {
                    CardName::Jack => None,
                    $(CardName::$name => Some(Material::$material),)*
                }
            }

            /// Display name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    CardName::Jack => "Jack",
                    $(CardName::$name => $label,)*
                }
            }
        }
    };
}

catalog! {
    Bar => Rubble, "Bar";
    Insula => Rubble, "Insula";
    Latrine => Rubble, "Latrine";
    Road => Rubble, "Road";
    Storeroom => Rubble, "Storeroom";

    Academy => Wood, "Academy";
    Amphitheatre => Wood, "Amphitheatre";
    Circus => Wood, "Circus";
    Dock => Wood, "Dock";
    Market => Wood, "Market";
    Palisade => Wood, "Palisade";

    Aqueduct => Concrete, "Aqueduct";
    Bridge => Concrete, "Bridge";
    Senate => Concrete, "Senate";
    Sewer => Concrete, "Sewer";
    Stairway => Concrete, "Stairway";
    Vomitorium => Concrete, "Vomitorium";

    Archway => Brick, "Archway";
    Atrium => Brick, "Atrium";
    Bath => Brick, "Bath";
    Foundry => Brick, "Foundry";
    Fountain => Brick, "Fountain";
    Shrine => Brick, "Shrine";
    Wall => Brick, "Wall";

    Catacomb => Stone, "Catacomb";
    CircusMaximus => Stone, "Circus Maximus";
    Colosseum => Stone, "Colosseum";
    Garden => Stone, "Garden";
    Prison => Stone, "Prison";
    School => Stone, "School";
    Tower => Stone, "Tower";

    Basilica => Marble, "Basilica";
    Forum => Marble, "Forum";
    LudusMagna => Marble, "Ludus Magna";
    Palace => Marble, "Palace";
    Statue => Marble, "Statue";
    Temple => Marble, "Temple";
}

impl CardName {
    /// Whether this is the wildcard.
    #[must_use]
    pub const fn is_jack(self) -> bool {
        matches!(self, CardName::Jack)
    }

    /// Role of the card, `None` for the Jack.
    #[must_use]
    pub fn role(self) -> Option<Role> {
        self.material().map(Material::role)
    }

    /// Value of the card's material, 0 for the Jack.
    #[must_use]
    pub fn value(self) -> usize {
        self.material().map_or(0, Material::value)
    }

    /// Copies of this card in the Orders deck.
    #[must_use]
    pub fn copies(self) -> usize {
        match self.material() {
            None => 0,
            Some(material) => match material.value() {
                1 => 6,
                2 => 4,
                _ => 2,
            },
        }
    }
}

impl std::fmt::Display for CardName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_roles_are_a_bijection() {
        let mut roles: Vec<Role> = Material::ALL.iter().map(|m| m.role()).collect();
        roles.sort();
        let mut all = Role::ALL.to_vec();
        all.sort();
        assert_eq!(roles, all);
    }

    #[test]
    fn test_card_lookups() {
        assert_eq!(CardName::Road.material(), Some(Material::Rubble));
        assert_eq!(CardName::Road.role(), Some(Role::Laborer));
        assert_eq!(CardName::Temple.value(), 3);
        assert_eq!(CardName::Dock.role(), Some(Role::Craftsman));
        assert_eq!(CardName::Jack.material(), None);
        assert_eq!(CardName::Jack.role(), None);
        assert_eq!(CardName::Jack.value(), 0);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CardName::CircusMaximus.to_string(), "Circus Maximus");
        assert_eq!(CardName::LudusMagna.to_string(), "Ludus Magna");
        assert_eq!(Role::Craftsman.to_string(), "Craftsman");
        assert_eq!(Material::Concrete.to_string(), "Concrete");
    }

    #[test]
    fn test_deck_has_144_orders_cards() {
        let total: usize = CardName::BUILDINGS.iter().map(|c| c.copies()).sum();
        assert_eq!(total, 144);
        assert!(!CardName::BUILDINGS.contains(&CardName::Jack));
    }
}
