//! Card system: static catalog, card instances and identity minting.
//!
//! ## Key Types
//!
//! - `Material`, `Role`: the two closed enumerations every card maps into
//! - `CardName`: the building catalog plus the wildcard Jack
//! - `Card`: one physical copy (`CardId` + `CardName`)
//! - `CardRegistry`: mints identities and the Orders deck

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardName, Material, Role};
pub use instance::{Card, CardId};
pub use registry::CardRegistry;
