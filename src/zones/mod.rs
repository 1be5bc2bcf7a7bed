//! Zones: where cards live.
//!
//! ## Key Types
//!
//! - `Zone`: persistent multiset of cards (hand, stockpile, pool, library, ...)
//! - `HandSnapshot`: immutable sorted copy + consumed-id set owned by a builder
//! - `Building`: a foundation on a site with its materials

pub mod building;
pub mod snapshot;
pub mod zone;

pub use building::Building;
pub use snapshot::HandSnapshot;
pub use zone::Zone;
