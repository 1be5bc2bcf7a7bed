//! Player identification, seating order and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Seats are numbered clockwise from 0; "seating order
//! after X" means X+1, X+2, ... wrapping around and excluding X.
//!
//! ## PlayerMap
//!
//! One value per seat; `GameState` keeps its `PlayerState`s in one.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat index of a player (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Seat number as an index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use gtr_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat to the left of this one.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }

    /// The seat to the right of this one.
    #[must_use]
    pub fn previous(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + player_count - 1) % player_count) as u8)
    }

    /// Every other seat, in seating order starting after this one.
    ///
    /// ```
    /// use gtr_engine::core::PlayerId;
    ///
    /// let order: Vec<_> = PlayerId::new(1).others(3).collect();
    /// assert_eq!(order, vec![PlayerId::new(2), PlayerId::new(0)]);
    /// ```
    pub fn others(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..player_count)
            .map(move |offset| PlayerId(((self.index() + offset) % player_count) as u8))
    }

    /// This seat followed by every other seat in seating order.
    pub fn starting_here(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        std::iter::once(self).chain(self.others(player_count))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index())
    }
}

/// One value per seat, indexed by [`PlayerId`].
///
/// ```
/// use gtr_engine::core::{PlayerId, PlayerMap};
///
/// let mut clients: PlayerMap<u32> = PlayerMap::with_default(4);
/// clients[PlayerId::new(1)] += 2;
/// assert_eq!(clients[PlayerId::new(1)], 2);
/// assert_eq!(clients.seats(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T: Default> PlayerMap<T> {
    /// A default value for each of `player_count` seats.
    pub fn with_default(player_count: usize) -> Self {
        Self {
            seats: std::iter::repeat_with(T::default).take(player_count).collect(),
        }
    }
}

impl<T> PlayerMap<T> {
    #[must_use]
    pub fn seats(&self) -> usize {
        self.seats.len()
    }

    /// Values in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(&self.seats)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}
