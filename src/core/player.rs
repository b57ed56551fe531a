//! Seat identifiers and per-seat storage.
//!
//! ## PlayerId
//!
//! Index of a seat in the round roster, in the order the names were
//! entered. The order never changes across a session, so a `PlayerId` is
//! stable from one round to the next even though roles are reshuffled.
//!
//! ## PlayerMap
//!
//! `Vec`-backed storage with one entry per seat, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::MAX_PLAYERS;

/// Seat index, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a table with `player_count` players.
    ///
    /// ```
    /// use undercover_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// One value per seat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build from a factory called once per seat.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count <= MAX_PLAYERS, "At most {MAX_PLAYERS} players supported");
        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Wrap an already ordered vector, seat `i` being `data[i]`.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(data.len() <= MAX_PLAYERS, "At most {MAX_PLAYERS} players supported");
        Self { data }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// First seat whose value satisfies `pred`.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<PlayerId> {
        self.data
            .iter()
            .position(|v| pred(v))
            .map(|i| PlayerId(i as u8))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
