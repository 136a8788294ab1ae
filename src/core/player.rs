//! Seats at the table.
//!
//! A game always has exactly two seats. `PlayerId::FIRST` takes the
//! first turn; `PlayerId::SECOND` goes second and is compensated with
//! The Coin. `PlayerMap` holds one value per seat and is indexed by
//! `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seats per game.
pub const PLAYER_COUNT: usize = 2;

/// A seat, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(0);
    /// Receives The Coin.
    pub const SECOND: PlayerId = PlayerId(1);

    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Seat index into per-player arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats, first player first.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [PlayerId::FIRST, PlayerId::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat.
///
/// ## Example
///
/// ```
/// use battler_core::core::{PlayerId, PlayerMap};
///
/// let mut armor: PlayerMap<i32> = PlayerMap::from_array([0, 0]);
/// armor[PlayerId::SECOND] += 2;
/// assert_eq!(armor.map(|a| a * 2)[PlayerId::SECOND], 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Build each seat's value from its id.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            seats: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Values in seat order.
    pub fn from_array(seats: [T; PLAYER_COUNT]) -> Self {
        Self { seats }
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    /// Transform both values, keeping seats.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PlayerMap<U> {
        PlayerMap::new(|p| f(self.get(p)))
    }

    /// `(seat, value)` pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.seats.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seats() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::SECOND.index(), 1);
        assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.opponent().opponent(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.to_string(), "Player 1");
        assert_eq!(PlayerId::all().collect::<Vec<_>>(), vec![PlayerId::FIRST, PlayerId::SECOND]);
    }

    #[test]
    fn test_factory_sees_seat() {
        let hands: PlayerMap<usize> = PlayerMap::new(|p| if p == PlayerId::FIRST { 3 } else { 4 });
        assert_eq!(hands[PlayerId::FIRST], 3);
        assert_eq!(hands[PlayerId::SECOND], 4);
    }

    #[test]
    fn test_index_mut_and_iter() {
        let mut health = PlayerMap::from_array([30, 30]);
        health[PlayerId::SECOND] -= 6;
        let pairs: Vec<_> = health.iter().map(|(p, h)| (p, *h)).collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, 30), (PlayerId::SECOND, 24)]);
    }

    #[test]
    fn test_serde_keeps_seat_order() {
        let map = PlayerMap::from_array(["mage".to_string(), "rogue".to_string()]);
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[PlayerId::SECOND], "rogue");
        assert_eq!(back, map);
    }
}
