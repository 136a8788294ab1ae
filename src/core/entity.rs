//! Entity identification system.
//!
//! Every live game object (hero, minion, weapon, secret) has a unique
//! `EntityId`.
//!
//! ## ID Layout
//!
//! - `0..PLAYER_COUNT`: Reserved for the two heroes
//! - `PLAYER_COUNT..`: Minions, weapons and secrets, allocated in order
//!
//! Allocation is deterministic: replaying the same actions from the same
//! seed yields the same ids, which is what lets an AI plan computed on a
//! cloned state be submitted against the live one.
//!
//! ```
//! use battler_core::core::{EntityId, PlayerId};
//!
//! let hero = EntityId::hero(PlayerId::new(1));
//! assert!(hero.is_hero());
//! assert_eq!(hero.as_hero(), Some(PlayerId::new(1)));
//!
//! let minion = EntityId(7);
//! assert!(!minion.is_hero());
//! ```

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PLAYER_COUNT};

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Entity ID of a player's hero.
    #[must_use]
    pub const fn hero(player: PlayerId) -> Self {
        Self(player.0 as u32)
    }

    /// First entity ID available for non-hero entities.
    #[must_use]
    pub const fn first_non_hero() -> u32 {
        PLAYER_COUNT as u32
    }

    /// Check if this entity ID refers to a hero.
    #[must_use]
    pub const fn is_hero(self) -> bool {
        self.0 < PLAYER_COUNT as u32
    }

    /// Owner of the hero this ID refers to, if it is a hero.
    #[must_use]
    pub const fn as_hero(self) -> Option<PlayerId> {
        if self.is_hero() {
            Some(PlayerId(self.0 as u8))
        } else {
            None
        }
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_hero() {
            Some(player) => write!(f, "Hero({})", player.0),
            None => write!(f, "Entity({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_ids() {
        assert_eq!(EntityId::hero(PlayerId::new(0)), EntityId(0));
        assert_eq!(EntityId::hero(PlayerId::new(1)), EntityId(1));
        assert!(EntityId(1).is_hero());
        assert!(!EntityId(2).is_hero());
    }

    #[test]
    fn test_as_hero() {
        assert_eq!(EntityId(0).as_hero(), Some(PlayerId::new(0)));
        assert_eq!(EntityId(1).as_hero(), Some(PlayerId::new(1)));
        assert_eq!(EntityId(2).as_hero(), None);
    }

    #[test]
    fn test_first_non_hero() {
        assert_eq!(EntityId::first_non_hero(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
        assert_eq!(format!("{}", EntityId(1)), "Hero(1)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
