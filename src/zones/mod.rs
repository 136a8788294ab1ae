//! Zones: where cards and instances live.
//!
//! Each player owns six zones. Deck, hand and graveyard hold card ids in
//! `im::Vector`s; the board holds live minions in order; the weapon and
//! secret slots hold the remaining instance kinds. All of them live inside
//! `PlayerState` so the whole state clones in O(1).

pub mod board;

use serde::{Deserialize, Serialize};

pub use board::Board;

/// A per-player zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Board,
    Graveyard,
    WeaponSlot,
    SecretSlot,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Deck,
        Zone::Hand,
        Zone::Board,
        Zone::Graveyard,
        Zone::WeaponSlot,
        Zone::SecretSlot,
    ];

    /// Whether the opponent may see the contents (not just the count).
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Zone::Board | Zone::Graveyard | Zone::WeaponSlot)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Board => "board",
            Zone::Graveyard => "graveyard",
            Zone::WeaponSlot => "weapon slot",
            Zone::SecretSlot => "secret slot",
        };
        f.write_str(name)
    }
}
