//! Live instances - runtime card state.
//!
//! An instance is a card template plus the mutable state it has picked up
//! in play. Minions store their *own* stats only (base plus permanent
//! buffs, and a damage counter); aura contributions are never written back
//! here, they are recomputed on every query by `effects::aura`.

use serde::{Deserialize, Serialize};

use super::attributes::{Keyword, Keywords};
use super::definition::{CardDefinition, CardId, CardKind, HeroClass};
use crate::core::{EntityId, PlayerId};

/// A minion on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minion {
    pub id: EntityId,
    pub card: CardId,
    pub owner: PlayerId,

    /// Printed stats, restored by silence.
    pub base_attack: i32,
    pub base_health: i32,

    /// Own attack and maximum health: base plus permanent buffs.
    pub attack: i32,
    pub max_health: i32,

    /// Damage taken. Current health is effective max health minus damage.
    pub damage: i32,

    /// Live keywords. Divine shield and stealth are removed here when lost.
    pub keywords: Keywords,
    pub spell_damage: i32,

    pub frozen: bool,
    pub silenced: bool,
    pub summoned_this_turn: bool,
    pub attacks_this_turn: u8,
    /// Marked by a destroy effect; removed at the next death sweep.
    pub destroyed: bool,
}

impl Minion {
    /// Create a fresh instance from a minion template.
    ///
    /// Returns `None` if the template is not a minion.
    #[must_use]
    pub fn from_card(id: EntityId, owner: PlayerId, card: &CardDefinition) -> Option<Self> {
        let CardKind::Minion { attack, health } = card.kind else {
            return None;
        };
        Some(Self {
            id,
            card: card.id,
            owner,
            base_attack: attack,
            base_health: health,
            attack,
            max_health: health,
            damage: 0,
            keywords: card.keywords,
            spell_damage: card.spell_damage,
            frozen: false,
            silenced: false,
            summoned_this_turn: true,
            attacks_this_turn: 0,
            destroyed: false,
        })
    }

    #[must_use]
    pub fn has(&self, keyword: Keyword) -> bool {
        self.keywords.has(keyword)
    }

    #[must_use]
    pub fn has_divine_shield(&self) -> bool {
        self.has(Keyword::DivineShield)
    }

    #[must_use]
    pub fn is_stealthed(&self) -> bool {
        self.has(Keyword::Stealth)
    }

    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.damage > 0
    }

    /// Attacks allowed per turn.
    #[must_use]
    pub fn max_attacks(&self) -> u8 {
        if self.has(Keyword::Windfury) {
            2
        } else {
            1
        }
    }

    /// Remove keywords, spell damage, freeze and permanent buffs.
    ///
    /// Current health is kept when it is at or below the printed health,
    /// otherwise it drops to the printed health. Aura contributions are
    /// unaffected here: they belong to the aura sources, and the silenced
    /// minion's *own* auras stop being projected because the engine skips
    /// silenced sources.
    pub fn silence(&mut self) {
        let current = self.max_health - self.damage;
        self.attack = self.base_attack;
        self.max_health = self.base_health;
        self.damage = (self.max_health - current.min(self.base_health)).max(0);
        self.keywords = Keywords::empty();
        self.spell_damage = 0;
        self.frozen = false;
        self.silenced = true;
    }

    /// Start-of-turn reset for the owner's minions.
    pub fn ready(&mut self) {
        self.summoned_this_turn = false;
        self.attacks_this_turn = 0;
    }
}

/// A player's hero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub class: HeroClass,
    pub health: i32,
    pub max_health: i32,
    pub armor: i32,
    pub frozen: bool,
    pub attacks_this_turn: u8,
    pub power_used: bool,
}

impl Hero {
    #[must_use]
    pub fn new(class: HeroClass, health: i32) -> Self {
        Self {
            class,
            health,
            max_health: health,
            armor: 0,
            frozen: false,
            attacks_this_turn: 0,
            power_used: false,
        }
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply damage, armor first. Returns health actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let absorbed = self.armor.min(amount);
        self.armor -= absorbed;
        let lost = amount - absorbed;
        self.health -= lost;
        lost
    }

    /// Restore health up to the maximum. Returns health actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let restored = amount.min(self.max_health - self.health).max(0);
        self.health += restored;
        restored
    }
}

/// An equipped weapon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: EntityId,
    pub card: CardId,
    pub attack: i32,
    pub durability: i32,
}

impl Weapon {
    #[must_use]
    pub fn from_card(id: EntityId, card: &CardDefinition) -> Option<Self> {
        let CardKind::Weapon { attack, durability } = card.kind else {
            return None;
        };
        Some(Self {
            id,
            card: card.id,
            attack,
            durability,
        })
    }
}

/// A face-down secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub id: EntityId,
    pub card: CardId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yeti() -> CardDefinition {
        CardDefinition::minion(CardId::new(1), "Yeti", 4, 4, 5).with_keyword(Keyword::Taunt)
    }

    #[test]
    fn test_minion_from_card() {
        let m = Minion::from_card(EntityId(10), PlayerId::new(0), &yeti()).unwrap();
        assert_eq!((m.attack, m.max_health, m.damage), (4, 5, 0));
        assert!(m.has(Keyword::Taunt));
        assert!(m.summoned_this_turn);

        let spell = CardDefinition::spell(CardId::new(2), "Spell", 1);
        assert!(Minion::from_card(EntityId(11), PlayerId::new(0), &spell).is_none());
    }

    #[test]
    fn test_silence_keeps_low_health() {
        let mut m = Minion::from_card(EntityId(10), PlayerId::new(0), &yeti()).unwrap();
        m.attack += 2;
        m.max_health += 2; // 6/7
        m.damage = 4; // 3 health left

        m.silence();
        assert_eq!(m.attack, 4);
        assert_eq!(m.max_health - m.damage, 3);
        assert!(!m.has(Keyword::Taunt));
        assert!(m.silenced);
    }

    #[test]
    fn test_silence_caps_buffed_health() {
        let mut m = Minion::from_card(EntityId(10), PlayerId::new(0), &yeti()).unwrap();
        m.max_health += 4; // 9 health, undamaged

        m.silence();
        assert_eq!(m.max_health, 5);
        assert_eq!(m.damage, 0);
    }

    #[test]
    fn test_hero_armor_absorbs_first() {
        let mut hero = Hero::new(HeroClass::Warrior, 30);
        hero.armor = 3;
        assert_eq!(hero.take_damage(5), 2);
        assert_eq!(hero.armor, 0);
        assert_eq!(hero.health, 28);

        assert_eq!(hero.heal(10), 2);
        assert_eq!(hero.health, 30);
    }

    #[test]
    fn test_weapon_from_card() {
        let axe = CardDefinition::weapon(CardId::new(3), "Axe", 2, 3, 2);
        let w = Weapon::from_card(EntityId(12), &axe).unwrap();
        assert_eq!((w.attack, w.durability), (3, 2));
    }
}
