//! Continuous stat modifiers.
//!
//! Auras are never applied once and undone later. Every query of a
//! minion's effective stats walks the current board, asks each non-silenced
//! aura source whether it covers the queried position, and sums the
//! contributions. When a source dies or is silenced its contribution simply
//! stops appearing in the sum.
//!
//! Health uses a damage counter: effective health is effective maximum
//! health minus damage taken, so losing a +1 health aura lowers current
//! health by exactly 1.

use serde::{Deserialize, Serialize};

use crate::cards::{CardRegistry, Tribe, TribeSet};
use crate::core::{EntityId, GameState, PlayerId};
use crate::zones::Board;

/// Which friendly minions an aura covers, relative to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraScope {
    /// The minions immediately left and right of the source.
    Adjacent,
    /// Every other friendly minion.
    OtherFriendly,
    /// Every other friendly minion of the tribe.
    FriendlyTribe(Tribe),
    /// The source itself, while it is damaged (enrage).
    SelfWhileDamaged,
}

/// A stat aura carried by a minion card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aura {
    pub scope: AuraScope,
    pub attack: i32,
    pub health: i32,
}

impl Aura {
    #[must_use]
    pub const fn adjacent(attack: i32, health: i32) -> Self {
        Self {
            scope: AuraScope::Adjacent,
            attack,
            health,
        }
    }

    #[must_use]
    pub const fn other_friendly(attack: i32, health: i32) -> Self {
        Self {
            scope: AuraScope::OtherFriendly,
            attack,
            health,
        }
    }

    #[must_use]
    pub const fn tribe(tribe: Tribe, attack: i32, health: i32) -> Self {
        Self {
            scope: AuraScope::FriendlyTribe(tribe),
            attack,
            health,
        }
    }

    #[must_use]
    pub const fn enrage(attack: i32) -> Self {
        Self {
            scope: AuraScope::SelfWhileDamaged,
            attack,
            health: 0,
        }
    }

    fn covers(&self, source_pos: usize, target_pos: usize, target_tribes: TribeSet, damaged: bool) -> bool {
        match self.scope {
            AuraScope::Adjacent => Board::adjacent(source_pos, target_pos),
            AuraScope::OtherFriendly => source_pos != target_pos,
            AuraScope::FriendlyTribe(tribe) => {
                source_pos != target_pos && target_tribes.contains(tribe)
            }
            AuraScope::SelfWhileDamaged => source_pos == target_pos && damaged,
        }
    }
}

/// Effective stats of a minion at a moment in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: i32,
    pub max_health: i32,
    pub health: i32,
}

/// Effective stats of the minion at `position` on `board`.
#[must_use]
pub fn minion_stats(board: &Board, position: usize, registry: &CardRegistry) -> Option<Stats> {
    let target = board.get(position)?;
    let tribes = registry
        .get(target.card)
        .map_or(TribeSet::none(), |def| def.tribes);

    let mut attack = target.attack;
    let mut max_health = target.max_health;

    for (source_pos, source) in board.iter().enumerate() {
        if source.silenced {
            continue;
        }
        let Some(def) = registry.get(source.card) else {
            continue;
        };
        for aura in &def.auras {
            if aura.covers(source_pos, position, tribes, target.is_damaged()) {
                attack += aura.attack;
                max_health += aura.health;
            }
        }
    }

    Some(Stats {
        attack: attack.max(0),
        max_health,
        health: max_health - target.damage,
    })
}

/// Effective stats of a minion anywhere on the table.
#[must_use]
pub fn stats_of(state: &GameState, registry: &CardRegistry, id: EntityId) -> Option<Stats> {
    let (owner, position) = state.locate_minion(id)?;
    minion_stats(&state.player(owner).board, position, registry)
}

/// Attack a character would strike with right now. Heroes use their weapon.
#[must_use]
pub fn attack_of(state: &GameState, registry: &CardRegistry, id: EntityId) -> i32 {
    match id.as_hero() {
        Some(player) => state
            .player(player)
            .weapon
            .as_ref()
            .map_or(0, |w| w.attack.max(0)),
        None => stats_of(state, registry, id).map_or(0, |s| s.attack),
    }
}

/// Total spell damage bonus on a player's board.
#[must_use]
pub fn spell_damage(state: &GameState, player: PlayerId) -> i32 {
    state
        .player(player)
        .board
        .iter()
        .filter(|m| !m.silenced)
        .map(|m| m.spell_damage)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, HeroClass, Minion};

    const WISP: CardId = CardId(1);
    const ALPHA: CardId = CardId(2);
    const LEADER: CardId = CardId(3);
    const ORACLE: CardId = CardId(4);
    const MURLOC: CardId = CardId(5);
    const BERSERKER: CardId = CardId(6);

    fn registry() -> CardRegistry {
        CardRegistry::new()
            .with_card(CardDefinition::minion(WISP, "Wisp", 0, 1, 1))
            .with_card(CardDefinition::minion(ALPHA, "Alpha", 2, 2, 2).with_aura(Aura::adjacent(1, 1)))
            .with_card(CardDefinition::minion(LEADER, "Leader", 3, 2, 2).with_aura(Aura::other_friendly(1, 0)))
            .with_card(
                CardDefinition::minion(ORACLE, "Oracle", 1, 1, 1)
                    .with_tribe(Tribe::Murloc)
                    .with_aura(Aura::tribe(Tribe::Murloc, 1, 0)),
            )
            .with_card(CardDefinition::minion(MURLOC, "Murloc", 1, 2, 1).with_tribe(Tribe::Murloc))
            .with_card(CardDefinition::minion(BERSERKER, "Berserker", 2, 2, 3).with_aura(Aura::enrage(3)))
    }

    fn board(registry: &CardRegistry, cards: &[CardId]) -> Board {
        let mut board = Board::new();
        for (i, &card) in cards.iter().enumerate() {
            let def = registry.get(card).unwrap();
            board.push(Minion::from_card(EntityId(10 + i as u32), PlayerId::new(0), def).unwrap());
        }
        board
    }

    #[test]
    fn test_adjacent_aura_covers_neighbors_only() {
        let reg = registry();
        let b = board(&reg, &[WISP, ALPHA, WISP, WISP]);
        assert_eq!(minion_stats(&b, 0, &reg).unwrap().attack, 2);
        assert_eq!(minion_stats(&b, 2, &reg).unwrap().health, 2);
        assert_eq!(minion_stats(&b, 3, &reg).unwrap().attack, 1);
        // The source does not buff itself.
        assert_eq!(minion_stats(&b, 1, &reg).unwrap().attack, 2);
    }

    #[test]
    fn test_removing_source_drops_buff_immediately() {
        let reg = registry();
        let mut b = board(&reg, &[ALPHA, WISP]);
        assert_eq!(
            minion_stats(&b, 1, &reg).unwrap(),
            Stats { attack: 2, max_health: 2, health: 2 }
        );
        b.remove(EntityId(10));
        assert_eq!(
            minion_stats(&b, 0, &reg).unwrap(),
            Stats { attack: 1, max_health: 1, health: 1 }
        );
    }

    #[test]
    fn test_damage_counter_under_aura() {
        let reg = registry();
        let mut b = board(&reg, &[ALPHA, WISP]);
        b.find_mut(EntityId(11)).unwrap().damage = 1;
        assert_eq!(minion_stats(&b, 1, &reg).unwrap().health, 1);
        b.remove(EntityId(10));
        // 1/1 with 1 damage: now lethal, left for the death sweep.
        assert_eq!(minion_stats(&b, 0, &reg).unwrap().health, 0);
    }

    #[test]
    fn test_tribe_aura_and_silence() {
        let reg = registry();
        let mut b = board(&reg, &[ORACLE, MURLOC, LEADER]);
        // Murloc: +1 from Oracle, +1 from Leader.
        assert_eq!(minion_stats(&b, 1, &reg).unwrap().attack, 4);
        // Oracle itself: only the Leader.
        assert_eq!(minion_stats(&b, 0, &reg).unwrap().attack, 2);

        b.find_mut(EntityId(10)).unwrap().silence();
        assert_eq!(minion_stats(&b, 1, &reg).unwrap().attack, 3);
    }

    #[test]
    fn test_enrage() {
        let reg = registry();
        let mut b = board(&reg, &[BERSERKER]);
        assert_eq!(minion_stats(&b, 0, &reg).unwrap().attack, 2);
        b.find_mut(EntityId(10)).unwrap().damage = 1;
        assert_eq!(minion_stats(&b, 0, &reg).unwrap().attack, 5);
    }

    #[test]
    fn test_hero_attack_uses_weapon() {
        let reg = registry();
        let mut state = GameState::new(0, [HeroClass::Warrior, HeroClass::Mage], 30);
        let p = PlayerId::new(0);
        assert_eq!(attack_of(&state, &reg, EntityId::hero(p)), 0);
        state.player_mut(p).weapon = Some(crate::cards::Weapon {
            id: EntityId(50),
            card: CardId(77),
            attack: 3,
            durability: 2,
        });
        assert_eq!(attack_of(&state, &reg, EntityId::hero(p)), 3);
    }
}
