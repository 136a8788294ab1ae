//! Trigger kinds and event matching.
//!
//! A `TriggerKind` says *when* an effect binding fires. Four kinds are
//! fired directly by the engine rather than matched against events:
//! `Battlecry` and `Cast` when a card is played, `Deathrattle` when its own
//! minion dies, `Reveal` when a secret goes off. The rest are "whenever X
//! happens" listeners matched here.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use crate::cards::{CardId, CardRegistry, CardType, TribeSet};
use crate::core::{EntityId, PlayerId};
use crate::effects::{Side, TargetFilter};

/// When an effect binding fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    /// When this minion (or weapon) is played from hand.
    Battlecry,
    /// When this spell or hero power resolves.
    Cast,
    /// When this minion dies.
    Deathrattle,
    /// When this secret is revealed.
    Reveal,
    /// Whenever a minion matching the filter is summoned.
    OnSummon(TargetFilter),
    /// Whenever this minion takes damage.
    OnDamageTaken,
    /// At the start of a turn of the given side.
    OnTurnStart(Side),
    /// At the end of a turn of the given side.
    OnTurnEnd(Side),
    /// Whenever a card of the given type is played by the given side.
    OnCardPlayed {
        side: Side,
        card_type: Option<CardType>,
    },
    /// Whenever a minion matching the filter dies.
    OnMinionDied(TargetFilter),
}

/// The on-board entity that owns a listening binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listener {
    pub entity: EntityId,
    pub owner: PlayerId,
    pub card: CardId,
}

impl TriggerKind {
    /// Whether this kind is fired directly instead of matched against events.
    #[must_use]
    pub fn is_direct(self) -> bool {
        matches!(
            self,
            TriggerKind::Battlecry | TriggerKind::Cast | TriggerKind::Deathrattle | TriggerKind::Reveal
        )
    }

    /// Does `event` fire this trigger for `listener`?
    #[must_use]
    pub fn matches(self, event: &GameEvent, listener: &Listener, registry: &CardRegistry) -> bool {
        let tribes_of = |card: CardId| {
            registry
                .get(card)
                .map_or(TribeSet::none(), |def| def.tribes)
        };

        match (self, event) {
            (
                TriggerKind::OnSummon(filter),
                GameEvent::MinionSummoned {
                    player,
                    minion,
                    card,
                },
            ) => filter.admits_minion(listener.owner, listener.entity, *player, *minion, tribes_of(*card)),
            (
                TriggerKind::OnMinionDied(filter),
                GameEvent::MinionDied {
                    player,
                    minion,
                    card,
                    ..
                },
            ) => filter.admits_minion(listener.owner, listener.entity, *player, *minion, tribes_of(*card)),
            (TriggerKind::OnDamageTaken, GameEvent::DamageDealt { target, amount, .. }) => {
                *target == listener.entity && *amount > 0
            }
            (TriggerKind::OnTurnStart(side), GameEvent::TurnStarted { player, .. })
            | (TriggerKind::OnTurnEnd(side), GameEvent::TurnEnded { player }) => {
                side.admits(listener.owner, *player)
            }
            (
                TriggerKind::OnCardPlayed { side, card_type },
                GameEvent::CardPlayed {
                    player,
                    card_type: played,
                    ..
                },
            ) => side.admits(listener.owner, *player) && card_type.map_or(true, |t| t == *played),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, Tribe};

    fn registry() -> CardRegistry {
        CardRegistry::new()
            .with_card(CardDefinition::minion(CardId::new(1), "Murloc", 1, 1, 1).with_tribe(Tribe::Murloc))
            .with_card(CardDefinition::minion(CardId::new(2), "Wolf", 1, 1, 1).with_tribe(Tribe::Beast))
            .with_card(
                CardDefinition::minion(CardId::new(3), "Amalgam", 1, 1, 1).with_tribes(TribeSet::all()),
            )
    }

    fn listener() -> Listener {
        Listener {
            entity: EntityId(10),
            owner: PlayerId::new(0),
            card: CardId::new(1),
        }
    }

    fn summoned(player: u8, minion: u32, card: u32) -> GameEvent {
        GameEvent::MinionSummoned {
            player: PlayerId::new(player),
            minion: EntityId(minion),
            card: CardId::new(card),
        }
    }

    #[test]
    fn test_on_summon_tribe_filter() {
        let reg = registry();
        let trigger = TriggerKind::OnSummon(
            TargetFilter::minions(Side::Any)
                .with_tribe(Tribe::Murloc)
                .excluding_source(),
        );

        assert!(trigger.matches(&summoned(1, 20, 1), &listener(), &reg));
        assert!(!trigger.matches(&summoned(1, 20, 2), &listener(), &reg));
        // All-tribe minions count as murlocs.
        assert!(trigger.matches(&summoned(0, 21, 3), &listener(), &reg));
        // Never for itself.
        assert!(!trigger.matches(&summoned(0, 10, 1), &listener(), &reg));
    }

    #[test]
    fn test_turn_end_side() {
        let reg = registry();
        let trigger = TriggerKind::OnTurnEnd(Side::Friendly);
        let mine = GameEvent::TurnEnded { player: PlayerId::new(0) };
        let theirs = GameEvent::TurnEnded { player: PlayerId::new(1) };
        assert!(trigger.matches(&mine, &listener(), &reg));
        assert!(!trigger.matches(&theirs, &listener(), &reg));
    }

    #[test]
    fn test_damage_taken_only_self() {
        let reg = registry();
        let hit = |target| GameEvent::DamageDealt {
            source: None,
            target: EntityId(target),
            amount: 2,
        };
        assert!(TriggerKind::OnDamageTaken.matches(&hit(10), &listener(), &reg));
        assert!(!TriggerKind::OnDamageTaken.matches(&hit(11), &listener(), &reg));
    }

    #[test]
    fn test_card_played_type() {
        let reg = registry();
        let trigger = TriggerKind::OnCardPlayed {
            side: Side::Friendly,
            card_type: Some(CardType::Spell),
        };
        let spell = GameEvent::CardPlayed {
            player: PlayerId::new(0),
            card: CardId::new(50),
            card_type: CardType::Spell,
            entity: None,
        };
        let minion = GameEvent::CardPlayed {
            player: PlayerId::new(0),
            card: CardId::new(1),
            card_type: CardType::Minion,
            entity: Some(EntityId(30)),
        };
        assert!(trigger.matches(&spell, &listener(), &reg));
        assert!(!trigger.matches(&minion, &listener(), &reg));
    }

    #[test]
    fn test_direct_kinds_never_match_events() {
        let reg = registry();
        assert!(TriggerKind::Battlecry.is_direct());
        assert!(!TriggerKind::Deathrattle.matches(&summoned(0, 20, 1), &listener(), &reg));
    }
}
