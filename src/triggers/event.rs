//! Game event types.
//!
//! Every state change the engine makes is reported as a `GameEvent`. The
//! same stream serves three consumers: the effect engine matches triggers
//! against it, the secret resolver scans it after each action, and
//! collaborators (renderers, loggers) receive it from `submit_action`.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardType};
use crate::core::{EntityId, PlayerId};
use crate::rules::GameResult;

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MulliganDone {
        player: PlayerId,
        replaced: usize,
    },
    TurnStarted {
        player: PlayerId,
        turn: u32,
    },
    TurnEnded {
        player: PlayerId,
    },
    CardDrawn {
        player: PlayerId,
        card: CardId,
    },
    /// Drawn with a full hand; the card went straight to the graveyard.
    CardBurned {
        player: PlayerId,
        card: CardId,
    },
    FatigueDamage {
        player: PlayerId,
        amount: i32,
    },
    /// A card left the hand. `entity` is the minion, weapon or secret it became.
    CardPlayed {
        player: PlayerId,
        card: CardId,
        card_type: CardType,
        entity: Option<EntityId>,
    },
    MinionSummoned {
        player: PlayerId,
        minion: EntityId,
        card: CardId,
    },
    WeaponEquipped {
        player: PlayerId,
        weapon: EntityId,
        card: CardId,
    },
    WeaponDestroyed {
        player: PlayerId,
        weapon: EntityId,
        card: CardId,
    },
    SecretPlayed {
        player: PlayerId,
        secret: EntityId,
    },
    SecretRevealed {
        player: PlayerId,
        secret: EntityId,
        card: CardId,
    },
    Attacked {
        attacker: EntityId,
        defender: EntityId,
    },
    DamageDealt {
        source: Option<EntityId>,
        target: EntityId,
        amount: i32,
    },
    DivineShieldLost {
        target: EntityId,
    },
    Healed {
        target: EntityId,
        amount: i32,
    },
    ArmorGained {
        player: PlayerId,
        amount: i32,
    },
    ManaGained {
        player: PlayerId,
        amount: u8,
    },
    Frozen {
        target: EntityId,
    },
    Silenced {
        target: EntityId,
    },
    Buffed {
        target: EntityId,
        attack: i32,
        health: i32,
    },
    KeywordGained {
        target: EntityId,
        keyword: crate::cards::Keyword,
    },
    /// A minion was removed by the death sweep. `position` is where it
    /// stood among the survivors, i.e. where deathrattle summons go.
    MinionDied {
        player: PlayerId,
        minion: EntityId,
        card: CardId,
        position: usize,
        silenced: bool,
    },
    MinionDestroyed {
        target: EntityId,
    },
    HeroPowerUsed {
        player: PlayerId,
        card: CardId,
    },
    /// A triggered effect found no legal target and was skipped.
    EffectFizzled {
        card: CardId,
        source: Option<EntityId>,
    },
    GameOver {
        result: GameResult,
    },
}

impl GameEvent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::MulliganDone { .. } => "MulliganDone",
            GameEvent::TurnStarted { .. } => "TurnStarted",
            GameEvent::TurnEnded { .. } => "TurnEnded",
            GameEvent::CardDrawn { .. } => "CardDrawn",
            GameEvent::CardBurned { .. } => "CardBurned",
            GameEvent::FatigueDamage { .. } => "FatigueDamage",
            GameEvent::CardPlayed { .. } => "CardPlayed",
            GameEvent::MinionSummoned { .. } => "MinionSummoned",
            GameEvent::WeaponEquipped { .. } => "WeaponEquipped",
            GameEvent::WeaponDestroyed { .. } => "WeaponDestroyed",
            GameEvent::SecretPlayed { .. } => "SecretPlayed",
            GameEvent::SecretRevealed { .. } => "SecretRevealed",
            GameEvent::Attacked { .. } => "Attacked",
            GameEvent::DamageDealt { .. } => "DamageDealt",
            GameEvent::DivineShieldLost { .. } => "DivineShieldLost",
            GameEvent::Healed { .. } => "Healed",
            GameEvent::ArmorGained { .. } => "ArmorGained",
            GameEvent::ManaGained { .. } => "ManaGained",
            GameEvent::Frozen { .. } => "Frozen",
            GameEvent::Silenced { .. } => "Silenced",
            GameEvent::Buffed { .. } => "Buffed",
            GameEvent::KeywordGained { .. } => "KeywordGained",
            GameEvent::MinionDied { .. } => "MinionDied",
            GameEvent::MinionDestroyed { .. } => "MinionDestroyed",
            GameEvent::HeroPowerUsed { .. } => "HeroPowerUsed",
            GameEvent::EffectFizzled { .. } => "EffectFizzled",
            GameEvent::GameOver { .. } => "GameOver",
        }
    }

    /// The entity the event is about, if it is about one.
    #[must_use]
    pub fn subject(&self) -> Option<EntityId> {
        match self {
            GameEvent::CardPlayed { entity, .. } => *entity,
            GameEvent::MinionSummoned { minion, .. } | GameEvent::MinionDied { minion, .. } => {
                Some(*minion)
            }
            GameEvent::WeaponEquipped { weapon, .. } | GameEvent::WeaponDestroyed { weapon, .. } => {
                Some(*weapon)
            }
            GameEvent::SecretPlayed { secret, .. } | GameEvent::SecretRevealed { secret, .. } => {
                Some(*secret)
            }
            GameEvent::Attacked { defender, .. } => Some(*defender),
            GameEvent::DamageDealt { target, .. }
            | GameEvent::DivineShieldLost { target }
            | GameEvent::Healed { target, .. }
            | GameEvent::Frozen { target }
            | GameEvent::Silenced { target }
            | GameEvent::Buffed { target, .. }
            | GameEvent::KeywordGained { target, .. }
            | GameEvent::MinionDestroyed { target } => Some(*target),
            _ => None,
        }
    }

    /// The card the event is about, when the event names one.
    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        match self {
            GameEvent::CardDrawn { card, .. }
            | GameEvent::CardBurned { card, .. }
            | GameEvent::CardPlayed { card, .. }
            | GameEvent::MinionSummoned { card, .. }
            | GameEvent::WeaponEquipped { card, .. }
            | GameEvent::WeaponDestroyed { card, .. }
            | GameEvent::SecretRevealed { card, .. }
            | GameEvent::MinionDied { card, .. }
            | GameEvent::HeroPowerUsed { card, .. }
            | GameEvent::EffectFizzled { card, .. } => Some(*card),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::DamageDealt { source, target, amount } => match source {
                Some(s) => write!(f, "{s} deals {amount} to {target}"),
                None => write!(f, "{target} takes {amount}"),
            },
            GameEvent::MinionDied { minion, position, .. } => {
                write!(f, "{minion} died at position {position}")
            }
            GameEvent::TurnStarted { player, turn } => write!(f, "{player} starts turn {turn}"),
            other => match (other.subject(), other.card()) {
                (Some(e), _) => write!(f, "{} {e}", other.name()),
                (None, Some(c)) => write!(f, "{} {c}", other.name()),
                (None, None) => write!(f, "{}", other.name()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_and_card() {
        let died = GameEvent::MinionDied {
            player: PlayerId::new(0),
            minion: EntityId(9),
            card: CardId::new(3),
            position: 1,
            silenced: false,
        };
        assert_eq!(died.subject(), Some(EntityId(9)));
        assert_eq!(died.card(), Some(CardId::new(3)));
        assert_eq!(died.name(), "MinionDied");

        let ended = GameEvent::TurnEnded { player: PlayerId::new(1) };
        assert_eq!(ended.subject(), None);
        assert_eq!(ended.card(), None);
    }

    #[test]
    fn test_display() {
        let dmg = GameEvent::DamageDealt {
            source: Some(EntityId(5)),
            target: EntityId(1),
            amount: 3,
        };
        assert_eq!(dmg.to_string(), "Entity(5) deals 3 to Hero(1)");
        assert_eq!(
            GameEvent::Frozen { target: EntityId(7) }.to_string(),
            "Frozen Entity(7)"
        );
    }

    #[test]
    fn test_serialization() {
        let event = GameEvent::GameOver {
            result: GameResult::Winner(PlayerId::new(1)),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
