//! Secret watch predicates.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardType};
use crate::core::{EntityId, PlayerId};
use crate::triggers::GameEvent;

/// The class of opposing action a secret waits for.
///
/// Also the "trigger class" used by `SecretPolicy::OnePerTriggerClass`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecretWatch {
    /// The opponent plays a minion from hand.
    MinionPlayed,
    /// A minion is summoned onto the opponent's board by any means.
    MinionSummoned,
    /// The secret owner's hero is attacked.
    HeroAttacked,
    /// The opponent casts a spell.
    SpellCast,
    /// One of the owner's minions dies.
    FriendlyMinionDied,
}

/// What a matching event was about. Becomes the reveal effect's subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sighting {
    pub subject: Option<EntityId>,
    pub card: Option<CardId>,
}

impl SecretWatch {
    /// Check one event against the watch of a secret held by `owner`.
    #[must_use]
    pub fn matches(self, event: &GameEvent, owner: PlayerId) -> Option<Sighting> {
        match (self, event) {
            (
                SecretWatch::MinionPlayed,
                GameEvent::CardPlayed {
                    player,
                    card,
                    card_type: CardType::Minion,
                    entity,
                },
            ) if *player != owner => Some(Sighting {
                subject: *entity,
                card: Some(*card),
            }),
            (SecretWatch::MinionSummoned, GameEvent::MinionSummoned { player, minion, card })
                if *player != owner =>
            {
                Some(Sighting {
                    subject: Some(*minion),
                    card: Some(*card),
                })
            }
            (SecretWatch::HeroAttacked, GameEvent::Attacked { attacker, defender })
                if *defender == EntityId::hero(owner) =>
            {
                Some(Sighting {
                    subject: Some(*attacker),
                    card: None,
                })
            }
            (
                SecretWatch::SpellCast,
                GameEvent::CardPlayed {
                    player,
                    card,
                    card_type: CardType::Spell | CardType::Secret,
                    ..
                },
            ) if *player != owner => Some(Sighting {
                subject: None,
                card: Some(*card),
            }),
            (SecretWatch::FriendlyMinionDied, GameEvent::MinionDied { player, minion, card, .. })
                if *player == owner =>
            {
                Some(Sighting {
                    subject: Some(*minion),
                    card: Some(*card),
                })
            }
            _ => None,
        }
    }
}
