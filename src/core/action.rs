//! Player actions.
//!
//! An action is always taken by the active player, so it carries no player
//! field. The four verbs:
//! - `PlayCard`: a hand index, an optional chosen target and, for minions,
//!   an optional board insertion position (defaults to the right end)
//! - `Attack`: attacker and defender entity ids
//! - `UseHeroPower`: an optional chosen target
//! - `EndTurn`

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;

/// A game action.
///
/// ## Example
///
/// ```
/// use battler_core::core::{Action, EntityId};
///
/// let drop_left = Action::play(0).at_position(0);
/// let bolt_face = Action::play(2).with_target(EntityId(1));
/// let trade = Action::attack(EntityId(5), EntityId(9));
///
/// assert!(drop_left.is_play());
/// assert_eq!(bolt_face.target(), Some(EntityId(1)));
/// assert!(!trade.is_end_turn());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    PlayCard {
        hand_index: usize,
        target: Option<EntityId>,
        position: Option<usize>,
    },
    Attack {
        attacker: EntityId,
        defender: EntityId,
    },
    UseHeroPower {
        target: Option<EntityId>,
    },
    EndTurn,
}

impl Action {
    /// Play the card at `hand_index` with no target, at the default position.
    #[must_use]
    pub fn play(hand_index: usize) -> Self {
        Action::PlayCard {
            hand_index,
            target: None,
            position: None,
        }
    }

    /// Attack `defender` with `attacker`.
    #[must_use]
    pub fn attack(attacker: EntityId, defender: EntityId) -> Self {
        Action::Attack { attacker, defender }
    }

    /// Use the hero power with no target.
    #[must_use]
    pub fn hero_power() -> Self {
        Action::UseHeroPower { target: None }
    }

    /// Set the chosen target (play card or hero power).
    #[must_use]
    pub fn with_target(mut self, entity: EntityId) -> Self {
        match &mut self {
            Action::PlayCard { target, .. } | Action::UseHeroPower { target } => {
                *target = Some(entity);
            }
            Action::Attack { .. } | Action::EndTurn => {}
        }
        self
    }

    /// Set the board insertion position (play card only).
    #[must_use]
    pub fn at_position(mut self, index: usize) -> Self {
        if let Action::PlayCard { position, .. } = &mut self {
            *position = Some(index);
        }
        self
    }

    /// Chosen target, if any.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        match self {
            Action::PlayCard { target, .. } | Action::UseHeroPower { target } => *target,
            Action::Attack { defender, .. } => Some(*defender),
            Action::EndTurn => None,
        }
    }

    #[must_use]
    pub fn is_play(&self) -> bool {
        matches!(self, Action::PlayCard { .. })
    }

    #[must_use]
    pub fn is_end_turn(&self) -> bool {
        matches!(self, Action::EndTurn)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlayCard {
                hand_index,
                target,
                position,
            } => {
                write!(f, "play hand[{hand_index}]")?;
                if let Some(t) = target {
                    write!(f, " -> {t}")?;
                }
                if let Some(p) = position {
                    write!(f, " @{p}")?;
                }
                Ok(())
            }
            Action::Attack { attacker, defender } => write!(f, "{attacker} attacks {defender}"),
            Action::UseHeroPower { target: Some(t) } => write!(f, "hero power -> {t}"),
            Action::UseHeroPower { target: None } => write!(f, "hero power"),
            Action::EndTurn => write!(f, "end turn"),
        }
    }
}

/// A committed action with metadata, kept in the game history for replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the whole game.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_builders() {
        let action = Action::play(3).with_target(EntityId(7)).at_position(1);
        assert_eq!(
            action,
            Action::PlayCard {
                hand_index: 3,
                target: Some(EntityId(7)),
                position: Some(1),
            }
        );
    }

    #[test]
    fn test_builders_ignore_inapplicable_fields() {
        assert_eq!(Action::EndTurn.with_target(EntityId(1)), Action::EndTurn);
        assert_eq!(Action::hero_power().at_position(2), Action::hero_power());
    }

    #[test]
    fn test_target() {
        assert_eq!(Action::attack(EntityId(4), EntityId(1)).target(), Some(EntityId(1)));
        assert_eq!(Action::hero_power().target(), None);
        assert_eq!(Action::EndTurn.target(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::play(0).at_position(2).to_string(), "play hand[0] @2");
        assert_eq!(
            Action::attack(EntityId(5), EntityId(1)).to_string(),
            "Entity(5) attacks Hero(1)"
        );
        assert_eq!(Action::EndTurn.to_string(), "end turn");
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(PlayerId::new(1), Action::play(2).with_target(EntityId(0)), 4, 11);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
