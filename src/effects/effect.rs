//! Effect bindings.
//!
//! A card's behaviour is a list of `EffectBinding`s: *when* (a trigger
//! kind), *who* (a target selector) and *what* (an action). The engine in
//! `effects::engine` interprets them; cards never carry code.

use serde::{Deserialize, Serialize};

use super::targeting::TargetSelector;
use crate::cards::{CardId, Keyword};
use crate::triggers::TriggerKind;

/// What an effect does to each of its targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectAction {
    /// Deal damage. Spells add their controller's spell damage.
    Damage(i32),
    /// Restore health, up to the maximum.
    Heal(i32),
    /// Permanent stat change on a minion.
    Buff { attack: i32, health: i32 },
    Freeze,
    Silence,
    GrantKeyword(Keyword),
    /// Mark a minion for the next death sweep.
    Destroy,
    /// Draw cards for the target's owner.
    Draw(u8),
    GainArmor(i32),
    /// Temporary mana, capped one above the crystal count.
    GainMana(u8),
    /// Summon minions for the target's owner.
    Summon { card: CardId, count: u8 },
    /// Summon a fresh copy of the event subject's card for the target's
    /// owner, optionally with fixed health.
    SummonCopy { health: Option<i32> },
    /// Equip a weapon for the target's owner.
    Equip(CardId),
}

impl EffectAction {
    /// Actions that act on a player rather than a character.
    #[must_use]
    pub fn is_player_level(&self) -> bool {
        matches!(
            self,
            EffectAction::Draw(_)
                | EffectAction::GainArmor(_)
                | EffectAction::GainMana(_)
                | EffectAction::Summon { .. }
                | EffectAction::SummonCopy { .. }
                | EffectAction::Equip(_)
        )
    }
}

/// Trigger plus selector plus action.
///
/// ## Example
///
/// ```
/// use battler_core::effects::{EffectAction, EffectBinding, Side, TargetFilter, TargetSelector};
///
/// // Arcane Missiles: three 1-damage hits on random enemies.
/// let missiles = EffectBinding::cast(
///     TargetSelector::Random(TargetFilter::characters(Side::Enemy)),
///     EffectAction::Damage(1),
/// )
/// .repeated(3);
///
/// assert_eq!(missiles.repeat, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectBinding {
    pub trigger: TriggerKind,
    pub selector: TargetSelector,
    pub action: EffectAction,
    /// Times the action is applied, re-resolving the selector each time.
    pub repeat: u8,
}

impl EffectBinding {
    #[must_use]
    pub fn on(trigger: TriggerKind, selector: TargetSelector, action: EffectAction) -> Self {
        Self {
            trigger,
            selector,
            action,
            repeat: 1,
        }
    }

    #[must_use]
    pub fn battlecry(selector: TargetSelector, action: EffectAction) -> Self {
        Self::on(TriggerKind::Battlecry, selector, action)
    }

    #[must_use]
    pub fn cast(selector: TargetSelector, action: EffectAction) -> Self {
        Self::on(TriggerKind::Cast, selector, action)
    }

    #[must_use]
    pub fn deathrattle(selector: TargetSelector, action: EffectAction) -> Self {
        Self::on(TriggerKind::Deathrattle, selector, action)
    }

    #[must_use]
    pub fn reveal(selector: TargetSelector, action: EffectAction) -> Self {
        Self::on(TriggerKind::Reveal, selector, action)
    }

    #[must_use]
    pub fn repeated(mut self, times: u8) -> Self {
        self.repeat = times.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Side, TargetFilter};

    #[test]
    fn test_constructors_set_trigger() {
        let b = EffectBinding::deathrattle(TargetSelector::EnemyHero, EffectAction::Damage(2));
        assert_eq!(b.trigger, TriggerKind::Deathrattle);
        assert_eq!(b.repeat, 1);

        let r = EffectBinding::reveal(TargetSelector::Subject, EffectAction::Damage(4));
        assert_eq!(r.trigger, TriggerKind::Reveal);
    }

    #[test]
    fn test_repeat_at_least_once() {
        let b = EffectBinding::cast(
            TargetSelector::Random(TargetFilter::characters(Side::Enemy)),
            EffectAction::Damage(1),
        )
        .repeated(0);
        assert_eq!(b.repeat, 1);
    }

    #[test]
    fn test_player_level_actions() {
        assert!(EffectAction::Draw(1).is_player_level());
        assert!(EffectAction::Equip(CardId::new(3)).is_player_level());
        assert!(!EffectAction::Damage(1).is_player_level());
        assert!(!EffectAction::Freeze.is_player_level());
    }
}
