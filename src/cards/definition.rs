//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable template of a card: cost, kind,
//! base stats, tribes, keywords and the ordered list of effect bindings that
//! express everything the card does. Live, mutable state (damage taken,
//! buffs, position) lives on the instances in `cards::instance`.

use serde::{Deserialize, Serialize};

use super::attributes::{Keyword, Keywords, Tribe, TribeSet};
use super::catalog;
use crate::effects::{Aura, EffectBinding, TargetFilter, TargetSelector};
use crate::secrets::SecretWatch;
use crate::triggers::TriggerKind;

/// Unique identifier for a card definition.
///
/// Identifies the card type ("Chillwind Yeti"), not a copy of it in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Placeholder for a card the viewer is not allowed to see.
    ///
    /// Never registered, so every registry lookup of it fails.
    pub const UNKNOWN: CardId = CardId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == u32::MAX
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            write!(f, "Card(?)")
        } else {
            write!(f, "Card({})", self.0)
        }
    }
}

/// Card rarity. Only legendaries change deck rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Free,
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Coarse card type, used by trigger filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Minion,
    Spell,
    Weapon,
    Secret,
    HeroPower,
}

/// What the card is, with its type-specific base numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Minion { attack: i32, health: i32 },
    Spell,
    Weapon { attack: i32, durability: i32 },
    Secret { watch: SecretWatch },
    HeroPower,
}

impl CardKind {
    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self {
            CardKind::Minion { .. } => CardType::Minion,
            CardKind::Spell => CardType::Spell,
            CardKind::Weapon { .. } => CardType::Weapon,
            CardKind::Secret { .. } => CardType::Secret,
            CardKind::HeroPower => CardType::HeroPower,
        }
    }
}

/// Hero class. Determines the hero power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    Mage,
    Warrior,
    Hunter,
    Paladin,
    Priest,
    Warlock,
    Rogue,
}

impl HeroClass {
    pub const ALL: [HeroClass; 7] = [
        HeroClass::Mage,
        HeroClass::Warrior,
        HeroClass::Hunter,
        HeroClass::Paladin,
        HeroClass::Priest,
        HeroClass::Warlock,
        HeroClass::Rogue,
    ];

    /// The hero power card for this class.
    #[must_use]
    pub const fn hero_power(self) -> CardId {
        match self {
            HeroClass::Mage => catalog::FIREBLAST,
            HeroClass::Warrior => catalog::ARMOR_UP,
            HeroClass::Hunter => catalog::STEADY_SHOT,
            HeroClass::Paladin => catalog::REINFORCE,
            HeroClass::Priest => catalog::LESSER_HEAL,
            HeroClass::Warlock => catalog::LIFE_TAP,
            HeroClass::Rogue => catalog::DAGGER_MASTERY,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use battler_core::cards::{CardDefinition, CardId, Keyword, Tribe};
///
/// let wolf = CardDefinition::minion(CardId::new(900), "Timber Wolf", 1, 1, 1)
///     .with_tribe(Tribe::Beast)
///     .with_keyword(Keyword::Taunt);
///
/// assert_eq!(wolf.base_stats(), Some((1, 1)));
/// assert!(wolf.tribes.contains(Tribe::Beast));
/// assert!(wolf.keywords.has(Keyword::Taunt));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub cost: u8,
    pub kind: CardKind,
    pub tribes: TribeSet,
    pub keywords: Keywords,
    /// Extra damage added to the owner's spells while this minion is on board.
    pub spell_damage: i32,
    pub rarity: Rarity,
    /// Tokens and hero powers are not collectible and cannot go in a deck.
    pub collectible: bool,
    /// Effect bindings, in the order they resolve.
    pub effects: Vec<EffectBinding>,
    /// Continuous stat modifiers projected while the minion is on board.
    pub auras: Vec<Aura>,
    /// When set, a divine shield that absorbs this card's freezing hit also
    /// blocks the freeze.
    pub freeze_blocked_by_shield: bool,
}

impl CardDefinition {
    fn base(id: CardId, name: impl Into<String>, cost: u8, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind,
            tribes: TribeSet::none(),
            keywords: Keywords::empty(),
            spell_damage: 0,
            rarity: Rarity::Common,
            collectible: true,
            effects: Vec::new(),
            auras: Vec::new(),
            freeze_blocked_by_shield: false,
        }
    }

    #[must_use]
    pub fn minion(id: CardId, name: impl Into<String>, cost: u8, attack: i32, health: i32) -> Self {
        Self::base(id, name, cost, CardKind::Minion { attack, health })
    }

    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: u8) -> Self {
        Self::base(id, name, cost, CardKind::Spell)
    }

    #[must_use]
    pub fn weapon(
        id: CardId,
        name: impl Into<String>,
        cost: u8,
        attack: i32,
        durability: i32,
    ) -> Self {
        Self::base(id, name, cost, CardKind::Weapon { attack, durability })
    }

    #[must_use]
    pub fn secret(id: CardId, name: impl Into<String>, cost: u8, watch: SecretWatch) -> Self {
        Self::base(id, name, cost, CardKind::Secret { watch })
    }

    #[must_use]
    pub fn hero_power(id: CardId, name: impl Into<String>, cost: u8) -> Self {
        Self::base(id, name, cost, CardKind::HeroPower).uncollectible()
    }

    #[must_use]
    pub fn with_tribe(mut self, tribe: Tribe) -> Self {
        self.tribes = self.tribes.with(tribe);
        self
    }

    #[must_use]
    pub fn with_tribes(mut self, tribes: TribeSet) -> Self {
        self.tribes = tribes;
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.insert(keyword);
        self
    }

    #[must_use]
    pub fn with_spell_damage(mut self, amount: i32) -> Self {
        self.spell_damage = amount;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, binding: EffectBinding) -> Self {
        self.effects.push(binding);
        self
    }

    #[must_use]
    pub fn with_aura(mut self, aura: Aura) -> Self {
        self.auras.push(aura);
        self
    }

    #[must_use]
    pub fn legendary(mut self) -> Self {
        self.rarity = Rarity::Legendary;
        self
    }

    #[must_use]
    pub fn uncollectible(mut self) -> Self {
        self.collectible = false;
        self
    }

    #[must_use]
    pub fn freeze_blocked_by_shield(mut self) -> Self {
        self.freeze_blocked_by_shield = true;
        self
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        matches!(self.kind, CardKind::Minion { .. })
    }

    /// Base attack and health, for minions.
    #[must_use]
    pub fn base_stats(&self) -> Option<(i32, i32)> {
        match self.kind {
            CardKind::Minion { attack, health } => Some((attack, health)),
            _ => None,
        }
    }

    /// What a secret card watches for.
    #[must_use]
    pub fn secret_watch(&self) -> Option<SecretWatch> {
        match self.kind {
            CardKind::Secret { watch } => Some(watch),
            _ => None,
        }
    }

    /// Bindings with the given trigger, in declaration order.
    pub fn bindings_for(&self, trigger: TriggerKind) -> impl Iterator<Item = &EffectBinding> {
        self.effects.iter().filter(move |b| b.trigger == trigger)
    }

    /// The bindings that run when the card is played (battlecry for
    /// minions, the cast for spells and hero powers).
    pub fn play_bindings(&self) -> impl Iterator<Item = &EffectBinding> {
        let trigger = match self.kind {
            CardKind::Minion { .. } | CardKind::Weapon { .. } => TriggerKind::Battlecry,
            _ => TriggerKind::Cast,
        };
        self.bindings_for(trigger)
    }

    /// Filter of the target the player must choose on play, if any.
    #[must_use]
    pub fn required_target(&self) -> Option<TargetFilter> {
        self.play_bindings().find_map(|b| match b.selector {
            TargetSelector::Chosen(filter) => Some(filter),
            _ => None,
        })
    }
}
