//! The standard card pool.
//!
//! A starter set that exercises every mechanic the engine supports. Card
//! ids are grouped by range: collectible minions from 1, spells from 100,
//! weapons from 200, secrets from 300, tokens from 400 and hero powers
//! from 500.

use super::attributes::{Keyword, Tribe, TribeSet};
use super::definition::{CardDefinition, CardId, CardType};
use super::registry::CardRegistry;
use crate::effects::{Aura, EffectAction, EffectBinding, Side, TargetFilter, TargetSelector};
use crate::secrets::SecretWatch;
use crate::triggers::TriggerKind;

// Minions
pub const RIVER_CROCOLISK: CardId = CardId(1);
pub const CHILLWIND_YETI: CardId = CardId(2);
pub const BOULDERFIST_OGRE: CardId = CardId(3);
pub const SHIELDBEARER: CardId = CardId(4);
pub const WOLFRIDER: CardId = CardId(5);
pub const ARENA_RUSHER: CardId = CardId(6);
pub const ARGENT_SQUIRE: CardId = CardId(7);
pub const WATER_ELEMENTAL: CardId = CardId(8);
pub const WORGEN_INFILTRATOR: CardId = CardId(9);
pub const THRALLMAR_FARSEER: CardId = CardId(10);
pub const KOBOLD_GEOMANCER: CardId = CardId(11);
pub const AMANI_BERSERKER: CardId = CardId(12);
pub const KOBOLD_PINGER: CardId = CardId(13);
pub const ARATHI_WEAPONSMITH: CardId = CardId(14);
pub const IRONBEAK_OWL: CardId = CardId(15);
pub const LEPER_GNOME: CardId = CardId(16);
pub const HAUNTED_CREEPER: CardId = CardId(17);
pub const HARVEST_GOLEM: CardId = CardId(18);
pub const DIRE_WOLF_ALPHA: CardId = CardId(19);
pub const DEFENDER_OF_THE_LINE: CardId = CardId(20);
pub const RAID_LEADER: CardId = CardId(21);
pub const STORMWIND_CHAMPION: CardId = CardId(22);
pub const MURLOC_TIDECALLER: CardId = CardId(23);
pub const GRIMSCALE_ORACLE: CardId = CardId(24);
pub const ACOLYTE_OF_PAIN: CardId = CardId(25);
pub const IMP_MASTER: CardId = CardId(26);
pub const WILD_PYROMANCER: CardId = CardId(27);
pub const SCAVENGING_HYENA: CardId = CardId(28);
pub const NIGHTMARE_AMALGAM: CardId = CardId(29);

// Spells
pub const FIREBALL_LITE: CardId = CardId(100);
pub const FROSTBOLT: CardId = CardId(101);
pub const ARCANE_MISSILES_LITE: CardId = CardId(102);
pub const CONSECRATION: CardId = CardId(103);
pub const ARCANE_INTELLECT: CardId = CardId(104);
pub const BLESSING_OF_KINGS: CardId = CardId(105);
pub const THE_COIN: CardId = CardId(106);

// Weapons
pub const FIERY_WAR_AXE: CardId = CardId(200);
pub const BATTLE_AXE: CardId = CardId(201);
pub const WICKED_KNIFE: CardId = CardId(202);

// Secrets
pub const SNIPE: CardId = CardId(300);
pub const MIRROR_ENTITY: CardId = CardId(301);
pub const EXPLOSIVE_TRAP: CardId = CardId(302);
pub const CAT_TRICK: CardId = CardId(303);
pub const REDEMPTION: CardId = CardId(304);

// Tokens
pub const SILVER_HAND_RECRUIT: CardId = CardId(400);
pub const NERUBIAN_SPIDER: CardId = CardId(401);
pub const DAMAGED_GOLEM: CardId = CardId(402);
pub const IMP: CardId = CardId(403);
pub const CAT_IN_THE_HAT: CardId = CardId(404);

// Hero powers
pub const FIREBLAST: CardId = CardId(500);
pub const ARMOR_UP: CardId = CardId(501);
pub const STEADY_SHOT: CardId = CardId(502);
pub const REINFORCE: CardId = CardId(503);
pub const LESSER_HEAL: CardId = CardId(504);
pub const LIFE_TAP: CardId = CardId(505);
pub const DAGGER_MASTERY: CardId = CardId(506);

fn minions() -> Vec<CardDefinition> {
    let any_murloc = TargetFilter::minions(Side::Any)
        .with_tribe(Tribe::Murloc)
        .excluding_source();
    let friendly_beast = TargetFilter::minions(Side::Friendly)
        .with_tribe(Tribe::Beast)
        .excluding_source();

    vec![
        CardDefinition::minion(RIVER_CROCOLISK, "River Crocolisk", 2, 2, 3).with_tribe(Tribe::Beast),
        CardDefinition::minion(CHILLWIND_YETI, "Chillwind Yeti", 4, 4, 5),
        CardDefinition::minion(BOULDERFIST_OGRE, "Boulderfist Ogre", 6, 6, 7),
        CardDefinition::minion(SHIELDBEARER, "Shieldbearer", 1, 0, 4).with_keyword(Keyword::Taunt),
        CardDefinition::minion(WOLFRIDER, "Wolfrider", 3, 3, 1).with_keyword(Keyword::Charge),
        CardDefinition::minion(ARENA_RUSHER, "Arena Rusher", 2, 2, 2).with_keyword(Keyword::Rush),
        CardDefinition::minion(ARGENT_SQUIRE, "Argent Squire", 1, 1, 1)
            .with_keyword(Keyword::DivineShield),
        CardDefinition::minion(WATER_ELEMENTAL, "Water Elemental", 4, 3, 6)
            .with_tribe(Tribe::Elemental)
            .with_keyword(Keyword::Freeze),
        CardDefinition::minion(WORGEN_INFILTRATOR, "Worgen Infiltrator", 1, 2, 1)
            .with_keyword(Keyword::Stealth),
        CardDefinition::minion(THRALLMAR_FARSEER, "Thrallmar Farseer", 3, 2, 3)
            .with_keyword(Keyword::Windfury),
        CardDefinition::minion(KOBOLD_GEOMANCER, "Kobold Geomancer", 2, 2, 2).with_spell_damage(1),
        CardDefinition::minion(AMANI_BERSERKER, "Amani Berserker", 2, 2, 3).with_aura(Aura::enrage(3)),
        CardDefinition::minion(KOBOLD_PINGER, "Kobold Pinger", 1, 1, 1).with_effect(
            EffectBinding::battlecry(
                TargetSelector::Chosen(TargetFilter::any_character()),
                EffectAction::Damage(1),
            ),
        ),
        CardDefinition::minion(ARATHI_WEAPONSMITH, "Arathi Weaponsmith", 3, 3, 3).with_effect(
            EffectBinding::battlecry(TargetSelector::Controller, EffectAction::Equip(BATTLE_AXE)),
        ),
        CardDefinition::minion(IRONBEAK_OWL, "Ironbeak Owl", 3, 2, 1)
            .with_tribe(Tribe::Beast)
            .with_effect(EffectBinding::battlecry(
                TargetSelector::Chosen(TargetFilter::minions(Side::Any)),
                EffectAction::Silence,
            )),
        CardDefinition::minion(LEPER_GNOME, "Leper Gnome", 1, 1, 1).with_effect(
            EffectBinding::deathrattle(TargetSelector::EnemyHero, EffectAction::Damage(2)),
        ),
        CardDefinition::minion(HAUNTED_CREEPER, "Haunted Creeper", 2, 1, 2)
            .with_tribe(Tribe::Beast)
            .with_effect(EffectBinding::deathrattle(
                TargetSelector::Controller,
                EffectAction::Summon {
                    card: NERUBIAN_SPIDER,
                    count: 2,
                },
            )),
        CardDefinition::minion(HARVEST_GOLEM, "Harvest Golem", 3, 2, 3)
            .with_tribe(Tribe::Mech)
            .with_effect(EffectBinding::deathrattle(
                TargetSelector::Controller,
                EffectAction::Summon {
                    card: DAMAGED_GOLEM,
                    count: 1,
                },
            )),
        CardDefinition::minion(DIRE_WOLF_ALPHA, "Dire Wolf Alpha", 2, 2, 2)
            .with_tribe(Tribe::Beast)
            .with_aura(Aura::adjacent(1, 0)),
        CardDefinition::minion(DEFENDER_OF_THE_LINE, "Defender of the Line", 3, 2, 3)
            .with_aura(Aura::adjacent(1, 1)),
        CardDefinition::minion(RAID_LEADER, "Raid Leader", 3, 2, 2).with_aura(Aura::other_friendly(1, 0)),
        CardDefinition::minion(STORMWIND_CHAMPION, "Stormwind Champion", 7, 6, 6)
            .with_aura(Aura::other_friendly(1, 1)),
        CardDefinition::minion(MURLOC_TIDECALLER, "Murloc Tidecaller", 1, 1, 2)
            .with_tribe(Tribe::Murloc)
            .with_effect(EffectBinding::on(
                TriggerKind::OnSummon(any_murloc),
                TargetSelector::Source,
                EffectAction::Buff { attack: 1, health: 0 },
            )),
        CardDefinition::minion(GRIMSCALE_ORACLE, "Grimscale Oracle", 1, 1, 1)
            .with_tribe(Tribe::Murloc)
            .with_aura(Aura::tribe(Tribe::Murloc, 1, 0)),
        CardDefinition::minion(ACOLYTE_OF_PAIN, "Acolyte of Pain", 3, 1, 3).with_effect(
            EffectBinding::on(TriggerKind::OnDamageTaken, TargetSelector::Controller, EffectAction::Draw(1)),
        ),
        CardDefinition::minion(IMP_MASTER, "Imp Master", 3, 1, 5)
            .with_effect(EffectBinding::on(
                TriggerKind::OnTurnEnd(Side::Friendly),
                TargetSelector::Source,
                EffectAction::Damage(1),
            ))
            .with_effect(EffectBinding::on(
                TriggerKind::OnTurnEnd(Side::Friendly),
                TargetSelector::Controller,
                EffectAction::Summon { card: IMP, count: 1 },
            )),
        CardDefinition::minion(WILD_PYROMANCER, "Wild Pyromancer", 2, 3, 2).with_effect(
            EffectBinding::on(
                TriggerKind::OnCardPlayed {
                    side: Side::Friendly,
                    card_type: Some(CardType::Spell),
                },
                TargetSelector::All(TargetFilter::minions(Side::Any)),
                EffectAction::Damage(1),
            ),
        ),
        CardDefinition::minion(SCAVENGING_HYENA, "Scavenging Hyena", 2, 2, 2)
            .with_tribe(Tribe::Beast)
            .with_effect(EffectBinding::on(
                TriggerKind::OnMinionDied(friendly_beast),
                TargetSelector::Source,
                EffectAction::Buff { attack: 2, health: 1 },
            )),
        CardDefinition::minion(NIGHTMARE_AMALGAM, "Nightmare Amalgam", 3, 3, 4)
            .with_tribes(TribeSet::all()),
    ]
}

fn spells() -> Vec<CardDefinition> {
    vec![
        CardDefinition::spell(FIREBALL_LITE, "Fireball Lite", 3).with_effect(EffectBinding::cast(
            TargetSelector::Chosen(TargetFilter::any_character()),
            EffectAction::Damage(4),
        )),
        CardDefinition::spell(FROSTBOLT, "Frostbolt", 2)
            .with_effect(EffectBinding::cast(
                TargetSelector::Chosen(TargetFilter::any_character()),
                EffectAction::Damage(3),
            ))
            .with_effect(EffectBinding::cast(
                TargetSelector::Chosen(TargetFilter::any_character()),
                EffectAction::Freeze,
            )),
        CardDefinition::spell(ARCANE_MISSILES_LITE, "Arcane Missiles Lite", 1).with_effect(
            EffectBinding::cast(
                TargetSelector::Random(TargetFilter::characters(Side::Enemy)),
                EffectAction::Damage(1),
            )
            .repeated(3),
        ),
        CardDefinition::spell(CONSECRATION, "Consecration", 4).with_effect(EffectBinding::cast(
            TargetSelector::All(TargetFilter::characters(Side::Enemy)),
            EffectAction::Damage(2),
        )),
        CardDefinition::spell(ARCANE_INTELLECT, "Arcane Intellect", 3).with_effect(
            EffectBinding::cast(TargetSelector::Controller, EffectAction::Draw(2)),
        ),
        CardDefinition::spell(BLESSING_OF_KINGS, "Blessing of Kings", 4).with_effect(
            EffectBinding::cast(
                TargetSelector::Chosen(TargetFilter::minions(Side::Any)),
                EffectAction::Buff { attack: 4, health: 4 },
            ),
        ),
        CardDefinition::spell(THE_COIN, "The Coin", 0)
            .uncollectible()
            .with_effect(EffectBinding::cast(TargetSelector::Controller, EffectAction::GainMana(1))),
    ]
}

fn weapons() -> Vec<CardDefinition> {
    vec![
        CardDefinition::weapon(FIERY_WAR_AXE, "Fiery War Axe", 3, 3, 2),
        CardDefinition::weapon(BATTLE_AXE, "Battle Axe", 1, 2, 2).uncollectible(),
        CardDefinition::weapon(WICKED_KNIFE, "Wicked Knife", 1, 1, 2).uncollectible(),
    ]
}

fn secrets() -> Vec<CardDefinition> {
    vec![
        CardDefinition::secret(SNIPE, "Snipe", 2, SecretWatch::MinionPlayed).with_effect(
            EffectBinding::reveal(TargetSelector::Subject, EffectAction::Damage(4)),
        ),
        CardDefinition::secret(MIRROR_ENTITY, "Mirror Entity", 3, SecretWatch::MinionSummoned)
            .with_effect(EffectBinding::reveal(
                TargetSelector::Controller,
                EffectAction::SummonCopy { health: None },
            )),
        CardDefinition::secret(EXPLOSIVE_TRAP, "Explosive Trap", 2, SecretWatch::HeroAttacked)
            .with_effect(EffectBinding::reveal(
                TargetSelector::All(TargetFilter::characters(Side::Enemy)),
                EffectAction::Damage(2),
            )),
        CardDefinition::secret(CAT_TRICK, "Cat Trick", 2, SecretWatch::SpellCast).with_effect(
            EffectBinding::reveal(
                TargetSelector::Controller,
                EffectAction::Summon {
                    card: CAT_IN_THE_HAT,
                    count: 1,
                },
            ),
        ),
        CardDefinition::secret(REDEMPTION, "Redemption", 1, SecretWatch::FriendlyMinionDied)
            .with_effect(EffectBinding::reveal(
                TargetSelector::Controller,
                EffectAction::SummonCopy { health: Some(1) },
            )),
    ]
}

fn tokens() -> Vec<CardDefinition> {
    vec![
        CardDefinition::minion(SILVER_HAND_RECRUIT, "Silver Hand Recruit", 1, 1, 1).uncollectible(),
        CardDefinition::minion(NERUBIAN_SPIDER, "Nerubian Spider", 1, 1, 1)
            .with_tribe(Tribe::Beast)
            .uncollectible(),
        CardDefinition::minion(DAMAGED_GOLEM, "Damaged Golem", 1, 2, 1)
            .with_tribe(Tribe::Mech)
            .uncollectible(),
        CardDefinition::minion(IMP, "Imp", 1, 1, 1)
            .with_tribe(Tribe::Demon)
            .uncollectible(),
        CardDefinition::minion(CAT_IN_THE_HAT, "Cat in the Hat", 3, 4, 2)
            .with_tribe(Tribe::Beast)
            .with_keyword(Keyword::Stealth)
            .uncollectible(),
    ]
}

fn hero_powers() -> Vec<CardDefinition> {
    vec![
        CardDefinition::hero_power(FIREBLAST, "Fireblast", 2).with_effect(EffectBinding::cast(
            TargetSelector::Chosen(TargetFilter::any_character()),
            EffectAction::Damage(1),
        )),
        CardDefinition::hero_power(ARMOR_UP, "Armor Up!", 2)
            .with_effect(EffectBinding::cast(TargetSelector::Controller, EffectAction::GainArmor(2))),
        CardDefinition::hero_power(STEADY_SHOT, "Steady Shot", 2)
            .with_effect(EffectBinding::cast(TargetSelector::EnemyHero, EffectAction::Damage(2))),
        CardDefinition::hero_power(REINFORCE, "Reinforce", 2).with_effect(EffectBinding::cast(
            TargetSelector::Controller,
            EffectAction::Summon {
                card: SILVER_HAND_RECRUIT,
                count: 1,
            },
        )),
        CardDefinition::hero_power(LESSER_HEAL, "Lesser Heal", 2).with_effect(EffectBinding::cast(
            TargetSelector::Chosen(TargetFilter::any_character()),
            EffectAction::Heal(2),
        )),
        CardDefinition::hero_power(LIFE_TAP, "Life Tap", 2)
            .with_effect(EffectBinding::cast(TargetSelector::Controller, EffectAction::Draw(1)))
            .with_effect(EffectBinding::cast(TargetSelector::FriendlyHero, EffectAction::Damage(2))),
        CardDefinition::hero_power(DAGGER_MASTERY, "Dagger Mastery", 2)
            .with_effect(EffectBinding::cast(TargetSelector::Controller, EffectAction::Equip(WICKED_KNIFE))),
    ]
}

/// Every card in the standard pool.
#[must_use]
pub fn standard_registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    for card in minions()
        .into_iter()
        .chain(spells())
        .chain(weapons())
        .chain(secrets())
        .chain(tokens())
        .chain(hero_powers())
    {
        registry.register(card);
    }
    registry
}

/// A legal 30-card deck of fifteen cards, two copies each.
#[must_use]
pub fn basic_deck() -> Vec<CardId> {
    [
        ARGENT_SQUIRE,
        LEPER_GNOME,
        KOBOLD_PINGER,
        RIVER_CROCOLISK,
        DIRE_WOLF_ALPHA,
        HAUNTED_CREEPER,
        AMANI_BERSERKER,
        ARATHI_WEAPONSMITH,
        HARVEST_GOLEM,
        RAID_LEADER,
        WOLFRIDER,
        CHILLWIND_YETI,
        WATER_ELEMENTAL,
        FROSTBOLT,
        BOULDERFIST_OGRE,
    ]
    .iter()
    .flat_map(|&card| [card, card])
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::HeroClass;
    use crate::core::{PlayerId, Ruleset};

    #[test]
    fn test_every_hero_power_registered() {
        let registry = standard_registry();
        for class in HeroClass::ALL {
            let power = registry.get(class.hero_power()).unwrap();
            assert_eq!(power.card_type(), CardType::HeroPower);
            assert!(!power.collectible);
        }
    }

    #[test]
    fn test_referenced_tokens_exist() {
        let registry = standard_registry();
        for card in registry.iter() {
            for binding in &card.effects {
                match binding.action {
                    EffectAction::Summon { card: token, .. } => {
                        assert!(registry.get(token).unwrap().is_minion(), "{} summons {token}", card.name);
                    }
                    EffectAction::Equip(weapon) => {
                        assert_eq!(registry.get(weapon).unwrap().card_type(), CardType::Weapon);
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_basic_deck_is_legal() {
        let registry = standard_registry();
        let deck = basic_deck();
        assert_eq!(deck.len(), 30);
        assert_eq!(
            registry.validate_deck(PlayerId::new(0), &deck, &Ruleset::default()),
            Ok(())
        );
    }

    #[test]
    fn test_weaponsmith_matches_scenario_numbers() {
        let registry = standard_registry();
        let smith = registry.get(ARATHI_WEAPONSMITH).unwrap();
        assert_eq!(smith.cost, 3);
        assert_eq!(smith.base_stats(), Some((3, 3)));
        assert_eq!(
            registry.get(BATTLE_AXE).unwrap().kind,
            crate::cards::CardKind::Weapon {
                attack: 2,
                durability: 2
            }
        );
    }

    #[test]
    fn test_names_are_unique() {
        let registry = standard_registry();
        for card in registry.iter() {
            assert_eq!(registry.id_of(&card.name), Some(card.id));
        }
    }
}
