//! Rules scenario tests.
//!
//! Each test sets up a small table with the sandbox helpers and drives it
//! through `Battler::submit_action`, the same path a client or the AI uses.

use battler_core::cards::{catalog, HeroClass, Secret};
use battler_core::core::{Action, EntityId, GameState, IllegalReason, PlayerId};
use battler_core::effects::aura;
use battler_core::rules::Battler;
use battler_core::triggers::GameEvent;

const ME: PlayerId = PlayerId::FIRST;
const THEM: PlayerId = PlayerId::SECOND;

fn table() -> (Battler, GameState) {
    let battler = Battler::standard();
    let state = battler.sandbox([HeroClass::Warrior, HeroClass::Mage], 77);
    (battler, state)
}

/// Arathi Weaponsmith: 3 mana in, 0 out, a 2/2 weapon that loses
/// durability when the hero swings.
#[test]
fn test_weaponsmith_equips_and_hero_attacks() {
    let (battler, mut state) = table();
    battler.put_in_hand(&mut state, ME, catalog::ARATHI_WEAPONSMITH);
    battler.set_mana(&mut state, ME, 3);

    battler.submit_action(&mut state, &Action::play(0)).unwrap();

    let me = state.player(ME);
    assert_eq!(me.mana, 0);
    assert_eq!(me.board.len(), 1);
    let weapon = me.weapon.as_ref().expect("weapon equipped");
    assert_eq!(weapon.card, catalog::BATTLE_AXE);
    assert_eq!((weapon.attack, weapon.durability), (2, 2));

    battler
        .submit_action(&mut state, &Action::attack(EntityId::hero(ME), EntityId::hero(THEM)))
        .unwrap();

    assert_eq!(state.player(THEM).hero.health, 28);
    assert_eq!(state.player(ME).weapon.as_ref().map(|w| w.durability), Some(1));
    // Heroes attack once per turn.
    assert_eq!(
        battler.submit_action(&mut state, &Action::attack(EntityId::hero(ME), EntityId::hero(THEM))),
        Err(IllegalReason::AlreadyAttacked(EntityId::hero(ME)).into())
    );
}

/// Killing an adjacency source drops its neighbor's stats at once.
#[test]
fn test_adjacency_buff_disappears_with_source() {
    let (battler, mut state) = table();
    let defender = battler
        .place_minion(&mut state, ME, catalog::DEFENDER_OF_THE_LINE)
        .unwrap();
    let croc = battler.place_minion(&mut state, ME, catalog::RIVER_CROCOLISK).unwrap();
    state.minion_mut(croc).unwrap().damage = 1;

    let before = aura::stats_of(&state, battler.registry(), croc).unwrap();
    assert_eq!((before.attack, before.health, before.max_health), (3, 3, 4));

    battler.put_in_hand(&mut state, ME, catalog::FIREBALL_LITE);
    battler.set_mana(&mut state, ME, 3);
    battler
        .submit_action(&mut state, &Action::play(0).with_target(defender))
        .unwrap();

    assert!(state.minion(defender).is_none());
    let after = aura::stats_of(&state, battler.registry(), croc).unwrap();
    assert_eq!((after.attack, after.health, after.max_health), (2, 2, 3));
}

/// A counter-summon secret resolves inside the action that triggered it.
#[test]
fn test_mirror_entity_reveals_before_next_action() {
    let (battler, mut state) = table();
    let secret = state.alloc_entity();
    state.player_mut(THEM).secrets.push_back(Secret {
        id: secret,
        card: catalog::MIRROR_ENTITY,
    });
    battler.put_in_hand(&mut state, ME, catalog::RIVER_CROCOLISK);
    battler.set_mana(&mut state, ME, 2);

    let events = battler.submit_action(&mut state, &Action::play(0)).unwrap();

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::SecretRevealed { player, card, .. }
            if *player == THEM && *card == catalog::MIRROR_ENTITY
    )));
    let them = state.player(THEM);
    assert!(them.secrets.is_empty());
    assert_eq!(them.graveyard.back(), Some(&catalog::MIRROR_ENTITY));
    let copies: Vec<_> = them.board.iter().map(|m| m.card).collect();
    assert_eq!(copies, vec![catalog::RIVER_CROCOLISK]);

    // The next action sees the settled table.
    battler.submit_action(&mut state, &Action::EndTurn).unwrap();
    assert_eq!(state.active_player, THEM);
}

/// An attacker that survives hitting Water Elemental is frozen through
/// its next turn and thaws at that turn's end.
#[test]
fn test_water_elemental_freezes_attacker() {
    let (battler, mut state) = table();
    let elemental = battler
        .place_minion(&mut state, THEM, catalog::WATER_ELEMENTAL)
        .unwrap();
    let yeti = battler.place_minion(&mut state, ME, catalog::CHILLWIND_YETI).unwrap();

    battler
        .submit_action(&mut state, &Action::attack(yeti, elemental))
        .unwrap();
    assert!(state.minion(yeti).unwrap().frozen);
    assert_eq!(aura::stats_of(&state, battler.registry(), yeti).unwrap().health, 2);
    assert_eq!(aura::stats_of(&state, battler.registry(), elemental).unwrap().health, 2);

    battler.submit_action(&mut state, &Action::EndTurn).unwrap();
    battler.submit_action(&mut state, &Action::EndTurn).unwrap();
    assert_eq!(state.active_player, ME);
    assert_eq!(
        battler.submit_action(&mut state, &Action::attack(yeti, EntityId::hero(THEM))),
        Err(IllegalReason::Frozen(yeti).into())
    );

    battler.submit_action(&mut state, &Action::EndTurn).unwrap();
    assert!(!state.minion(yeti).unwrap().frozen);
    battler.submit_action(&mut state, &Action::EndTurn).unwrap();
    battler
        .submit_action(&mut state, &Action::attack(yeti, EntityId::hero(THEM)))
        .unwrap();
}

/// Deathrattles of one sweep fire left to right, and a deathrattle's
/// summons land before the next one runs.
#[test]
fn test_deathrattles_fire_in_board_order() {
    let (battler, mut state) = table();
    for card in [catalog::LEPER_GNOME, catalog::HAUNTED_CREEPER, catalog::LEPER_GNOME] {
        battler.place_minion(&mut state, THEM, card).unwrap();
    }
    battler.put_in_hand(&mut state, ME, catalog::CONSECRATION);
    battler.set_mana(&mut state, ME, 4);

    let events = battler.submit_action(&mut state, &Action::play(0)).unwrap();

    let face_hits: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, GameEvent::DamageDealt { target, .. } if *target == EntityId::hero(ME)))
        .map(|(i, _)| i)
        .collect();
    let spiders: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, GameEvent::MinionSummoned { player, .. } if *player == THEM))
        .map(|(i, _)| i)
        .collect();

    assert_eq!(face_hits.len(), 2);
    assert_eq!(spiders.len(), 2);
    assert!(face_hits[0] < spiders[0]);
    assert!(spiders[1] < face_hits[1]);

    assert_eq!(state.player(ME).hero.health, 26);
    assert_eq!(state.player(THEM).hero.health, 28);
    let board: Vec<_> = state.player(THEM).board.iter().map(|m| m.card).collect();
    assert_eq!(board, vec![catalog::NERUBIAN_SPIDER, catalog::NERUBIAN_SPIDER]);
}

/// Divine shield soaks one hit; the next hit in the same action kills.
#[test]
fn test_divine_shield_absorbs_first_hit_only() {
    let (battler, mut state) = table();
    let pyromancer = battler
        .place_minion(&mut state, ME, catalog::WILD_PYROMANCER)
        .unwrap();
    let squire = battler.place_minion(&mut state, THEM, catalog::ARGENT_SQUIRE).unwrap();
    battler.put_in_hand(&mut state, ME, catalog::CONSECRATION);
    battler.set_mana(&mut state, ME, 4);

    let events = battler.submit_action(&mut state, &Action::play(0)).unwrap();

    let shield_pops = events
        .iter()
        .filter(|e| matches!(e, GameEvent::DivineShieldLost { target } if *target == squire))
        .count();
    assert_eq!(shield_pops, 1);
    assert!(state.minion(squire).is_none());
    assert_eq!(state.player(THEM).graveyard.back(), Some(&catalog::ARGENT_SQUIRE));
    assert_eq!(state.minion(pyromancer).unwrap().damage, 1);
}

/// With an enemy taunt alive, every legal attack targets it.
#[test]
fn test_taunt_restricts_legal_attacks() {
    let (battler, mut state) = table();
    let wall = battler.place_minion(&mut state, THEM, catalog::SHIELDBEARER).unwrap();
    let croc = battler.place_minion(&mut state, THEM, catalog::RIVER_CROCOLISK).unwrap();
    let yeti = battler.place_minion(&mut state, ME, catalog::CHILLWIND_YETI).unwrap();

    let attacks: Vec<Action> = battler
        .legal_actions(&state)
        .into_iter()
        .filter(|a| matches!(a, Action::Attack { .. }))
        .collect();
    assert_eq!(attacks, vec![Action::attack(yeti, wall)]);

    assert_eq!(
        battler.submit_action(&mut state, &Action::attack(yeti, croc)),
        Err(IllegalReason::MustAttackTaunt.into())
    );
    assert_eq!(
        battler.submit_action(&mut state, &Action::attack(yeti, EntityId::hero(THEM))),
        Err(IllegalReason::MustAttackTaunt.into())
    );

    battler.submit_action(&mut state, &Action::attack(yeti, wall)).unwrap();
    assert!(state.minion(wall).is_none());
    // The yeti has used its attack, so nothing is left to enumerate.
    assert!(battler.combat().legal_attacks(&state).is_empty());
}

/// Snipe hits the minion that was just played; the minion survives with
/// its damage.
#[test]
fn test_snipe_hits_played_minion() {
    let (battler, mut state) = table();
    let secret = state.alloc_entity();
    state.player_mut(THEM).secrets.push_back(Secret {
        id: secret,
        card: catalog::SNIPE,
    });
    battler.put_in_hand(&mut state, ME, catalog::CHILLWIND_YETI);
    battler.set_mana(&mut state, ME, 4);

    battler.submit_action(&mut state, &Action::play(0)).unwrap();

    let yeti = state.player(ME).board.ids()[0];
    assert_eq!(aura::stats_of(&state, battler.registry(), yeti).unwrap().health, 1);
    assert!(state.player(THEM).secrets.is_empty());
}
