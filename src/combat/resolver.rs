//! Attack legality and damage exchange.

use tracing::{debug, trace};

use crate::cards::Keyword;
use crate::core::{Action, EntityId, GamePhase, GameState, IllegalReason, PlayerId, Result};
use crate::effects::{aura, EffectEngine};
use crate::triggers::GameEvent;

/// Resolves attacks.
#[derive(Clone, Copy, Debug)]
pub struct CombatResolver<'a> {
    engine: EffectEngine<'a>,
}

impl<'a> CombatResolver<'a> {
    #[must_use]
    pub fn new(engine: EffectEngine<'a>) -> Self {
        Self { engine }
    }

    /// Whether `attacker` may attack `defender` right now.
    ///
    /// Shared by validation and enumeration, so the two can never disagree.
    pub fn validate_attack(
        &self,
        state: &GameState,
        attacker: EntityId,
        defender: EntityId,
    ) -> std::result::Result<(), IllegalReason> {
        if state.is_over() {
            return Err(IllegalReason::GameOver);
        }
        if state.phase != GamePhase::Main {
            return Err(IllegalReason::WrongPhase(state.phase.name()));
        }
        let active = state.active_player;

        self.check_attacker(state, active, attacker)?;

        if !state.is_character(defender) {
            return Err(IllegalReason::NoSuchEntity(defender));
        }
        if state.owner_of(defender) == Some(active) {
            return Err(IllegalReason::InvalidTarget(defender));
        }

        if let Some(m) = state.minion(attacker) {
            let rush_only = m.summoned_this_turn && m.has(Keyword::Rush) && !m.has(Keyword::Charge);
            if rush_only && defender.is_hero() {
                return Err(IllegalReason::RushTargetsMinionsOnly(attacker));
            }
        }

        if let Some(target) = state.minion(defender) {
            if target.is_stealthed() {
                return Err(IllegalReason::Stealthed(defender));
            }
        }

        let enemy_board = &state.player(active.opponent()).board;
        let taunts: Vec<EntityId> = enemy_board
            .iter()
            .filter(|m| m.has(Keyword::Taunt) && !m.is_stealthed())
            .map(|m| m.id)
            .collect();
        if !taunts.is_empty() && !taunts.contains(&defender) {
            return Err(IllegalReason::MustAttackTaunt);
        }

        Ok(())
    }

    fn check_attacker(
        &self,
        state: &GameState,
        active: PlayerId,
        attacker: EntityId,
    ) -> std::result::Result<(), IllegalReason> {
        if let Some(player) = attacker.as_hero() {
            if player != active {
                return Err(IllegalReason::NotYourCharacter(attacker));
            }
            let hero = &state.player(player).hero;
            if hero.frozen {
                return Err(IllegalReason::Frozen(attacker));
            }
            if aura::attack_of(state, self.engine.registry, attacker) <= 0 {
                return Err(IllegalReason::NoAttack(attacker));
            }
            if hero.attacks_this_turn >= 1 {
                return Err(IllegalReason::AlreadyAttacked(attacker));
            }
            return Ok(());
        }

        let m = state
            .minion(attacker)
            .ok_or(IllegalReason::NoSuchEntity(attacker))?;
        if m.owner != active {
            return Err(IllegalReason::NotYourCharacter(attacker));
        }
        if m.frozen {
            return Err(IllegalReason::Frozen(attacker));
        }
        if aura::attack_of(state, self.engine.registry, attacker) <= 0 {
            return Err(IllegalReason::NoAttack(attacker));
        }
        if m.attacks_this_turn >= m.max_attacks() {
            return Err(IllegalReason::AlreadyAttacked(attacker));
        }
        if m.summoned_this_turn && !m.has(Keyword::Charge) && !m.has(Keyword::Rush) {
            return Err(IllegalReason::SummoningSick(attacker));
        }
        Ok(())
    }

    /// Every legal attack for the active player: hero first, then minions
    /// left to right, each against the enemy hero and then enemy minions.
    #[must_use]
    pub fn legal_attacks(&self, state: &GameState) -> Vec<Action> {
        let active = state.active_player;
        let enemy = active.opponent();

        let attackers = std::iter::once(EntityId::hero(active)).chain(state.player(active).board.ids());
        let defenders: Vec<EntityId> = std::iter::once(EntityId::hero(enemy))
            .chain(state.player(enemy).board.ids())
            .collect();

        attackers
            .flat_map(|a| defenders.iter().map(move |&d| (a, d)))
            .filter(|&(a, d)| self.validate_attack(state, a, d).is_ok())
            .map(|(a, d)| Action::attack(a, d))
            .collect()
    }

    /// Validate and resolve an attack, including the cascade it causes.
    pub fn attack(
        &self,
        state: &mut GameState,
        attacker: EntityId,
        defender: EntityId,
    ) -> Result<Vec<GameEvent>> {
        self.validate_attack(state, attacker, defender)?;
        let registry = self.engine.registry;

        // Both strike with their stats from before the exchange.
        let strike = aura::attack_of(state, registry, attacker);
        let counter = if defender.is_hero() {
            0
        } else {
            aura::attack_of(state, registry, defender)
        };
        let freezes = |state: &GameState, id: EntityId| {
            state
                .minion(id)
                .filter(|m| m.has(Keyword::Freeze))
                .map(|m| registry.get(m.card).is_some_and(|def| def.freeze_blocked_by_shield))
        };
        let attacker_freezes = freezes(state, attacker);
        let defender_freezes = freezes(state, defender);

        debug!(%attacker, %defender, strike, counter, "attack");

        match attacker.as_hero() {
            Some(player) => state.player_mut(player).hero.attacks_this_turn += 1,
            None => {
                if let Some(m) = state.minion_mut(attacker) {
                    m.keywords.remove(Keyword::Stealth);
                    m.attacks_this_turn += 1;
                }
            }
        }

        let mut events = vec![GameEvent::Attacked { attacker, defender }];
        let (to_defender, hits) = self.engine.deal_damage(state, Some(attacker), defender, strike);
        events.extend(hits);
        let (to_attacker, hits) = self.engine.deal_damage(state, Some(defender), attacker, counter);
        events.extend(hits);

        for (freezer, blocked_by_shield, victim, hit) in [
            (attacker, attacker_freezes, defender, to_defender),
            (defender, defender_freezes, attacker, to_attacker),
        ] {
            let Some(blocked_by_shield) = blocked_by_shield else {
                continue;
            };
            if hit.dealt > 0 || (hit.absorbed && !blocked_by_shield) {
                trace!(%freezer, %victim, "freeze on damage");
                events.extend(self.engine.freeze(state, victim));
            }
        }

        if let Some(player) = attacker.as_hero() {
            events.extend(self.wear_weapon(state, player));
        }

        self.engine.resolve_all(state, events)
    }

    /// One durability per hero attack; the weapon breaks at zero.
    fn wear_weapon(&self, state: &mut GameState, player: PlayerId) -> Option<GameEvent> {
        let ps = state.player_mut(player);
        let weapon = ps.weapon.as_mut()?;
        weapon.durability -= 1;
        if weapon.durability > 0 {
            return None;
        }
        let broken = ps.weapon.take()?;
        ps.graveyard.push_back(broken.card);
        Some(GameEvent::WeaponDestroyed {
            player,
            weapon: broken.id,
            card: broken.card,
        })
    }
}
