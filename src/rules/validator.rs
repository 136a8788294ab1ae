//! Action validation and enumeration.
//!
//! `validate` and `legal_actions` share the same checks: enumeration builds
//! every candidate and keeps the ones `validate` accepts, so the human input
//! path and the AI searcher see exactly the same rules.

use crate::cards::{CardDefinition, CardKind, CardType};
use crate::combat::CombatResolver;
use crate::core::{Action, EngineError, EntityId, GamePhase, GameState, IllegalReason, Result};
use crate::effects::{targeting, EffectAction, EffectEngine};

/// Checks and enumerates the active player's actions.
#[derive(Clone, Copy, Debug)]
pub struct ActionValidator<'a> {
    engine: EffectEngine<'a>,
}

impl<'a> ActionValidator<'a> {
    #[must_use]
    pub fn new(engine: EffectEngine<'a>) -> Self {
        Self { engine }
    }

    /// Check an action for the active player without touching the state.
    pub fn validate(&self, state: &GameState, action: &Action) -> Result<()> {
        match *action {
            Action::PlayCard {
                hand_index,
                target,
                position,
            } => self.validate_play(state, hand_index, target, position),
            Action::Attack { attacker, defender } => CombatResolver::new(self.engine)
                .validate_attack(state, attacker, defender)
                .map_err(EngineError::from),
            Action::UseHeroPower { target } => self.validate_hero_power(state, target),
            Action::EndTurn => Ok(check_timing(state)?),
        }
    }

    /// Every action the active player may take, in a fixed order: cards in
    /// hand (each board position, each legal target), the hero power,
    /// attacks, then `EndTurn`.
    ///
    /// Empty outside the main phase.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        if check_timing(state).is_err() {
            return Vec::new();
        }
        let registry = self.engine.registry;
        let active = state.active();
        let mut actions = Vec::new();

        for (hand_index, &card) in active.hand.iter().enumerate() {
            let Some(def) = registry.get(card) else {
                continue;
            };
            let positions: Vec<Option<usize>> = if def.is_minion() {
                (0..=active.board.len()).map(Some).collect()
            } else {
                vec![None]
            };
            let targets = self.target_options(state, def);
            for &position in &positions {
                for &target in &targets {
                    let action = Action::PlayCard {
                        hand_index,
                        target,
                        position,
                    };
                    if self.validate(state, &action).is_ok() {
                        actions.push(action);
                    }
                }
            }
        }

        if let Some(power) = registry.get(active.hero.class.hero_power()) {
            for target in self.target_options(state, power) {
                let action = Action::UseHeroPower { target };
                if self.validate(state, &action).is_ok() {
                    actions.push(action);
                }
            }
        }

        actions.extend(CombatResolver::new(self.engine).legal_attacks(state));
        actions.push(Action::EndTurn);
        actions
    }

    fn target_options(&self, state: &GameState, def: &CardDefinition) -> Vec<Option<EntityId>> {
        match def.required_target() {
            Some(filter) => targeting::legal_choices(
                state,
                self.engine.registry,
                state.active_player,
                None,
                &filter,
            )
            .into_iter()
            .map(Some)
            .collect(),
            None => vec![None],
        }
    }

    fn validate_play(
        &self,
        state: &GameState,
        hand_index: usize,
        target: Option<EntityId>,
        position: Option<usize>,
    ) -> Result<()> {
        check_timing(state)?;
        let ruleset = self.engine.ruleset;
        let active = state.active();

        let card = *active
            .hand
            .get(hand_index)
            .ok_or(IllegalReason::NoSuchCard(hand_index))?;
        let def = self
            .engine
            .registry
            .get(card)
            .ok_or(IllegalReason::UnknownCard(card))?;
        if def.card_type() == CardType::HeroPower {
            return Err(IllegalReason::Unplayable(card).into());
        }
        if def.cost > active.mana {
            return Err(IllegalReason::NotEnoughMana {
                cost: def.cost,
                available: active.mana,
            }
            .into());
        }

        match (&def.kind, position) {
            (CardKind::Minion { .. }, _) => {
                if active.board.len() >= ruleset.max_board {
                    return Err(IllegalReason::BoardFull.into());
                }
                if let Some(pos) = position.filter(|&p| p > active.board.len()) {
                    return Err(IllegalReason::InvalidPosition(pos).into());
                }
            }
            // Only minions are placed.
            (_, Some(pos)) => return Err(IllegalReason::InvalidPosition(pos).into()),
            (CardKind::Secret { .. }, None) => {
                if active.has_secret(card) {
                    return Err(IllegalReason::DuplicateSecret(card).into());
                }
                if active.secrets.len() >= ruleset.max_secrets {
                    return Err(IllegalReason::SecretsFull.into());
                }
            }
            _ => {}
        }

        self.check_target(state, def, target)
    }

    fn validate_hero_power(&self, state: &GameState, target: Option<EntityId>) -> Result<()> {
        check_timing(state)?;
        let ruleset = self.engine.ruleset;
        let active = state.active();

        if active.hero.power_used {
            return Err(IllegalReason::HeroPowerUsed.into());
        }
        if ruleset.hero_power_cost > active.mana {
            return Err(IllegalReason::NotEnoughMana {
                cost: ruleset.hero_power_cost,
                available: active.mana,
            }
            .into());
        }
        let card = active.hero.class.hero_power();
        let def = self
            .engine
            .registry
            .get(card)
            .ok_or(IllegalReason::UnknownCard(card))?;
        let summons = def
            .play_bindings()
            .any(|b| matches!(b.action, EffectAction::Summon { .. }));
        if summons && active.board.len() >= ruleset.max_board {
            return Err(IllegalReason::BoardFull.into());
        }

        self.check_target(state, def, target)
    }

    /// A card with a chosen-target binding needs one of the legal choices;
    /// any other card takes no target.
    fn check_target(&self, state: &GameState, def: &CardDefinition, target: Option<EntityId>) -> Result<()> {
        let Some(filter) = def.required_target() else {
            return match target {
                Some(_) => Err(IllegalReason::UnexpectedTarget.into()),
                None => Ok(()),
            };
        };

        let choices =
            targeting::legal_choices(state, self.engine.registry, state.active_player, None, &filter);
        if choices.is_empty() {
            return Err(EngineError::NoLegalTarget { card: def.id });
        }
        let target = target.ok_or(IllegalReason::TargetRequired)?;
        if !choices.contains(&target) {
            return Err(IllegalReason::InvalidTarget(target).into());
        }
        Ok(())
    }
}

/// Actions are only taken in the main phase of a running game.
fn check_timing(state: &GameState) -> std::result::Result<(), IllegalReason> {
    if state.is_over() {
        return Err(IllegalReason::GameOver);
    }
    if state.phase != GamePhase::Main {
        return Err(IllegalReason::WrongPhase(state.phase.name()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{self, standard_registry};
    use crate::cards::{CardId, CardRegistry, HeroClass, Keyword, Minion, Secret};
    use crate::core::{PlayerId, Ruleset};

    const ME: PlayerId = PlayerId::FIRST;
    const THEM: PlayerId = PlayerId::SECOND;

    fn state(mana: u8) -> GameState {
        let mut s = GameState::new(3, [HeroClass::Mage, HeroClass::Paladin], 30);
        s.phase = GamePhase::Main;
        s.turn = 1;
        let p = s.player_mut(ME);
        p.mana = mana;
        p.max_mana = mana;
        s
    }

    fn place(s: &mut GameState, reg: &CardRegistry, player: PlayerId, card: CardId) -> EntityId {
        let id = s.alloc_entity();
        let mut m = Minion::from_card(id, player, reg.get(card).unwrap()).unwrap();
        m.ready();
        s.player_mut(player).board.push(m);
        id
    }

    fn check(s: &GameState, action: Action) -> Result<()> {
        let reg = standard_registry();
        let rules = Ruleset::default();
        ActionValidator::new(EffectEngine::new(&reg, &rules)).validate(s, &action)
    }

    #[test]
    fn test_mana_and_hand_index() {
        let mut s = state(2);
        s.player_mut(ME).hand.push_back(catalog::CHILLWIND_YETI);

        assert_eq!(
            check(&s, Action::play(0)),
            Err(IllegalReason::NotEnoughMana { cost: 4, available: 2 }.into())
        );
        assert_eq!(check(&s, Action::play(5)), Err(IllegalReason::NoSuchCard(5).into()));
    }

    #[test]
    fn test_board_position_rules() {
        let reg = standard_registry();
        let mut s = state(10);
        place(&mut s, &reg, ME, catalog::RIVER_CROCOLISK);
        s.player_mut(ME).hand.push_back(catalog::RIVER_CROCOLISK);
        s.player_mut(ME).hand.push_back(catalog::ARCANE_INTELLECT);

        assert!(check(&s, Action::play(0).at_position(1)).is_ok());
        assert_eq!(
            check(&s, Action::play(0).at_position(2)),
            Err(IllegalReason::InvalidPosition(2).into())
        );
        assert_eq!(
            check(&s, Action::play(1).at_position(0)),
            Err(IllegalReason::InvalidPosition(0).into())
        );

        for _ in 0..6 {
            place(&mut s, &reg, ME, catalog::RIVER_CROCOLISK);
        }
        assert_eq!(check(&s, Action::play(0)), Err(IllegalReason::BoardFull.into()));
    }

    #[test]
    fn test_targets() {
        let mut s = state(10);
        s.player_mut(ME).hand.push_back(catalog::FIREBALL_LITE);
        s.player_mut(ME).hand.push_back(catalog::ARCANE_INTELLECT);
        s.player_mut(ME).hand.push_back(catalog::BLESSING_OF_KINGS);
        let enemy = EntityId::hero(THEM);

        assert!(check(&s, Action::play(0).with_target(enemy)).is_ok());
        assert_eq!(check(&s, Action::play(0)), Err(IllegalReason::TargetRequired.into()));
        assert_eq!(
            check(&s, Action::play(1).with_target(enemy)),
            Err(IllegalReason::UnexpectedTarget.into())
        );
        // No minions anywhere: the buff has nothing to land on.
        assert_eq!(
            check(&s, Action::play(2)),
            Err(EngineError::NoLegalTarget {
                card: catalog::BLESSING_OF_KINGS
            })
        );
    }

    #[test]
    fn test_stealthed_enemy_not_targetable() {
        let reg = standard_registry();
        let mut s = state(10);
        let worgen = place(&mut s, &reg, THEM, catalog::WORGEN_INFILTRATOR);
        s.player_mut(ME).hand.push_back(catalog::FIREBALL_LITE);

        assert_eq!(
            check(&s, Action::play(0).with_target(worgen)),
            Err(IllegalReason::InvalidTarget(worgen).into())
        );
    }

    #[test]
    fn test_duplicate_secret() {
        let mut s = state(10);
        let id = s.alloc_entity();
        s.player_mut(ME).secrets.push_back(Secret {
            id,
            card: catalog::SNIPE,
        });
        s.player_mut(ME).hand.push_back(catalog::SNIPE);
        s.player_mut(ME).hand.push_back(catalog::MIRROR_ENTITY);

        assert_eq!(
            check(&s, Action::play(0)),
            Err(IllegalReason::DuplicateSecret(catalog::SNIPE).into())
        );
        assert!(check(&s, Action::play(1)).is_ok());
    }

    #[test]
    fn test_hero_power() {
        let mut s = state(1);
        assert_eq!(
            check(&s, Action::hero_power().with_target(EntityId::hero(THEM))),
            Err(IllegalReason::NotEnoughMana { cost: 2, available: 1 }.into())
        );
        s.player_mut(ME).mana = 2;
        assert!(check(&s, Action::hero_power().with_target(EntityId::hero(THEM))).is_ok());
        s.player_mut(ME).hero.power_used = true;
        assert_eq!(
            check(&s, Action::hero_power().with_target(EntityId::hero(THEM))),
            Err(IllegalReason::HeroPowerUsed.into())
        );
    }

    #[test]
    fn test_summoning_hero_power_needs_room() {
        let reg = standard_registry();
        let mut s = state(2);
        s.active_player = THEM;
        s.player_mut(THEM).mana = 2;
        for _ in 0..7 {
            place(&mut s, &reg, THEM, catalog::RIVER_CROCOLISK);
        }
        assert_eq!(check(&s, Action::hero_power()), Err(IllegalReason::BoardFull.into()));
    }

    #[test]
    fn test_taunt_restricts_enumerated_attacks() {
        let reg = standard_registry();
        let rules = Ruleset::default();
        let mut s = state(0);
        let croc = place(&mut s, &reg, ME, catalog::RIVER_CROCOLISK);
        let taunt = place(&mut s, &reg, THEM, catalog::SHIELDBEARER);
        let other = place(&mut s, &reg, THEM, catalog::CHILLWIND_YETI);

        let actions = ActionValidator::new(EffectEngine::new(&reg, &rules)).legal_actions(&s);
        assert!(actions.contains(&Action::attack(croc, taunt)));
        assert!(!actions.contains(&Action::attack(croc, other)));
        assert!(!actions.contains(&Action::attack(croc, EntityId::hero(THEM))));
        assert_eq!(actions.last(), Some(&Action::EndTurn));
    }

    #[test]
    fn test_enumeration_lists_every_position_and_target() {
        let reg = standard_registry();
        let rules = Ruleset::default();
        let mut s = state(1);
        place(&mut s, &reg, ME, catalog::RIVER_CROCOLISK);
        s.player_mut(ME).hand.push_back(catalog::KOBOLD_PINGER);

        let actions = ActionValidator::new(EffectEngine::new(&reg, &rules)).legal_actions(&s);
        // Two positions times three characters.
        let plays = actions.iter().filter(|a| a.is_play()).count();
        assert_eq!(plays, 6);
        for action in &actions {
            assert!(check(&s, action.clone()).is_ok(), "{action}");
        }
    }

    #[test]
    fn test_nothing_legal_outside_main_phase() {
        let reg = standard_registry();
        let rules = Ruleset::default();
        let validator = ActionValidator::new(EffectEngine::new(&reg, &rules));

        let mut s = state(3);
        s.phase = GamePhase::Mulligan;
        assert!(validator.legal_actions(&s).is_empty());
        assert_eq!(
            validator.validate(&s, &Action::EndTurn),
            Err(IllegalReason::WrongPhase("mulligan").into())
        );
    }

    #[test]
    fn test_frozen_minion_cannot_attack() {
        let reg = standard_registry();
        let mut s = state(0);
        let croc = place(&mut s, &reg, ME, catalog::RIVER_CROCOLISK);
        s.minion_mut(croc).unwrap().frozen = true;
        assert_eq!(
            check(&s, Action::attack(croc, EntityId::hero(THEM))),
            Err(IllegalReason::Frozen(croc).into())
        );
        s.minion_mut(croc).unwrap().keywords.insert(Keyword::Charge);
        assert!(check(&s, Action::attack(croc, EntityId::hero(THEM))).is_err());
    }
}
