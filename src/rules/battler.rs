//! The action pipeline.
//!
//! `Battler` owns the card pool and ruleset and drives a `GameState` through
//! the game: setup and mulligan, then one action at a time.
//!
//! ## Submitting an action
//!
//! 1. `ActionValidator` checks it against the untouched state.
//! 2. It is applied to a clone: card play or hero power through the
//!    `EffectEngine`, attacks through the `CombatResolver`, turn changes
//!    here. Every cascade runs to a fixpoint, death sweeps included.
//! 3. The `SecretResolver` checks the opponent's secrets against the
//!    events of the action.
//! 4. Dead heroes end the game.
//! 5. Invariants are checked, the action is recorded and the clone
//!    replaces the caller's state.
//!
//! Any error leaves the caller's state exactly as it was.

use im::Vector;
use tracing::{debug, error, warn};

use crate::cards::catalog;
use crate::cards::{CardId, CardKind, CardRegistry, HeroClass, Secret};
use crate::combat::CombatResolver;
use crate::core::{
    Action, EngineError, EntityId, GamePhase, GameState, IllegalReason, PlayerId, Result, Ruleset,
};
use crate::effects::{aura, EffectContext, EffectEngine};
use crate::search::{self, TurnSearch};
use crate::secrets::SecretResolver;
use crate::triggers::{GameEvent, TriggerKind};

use super::engine::{GameResult, RulesEngine};
use super::snapshot::Snapshot;
use super::validator::ActionValidator;

/// Rules, card pool and the action pipeline.
///
/// ## Example
///
/// ```
/// use battler_core::cards::{catalog, HeroClass};
/// use battler_core::core::{Action, PlayerId};
/// use battler_core::rules::Battler;
///
/// let battler = Battler::standard();
/// let mut state = battler
///     .new_game(
///         [catalog::basic_deck(), catalog::basic_deck()],
///         [HeroClass::Warrior, HeroClass::Mage],
///         42,
///     )
///     .unwrap();
///
/// battler.mulligan(&mut state, PlayerId::new(0), &[]).unwrap();
/// battler.mulligan(&mut state, PlayerId::new(1), &[0]).unwrap();
/// assert_eq!(state.turn, 1);
///
/// battler.submit_action(&mut state, &Action::EndTurn).unwrap();
/// assert_eq!(state.active_player, PlayerId::new(1));
/// ```
#[derive(Clone, Debug)]
pub struct Battler {
    registry: CardRegistry,
    ruleset: Ruleset,
}

impl Battler {
    #[must_use]
    pub fn new(registry: CardRegistry, ruleset: Ruleset) -> Self {
        Self { registry, ruleset }
    }

    /// The standard card pool under default rules.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(catalog::standard_registry(), Ruleset::default())
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    #[must_use]
    pub fn engine(&self) -> EffectEngine<'_> {
        EffectEngine::new(&self.registry, &self.ruleset)
    }

    #[must_use]
    pub fn validator(&self) -> ActionValidator<'_> {
        ActionValidator::new(self.engine())
    }

    #[must_use]
    pub fn combat(&self) -> CombatResolver<'_> {
        CombatResolver::new(self.engine())
    }

    #[must_use]
    pub fn secrets(&self) -> SecretResolver<'_> {
        SecretResolver::new(self.engine())
    }

    // === Game setup ===

    /// Validate both decks, shuffle them and deal opening hands.
    ///
    /// The game starts in the mulligan phase.
    pub fn new_game(&self, decks: [Vec<CardId>; 2], heroes: [HeroClass; 2], seed: u64) -> Result<GameState> {
        for (player, deck) in PlayerId::all().zip(&decks) {
            self.registry.validate_deck(player, deck, &self.ruleset)?;
        }

        let mut state = GameState::new(seed, heroes, self.ruleset.starting_health);
        for (player, deck) in PlayerId::all().zip(decks) {
            let mut deck: Vector<CardId> = deck.into_iter().collect();
            state.rng.shuffle_vector(&mut deck);
            state.player_mut(player).deck = deck;
        }

        let engine = self.engine();
        for player in PlayerId::all() {
            for _ in 0..self.ruleset.opening_hand(player != PlayerId::FIRST) {
                engine.draw(&mut state, player);
            }
        }

        debug!(seed, ?heroes, "game created");
        Ok(state)
    }

    /// Replace the opening cards at `replace` (hand indices) once.
    ///
    /// Replacements are drawn before the returned cards are shuffled back,
    /// so a card is never redrawn in its own place. When both players are
    /// done, the second player receives The Coin and turn 1 begins.
    pub fn mulligan(&self, state: &mut GameState, player: PlayerId, replace: &[usize]) -> Result<Vec<GameEvent>> {
        if state.phase != GamePhase::Mulligan {
            return Err(IllegalReason::WrongPhase(state.phase.name()).into());
        }
        if state.player(player).mulliganed {
            return Err(IllegalReason::AlreadyMulliganed(player).into());
        }
        let mut indices = replace.to_vec();
        indices.sort_unstable();
        indices.dedup();
        let hand_len = state.player(player).hand.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= hand_len) {
            return Err(IllegalReason::NoSuchCard(bad).into());
        }

        let mut next = state.clone();
        let engine = self.engine();

        let returned: Vec<CardId> = indices
            .iter()
            .rev()
            .map(|&i| next.player_mut(player).hand.remove(i))
            .collect();
        for _ in &returned {
            engine.draw(&mut next, player);
        }
        let GameState { players, rng, .. } = &mut next;
        let ps = &mut players[player];
        ps.deck.extend(returned);
        rng.shuffle_vector(&mut ps.deck);
        ps.mulliganed = true;

        debug!(%player, replaced = indices.len(), "mulligan");
        let mut events = vec![GameEvent::MulliganDone {
            player,
            replaced: indices.len(),
        }];

        if PlayerId::all().all(|p| next.player(p).mulliganed) {
            if self.ruleset.coin_for_second_player && self.registry.contains(catalog::THE_COIN) {
                next.player_mut(PlayerId::SECOND).hand.push_back(catalog::THE_COIN);
            }
            next.phase = GamePhase::Main;
            next.active_player = PlayerId::FIRST;
            events.extend(self.start_turn(&mut next)?);
            self.finish(&mut next, &mut events);
            self.check_invariants(&next)?;
        }

        *state = next;
        Ok(events)
    }

    // === Actions ===

    /// Every legal action for the active player.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        self.validator().legal_actions(state)
    }

    /// Validate and apply one action for the active player.
    ///
    /// Returns every event the action produced, secret reveals included.
    pub fn submit_action(&self, state: &mut GameState, action: &Action) -> Result<Vec<GameEvent>> {
        self.validator().validate(state, action)?;
        let actor = state.active_player;
        debug!(player = %actor, %action, "action submitted");

        let mut next = state.clone();
        let mut events = self.apply_validated(&mut next, action)?;
        let revealed = self.secrets().resolve(&mut next, actor, &events)?;
        events.extend(revealed);
        self.finish(&mut next, &mut events);
        self.check_invariants(&next)?;

        next.record(actor, action.clone());
        *state = next;
        Ok(events)
    }

    fn apply_validated(&self, state: &mut GameState, action: &Action) -> Result<Vec<GameEvent>> {
        match *action {
            Action::PlayCard {
                hand_index,
                target,
                position,
            } => self.play_card(state, hand_index, target, position),
            Action::Attack { attacker, defender } => self.combat().attack(state, attacker, defender),
            Action::UseHeroPower { target } => self.use_hero_power(state, target),
            Action::EndTurn => self.end_turn(state),
        }
    }

    fn play_card(
        &self,
        state: &mut GameState,
        hand_index: usize,
        target: Option<EntityId>,
        position: Option<usize>,
    ) -> Result<Vec<GameEvent>> {
        let engine = self.engine();
        let player = state.active_player;
        if hand_index >= state.player(player).hand.len() {
            error!(hand_index, "validated card left the hand");
            return Err(EngineError::InvariantViolation(format!("no card at hand index {hand_index}")));
        }
        let card = state.player_mut(player).hand.remove(hand_index);
        let def = self.registry.get(card).ok_or_else(|| {
            error!(%card, "validated card is not registered");
            EngineError::InvariantViolation(format!("{card} is not registered"))
        })?;
        state.player_mut(player).spend_mana(def.cost);
        let card_type = def.card_type();
        let played = |entity| GameEvent::CardPlayed {
            player,
            card,
            card_type,
            entity,
        };

        match &def.kind {
            CardKind::Minion { .. } => {
                let at = position.unwrap_or(state.player(player).board.len());
                let Some((minion, summoned)) = engine.summon(state, player, card, at)? else {
                    error!(%card, "validated minion found a full board");
                    return Err(EngineError::InvariantViolation("board full on play".into()));
                };
                let mut events = engine.resolve_all(state, [played(Some(minion)), summoned])?;
                let ctx = EffectContext::new(player, card)
                    .with_source(minion)
                    .with_chosen(target);
                let battlecry = engine.run_bindings(state, ctx, TriggerKind::Battlecry)?;
                events.extend(engine.resolve_all(state, battlecry)?);
                Ok(events)
            }
            CardKind::Spell => {
                let mut events = engine.resolve(state, played(None))?;
                let ctx = EffectContext::new(player, card).with_chosen(target).spell();
                let cast = engine.run_bindings(state, ctx, TriggerKind::Cast)?;
                state.player_mut(player).graveyard.push_back(card);
                events.extend(engine.resolve_all(state, cast)?);
                Ok(events)
            }
            CardKind::Weapon { .. } => {
                let equipped = engine.equip(state, player, card)?;
                let weapon = state.player(player).weapon.as_ref().map(|w| w.id);
                let mut produced = vec![played(weapon)];
                produced.extend(equipped);
                let mut events = engine.resolve_all(state, produced)?;
                let mut ctx = EffectContext::new(player, card).with_chosen(target);
                if let Some(id) = weapon {
                    ctx = ctx.with_source(id);
                }
                let battlecry = engine.run_bindings(state, ctx, TriggerKind::Battlecry)?;
                events.extend(engine.resolve_all(state, battlecry)?);
                Ok(events)
            }
            CardKind::Secret { .. } => {
                let id = state.alloc_entity();
                state.player_mut(player).secrets.push_back(Secret { id, card });
                engine.resolve_all(
                    state,
                    [played(Some(id)), GameEvent::SecretPlayed { player, secret: id }],
                )
            }
            CardKind::HeroPower => {
                error!(%card, "hero power played from hand");
                Err(EngineError::InvariantViolation(format!("{card} played from hand")))
            }
        }
    }

    fn use_hero_power(&self, state: &mut GameState, target: Option<EntityId>) -> Result<Vec<GameEvent>> {
        let engine = self.engine();
        let player = state.active_player;
        let card = state.player(player).hero.class.hero_power();

        let ps = state.active_mut();
        ps.spend_mana(self.ruleset.hero_power_cost);
        ps.hero.power_used = true;

        let ctx = EffectContext::new(player, card).with_chosen(target);
        let mut produced = vec![GameEvent::HeroPowerUsed { player, card }];
        produced.extend(engine.run_bindings(state, ctx, TriggerKind::Cast)?);
        engine.resolve_all(state, produced)
    }

    fn end_turn(&self, state: &mut GameState) -> Result<Vec<GameEvent>> {
        let player = state.active_player;
        let mut events = self.engine().resolve(state, GameEvent::TurnEnded { player })?;

        // Characters that sat out a whole turn frozen thaw now.
        let ps = state.active_mut();
        if ps.hero.frozen && ps.hero.attacks_this_turn == 0 {
            ps.hero.frozen = false;
        }
        for m in ps.board.iter_mut() {
            if m.frozen && m.attacks_this_turn == 0 {
                m.frozen = false;
            }
        }

        if GameResult::from_state(state).is_some() {
            return Ok(events);
        }
        state.active_player = player.opponent();
        events.extend(self.start_turn(state)?);
        Ok(events)
    }

    fn start_turn(&self, state: &mut GameState) -> Result<Vec<GameEvent>> {
        let engine = self.engine();
        let player = state.active_player;
        if player == PlayerId::FIRST {
            state.turn += 1;
        }
        let turn = state.turn;

        let ps = state.active_mut();
        ps.max_mana = ps.max_mana.saturating_add(1).min(self.ruleset.max_mana);
        ps.mana = ps.max_mana;
        ps.mana_spent = 0;
        ps.hero.attacks_this_turn = 0;
        ps.hero.power_used = false;
        for m in ps.board.iter_mut() {
            m.ready();
        }
        debug!(%player, turn, mana = ps.mana, "turn started");

        let mut produced = vec![GameEvent::TurnStarted { player, turn }];
        produced.extend(engine.draw(state, player));
        engine.resolve_all(state, produced)
    }

    /// Settle the game result once a hero has died.
    fn finish(&self, state: &mut GameState, events: &mut Vec<GameEvent>) {
        if state.is_over() {
            return;
        }
        if let Some(result) = GameResult::from_state(state) {
            debug!(%result, turn = state.turn, "game over");
            state.result = Some(result);
            state.phase = GamePhase::Over;
            events.push(GameEvent::GameOver { result });
        }
    }

    /// Structural checks plus the ones that need card data: no minion may
    /// be left on the board at 0 health or marked destroyed.
    fn check_invariants(&self, state: &GameState) -> Result<()> {
        state.check_structure(&self.ruleset)?;
        for (player, ps) in state.players.iter() {
            for (position, m) in ps.board.iter().enumerate() {
                let lethal = aura::minion_stats(&ps.board, position, &self.registry)
                    .is_some_and(|s| s.health <= 0);
                if m.destroyed || lethal {
                    error!(%player, minion = %m.id, "dead minion left on the board");
                    return Err(EngineError::InvariantViolation(format!(
                        "{} survived the death sweep",
                        m.id
                    )));
                }
            }
        }
        Ok(())
    }

    // === Views ===

    /// Read-only view of the game for `viewer`.
    #[must_use]
    pub fn snapshot(&self, state: &GameState, viewer: PlayerId) -> Snapshot {
        Snapshot::capture(state, &self.registry, viewer)
    }

    // === AI ===

    /// Mulligan with the search module's keep rule.
    pub fn ai_mulligan(&self, state: &mut GameState, player: PlayerId) -> Result<Vec<GameEvent>> {
        let replace = search::mulligan_choices(state, &self.registry, player);
        self.mulligan(state, player, &replace)
    }

    /// Plan the active player's turn and commit it.
    ///
    /// A planned step that is no longer legal (a random effect landed
    /// differently than in planning) stops the plan; the turn then ends.
    pub fn play_ai_turn(&self, state: &mut GameState, search: &TurnSearch) -> Result<Vec<GameEvent>> {
        let actor = state.active_player;
        let plan = search.choose_turn(self, state)?;
        let mut events = Vec::new();

        for action in &plan.actions {
            if state.is_over() || state.active_player != actor {
                break;
            }
            match self.submit_action(state, action) {
                Ok(produced) => events.extend(produced),
                Err(err) if err.is_recoverable() => {
                    warn!(player = %actor, %action, %err, "planned action no longer legal");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        if !state.is_over() && state.active_player == actor {
            events.extend(self.submit_action(state, &Action::EndTurn)?);
        }
        Ok(events)
    }

    // === Scenario setup ===

    /// A game already in turn 1 of the main phase with empty zones and no
    /// mana. For puzzles and tests.
    #[must_use]
    pub fn sandbox(&self, heroes: [HeroClass; 2], seed: u64) -> GameState {
        let mut state = GameState::new(seed, heroes, self.ruleset.starting_health);
        state.phase = GamePhase::Main;
        state.turn = 1;
        for player in PlayerId::all() {
            state.player_mut(player).mulliganed = true;
        }
        state
    }

    /// Put a card into a hand, bypassing the hand limit.
    pub fn put_in_hand(&self, state: &mut GameState, player: PlayerId, card: CardId) {
        state.player_mut(player).hand.push_back(card);
    }

    /// Put a minion at the right end of a board, ready to attack.
    pub fn place_minion(&self, state: &mut GameState, player: PlayerId, card: CardId) -> Result<EntityId> {
        let end = state.player(player).board.len();
        let (id, _) = self
            .engine()
            .summon(state, player, card, end)?
            .ok_or(IllegalReason::BoardFull)?;
        if let Some(m) = state.minion_mut(id) {
            m.ready();
        }
        Ok(id)
    }

    /// Set a player's available and maximum mana, capped at the ruleset's
    /// crystal limit.
    pub fn set_mana(&self, state: &mut GameState, player: PlayerId, mana: u8) {
        let ps = state.player_mut(player);
        ps.max_mana = mana.min(self.ruleset.max_mana);
        ps.mana = ps.max_mana;
    }
}

impl RulesEngine for Battler {
    fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        self.validator().legal_actions(state)
    }

    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<Vec<GameEvent>> {
        self.submit_action(state, action)
    }
}
