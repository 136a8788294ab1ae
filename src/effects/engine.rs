//! The effect engine.
//!
//! `EffectEngine` interprets effect bindings against a `GameState` and runs
//! every event cascade to a fixpoint:
//!
//! 1. Events waiting in `state.pending` are taken as one generation.
//! 2. Each event is dispatched in order: a dying minion's own deathrattle
//!    first, then every listening binding on the table (active player's
//!    weapon and board left to right, then the opponent's).
//! 3. The events those effects produce become the next generation, followed
//!    by whatever the death sweep removes.
//! 4. The loop ends when a generation is empty and the sweep finds nobody.
//!
//! Nothing dies in the middle of a generation: a minion at 0 health keeps
//! its place (and its triggers) until the sweep that follows the batch that
//! hurt it.
//!
//! A deathrattle summons into the gap its minion left. The gap is found from
//! the surviving left neighbour, so summons elsewhere on the board do not
//! move it.

use smallvec::SmallVec;
use tracing::{debug, error, trace, warn};

use super::aura;
use super::effect::{EffectAction, EffectBinding};
use super::targeting::TargetSelector;
use crate::cards::{CardId, CardRegistry, Keyword, Minion, Weapon};
use crate::core::{EngineError, EntityId, GameState, PlayerId, Result, Ruleset};
use crate::triggers::{GameEvent, Listener, TriggerKind};

/// Generations one cascade may take before it is treated as a runaway loop.
pub const MAX_GENERATIONS: usize = 256;

/// Where an effect comes from and what it may refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectContext {
    /// The player the effect acts for.
    pub controller: PlayerId,
    /// The card carrying the bindings.
    pub card: CardId,
    /// The minion, weapon or secret carrying the bindings, if on the table.
    pub source: Option<EntityId>,
    /// Target chosen on play.
    pub chosen: Option<EntityId>,
    /// The entity the triggering event is about.
    pub subject: Option<EntityId>,
    pub subject_card: Option<CardId>,
    /// Board slot for summons (a dead minion's old position).
    pub anchor: Option<usize>,
    /// Spell damage applies.
    pub from_spell: bool,
}

impl EffectContext {
    #[must_use]
    pub fn new(controller: PlayerId, card: CardId) -> Self {
        Self {
            controller,
            card,
            source: None,
            chosen: None,
            subject: None,
            subject_card: None,
            anchor: None,
            from_spell: false,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_chosen(mut self, chosen: Option<EntityId>) -> Self {
        self.chosen = chosen;
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: Option<EntityId>, card: Option<CardId>) -> Self {
        self.subject = subject;
        self.subject_card = card;
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, position: usize) -> Self {
        self.anchor = Some(position);
        self
    }

    #[must_use]
    pub fn spell(mut self) -> Self {
        self.from_spell = true;
        self
    }
}

/// Outcome of one damage instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hit {
    /// Health actually lost.
    pub dealt: i32,
    /// A divine shield took the hit.
    pub absorbed: bool,
}

/// Interprets effect bindings over a game state.
///
/// Holds no state of its own; it borrows the card pool and rules so that
/// many engines (one per search branch) can share them.
#[derive(Clone, Copy, Debug)]
pub struct EffectEngine<'a> {
    pub registry: &'a CardRegistry,
    pub ruleset: &'a Ruleset,
}

impl<'a> EffectEngine<'a> {
    #[must_use]
    pub fn new(registry: &'a CardRegistry, ruleset: &'a Ruleset) -> Self {
        Self { registry, ruleset }
    }

    // === Cascade ===

    /// Resolve one event and everything it causes.
    pub fn resolve(&self, state: &mut GameState, event: GameEvent) -> Result<Vec<GameEvent>> {
        self.resolve_all(state, [event])
    }

    /// Queue `events` and run the cascade to a fixpoint.
    ///
    /// Returns every event resolved, in resolution order, starting with the
    /// ones passed in.
    pub fn resolve_all(
        &self,
        state: &mut GameState,
        events: impl IntoIterator<Item = GameEvent>,
    ) -> Result<Vec<GameEvent>> {
        state.pending.extend(events);
        let mut resolved = Vec::new();

        for generation in 0.. {
            if generation >= MAX_GENERATIONS {
                error!(generation, "effect cascade did not settle");
                return Err(EngineError::InvariantViolation(format!(
                    "effect cascade exceeded {MAX_GENERATIONS} generations"
                )));
            }

            if state.pending.is_empty() {
                let deaths = self.death_sweep(state);
                if deaths.is_empty() {
                    break;
                }
                state.pending.extend(deaths);
                continue;
            }

            let batch = std::mem::take(&mut state.pending);
            // Surviving left neighbour of each death, read before anything
            // in this batch summons.
            let lefts: Vec<Option<EntityId>> = batch.iter().map(|e| self.left_of_gap(state, e)).collect();
            // Deathrattle summons already placed in each gap of this batch.
            let mut filled: SmallVec<[(PlayerId, Option<EntityId>, usize); 4]> = SmallVec::new();
            let mut next = Vec::new();

            for (event, left) in batch.into_iter().zip(lefts) {
                trace!(generation, %event, "resolving");
                if let GameEvent::MinionDied { player, position, .. } = event {
                    let slot = filled.iter().position(|&(p, l, _)| p == player && l == left);
                    let board = &state.player(player).board;
                    let gap = match left {
                        Some(id) => board.position_of(id).map_or(position.min(board.len()), |p| p + 1),
                        None => 0,
                    };
                    let before = board.len();
                    let anchor = gap + slot.map_or(0, |i| filled[i].2);
                    next.extend(self.deathrattle(state, &event, anchor)?);
                    let added = state.player(player).board.len().saturating_sub(before);
                    match slot {
                        Some(i) => filled[i].2 += added,
                        None => filled.push((player, left, added)),
                    }
                }
                next.extend(self.dispatch(state, &event)?);
                resolved.push(event);
            }

            next.extend(self.death_sweep(state));
            state.pending.extend(next);
        }

        Ok(resolved)
    }

    /// The minion left of the gap a death leaves, if any.
    fn left_of_gap(&self, state: &GameState, event: &GameEvent) -> Option<EntityId> {
        let GameEvent::MinionDied { player, position, .. } = *event else {
            return None;
        };
        let left = position.checked_sub(1)?;
        state.player(player).board.get(left).map(|m| m.id)
    }

    /// Run the deathrattles of a dead, unsilenced minion with summons placed
    /// from `anchor`.
    fn deathrattle(&self, state: &mut GameState, event: &GameEvent, anchor: usize) -> Result<Vec<GameEvent>> {
        let GameEvent::MinionDied {
            player,
            minion,
            card,
            silenced: false,
            ..
        } = *event
        else {
            return Ok(Vec::new());
        };
        let ctx = EffectContext::new(player, card).with_source(minion).with_anchor(anchor);
        self.run_bindings(state, ctx, TriggerKind::Deathrattle)
    }

    /// Fire every listener `event` triggers. Produced events are returned,
    /// not resolved.
    fn dispatch(&self, state: &mut GameState, event: &GameEvent) -> Result<Vec<GameEvent>> {
        let mut out = Vec::new();

        for listener in self.listeners(state) {
            if !self.still_listening(state, &listener) {
                continue;
            }
            let Some(def) = self.registry.get(listener.card) else {
                continue;
            };
            let ctx = EffectContext::new(listener.owner, listener.card)
                .with_source(listener.entity)
                .with_subject(event.subject(), event.card());

            for binding in def
                .effects
                .iter()
                .filter(|b| !b.trigger.is_direct() && b.trigger.matches(event, &listener, self.registry))
            {
                trace!(card = %listener.card, source = %listener.entity, event = event.name(), "trigger fired");
                let mut ctx = ctx;
                out.extend(self.run_binding(state, &mut ctx, binding)?);
            }
        }

        Ok(out)
    }

    /// Table entities with listening bindings, in trigger order.
    fn listeners(&self, state: &GameState) -> SmallVec<[Listener; 16]> {
        let mut out = SmallVec::new();
        for player in state.turn_order() {
            let ps = state.player(player);
            if let Some(w) = &ps.weapon {
                out.push(Listener {
                    entity: w.id,
                    owner: player,
                    card: w.card,
                });
            }
            for m in ps.board.iter().filter(|m| !m.silenced) {
                out.push(Listener {
                    entity: m.id,
                    owner: player,
                    card: m.card,
                });
            }
        }
        out
    }

    fn still_listening(&self, state: &GameState, listener: &Listener) -> bool {
        match state.minion(listener.entity) {
            Some(m) => !m.silenced,
            None => state
                .player(listener.owner)
                .weapon
                .as_ref()
                .is_some_and(|w| w.id == listener.entity),
        }
    }

    // === Bindings ===

    /// Run every binding of `ctx.card` with the given trigger.
    pub fn run_bindings(
        &self,
        state: &mut GameState,
        mut ctx: EffectContext,
        trigger: TriggerKind,
    ) -> Result<Vec<GameEvent>> {
        let Some(def) = self.registry.get(ctx.card) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        for binding in def.bindings_for(trigger) {
            out.extend(self.run_binding(state, &mut ctx, binding)?);
        }
        Ok(out)
    }

    /// Run one binding: resolve its selector and apply its action, once per
    /// repeat.
    pub fn run_binding(
        &self,
        state: &mut GameState,
        ctx: &mut EffectContext,
        binding: &EffectBinding,
    ) -> Result<Vec<GameEvent>> {
        let bonus = if ctx.from_spell {
            aura::spell_damage(state, ctx.controller)
        } else {
            0
        };

        // Spell damage adds a missile to random volleys and damage to
        // everything else.
        let (repeat, action) = match (&binding.action, binding.selector) {
            (EffectAction::Damage(n), TargetSelector::Random(_)) if binding.repeat > 1 => {
                (i32::from(binding.repeat) + bonus, EffectAction::Damage(*n))
            }
            (EffectAction::Damage(n), _) => (i32::from(binding.repeat), EffectAction::Damage(n + bonus)),
            (other, _) => (i32::from(binding.repeat), other.clone()),
        };

        let mut out = Vec::new();
        for _ in 0..repeat {
            let targets = binding.selector.resolve(state, self.registry, ctx);
            if targets.is_empty() {
                if binding.selector.is_single() {
                    warn!(card = %ctx.card, selector = ?binding.selector, "effect fizzled");
                    out.push(GameEvent::EffectFizzled {
                        card: ctx.card,
                        source: ctx.source,
                    });
                }
                break;
            }
            for target in targets {
                out.extend(self.apply(state, ctx, &action, target)?);
            }
        }
        Ok(out)
    }

    /// Apply an action to one target.
    pub fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut EffectContext,
        action: &EffectAction,
        target: EntityId,
    ) -> Result<Vec<GameEvent>> {
        let Some(owner) = state.owner_of(target) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();

        match action {
            EffectAction::Damage(amount) => {
                let (_, events) = self.deal_damage(state, ctx.source, target, *amount);
                out.extend(events);
            }
            EffectAction::Heal(amount) => out.extend(self.heal(state, target, *amount)),
            EffectAction::Buff { attack, health } => {
                if let Some(m) = state.minion_mut(target) {
                    m.attack += attack;
                    m.max_health += health;
                    out.push(GameEvent::Buffed {
                        target,
                        attack: *attack,
                        health: *health,
                    });
                }
            }
            EffectAction::Freeze => out.extend(self.freeze(state, target)),
            EffectAction::Silence => {
                if let Some(m) = state.minion_mut(target) {
                    m.silence();
                    out.push(GameEvent::Silenced { target });
                }
            }
            EffectAction::GrantKeyword(keyword) => {
                if let Some(m) = state.minion_mut(target) {
                    m.keywords.insert(*keyword);
                    out.push(GameEvent::KeywordGained {
                        target,
                        keyword: *keyword,
                    });
                }
            }
            EffectAction::Destroy => {
                if let Some(m) = state.minion_mut(target) {
                    m.destroyed = true;
                    out.push(GameEvent::MinionDestroyed { target });
                }
            }
            EffectAction::Draw(count) => {
                for _ in 0..*count {
                    out.extend(self.draw(state, owner));
                }
            }
            EffectAction::GainArmor(amount) => {
                state.player_mut(owner).hero.armor += amount;
                out.push(GameEvent::ArmorGained {
                    player: owner,
                    amount: *amount,
                });
            }
            EffectAction::GainMana(amount) => {
                let ps = state.player_mut(owner);
                let cap = ps.max_mana.saturating_add(1);
                let gained = (*amount).min(cap.saturating_sub(ps.mana));
                ps.mana += gained;
                out.push(GameEvent::ManaGained {
                    player: owner,
                    amount: gained,
                });
            }
            EffectAction::Summon { card, count } => {
                for _ in 0..*count {
                    match self.summon_for(state, ctx, owner, *card)? {
                        Some(event) => out.push(event),
                        None => break,
                    }
                }
            }
            EffectAction::SummonCopy { health } => {
                let Some(card) = ctx.subject_card.filter(|c| !c.is_unknown()) else {
                    return Ok(out);
                };
                if let Some(event) = self.summon_for(state, ctx, owner, card)? {
                    if let (Some(h), GameEvent::MinionSummoned { minion, .. }) = (health, &event) {
                        if let Some(m) = state.minion_mut(*minion) {
                            m.damage = (m.max_health - h).max(0);
                        }
                    }
                    out.push(event);
                }
            }
            EffectAction::Equip(card) => out.extend(self.equip(state, owner, *card)?),
        }

        Ok(out)
    }

    /// Summon for an effect: at the anchor, else right of the source, else
    /// at the right end. Advances the anchor so repeated summons line up
    /// left to right.
    fn summon_for(
        &self,
        state: &mut GameState,
        ctx: &mut EffectContext,
        owner: PlayerId,
        card: CardId,
    ) -> Result<Option<GameEvent>> {
        let board = &state.player(owner).board;
        let position = match (ctx.anchor, ctx.source.and_then(|s| board.position_of(s))) {
            (Some(anchor), _) if owner == ctx.controller => anchor,
            (_, Some(source_pos)) => source_pos + 1,
            _ => board.len(),
        };
        let Some((minion, event)) = self.summon(state, owner, card, position)? else {
            return Ok(None);
        };
        if owner == ctx.controller {
            if let Some((_, at)) = state.locate_minion(minion) {
                ctx.anchor = Some(at + 1);
            }
        }
        Ok(Some(event))
    }

    // === Primitives ===

    /// Deal one instance of damage.
    ///
    /// A divine shield absorbs the whole instance and is cleared. Heroes lose
    /// armor before health. `DamageDealt` is only reported when health was
    /// lost.
    pub fn deal_damage(
        &self,
        state: &mut GameState,
        source: Option<EntityId>,
        target: EntityId,
        amount: i32,
    ) -> (Hit, SmallVec<[GameEvent; 2]>) {
        let mut events = SmallVec::new();
        if amount <= 0 {
            return (Hit::default(), events);
        }

        let hit = if let Some(player) = target.as_hero() {
            let lost = state.player_mut(player).hero.take_damage(amount);
            Hit {
                dealt: lost,
                absorbed: false,
            }
        } else if let Some(m) = state.minion_mut(target) {
            if m.has_divine_shield() {
                m.keywords.remove(Keyword::DivineShield);
                events.push(GameEvent::DivineShieldLost { target });
                return (
                    Hit {
                        dealt: 0,
                        absorbed: true,
                    },
                    events,
                );
            }
            m.damage += amount;
            Hit {
                dealt: amount,
                absorbed: false,
            }
        } else {
            return (Hit::default(), events);
        };

        if hit.dealt > 0 {
            events.push(GameEvent::DamageDealt {
                source,
                target,
                amount: hit.dealt,
            });
        }
        (hit, events)
    }

    /// Restore health up to the character's maximum.
    pub fn heal(&self, state: &mut GameState, target: EntityId, amount: i32) -> Option<GameEvent> {
        let restored = if let Some(player) = target.as_hero() {
            state.player_mut(player).hero.heal(amount)
        } else {
            let m = state.minion_mut(target)?;
            let restored = amount.min(m.damage).max(0);
            m.damage -= restored;
            restored
        };
        (restored > 0).then_some(GameEvent::Healed {
            target,
            amount: restored,
        })
    }

    pub fn freeze(&self, state: &mut GameState, target: EntityId) -> Option<GameEvent> {
        if let Some(player) = target.as_hero() {
            state.player_mut(player).hero.frozen = true;
        } else {
            state.minion_mut(target)?.frozen = true;
        }
        Some(GameEvent::Frozen { target })
    }

    /// Put a new minion on `owner`'s board at `position` (clamped).
    ///
    /// Returns `None` when the board is full; the summon is skipped.
    pub fn summon(
        &self,
        state: &mut GameState,
        owner: PlayerId,
        card: CardId,
        position: usize,
    ) -> Result<Option<(EntityId, GameEvent)>> {
        if state.player(owner).board.len() >= self.ruleset.max_board {
            debug!(%owner, %card, "board full, summon skipped");
            return Ok(None);
        }
        let def = self.registry.get(card).ok_or_else(|| {
            error!(%card, "summon of an unregistered card");
            EngineError::InvariantViolation(format!("summon of unregistered {card}"))
        })?;
        let id = state.alloc_entity();
        let minion = Minion::from_card(id, owner, def).ok_or_else(|| {
            error!(%card, "summon of a non-minion card");
            EngineError::InvariantViolation(format!("{card} is not a minion"))
        })?;
        state.player_mut(owner).board.insert(position, minion);
        Ok(Some((
            id,
            GameEvent::MinionSummoned {
                player: owner,
                minion: id,
                card,
            },
        )))
    }

    /// Equip a weapon, sending any previous weapon to the graveyard.
    pub fn equip(&self, state: &mut GameState, owner: PlayerId, card: CardId) -> Result<Vec<GameEvent>> {
        let def = self.registry.get(card).ok_or_else(|| {
            error!(%card, "equip of an unregistered card");
            EngineError::InvariantViolation(format!("equip of unregistered {card}"))
        })?;
        let id = state.alloc_entity();
        let weapon = Weapon::from_card(id, def).ok_or_else(|| {
            error!(%card, "equip of a non-weapon card");
            EngineError::InvariantViolation(format!("{card} is not a weapon"))
        })?;

        let mut out = Vec::new();
        let ps = state.player_mut(owner);
        if let Some(old) = ps.weapon.take() {
            ps.graveyard.push_back(old.card);
            out.push(GameEvent::WeaponDestroyed {
                player: owner,
                weapon: old.id,
                card: old.card,
            });
        }
        ps.weapon = Some(weapon);
        out.push(GameEvent::WeaponEquipped {
            player: owner,
            weapon: id,
            card,
        });
        Ok(out)
    }

    /// Draw the top card. A full hand burns it; an empty deck deals
    /// increasing fatigue damage.
    pub fn draw(&self, state: &mut GameState, player: PlayerId) -> SmallVec<[GameEvent; 2]> {
        let max_hand = self.ruleset.max_hand;
        let ps = state.player_mut(player);
        match ps.deck.pop_front() {
            Some(card) if ps.hand.len() >= max_hand => {
                ps.graveyard.push_back(card);
                debug!(%player, %card, "hand full, card burned");
                smallvec::smallvec![GameEvent::CardBurned { player, card }]
            }
            Some(card) => {
                ps.hand.push_back(card);
                smallvec::smallvec![GameEvent::CardDrawn { player, card }]
            }
            None => {
                ps.fatigue += 1;
                let amount = ps.fatigue;
                let mut events: SmallVec<[GameEvent; 2]> =
                    smallvec::smallvec![GameEvent::FatigueDamage { player, amount }];
                let (_, hits) = self.deal_damage(state, None, EntityId::hero(player), amount);
                events.extend(hits);
                events
            }
        }
    }

    // === Death ===

    /// Remove every minion at 0 health or marked destroyed.
    ///
    /// The dead are decided for a whole board before any are removed, so
    /// aura loss from one death cannot kill a neighbour in the same sweep;
    /// it shows up in the next one. Boards are swept in turn order, each
    /// left to right. A dead minion's reported position counts only the
    /// survivors to its left.
    pub fn death_sweep(&self, state: &mut GameState) -> Vec<GameEvent> {
        let mut events = Vec::new();

        for player in state.turn_order() {
            let board = &state.player(player).board;
            let dead: Vec<(usize, EntityId)> = board
                .iter()
                .enumerate()
                .filter(|(pos, m)| {
                    m.destroyed
                        || aura::minion_stats(board, *pos, self.registry)
                            .is_some_and(|s| s.health <= 0)
                })
                .map(|(pos, m)| (pos, m.id))
                .collect();

            for (removed, (pos, id)) in dead.into_iter().enumerate() {
                let ps = state.player_mut(player);
                let Some((_, minion)) = ps.board.remove(id) else {
                    continue;
                };
                ps.graveyard.push_back(minion.card);
                trace!(%player, minion = %id, "died");
                events.push(GameEvent::MinionDied {
                    player,
                    minion: id,
                    card: minion.card,
                    position: pos - removed,
                    silenced: minion.silenced,
                });
            }
        }

        events
    }
}
