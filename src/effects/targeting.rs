//! Effect targeting.
//!
//! - `Side`: friendly / enemy / either, relative to the effect's controller
//! - `TargetFilter`: which characters a selector may consider
//! - `TargetSelector`: how an effect binding picks its targets
//!
//! Legality rules:
//! - a chosen target must be a living character and may not be an enemy
//!   minion with stealth
//! - random selection skips characters already at 0 health or below, which
//!   are waiting for the death sweep
//! - all other selectors ignore stealth

use serde::{Deserialize, Serialize};

use super::aura;
use super::engine::EffectContext;
use crate::cards::{CardRegistry, Tribe, TribeSet};
use crate::core::{EntityId, GameState, PlayerId};

/// Side of the board relative to a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Any,
    Friendly,
    Enemy,
}

impl Side {
    /// Whether something owned by `owner` is on this side from `controller`'s view.
    #[must_use]
    pub fn admits(self, controller: PlayerId, owner: PlayerId) -> bool {
        match self {
            Side::Any => true,
            Side::Friendly => owner == controller,
            Side::Enemy => owner != controller,
        }
    }
}

/// Character category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Character,
    Minion,
    Hero,
}

/// Filter over characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetFilter {
    pub side: Side,
    pub kind: TargetKind,
    pub tribe: Option<Tribe>,
    pub exclude_source: bool,
}

impl TargetFilter {
    #[must_use]
    pub const fn new(side: Side, kind: TargetKind) -> Self {
        Self {
            side,
            kind,
            tribe: None,
            exclude_source: false,
        }
    }

    /// Any hero or minion.
    #[must_use]
    pub const fn any_character() -> Self {
        Self::new(Side::Any, TargetKind::Character)
    }

    #[must_use]
    pub const fn characters(side: Side) -> Self {
        Self::new(side, TargetKind::Character)
    }

    #[must_use]
    pub const fn minions(side: Side) -> Self {
        Self::new(side, TargetKind::Minion)
    }

    #[must_use]
    pub const fn with_tribe(mut self, tribe: Tribe) -> Self {
        self.tribe = Some(tribe);
        self
    }

    #[must_use]
    pub const fn excluding_source(mut self) -> Self {
        self.exclude_source = true;
        self
    }

    /// Whether `candidate` passes the filter. Says nothing about whether it
    /// is alive or targetable.
    #[must_use]
    pub fn admits(
        &self,
        state: &GameState,
        registry: &CardRegistry,
        controller: PlayerId,
        source: Option<EntityId>,
        candidate: EntityId,
    ) -> bool {
        if self.exclude_source && source == Some(candidate) {
            return false;
        }
        if let Some(owner) = candidate.as_hero() {
            return self.kind != TargetKind::Minion
                && self.tribe.is_none()
                && self.side.admits(controller, owner);
        }
        let Some(minion) = state.minion(candidate) else {
            return false;
        };
        if self.kind == TargetKind::Hero || !self.side.admits(controller, minion.owner) {
            return false;
        }
        match self.tribe {
            Some(tribe) => registry
                .get(minion.card)
                .is_some_and(|def| def.tribes.contains(tribe)),
            None => true,
        }
    }

    /// Minion-event form used by trigger matching, where the minion may
    /// already have left the board.
    #[must_use]
    pub fn admits_minion(
        &self,
        controller: PlayerId,
        source: EntityId,
        owner: PlayerId,
        minion: EntityId,
        tribes: TribeSet,
    ) -> bool {
        if self.exclude_source && source == minion {
            return false;
        }
        if self.kind == TargetKind::Hero || !self.side.admits(controller, owner) {
            return false;
        }
        self.tribe.map_or(true, |t| tribes.contains(t))
    }
}

/// How an effect binding picks its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSelector {
    /// The controller (player-level actions: draw, armor, mana, summon, equip).
    Controller,
    FriendlyHero,
    EnemyHero,
    /// The minion or weapon carrying the binding.
    Source,
    /// The target chosen when the card was played.
    Chosen(TargetFilter),
    /// Every matching character.
    All(TargetFilter),
    /// One random matching character, re-rolled for each repeat.
    Random(TargetFilter),
    /// Minions adjacent to the source.
    Adjacent,
    /// The entity the triggering event is about.
    Subject,
}

impl TargetSelector {
    /// Selectors that name a single specific target. When that target is
    /// missing the effect fizzles instead of silently doing nothing.
    #[must_use]
    pub fn is_single(self) -> bool {
        matches!(
            self,
            TargetSelector::Source
                | TargetSelector::Chosen(_)
                | TargetSelector::Random(_)
                | TargetSelector::Subject
        )
    }

    /// Resolve to concrete targets in application order.
    pub fn resolve(
        self,
        state: &mut GameState,
        registry: &CardRegistry,
        ctx: &EffectContext,
    ) -> Vec<EntityId> {
        let controller = ctx.controller;
        let alive = |state: &GameState, id: EntityId| state.is_character(id);

        match self {
            TargetSelector::Controller | TargetSelector::FriendlyHero => {
                vec![EntityId::hero(controller)]
            }
            TargetSelector::EnemyHero => vec![EntityId::hero(controller.opponent())],
            TargetSelector::Source => ctx
                .source
                .filter(|&id| alive(state, id))
                .into_iter()
                .collect(),
            TargetSelector::Chosen(_) => ctx
                .chosen
                .filter(|&id| alive(state, id))
                .into_iter()
                .collect(),
            TargetSelector::Subject => ctx
                .subject
                .filter(|&id| alive(state, id))
                .into_iter()
                .collect(),
            TargetSelector::All(filter) => {
                matching_characters(state, registry, controller, ctx.source, &filter)
            }
            TargetSelector::Random(filter) => {
                let pool: Vec<EntityId> =
                    matching_characters(state, registry, controller, ctx.source, &filter)
                        .into_iter()
                        .filter(|&id| !is_doomed(state, registry, id))
                        .collect();
                state
                    .rng
                    .pick_index(pool.len())
                    .map(|i| pool[i])
                    .into_iter()
                    .collect()
            }
            TargetSelector::Adjacent => {
                let Some(source) = ctx.source else {
                    return Vec::new();
                };
                match state.locate_minion(source) {
                    Some((owner, pos)) => state.player(owner).board.neighbor_ids(pos),
                    None => Vec::new(),
                }
            }
        }
    }
}

/// Characters in application order: the controller's hero and board left
/// to right, then the opponent's.
#[must_use]
pub fn matching_characters(
    state: &GameState,
    registry: &CardRegistry,
    controller: PlayerId,
    source: Option<EntityId>,
    filter: &TargetFilter,
) -> Vec<EntityId> {
    let mut out = Vec::new();
    for player in [controller, controller.opponent()] {
        let hero = EntityId::hero(player);
        if filter.admits(state, registry, controller, source, hero) {
            out.push(hero);
        }
        for minion in state.player(player).board.iter() {
            if filter.admits(state, registry, controller, source, minion.id) {
                out.push(minion.id);
            }
        }
    }
    out
}

/// Characters `controller` may pick for a chosen-target selector.
#[must_use]
pub fn legal_choices(
    state: &GameState,
    registry: &CardRegistry,
    controller: PlayerId,
    source: Option<EntityId>,
    filter: &TargetFilter,
) -> Vec<EntityId> {
    matching_characters(state, registry, controller, source, filter)
        .into_iter()
        .filter(|&id| is_targetable_by(state, controller, id))
        .collect()
}

/// Stealth hides enemy minions from chosen targeting.
#[must_use]
pub fn is_targetable_by(state: &GameState, controller: PlayerId, id: EntityId) -> bool {
    match state.minion(id) {
        Some(m) => m.owner == controller || !m.is_stealthed(),
        None => id.is_hero(),
    }
}

/// A character at 0 health or below that has not yet been swept.
#[must_use]
pub fn is_doomed(state: &GameState, registry: &CardRegistry, id: EntityId) -> bool {
    if let Some(player) = id.as_hero() {
        return state.player(player).hero.is_dead();
    }
    match aura::stats_of(state, registry, id) {
        Some(stats) => stats.health <= 0 || state.minion(id).is_some_and(|m| m.destroyed),
        None => true,
    }
}
