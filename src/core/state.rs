//! Game state.
//!
//! ## PlayerState
//!
//! One player's half of the table: hero, mana, and the six zones.
//!
//! ## GameState
//!
//! Both players plus the active-player flag, turn counter, pending-event
//! queue, RNG and history. `GameState` is a plain value: every zone is an
//! `im` persistent structure, so `clone()` is O(1) and a clone shares no
//! mutable data with the original. AI search relies on this to branch
//! freely without touching the live game.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::action::{Action, ActionRecord};
use super::config::Ruleset;
use super::entity::EntityId;
use super::error::{EngineError, Result};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardId, Hero, HeroClass, Minion, Secret, Weapon};
use crate::rules::GameResult;
use crate::triggers::GameEvent;
use crate::zones::{Board, Zone};

/// Game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Opening hands dealt, waiting for both mulligans.
    Mulligan,
    /// Turns are being played.
    Main,
    /// A hero has died.
    Over,
}

impl GamePhase {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GamePhase::Mulligan => "mulligan",
            GamePhase::Main => "main",
            GamePhase::Over => "game over",
        }
    }
}

/// One player's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hero: Hero,

    /// Mana available this turn.
    pub mana: u8,
    /// Mana crystals.
    pub max_mana: u8,
    /// Damage the next empty-deck draw will deal.
    pub fatigue: i32,

    /// Top of deck is the front.
    pub deck: Vector<CardId>,
    pub hand: Vector<CardId>,
    pub board: Board,
    pub graveyard: Vector<CardId>,
    pub weapon: Option<Weapon>,
    /// Face-down secrets in the order they were played.
    pub secrets: Vector<Secret>,

    pub mulliganed: bool,
    /// Mana spent this turn.
    pub mana_spent: u8,
}

impl PlayerState {
    #[must_use]
    pub fn new(hero: Hero) -> Self {
        Self {
            hero,
            mana: 0,
            max_mana: 0,
            fatigue: 0,
            deck: Vector::new(),
            hand: Vector::new(),
            board: Board::new(),
            graveyard: Vector::new(),
            weapon: None,
            secrets: Vector::new(),
            mulliganed: false,
            mana_spent: 0,
        }
    }

    /// Number of cards or instances in a zone.
    #[must_use]
    pub fn zone_len(&self, zone: Zone) -> usize {
        match zone {
            Zone::Deck => self.deck.len(),
            Zone::Hand => self.hand.len(),
            Zone::Board => self.board.len(),
            Zone::Graveyard => self.graveyard.len(),
            Zone::WeaponSlot => usize::from(self.weapon.is_some()),
            Zone::SecretSlot => self.secrets.len(),
        }
    }

    /// Whether a secret with this card is already face-down.
    #[must_use]
    pub fn has_secret(&self, card: CardId) -> bool {
        self.secrets.iter().any(|s| s.card == card)
    }

    /// Spend mana, saturating at zero.
    pub fn spend_mana(&mut self, amount: u8) {
        let spent = amount.min(self.mana);
        self.mana -= spent;
        self.mana_spent = self.mana_spent.saturating_add(spent);
    }
}

/// Complete game state.
///
/// ## Example
///
/// ```
/// use battler_core::cards::HeroClass;
/// use battler_core::core::{GameState, PlayerId};
///
/// let state = GameState::new(42, [HeroClass::Mage, HeroClass::Warrior], 30);
/// let mut branch = state.clone();
/// branch.player_mut(PlayerId::new(1)).hero.health -= 5;
///
/// assert_eq!(state.player(PlayerId::new(1)).hero.health, 30);
/// assert_eq!(branch.player(PlayerId::new(1)).hero.health, 25);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<PlayerState>,
    pub active_player: PlayerId,
    /// Turn number; advances each time the first player starts a turn.
    pub turn: u32,
    pub phase: GamePhase,
    pub rng: GameRng,

    /// Events queued for the effect engine. Empty between actions.
    pub pending: Vector<GameEvent>,
    pub history: Vector<ActionRecord>,
    pub result: Option<GameResult>,

    next_entity_id: u32,
}

impl GameState {
    /// Create an empty game: heroes at full health, no cards anywhere.
    #[must_use]
    pub fn new(seed: u64, classes: [HeroClass; 2], starting_health: i32) -> Self {
        Self {
            players: PlayerMap::new(|p| {
                PlayerState::new(Hero::new(classes[p.index()], starting_health))
            }),
            active_player: PlayerId::FIRST,
            turn: 0,
            phase: GamePhase::Mulligan,
            rng: GameRng::new(seed),
            pending: Vector::new(),
            history: Vector::new(),
            result: None,
            next_entity_id: EntityId::first_non_hero(),
        }
    }

    // === Entities ===

    /// Allocate a new entity id.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// The id the next allocation will return.
    #[must_use]
    pub fn next_entity_id(&self) -> EntityId {
        EntityId(self.next_entity_id)
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    #[must_use]
    pub fn active(&self) -> &PlayerState {
        &self.players[self.active_player]
    }

    pub fn active_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.active_player]
    }

    /// The active player first, then the opponent.
    #[must_use]
    pub fn turn_order(&self) -> [PlayerId; 2] {
        [self.active_player, self.active_player.opponent()]
    }

    // === Minions ===

    /// Owner and board position of a minion.
    #[must_use]
    pub fn locate_minion(&self, id: EntityId) -> Option<(PlayerId, usize)> {
        self.players
            .iter()
            .find_map(|(p, ps)| ps.board.position_of(id).map(|pos| (p, pos)))
    }

    #[must_use]
    pub fn minion(&self, id: EntityId) -> Option<&Minion> {
        self.players.iter().find_map(|(_, ps)| ps.board.find(id))
    }

    pub fn minion_mut(&mut self, id: EntityId) -> Option<&mut Minion> {
        let (owner, _) = self.locate_minion(id)?;
        self.players[owner].board.find_mut(id)
    }

    /// Owner of a hero, minion, weapon or secret.
    #[must_use]
    pub fn owner_of(&self, id: EntityId) -> Option<PlayerId> {
        if let Some(player) = id.as_hero() {
            return Some(player);
        }
        self.players.iter().find_map(|(p, ps)| {
            let owns = ps.board.contains(id)
                || ps.weapon.as_ref().is_some_and(|w| w.id == id)
                || ps.secrets.iter().any(|s| s.id == id);
            owns.then_some(p)
        })
    }

    /// Whether `id` is a hero or a minion currently on the board.
    #[must_use]
    pub fn is_character(&self, id: EntityId) -> bool {
        id.is_hero() || self.locate_minion(id).is_some()
    }

    // === Progress ===

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Append a committed action to the history.
    pub fn record(&mut self, player: PlayerId, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn, sequence));
    }

    /// Structural checks that need no card data: zone limits, unique and
    /// allocated entity ids, mana bounds, non-negative counters and an
    /// empty event queue.
    pub fn check_structure(&self, ruleset: &Ruleset) -> Result<()> {
        let mut seen: Vec<EntityId> = Vec::new();

        for (player, ps) in self.players.iter() {
            let fail = |what: String| -> Result<()> {
                error!(%player, "{what}");
                Err(EngineError::InvariantViolation(format!("{player}: {what}")))
            };

            if ps.board.len() > ruleset.max_board {
                return fail(format!("board holds {} minions", ps.board.len()));
            }
            if ps.hand.len() > ruleset.max_hand {
                return fail(format!("hand holds {} cards", ps.hand.len()));
            }
            if ps.secrets.len() > ruleset.max_secrets {
                return fail(format!("{} secrets active", ps.secrets.len()));
            }
            if ps.max_mana > ruleset.max_mana || ps.mana > ps.max_mana.saturating_add(1) {
                return fail(format!("mana {}/{} out of bounds", ps.mana, ps.max_mana));
            }
            if ps.hero.health > ps.hero.max_health || ps.hero.armor < 0 {
                return fail(format!(
                    "hero health {}/{} armor {}",
                    ps.hero.health, ps.hero.max_health, ps.hero.armor
                ));
            }
            if let Some(w) = &ps.weapon {
                if w.durability <= 0 {
                    return fail(format!("weapon {} kept at durability {}", w.id, w.durability));
                }
                seen.push(w.id);
            }
            for m in ps.board.iter() {
                if m.owner != player {
                    return fail(format!("{} on the wrong board", m.id));
                }
                if m.damage < 0 || m.max_health < 0 {
                    return fail(format!("{} has damage {} max {}", m.id, m.damage, m.max_health));
                }
                seen.push(m.id);
            }
            seen.extend(ps.secrets.iter().map(|s| s.id));
        }

        let count = seen.len();
        seen.sort();
        seen.dedup();
        if seen.len() != count {
            error!("duplicate entity ids");
            return Err(EngineError::InvariantViolation("duplicate entity ids".into()));
        }
        if let Some(id) = seen.iter().find(|id| id.is_hero() || id.0 >= self.next_entity_id) {
            error!(%id, "entity id was never allocated");
            return Err(EngineError::InvariantViolation(format!(
                "entity {id} was never allocated"
            )));
        }
        if !self.pending.is_empty() {
            error!(count = self.pending.len(), "events left unresolved");
            return Err(EngineError::InvariantViolation(format!(
                "{} events left unresolved",
                self.pending.len()
            )));
        }
        Ok(())
    }
}
