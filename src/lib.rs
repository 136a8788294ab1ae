//! # battler-core
//!
//! Rules engine for a two-player, turn-based collectible card battler with
//! a built-in AI opponent.
//!
//! ## Design Principles
//!
//! 1. **Check, then apply**: every action is validated against the
//!    untouched state and applied to a clone. An error never leaves a
//!    half-applied game behind.
//!
//! 2. **Deterministic**: all randomness flows from one seeded RNG in the
//!    state. Same seed, same decks, same actions, same game.
//!
//! 3. **Cards are data**: a card is a template of effect bindings, auras
//!    and keywords. The engine interprets them; no card has its own code.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: zones are `im` vectors, so cloning a
//!   `GameState` is cheap. Validation, secrets and the AI search all lean
//!   on that.
//!
//! - **Event cascades**: effects emit `GameEvent`s, listeners and
//!   deathrattles react, and the cascade runs breadth-first to a fixpoint
//!   with a death sweep after every step.
//!
//! - **Derived stats**: auras are never applied and removed. Effective
//!   stats are recomputed from the board on every query.
//!
//! ## Modules
//!
//! - `core`: ids, players, state, actions, RNG, ruleset, errors
//! - `zones`: the ordered board
//! - `cards`: templates, instances, the registry and the bundled catalog
//! - `triggers`: game events and listeners
//! - `effects`: the effect engine, targeting and auras
//! - `combat`: attack legality and resolution
//! - `secrets`: hidden reactive cards
//! - `rules`: validation, the action pipeline and snapshots
//! - `search`: AI turn planning

pub mod core;
pub mod zones;
pub mod cards;
pub mod triggers;
pub mod effects;
pub mod combat;
pub mod secrets;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord,
    EngineError, IllegalReason, DeckError, Result,
    EntityId, PlayerId, PlayerMap,
    GameRng, GameRngState,
    GamePhase, GameState, PlayerState,
    Ruleset, SecretPolicy,
};

pub use crate::zones::Board;

pub use crate::cards::{
    CardDefinition, CardId, CardKind, CardRegistry, CardType, HeroClass,
    Keyword, Keywords, Minion, Hero, Weapon, Secret,
};

pub use crate::triggers::{GameEvent, TriggerKind};

pub use crate::effects::{EffectAction, EffectBinding, EffectEngine, TargetFilter};

pub use crate::combat::CombatResolver;

pub use crate::secrets::SecretResolver;

pub use crate::rules::{ActionValidator, Battler, GameResult, RulesEngine, Snapshot};

pub use crate::search::{
    BoardHeuristic, Evaluator, HeuristicWeights,
    SearchConfig, SearchStats, TurnPlan, TurnSearch,
};
