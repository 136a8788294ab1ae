//! Core engine types: entities, players, state, actions, RNG, rules
//! configuration and errors.
//!
//! Everything here is plain data. Behaviour that needs card definitions
//! (effects, combat, validation) lives in the modules above it.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{Ruleset, SecretPolicy};
pub use entity::EntityId;
pub use error::{DeckError, EngineError, IllegalReason, Result};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::{GamePhase, GameState, PlayerState};
