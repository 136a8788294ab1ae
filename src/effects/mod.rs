//! Effect framework for card abilities.
//!
//! Every card behaviour is data:
//! - `EffectBinding`: trigger kind + target selector + action
//! - `TargetSelector` / `TargetFilter`: how targets are picked, with the
//!   legality rules for chosen and random targets
//! - `Aura`: continuous stat modifiers, recomputed on every query
//! - `EffectEngine`: interprets bindings and runs event cascades to a
//!   fixpoint, including the death sweep
//!
//! ## Ordering
//!
//! Within one event, a dying minion's deathrattle goes first, then
//! listeners fire for the active player (weapon, then board left to right)
//! and then for the opponent. Deaths are swept after each generation of
//! events, board by board, left to right.

pub mod aura;
mod effect;
pub mod engine;
pub mod targeting;

pub use aura::{Aura, AuraScope, Stats};
pub use effect::{EffectAction, EffectBinding};
pub use engine::{EffectContext, EffectEngine, Hit, MAX_GENERATIONS};
pub use targeting::{Side, TargetFilter, TargetKind, TargetSelector};
