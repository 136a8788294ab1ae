//! Game rules: validation, the action pipeline and read-only views.
//!
//! - `RulesEngine`: the trait external drivers (AI search, hosts) program
//!   against
//! - `ActionValidator`: legality checks and legal-action enumeration
//! - `Battler`: game setup, mulligan and the check-then-apply pipeline
//!   that runs every action through the effect engine, combat and
//!   secrets
//! - `Snapshot`: what collaborators render, with hidden information
//!   removed

mod battler;
pub mod engine;
mod snapshot;
mod validator;

pub use battler::Battler;
pub use engine::{GameResult, RulesEngine};
pub use snapshot::{HeroView, MinionView, PlayerView, Snapshot, WeaponView};
pub use validator::ActionValidator;
