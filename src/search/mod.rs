//! AI turn planning.
//!
//! The planner sees the game through `observe` (opponent hand, secrets
//! and deck order hidden; RNG replaced by a derived stream), expands
//! candidate actions on cloned states through the `RulesEngine` trait and
//! scores them with an `Evaluator`.
//!
//! - `TurnSearch`: greedy planner with beam lookahead, lethal first,
//!   optional parallel scoring of root candidates
//! - `BoardHeuristic`: weighted board, health, card and tempo evaluation
//! - `mulligan_choices`: opening hand selection

mod config;
mod heuristic;
mod mulligan;
mod observe;
mod stats;
mod turn;

pub use config::SearchConfig;
pub use heuristic::{BoardHeuristic, Evaluator, HeuristicWeights, WIN_SCORE};
pub use mulligan::mulligan_choices;
pub use observe::observe;
pub use stats::SearchStats;
pub use turn::{TurnPlan, TurnSearch};
