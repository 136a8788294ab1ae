//! The `RulesEngine` trait.
//!
//! Everything that drives a game from the outside (the AI searcher, tests,
//! a UI host) talks to the rules through this trait:
//! - which actions are legal right now
//! - how an action changes the state, and which events it produced
//! - whether the game is over

use serde::{Deserialize, Serialize};

use crate::cards::CardRegistry;
use crate::core::{Action, GameState, PlayerId, Result, Ruleset};
use crate::triggers::GameEvent;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The other hero died.
    Winner(PlayerId),
    /// Both heroes died in the same action.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Result implied by the heroes' health, if any hero is dead.
    #[must_use]
    pub fn from_state(state: &GameState) -> Option<Self> {
        let dead: Vec<PlayerId> = PlayerId::all()
            .filter(|&p| state.player(p).hero.is_dead())
            .collect();
        match dead.as_slice() {
            [] => None,
            [loser] => Some(GameResult::Winner(loser.opponent())),
            _ => Some(GameResult::Draw),
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{p} wins"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty when nobody can act (mulligan pending, game over)
/// - `apply_action`: all-or-nothing; on `Err` the state must be unchanged
/// - `apply_action`: must be deterministic given the state's RNG
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// The rules in force.
    fn ruleset(&self) -> &Ruleset;

    /// The card pool every `CardId` in the state refers to.
    fn registry(&self) -> &CardRegistry;

    /// Every action the active player may take.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Validate and apply an action for the active player.
    ///
    /// Returns the events it produced, in resolution order.
    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<Vec<GameEvent>>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.result
    }

    /// The player expected to act.
    fn current_player(&self, state: &GameState) -> PlayerId {
        state.active_player
    }
}
