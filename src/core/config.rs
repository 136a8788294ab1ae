//! Ruleset configuration.
//!
//! Every numeric limit the engine enforces (board size, hand size, mana cap,
//! deck size) lives in a `Ruleset`, so variants of the game are configured
//! rather than patched into the engine.

use serde::{Deserialize, Serialize};

/// How many secrets may reveal in response to a single opposing action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecretPolicy {
    /// Every matching secret reveals.
    AllMatching,
    /// At most one secret per watch class (e.g. one "minion summoned" secret
    /// and one "hero attacked" secret may both fire for the same action).
    OnePerTriggerClass,
    /// At most one secret reveals per action.
    OnePerAction,
}

/// Game rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Hero health at game start.
    pub starting_health: i32,

    /// Mana crystal cap.
    pub max_mana: u8,

    /// Maximum minions per side.
    pub max_board: usize,

    /// Maximum cards in hand; further draws are burned.
    pub max_hand: usize,

    /// Exact deck size required at game start.
    pub deck_size: usize,

    /// Copies of one card allowed per deck.
    pub max_copies: usize,

    /// Copies of one legendary card allowed per deck.
    pub max_legendary_copies: usize,

    /// Maximum face-down secrets per player.
    pub max_secrets: usize,

    /// Opening hand for the player who goes first.
    pub first_player_hand: usize,

    /// Opening hand for the player who goes second.
    pub second_player_hand: usize,

    /// Whether the second player receives The Coin.
    pub coin_for_second_player: bool,

    /// Mana cost of every hero power.
    pub hero_power_cost: u8,

    /// Secret reveal limit per opposing action.
    pub secret_policy: SecretPolicy,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            starting_health: 30,
            max_mana: 10,
            max_board: 7,
            max_hand: 10,
            deck_size: 30,
            max_copies: 2,
            max_legendary_copies: 1,
            max_secrets: 5,
            first_player_hand: 3,
            second_player_hand: 4,
            coin_for_second_player: true,
            hero_power_cost: 2,
            secret_policy: SecretPolicy::OnePerTriggerClass,
        }
    }
}

impl Ruleset {
    /// Set the starting hero health.
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the exact deck size.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the board limit.
    #[must_use]
    pub fn with_max_board(mut self, size: usize) -> Self {
        self.max_board = size;
        self
    }

    /// Set the secret reveal policy.
    #[must_use]
    pub fn with_secret_policy(mut self, policy: SecretPolicy) -> Self {
        self.secret_policy = policy;
        self
    }

    /// Set the per-card copy limit.
    #[must_use]
    pub fn with_max_copies(mut self, copies: usize) -> Self {
        self.max_copies = copies;
        self
    }

    /// Opening hand size for a seat.
    #[must_use]
    pub fn opening_hand(&self, second: bool) -> usize {
        if second {
            self.second_player_hand
        } else {
            self.first_player_hand
        }
    }
}
