//! Engine error types.
//!
//! Four kinds of failure leave the engine:
//!
//! - `IllegalAction`: a cost, zone, target or timing violation. The action
//!   is rejected and the state is unchanged.
//! - `NoLegalTarget`: a card whose required target selector has nothing
//!   valid to choose. Also rejected without mutation.
//! - `InvariantViolation`: bookkeeping went wrong inside the engine. This is
//!   an engine bug, never a user error, and must not be swallowed.
//! - `DeckConstruction`: a deck was rejected before the game started.

use thiserror::Error;

use super::entity::EntityId;
use super::player::PlayerId;
use crate::cards::CardId;

/// Why an action was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalReason {
    #[error("the game is over")]
    GameOver,

    #[error("action not allowed during the {0} phase")]
    WrongPhase(&'static str),

    #[error("{0} has already mulliganed")]
    AlreadyMulliganed(PlayerId),

    #[error("no card at hand index {0}")]
    NoSuchCard(usize),

    #[error("card {0} is not in the card registry")]
    UnknownCard(CardId),

    #[error("card {0} cannot be played from hand")]
    Unplayable(CardId),

    #[error("costs {cost} mana but only {available} is available")]
    NotEnoughMana { cost: u8, available: u8 },

    #[error("the board is full")]
    BoardFull,

    #[error("board position {0} is out of range")]
    InvalidPosition(usize),

    #[error("secret {0} is already active")]
    DuplicateSecret(CardId),

    #[error("too many active secrets")]
    SecretsFull,

    #[error("this card needs a target")]
    TargetRequired,

    #[error("this card does not take a target")]
    UnexpectedTarget,

    #[error("{0} is not a legal target")]
    InvalidTarget(EntityId),

    #[error("{0} does not exist")]
    NoSuchEntity(EntityId),

    #[error("{0} is not controlled by the active player")]
    NotYourCharacter(EntityId),

    #[error("{0} is frozen")]
    Frozen(EntityId),

    #[error("{0} has no attack")]
    NoAttack(EntityId),

    #[error("{0} was summoned this turn")]
    SummoningSick(EntityId),

    #[error("{0} has already attacked this turn")]
    AlreadyAttacked(EntityId),

    #[error("{0} has rush and cannot attack heroes this turn")]
    RushTargetsMinionsOnly(EntityId),

    #[error("a minion with taunt must be attacked first")]
    MustAttackTaunt,

    #[error("{0} is stealthed")]
    Stealthed(EntityId),

    #[error("the hero power has already been used this turn")]
    HeroPowerUsed,
}

/// Why a deck was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("{player}: deck has {actual} cards, expected {expected}")]
    WrongSize {
        player: PlayerId,
        expected: usize,
        actual: usize,
    },

    #[error("{player}: unknown card {card}")]
    UnknownCard { player: PlayerId, card: CardId },

    #[error("{player}: {card} is not collectible")]
    NotCollectible { player: PlayerId, card: CardId },

    #[error("{player}: {count} copies of {card}, at most {max} allowed")]
    TooManyCopies {
        player: PlayerId,
        card: CardId,
        count: usize,
        max: usize,
    },
}

/// Every error the engine reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalReason),

    #[error("{card} has no legal target")]
    NoLegalTarget { card: CardId },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("deck construction error: {0}")]
    DeckConstruction(#[from] DeckError),
}

impl EngineError {
    /// Whether the caller can recover by submitting a different action.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::InvariantViolation(_))
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
