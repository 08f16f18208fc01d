//! Rule errors.
//!
//! Every rejected command returns a `RuleError` and leaves the board
//! untouched. The one exception is `NoLegalTarget`, which is reported after
//! the turn has already been closed out (the unplayable card is settled and
//! play passes on). `DeckExhausted` is fatal for the game instance.

use thiserror::Error;

use crate::board::PawnId;
use crate::cards::{CardId, CardValue};
use crate::core::Color;

/// Errors reported by the rule engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("{value} has no legal target; the card is unplayable")]
    NoLegalTarget { card: CardId, value: CardValue },

    #[error("selected target is not legal for {value}")]
    IllegalTargetSelected { value: CardValue },

    #[error("draw and discard piles are both empty")]
    DeckExhausted,

    #[error("{value} expects {expected}")]
    InvalidEffectArity { value: CardValue, expected: &'static str },

    #[error("it is {active}'s turn, not {actor}'s")]
    NotYourTurn { actor: Color, active: Color },

    #[error("command not valid while {phase}")]
    WrongPhase { phase: &'static str },

    #[error("{card} is not in {color}'s hand")]
    CardNotInHand { card: CardId, color: Color },

    #[error("no pawn with id {0}")]
    UnknownPawn(PawnId),

    #[error("game is already over")]
    GameOver,

    #[error("{color} kept abandoning its selection")]
    SelectionAbandoned { color: Color },

    #[error("snapshot rejected: {0}")]
    Snapshot(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RuleError {
    /// Whether the game can continue after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            RuleError::DeckExhausted | RuleError::GameOver | RuleError::Config(_)
        )
    }
}

pub type RuleResult<T> = Result<T, RuleError>;
