//! Game errors.

use thiserror::Error;

use crate::core::amount::Amount;
use crate::ledger::LedgerError;

/// Why a move was refused. The board is untouched when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMove {
    /// Round outside 1..=9.
    #[error("round {0} out of range 1..=9")]
    RoundOutOfRange(u8),

    /// Cell outside 0..=8.
    #[error("position {0} out of range 0..=8")]
    PositionOutOfRange(u8),

    /// Cell already taken.
    #[error("position {0} is already occupied")]
    CellOccupied(u8),

    /// Round does not follow the moves already played.
    #[error("expected round {expected}, got {got}")]
    OutOfTurn {
        /// Next round according to the board.
        expected: u8,
        /// Round supplied.
        got: u8,
    },

    /// A win or tie has already closed the game.
    #[error("game is already finished")]
    GameFinished,
}

/// Errors from setting up or playing a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// Enumeration produced the wrong number of games. This is a defect in
    /// the classification logic, not a runtime condition.
    #[error("enumerated {got} games, expected {expected}")]
    GameCountMismatch {
        /// Known number of complete games.
        expected: u64,
        /// Number enumerated.
        got: u64,
    },

    /// Move selection on a board whose tree was never built.
    #[error("game tree not built; run setup first")]
    TreeNotBuilt,

    /// Stake is negative or too large to double.
    #[error("invalid bet: {0}")]
    InvalidBet(Amount),

    /// Move arguments rejected.
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    /// Ledger model failure, passed through unchanged.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
