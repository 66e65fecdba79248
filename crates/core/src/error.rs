use thiserror::Error;

use crate::SeatId;

/// Errors that can occur while driving a Dalmuti game.
///
/// Rules violations are reported to the caller and leave the game state
/// untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DalmutiError {
    #[error("a game needs between {min} and {max} seats, got {got}")]
    InvalidSeatCount { got: usize, min: usize, max: usize },

    #[error("no seat with index {0}")]
    UnknownSeat(SeatId),

    #[error("it is seat {expected}'s turn, not seat {got}'s")]
    NotYourTurn { expected: SeatId, got: SeatId },

    #[error("the game is already over")]
    GameOver,

    #[error("seat {seat} cannot play {count}x rank {rank}")]
    IllegalPlay { seat: SeatId, rank: u8, count: u8 },

    #[error("seat {0} must play to open the round")]
    PassNotAllowed(SeatId),

    #[error("invalid card split: {0}")]
    InvalidSplit(String),

    #[error("invalid rank: {0}")]
    InvalidRank(u8),

    #[error("inconsistent card pool: {0}")]
    InconsistentCardPool(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// Convenience Result type for Dalmuti operations
pub type Result<T> = std::result::Result<T, DalmutiError>;
