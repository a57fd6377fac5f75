//! Error types for the game engine
//!
//! `ShapeMismatch` is a caller bug. Everything else is recoverable and is
//! surfaced synchronously to the immediate caller.

use crate::board::BoardId;
use crate::core::WordError;

/// The comparator was called with words of different lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot compare a {guess_len}-letter guess against a {target_len}-letter target")]
pub struct ShapeMismatch {
    pub target_len: usize,
    pub guess_len: usize,
}

/// Why a submitted guess was rejected before scoring
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("guess must be {expected} letters, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error(transparent)]
    Word(#[from] WordError),
}

/// Errors raised by the persistence collaborators
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("daily puzzle {0} is already recorded")]
    DailyAlreadyRecorded(u32),
}

/// Errors raised by boards, sessions and their collaborators
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),

    #[error("invalid guess: {0}")]
    InvalidGuess(#[from] GuessError),

    #[error("board {0} is already finished")]
    BoardTerminated(BoardId),

    #[error("no board with id {0}")]
    UnknownBoard(BoardId),

    #[error("board {0} has not been opened yet")]
    BoardNotActive(BoardId),

    #[error("every board is already finished")]
    AllBoardsFinished,

    #[error("session is already finished")]
    SessionTerminated,

    #[error("daily puzzle {0} has already been played")]
    DailyAlreadyPlayed(u32),

    #[error("need {needed} distinct {length}-letter words, word source has {available}")]
    NotEnoughWords {
        length: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("saved state is inconsistent: {0}")]
    CorruptSave(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GameError {
    /// Whether the caller should treat this as a user-facing retry (a "shake")
    #[must_use]
    pub const fn is_invalid_guess(&self) -> bool {
        matches!(self, Self::InvalidGuess(_))
    }
}
