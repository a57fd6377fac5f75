//! The immutable record of a finished game

use super::config::{Difficulty, GameMode};
use crate::board::{BoardState, BoardStatus, GuessRecord};
use crate::core::Word;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Lose,
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every board was solved
    Solved,
    /// A board ran out of guesses
    Exhausted,
    /// The count-down clock reached zero
    TimeExpired,
}

/// Final state of one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub target: Word,
    pub rows: Vec<GuessRecord>,
    pub status: BoardStatus,
    pub hints_used: u32,
}

impl From<&BoardState> for BoardSummary {
    fn from(state: &BoardState) -> Self {
        Self {
            target: state.target().clone(),
            rows: state.guesses().to_vec(),
            status: state.status(),
            hints_used: state.hints_used(),
        }
    }
}

/// Produced exactly once per finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    mode: GameMode,
    difficulty: Difficulty,
    day_index: Option<u32>,
    result: Option<GameResult>,
    termination: Termination,
    elapsed_secs: u64,
    time_remaining_secs: Option<u64>,
    valid_guesses: u32,
    invalid_guesses: u32,
    boards: Vec<BoardSummary>,
}

impl GameOutcome {
    #[allow(clippy::too_many_arguments)] // Plain record; every field is required
    pub(crate) const fn new(
        mode: GameMode,
        difficulty: Difficulty,
        day_index: Option<u32>,
        result: Option<GameResult>,
        termination: Termination,
        elapsed_secs: u64,
        time_remaining_secs: Option<u64>,
        valid_guesses: u32,
        invalid_guesses: u32,
        boards: Vec<BoardSummary>,
    ) -> Self {
        Self {
            mode,
            difficulty,
            day_index,
            result,
            termination,
            elapsed_secs,
            time_remaining_secs,
            valid_guesses,
            invalid_guesses,
            boards,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn day_index(&self) -> Option<u32> {
        self.day_index
    }

    /// `None` for games that cannot be won or lost
    #[must_use]
    pub const fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }

    #[must_use]
    pub const fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    #[must_use]
    pub const fn time_remaining_secs(&self) -> Option<u64> {
        self.time_remaining_secs
    }

    #[must_use]
    pub const fn valid_guesses(&self) -> u32 {
        self.valid_guesses
    }

    #[must_use]
    pub const fn invalid_guesses(&self) -> u32 {
        self.invalid_guesses
    }

    #[must_use]
    pub fn boards(&self) -> &[BoardSummary] {
        &self.boards
    }

    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.boards.iter().map(|b| b.hints_used).sum()
    }

    #[must_use]
    pub fn words_solved(&self) -> u32 {
        self.boards
            .iter()
            .filter(|b| b.status == BoardStatus::Solved)
            .count() as u32
    }

    /// First word guessed in the game
    #[must_use]
    pub fn opening_word(&self) -> Option<&Word> {
        self.boards
            .first()
            .and_then(|b| b.rows.first())
            .map(|row| &row.word)
    }

    #[must_use]
    pub const fn is_win(&self) -> bool {
        matches!(self.result, Some(GameResult::Win))
    }
}
