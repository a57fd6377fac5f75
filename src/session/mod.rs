//! Game sessions
//!
//! Binds a `GameConfig` to its boards and clock, and produces the final
//! `GameOutcome`.

pub mod config;
mod game;
mod outcome;

pub use config::{Difficulty, GameConfig, GameMode, day_index, today_index};
pub use game::{GameSession, OutcomeInProgress, SaveState, SessionGuess};
pub use outcome::{BoardSummary, GameOutcome, GameResult, Termination};
