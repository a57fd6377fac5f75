//! Wordle Engine
//!
//! Rules and state engine for Wordle-style games: classic, timed, zen, quad
//! (four boards at once) and frenzy (a timed run of words), with a daily
//! puzzle, save/restore and running statistics.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_engine::core::{Word, compare, row_to_emoji};
//! use wordle_engine::session::{Difficulty, GameConfig, GameSession};
//!
//! // Score a guess directly
//! let target = Word::new("crane").unwrap();
//! let guess = Word::new("train").unwrap();
//! let row = compare(&target, &guess).unwrap();
//! assert_eq!(row_to_emoji(&row), "⬛🟩🟩⬛🟨");
//!
//! // Or play a whole game
//! let mut session = GameSession::new(GameConfig::classic(Difficulty::Normal), vec![target]).unwrap();
//! let step = session.submit_guess("crane").unwrap();
//! assert!(step.outcome.unwrap().is_win());
//! ```

// Core domain types
pub mod core;

// Boards and the multi-board coordinator
pub mod board;

// Game clock
pub mod clock;

// Sessions, configuration and outcomes
pub mod session;

// Running statistics
pub mod stats;

// Storage of outcomes and saved sessions
pub mod persistence;

// Error types
pub mod error;

// User settings
pub mod config;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
