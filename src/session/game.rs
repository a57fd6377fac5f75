//! Game session: configuration, boards and clock as one playable unit
//!
//! A session owns everything it mutates. Guesses and ticks both take
//! `&mut self`, so they can never interleave. Once the session finishes it
//! holds exactly one `GameOutcome` and rejects every further mutation.

use super::config::{GameConfig, GameMode};
use super::outcome::{BoardSummary, GameOutcome, GameResult, Termination};
use crate::board::{
    Activation, Aggregate, BoardEngine, BoardId, BoardState, GuessResult, Hint,
    MultiBoardCoordinator,
};
use crate::clock::{ClockMode, ClockState, GameClock, Tick};
use crate::core::Word;
use crate::error::GameError;
use crate::persistence::Persistence;
use crate::wordlists::WordSource;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Session counters that are not part of any board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeInProgress {
    pub valid_guesses: u32,
    pub invalid_guesses: u32,
}

/// Everything needed to resume an interrupted session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    pub clock: ClockState,
    pub boards: Vec<BoardState>,
    pub config: GameConfig,
    pub outcome_in_progress: OutcomeInProgress,
}

/// What one accepted guess did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGuess {
    pub results: Vec<GuessResult>,
    pub aggregate: Aggregate,
    /// Board opened by this guess (frenzy)
    pub activated: Option<BoardId>,
    /// Set on the guess that finished the session
    pub outcome: Option<GameOutcome>,
}

#[derive(Debug, Clone)]
enum Boards {
    Single(BoardEngine),
    Multi(MultiBoardCoordinator),
}

impl Boards {
    fn new(config: &GameConfig, targets: Vec<Word>) -> Result<Self, GameError> {
        let activation = config.mode.activation();
        if activation == Activation::Sequential {
            return Ok(Self::Multi(MultiBoardCoordinator::new(
                targets,
                config.guess_cap,
                activation,
            )?));
        }
        match <[Word; 1]>::try_from(targets) {
            Ok([target]) => Ok(Self::Single(BoardEngine::new(
                BoardId(0),
                target,
                config.guess_cap,
            ))),
            Err(targets) => Ok(Self::Multi(MultiBoardCoordinator::new(
                targets,
                config.guess_cap,
                activation,
            )?)),
        }
    }

    fn restore(config: &GameConfig, states: Vec<BoardState>) -> Result<Self, GameError> {
        let activation = config.mode.activation();
        if activation == Activation::Sequential {
            return Ok(Self::Multi(MultiBoardCoordinator::restore(states, activation)?));
        }
        match <[BoardState; 1]>::try_from(states) {
            Ok([state]) => Ok(Self::Single(BoardEngine::restore(state)?)),
            Err(states) => Ok(Self::Multi(MultiBoardCoordinator::restore(
                states, activation,
            )?)),
        }
    }

    fn states(&self) -> Vec<&BoardState> {
        match self {
            Self::Single(board) => vec![board.state()],
            Self::Multi(coordinator) => coordinator.boards().collect(),
        }
    }

    fn aggregate(&self) -> Aggregate {
        match self {
            Self::Single(board) => Aggregate::from_statuses([board.status()]),
            Self::Multi(coordinator) => coordinator.aggregate(),
        }
    }

    fn active_ids(&self) -> Vec<BoardId> {
        match self {
            Self::Single(board) if !board.status().is_terminal() => vec![board.id()],
            Self::Single(_) => Vec::new(),
            Self::Multi(coordinator) => coordinator.active_ids(),
        }
    }

    fn submit(&mut self, target: Option<BoardId>, guess: &str) -> Result<SessionGuess, GameError> {
        let (results, activated) = match (self, target) {
            (Self::Single(board), Some(id)) if id != board.id() => {
                return Err(GameError::UnknownBoard(id));
            }
            (Self::Single(board), _) => (vec![board.submit_guess(guess)?], None),
            (Self::Multi(coordinator), Some(id)) => {
                let r = coordinator.submit_guess(id, guess)?;
                (r.results, r.activated)
            }
            (Self::Multi(coordinator), None) => {
                let r = coordinator.submit_to_all(guess)?;
                (r.results, r.activated)
            }
        };
        Ok(SessionGuess {
            results,
            aggregate: Aggregate::InProgress,
            activated,
            outcome: None,
        })
    }

    fn record_invalid_attempt(&mut self, id: BoardId) -> Result<(), GameError> {
        match self {
            Self::Single(board) => board.record_invalid_attempt(),
            Self::Multi(coordinator) => coordinator.record_invalid_attempt(id),
        }
    }

    fn reveal_hint(&mut self, id: BoardId) -> Result<Option<Hint>, GameError> {
        match self {
            Self::Single(board) => board.reveal_hint(),
            Self::Multi(coordinator) => coordinator.reveal_hint(id),
        }
    }
}

/// One playable game
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    boards: Boards,
    clock: GameClock,
    counters: OutcomeInProgress,
    outcome: Option<GameOutcome>,
}

impl GameSession {
    /// Create a session for explicit targets
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the targets do not match the configuration.
    pub fn new(config: GameConfig, targets: Vec<Word>) -> Result<Self, GameError> {
        validate_config(&config)?;
        if targets.len() != config.board_count {
            return Err(GameError::InvalidConfig(format!(
                "{} mode needs {} targets, got {}",
                config.mode,
                config.board_count,
                targets.len()
            )));
        }
        if let Some(bad) = targets.iter().find(|t| t.len() != config.word_length) {
            return Err(GameError::InvalidConfig(format!(
                "target '{bad}' is not {} letters",
                config.word_length
            )));
        }

        let clock = config
            .time_limit_secs
            .map_or_else(GameClock::count_up, GameClock::count_down);
        let boards = Boards::new(&config, targets)?;
        info!(mode = %config.mode, boards = config.board_count, "session started");

        Ok(Self {
            config,
            boards,
            clock,
            counters: OutcomeInProgress::default(),
            outcome: None,
        })
    }

    /// Create a session with distinct random targets
    ///
    /// # Errors
    /// - `InvalidConfig` for daily configurations (use `start_daily`)
    /// - `NotEnoughWords` if the source lacks enough words of this length
    pub fn start<R: Rng + ?Sized>(
        config: GameConfig,
        source: &impl WordSource,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if config.is_daily() {
            return Err(GameError::InvalidConfig(
                "daily games start through start_daily".to_string(),
            ));
        }
        let words = source.words_of_length(config.word_length);
        if words.len() < config.board_count {
            return Err(GameError::NotEnoughWords {
                length: config.word_length,
                needed: config.board_count,
                available: words.len(),
            });
        }
        let targets = words
            .choose_multiple(rng, config.board_count)
            .cloned()
            .collect();
        Self::new(config, targets)
    }

    /// Create the daily session for `config.day_index`
    ///
    /// Refuses a day that the store has already recorded as played, before
    /// any guess can be made.
    ///
    /// # Errors
    /// - `DailyAlreadyPlayed` if the day has been played
    /// - `InvalidConfig` if the configuration has no day index
    /// - `NotEnoughWords` if the source has no word of this length
    /// - `Store` if the store cannot be read
    pub fn start_daily(
        config: GameConfig,
        source: &impl WordSource,
        store: &impl Persistence,
    ) -> Result<Self, GameError> {
        let day = config
            .day_index
            .ok_or_else(|| GameError::InvalidConfig("daily game without a day index".to_string()))?;

        if store.has_played_daily(day)? {
            warn!(day, "daily puzzle already played");
            return Err(GameError::DailyAlreadyPlayed(day));
        }

        let boards = config.board_count as u32;
        let targets = (0..boards)
            .map(|i| {
                source
                    .daily_word(day.wrapping_mul(boards).wrapping_add(i), config.word_length)
                    .ok_or(GameError::NotEnoughWords {
                        length: config.word_length,
                        needed: 1,
                        available: 0,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(config, targets)
    }

    /// Rebuild a session from a save
    ///
    /// # Errors
    /// Returns `CorruptSave` if the save is inconsistent or describes a
    /// finished game.
    pub fn restore(save: SaveState) -> Result<Self, GameError> {
        let SaveState {
            clock,
            boards,
            config,
            outcome_in_progress,
        } = save;
        validate_config(&config).map_err(|e| GameError::CorruptSave(e.to_string()))?;

        if boards.len() != config.board_count {
            return Err(GameError::CorruptSave(format!(
                "expected {} boards, found {}",
                config.board_count,
                boards.len()
            )));
        }
        if boards.iter().any(|b| b.target().len() != config.word_length) {
            return Err(GameError::CorruptSave("target length mismatch".to_string()));
        }
        let expected_mode = config
            .time_limit_secs
            .map_or(ClockMode::CountUp, |limit_secs| ClockMode::CountDown { limit_secs });
        if clock.mode != expected_mode {
            return Err(GameError::CorruptSave("clock does not match config".to_string()));
        }

        let boards = Boards::restore(&config, boards)?;
        if boards.aggregate().is_terminal() || clock.is_expired() {
            return Err(GameError::CorruptSave(
                "saved session had already finished".to_string(),
            ));
        }

        // Every counted guess adds at least one row, and a board never holds
        // more rows than there were guesses.
        let rows: Vec<usize> = boards.states().iter().map(|b| b.guesses().len()).collect();
        let most = rows.iter().copied().max().unwrap_or(0);
        let total: usize = rows.iter().sum();
        let counted = outcome_in_progress.valid_guesses as usize;
        if counted < most || counted > total {
            return Err(GameError::CorruptSave(format!(
                "{counted} counted guesses do not fit boards holding {rows:?} rows"
            )));
        }

        debug!(mode = %config.mode, "session restored");
        Ok(Self {
            config,
            boards,
            clock: GameClock::restore(clock),
            counters: outcome_in_progress,
            outcome: None,
        })
    }

    /// Rebuild a session from a save, refusing a daily puzzle the store has
    /// already recorded
    ///
    /// # Errors
    /// - `DailyAlreadyPlayed` if the save is a daily whose day was recorded
    /// - `Store` if the store cannot be read
    /// - anything `restore` returns
    pub fn restore_checked(save: SaveState, store: &impl Persistence) -> Result<Self, GameError> {
        if let Some(day) = save.config.day_index
            && store.has_played_daily(day)?
        {
            warn!(day, "saved daily puzzle was already played");
            return Err(GameError::DailyAlreadyPlayed(day));
        }
        Self::restore(save)
    }

    /// Snapshot for persistence
    ///
    /// # Errors
    /// Returns `SessionTerminated` for a finished session; its outcome is
    /// what should be stored instead.
    pub fn save(&self) -> Result<SaveState, GameError> {
        self.ensure_running()?;
        Ok(SaveState {
            clock: self.clock.state(),
            boards: self.boards.states().into_iter().cloned().collect(),
            config: self.config.clone(),
            outcome_in_progress: self.counters,
        })
    }

    /// Submit a guess to every open board
    ///
    /// # Errors
    /// - `SessionTerminated` if the session is finished
    /// - `InvalidGuess` if the guess is shape-invalid (nothing changes)
    pub fn submit_guess(&mut self, guess: &str) -> Result<SessionGuess, GameError> {
        self.submit(None, guess)
    }

    /// Submit a guess to one named board
    ///
    /// # Errors
    /// As `submit_guess`, plus `UnknownBoard` and `BoardNotActive`.
    pub fn submit_guess_to(&mut self, id: BoardId, guess: &str) -> Result<SessionGuess, GameError> {
        self.submit(Some(id), guess)
    }

    fn submit(&mut self, target: Option<BoardId>, guess: &str) -> Result<SessionGuess, GameError> {
        self.ensure_running()?;
        let mut step = self.boards.submit(target, guess)?;
        self.counters.valid_guesses += 1;

        step.aggregate = self.boards.aggregate();
        match step.aggregate {
            Aggregate::Win => step.outcome = Some(self.finish(Termination::Solved)),
            Aggregate::Lose => step.outcome = Some(self.finish(Termination::Exhausted)),
            Aggregate::InProgress => {}
        }
        Ok(step)
    }

    /// Count a guess the word source rejected
    ///
    /// # Errors
    /// Returns `SessionTerminated` if the session is finished.
    pub fn record_invalid_attempt(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        for id in self.boards.active_ids() {
            self.boards.record_invalid_attempt(id)?;
        }
        self.counters.invalid_guesses += 1;
        Ok(())
    }

    /// Reveal a letter on the first open board
    ///
    /// # Errors
    /// Returns `SessionTerminated` if the session is finished.
    pub fn reveal_hint(&mut self) -> Result<Option<(BoardId, Hint)>, GameError> {
        self.ensure_running()?;
        let Some(&id) = self.boards.active_ids().first() else {
            return Ok(None);
        };
        Ok(self.boards.reveal_hint(id)?.map(|hint| (id, hint)))
    }

    /// Deliver one clock tick
    ///
    /// On count-down expiry the session finishes.
    ///
    /// # Errors
    /// Returns `SessionTerminated` if the session is finished.
    pub fn tick(&mut self) -> Result<Tick, GameError> {
        self.ensure_running()?;
        let tick = self.clock.tick();
        if tick == Tick::Expired {
            self.finish(Termination::TimeExpired);
        }
        Ok(tick)
    }

    /// Stop the clock
    ///
    /// # Errors
    /// Returns `SessionTerminated` if the session is finished.
    pub fn pause(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        self.clock.pause();
        Ok(())
    }

    /// Restart the clock
    ///
    /// # Errors
    /// Returns `SessionTerminated` if the session is finished.
    pub fn resume(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        self.clock.resume();
        Ok(())
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        !self.clock.is_running()
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn clock(&self) -> ClockState {
        self.clock.state()
    }

    #[must_use]
    pub fn boards(&self) -> Vec<&BoardState> {
        self.boards.states()
    }

    /// Boards that currently accept guesses
    #[must_use]
    pub fn active_boards(&self) -> Vec<BoardId> {
        self.boards.active_ids()
    }

    #[must_use]
    pub fn aggregate(&self) -> Aggregate {
        self.boards.aggregate()
    }

    #[must_use]
    pub const fn valid_guesses(&self) -> u32 {
        self.counters.valid_guesses
    }

    #[must_use]
    pub const fn invalid_guesses(&self) -> u32 {
        self.counters.invalid_guesses
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Err(GameError::SessionTerminated);
        }
        Ok(())
    }

    fn finish(&mut self, termination: Termination) -> GameOutcome {
        self.clock.stop();
        let mode = self.config.mode;
        let result = if mode.is_winnable() {
            match termination {
                Termination::Solved => Some(GameResult::Win),
                Termination::Exhausted => Some(GameResult::Lose),
                Termination::TimeExpired if mode == GameMode::Frenzy => None,
                Termination::TimeExpired => Some(GameResult::Lose),
            }
        } else {
            None
        };

        let clock = self.clock.state();
        let outcome = GameOutcome::new(
            mode,
            self.config.difficulty,
            self.config.day_index,
            result,
            termination,
            clock.elapsed_secs,
            clock.remaining_secs(),
            self.counters.valid_guesses,
            self.counters.invalid_guesses,
            self.boards
                .states()
                .into_iter()
                .map(BoardSummary::from)
                .collect(),
        );
        info!(
            mode = %mode,
            ?result,
            ?termination,
            elapsed = clock.elapsed_secs,
            "session finished"
        );
        self.outcome = Some(outcome.clone());
        outcome
    }
}

fn validate_config(config: &GameConfig) -> Result<(), GameError> {
    if config.board_count == 0 {
        return Err(GameError::InvalidConfig("at least one board is required".to_string()));
    }
    if config.word_length == 0 {
        return Err(GameError::InvalidConfig("word length must be positive".to_string()));
    }
    if config.guess_cap == Some(0) {
        return Err(GameError::InvalidConfig("guess cap must be positive".to_string()));
    }
    if config.mode.is_timed() != config.time_limit_secs.is_some() {
        return Err(GameError::InvalidConfig(format!(
            "{} mode {} a time limit",
            config.mode,
            if config.mode.is_timed() { "needs" } else { "cannot have" }
        )));
    }
    Ok(())
}
