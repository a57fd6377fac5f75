//! Multi-board coordinator
//!
//! Composes several boards into one game outcome. Boards keep insertion
//! order (the order of their targets) and are looked up by id through a
//! side index.

use super::engine::{BoardEngine, BoardId, BoardState, BoardStatus, GuessResult, Hint};
use crate::core::Word;
use crate::error::GameError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How boards become playable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Every board is playable from the start (quad)
    Simultaneous,
    /// One board at a time; the next opens when the current one is solved (frenzy)
    Sequential,
}

/// Outcome across all boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    InProgress,
    Win,
    Lose,
}

impl Aggregate {
    /// Derive the aggregate from child statuses
    ///
    /// Win iff every board is solved; lose iff any board is exhausted.
    pub fn from_statuses(statuses: impl IntoIterator<Item = BoardStatus>) -> Self {
        let mut all_solved = true;
        let mut any = false;
        for status in statuses {
            any = true;
            match status {
                BoardStatus::Exhausted => return Self::Lose,
                BoardStatus::Active => all_solved = false,
                BoardStatus::Solved => {}
            }
        }
        if any && all_solved {
            Self::Win
        } else {
            Self::InProgress
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Owned snapshot of every board plus the aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiBoardState {
    pub boards: Vec<BoardState>,
    pub aggregate: Aggregate,
}

/// What one submission did across the boards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiGuessResult {
    pub results: Vec<GuessResult>,
    pub aggregate: Aggregate,
    /// Board opened by this submission (sequential activation only)
    pub activated: Option<BoardId>,
}

/// Owns the boards of a multi-target game
#[derive(Debug, Clone)]
pub struct MultiBoardCoordinator {
    boards: Vec<BoardEngine>,
    index: FxHashMap<BoardId, usize>,
    activation: Activation,
    activated: usize,
}

impl MultiBoardCoordinator {
    /// Create one board per target, with ids in target order
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `targets` is empty.
    pub fn new(
        targets: Vec<Word>,
        guess_cap: Option<u32>,
        activation: Activation,
    ) -> Result<Self, GameError> {
        if targets.is_empty() {
            return Err(GameError::InvalidConfig(
                "a coordinator needs at least one target".to_string(),
            ));
        }
        let boards = targets
            .into_iter()
            .enumerate()
            .map(|(i, target)| BoardEngine::new(BoardId(i as u32), target, guess_cap))
            .collect();
        Ok(Self::from_engines(boards, activation))
    }

    fn from_engines(boards: Vec<BoardEngine>, activation: Activation) -> Self {
        let index = boards
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id(), i))
            .collect();
        let activated = match activation {
            Activation::Simultaneous => boards.len(),
            Activation::Sequential => {
                let leading_solved = boards
                    .iter()
                    .take_while(|b| b.status() == BoardStatus::Solved)
                    .count();
                (leading_solved + 1).min(boards.len())
            }
        };
        Self {
            boards,
            index,
            activation,
            activated,
        }
    }

    #[must_use]
    pub const fn activation(&self) -> Activation {
        self.activation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Board states in insertion order
    pub fn boards(&self) -> impl Iterator<Item = &BoardState> {
        self.boards.iter().map(BoardEngine::state)
    }

    #[must_use]
    pub fn board(&self, id: BoardId) -> Option<&BoardState> {
        self.index.get(&id).map(|&i| self.boards[i].state())
    }

    /// Whether a board has been opened for play
    #[must_use]
    pub fn is_activated(&self, id: BoardId) -> bool {
        self.index.get(&id).is_some_and(|&i| i < self.activated)
    }

    /// Ids of opened boards that still accept guesses
    #[must_use]
    pub fn active_ids(&self) -> Vec<BoardId> {
        self.boards[..self.activated]
            .iter()
            .filter(|b| b.status() == BoardStatus::Active)
            .map(BoardEngine::id)
            .collect()
    }

    /// Number of solved boards
    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.boards
            .iter()
            .filter(|b| b.status() == BoardStatus::Solved)
            .count()
    }

    /// Aggregate outcome, recomputed from the boards on every call
    #[must_use]
    pub fn aggregate(&self) -> Aggregate {
        Aggregate::from_statuses(self.boards.iter().map(BoardEngine::status))
    }

    #[must_use]
    pub fn snapshot(&self) -> MultiBoardState {
        MultiBoardState {
            boards: self.boards().cloned().collect(),
            aggregate: self.aggregate(),
        }
    }

    /// Submit a guess to one board
    ///
    /// # Errors
    /// - `UnknownBoard` if no board has this id
    /// - `BoardNotActive` if the board has not been opened yet
    /// - any error from `BoardEngine::submit_guess`
    pub fn submit_guess(&mut self, id: BoardId, guess: &str) -> Result<MultiGuessResult, GameError> {
        let i = self.playable_index(id)?;
        let result = self.boards[i].submit_guess(guess)?;
        Ok(self.after_mutation(vec![result]))
    }

    /// Submit one guess to every open, unfinished board
    ///
    /// The guess is validated against every receiving board before any is
    /// scored, so a rejected guess leaves all boards untouched.
    ///
    /// # Errors
    /// - `AllBoardsFinished` if no board can take the guess
    /// - `InvalidGuess` if the guess is shape-invalid for any receiving board
    pub fn submit_to_all(&mut self, guess: &str) -> Result<MultiGuessResult, GameError> {
        let receivers: Vec<usize> = (0..self.activated)
            .filter(|&i| self.boards[i].status() == BoardStatus::Active)
            .collect();
        if receivers.is_empty() {
            return Err(GameError::AllBoardsFinished);
        }

        let mut words = Vec::with_capacity(receivers.len());
        for &i in &receivers {
            words.push(self.boards[i].validate(guess)?);
        }

        let mut results = Vec::with_capacity(receivers.len());
        for (i, word) in receivers.into_iter().zip(words) {
            results.push(self.boards[i].apply(word)?);
        }
        Ok(self.after_mutation(results))
    }

    /// Count an upstream-rejected guess against one board
    ///
    /// # Errors
    /// Same lookup errors as `submit_guess`, or `BoardTerminated`.
    pub fn record_invalid_attempt(&mut self, id: BoardId) -> Result<(), GameError> {
        let i = self.playable_index(id)?;
        self.boards[i].record_invalid_attempt()
    }

    /// Reveal a hint on one board
    ///
    /// # Errors
    /// Same lookup errors as `submit_guess`, or `BoardTerminated`.
    pub fn reveal_hint(&mut self, id: BoardId) -> Result<Option<Hint>, GameError> {
        let i = self.playable_index(id)?;
        self.boards[i].reveal_hint()
    }

    /// Rehydrate from saved board states (in their saved order)
    ///
    /// # Errors
    /// Returns `CorruptSave` for an empty or inconsistent board list.
    pub fn restore(states: Vec<BoardState>, activation: Activation) -> Result<Self, GameError> {
        if states.is_empty() {
            return Err(GameError::CorruptSave("no boards".to_string()));
        }
        let boards = states
            .into_iter()
            .map(BoardEngine::restore)
            .collect::<Result<Vec<_>, _>>()?;

        let coordinator = Self::from_engines(boards, activation);
        if coordinator.index.len() != coordinator.boards.len() {
            return Err(GameError::CorruptSave("duplicate board ids".to_string()));
        }
        if let Some(early) = coordinator.boards[coordinator.activated..]
            .iter()
            .find(|b| !b.state().guesses().is_empty())
        {
            return Err(GameError::CorruptSave(format!(
                "board {} was played before it opened",
                early.id()
            )));
        }
        Ok(coordinator)
    }

    fn playable_index(&self, id: BoardId) -> Result<usize, GameError> {
        let &i = self.index.get(&id).ok_or(GameError::UnknownBoard(id))?;
        if i >= self.activated {
            return Err(GameError::BoardNotActive(id));
        }
        Ok(i)
    }

    fn after_mutation(&mut self, results: Vec<GuessResult>) -> MultiGuessResult {
        let mut activated = None;
        if self.activation == Activation::Sequential
            && self.activated < self.boards.len()
            && self.boards[self.activated - 1].status() == BoardStatus::Solved
        {
            let next = self.boards[self.activated].id();
            self.activated += 1;
            activated = Some(next);
            info!(board = %next, "next board opened");
        }

        let aggregate = self.aggregate();
        debug!(?aggregate, solved = self.solved_count(), "boards updated");
        MultiGuessResult {
            results,
            aggregate,
            activated,
        }
    }
}
