//! Single-board guess state machine
//!
//! A board starts `Active` and ends either `Solved` (a fully correct guess)
//! or `Exhausted` (guess cap reached without solving). There is no way back.

use crate::core::{
    LetterComparison, LetterHints, Word, compare, is_solved, merge_row, rank_by_best_comparison,
};
use crate::error::{GameError, GuessError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Opaque board identifier, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub u32);

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Board lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardStatus {
    Active,
    Solved,
    Exhausted,
}

impl BoardStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// One scored guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: Word,
    pub comparisons: Vec<LetterComparison>,
}

/// A revealed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub position: usize,
    pub letter: char,
}

/// Result of a scored guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub board: BoardId,
    pub comparisons: Vec<LetterComparison>,
    pub status: BoardStatus,
}

/// Full state of one board
///
/// The keyboard hint map is derived from the guesses and is never
/// serialized; `BoardEngine::restore` rebuilds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    id: BoardId,
    target: Word,
    guess_cap: Option<u32>,
    guesses: Vec<GuessRecord>,
    #[serde(skip)]
    letter_hints: LetterHints,
    invalid_guesses: u32,
    revealed: Vec<usize>,
    status: BoardStatus,
}

impl BoardState {
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    #[must_use]
    pub const fn target(&self) -> &Word {
        &self.target
    }

    /// Maximum number of guesses, `None` when uncapped
    #[must_use]
    pub const fn guess_cap(&self) -> Option<u32> {
        self.guess_cap
    }

    #[must_use]
    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    /// Best comparison per guessed letter
    #[must_use]
    pub const fn letter_hints(&self) -> &LetterHints {
        &self.letter_hints
    }

    /// Best comparison for a single keyboard key
    #[must_use]
    pub fn key_state(&self, letter: u8) -> LetterComparison {
        self.letter_hints
            .get(&letter.to_ascii_lowercase())
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn valid_guesses(&self) -> u32 {
        self.guesses.len() as u32
    }

    #[must_use]
    pub const fn invalid_guesses(&self) -> u32 {
        self.invalid_guesses
    }

    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.revealed.len() as u32
    }

    /// Positions revealed through hints, in reveal order
    #[must_use]
    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    #[must_use]
    pub const fn status(&self) -> BoardStatus {
        self.status
    }

    /// Guesses left before the cap, `None` when uncapped
    #[must_use]
    pub fn remaining_guesses(&self) -> Option<u32> {
        self.guess_cap
            .map(|cap| cap.saturating_sub(self.valid_guesses()))
    }
}

/// Owns and mutates one `BoardState`
#[derive(Debug, Clone)]
pub struct BoardEngine {
    state: BoardState,
}

impl BoardEngine {
    /// Create an active board for `target`
    #[must_use]
    pub fn new(id: BoardId, target: Word, guess_cap: Option<u32>) -> Self {
        Self {
            state: BoardState {
                id,
                target,
                guess_cap,
                guesses: Vec::new(),
                letter_hints: LetterHints::new(),
                invalid_guesses: 0,
                revealed: Vec::new(),
                status: BoardStatus::Active,
            },
        }
    }

    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.state.id
    }

    #[must_use]
    pub const fn status(&self) -> BoardStatus {
        self.state.status
    }

    /// Check a raw guess's shape against this board's target
    ///
    /// # Errors
    /// Returns `GuessError` if the text is not a word or has the wrong length.
    pub fn validate(&self, guess: &str) -> Result<Word, GuessError> {
        let word = Word::new(guess)?;
        if word.len() != self.state.target.len() {
            return Err(GuessError::WrongLength {
                expected: self.state.target.len(),
                actual: word.len(),
            });
        }
        Ok(word)
    }

    /// Submit a guess
    ///
    /// A shape-invalid guess leaves the board untouched.
    ///
    /// # Errors
    /// - `BoardTerminated` if the board is solved or exhausted
    /// - `InvalidGuess` if the guess has the wrong length or non-letters
    pub fn submit_guess(&mut self, guess: &str) -> Result<GuessResult, GameError> {
        self.ensure_active()?;
        let word = self.validate(guess)?;
        self.apply(word)
    }

    /// Score an already-validated word
    pub(crate) fn apply(&mut self, word: Word) -> Result<GuessResult, GameError> {
        let result = self.score(word)?;
        if let Some(last) = self.state.guesses.last() {
            merge_row(&mut self.state.letter_hints, &last.word, &last.comparisons);
        }
        Ok(result)
    }

    /// Record a scored row and settle the status, leaving the hint map alone
    fn score(&mut self, word: Word) -> Result<GuessResult, GameError> {
        self.ensure_active()?;
        let comparisons = compare(&self.state.target, &word)?;
        let solved = is_solved(&comparisons);
        debug!(board = %self.state.id, guess = %word, "guess scored");
        self.state.guesses.push(GuessRecord {
            word,
            comparisons: comparisons.clone(),
        });

        if solved {
            self.state.status = BoardStatus::Solved;
        } else if self
            .state
            .guess_cap
            .is_some_and(|cap| self.state.valid_guesses() >= cap)
        {
            self.state.status = BoardStatus::Exhausted;
        }

        if self.state.status.is_terminal() {
            info!(
                board = %self.state.id,
                status = ?self.state.status,
                guesses = self.state.guesses.len(),
                "board finished"
            );
        }

        Ok(GuessResult {
            board: self.state.id,
            comparisons,
            status: self.state.status,
        })
    }

    /// Count a guess rejected upstream (e.g. not a dictionary word)
    ///
    /// # Errors
    /// Returns `BoardTerminated` if the board is finished.
    pub fn record_invalid_attempt(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        self.state.invalid_guesses += 1;
        Ok(())
    }

    /// Reveal the first position no guess or hint has solved yet
    ///
    /// Returns `None` (and uses no hint) when every position is already known.
    ///
    /// # Errors
    /// Returns `BoardTerminated` if the board is finished.
    pub fn reveal_hint(&mut self) -> Result<Option<Hint>, GameError> {
        self.ensure_active()?;
        let known = |i: usize| {
            self.state.revealed.contains(&i)
                || self
                    .state
                    .guesses
                    .iter()
                    .any(|g| g.comparisons[i] == LetterComparison::Correct)
        };
        let Some(position) = (0..self.state.target.len()).find(|&i| !known(i)) else {
            return Ok(None);
        };

        self.state.revealed.push(position);
        let letter = char::from(self.state.target.char_at(position));
        debug!(board = %self.state.id, position, "hint revealed");
        Ok(Some(Hint { position, letter }))
    }

    /// Rehydrate a board from a saved snapshot
    ///
    /// Comparisons and status are recomputed by replaying the saved guesses,
    /// then the keyboard map is ranked from the replayed rows. Only the word
    /// sequence is trusted.
    ///
    /// # Errors
    /// Returns `CorruptSave` if a saved guess could not have been played.
    pub fn restore(saved: BoardState) -> Result<Self, GameError> {
        let mut engine = Self::new(saved.id, saved.target, saved.guess_cap);
        let len = engine.state.target.len();

        for record in saved.guesses {
            if engine.status().is_terminal() {
                return Err(GameError::CorruptSave(format!(
                    "board {} has guesses after it finished",
                    saved.id
                )));
            }
            if record.word.len() != len {
                return Err(GameError::CorruptSave(format!(
                    "board {} has a {}-letter guess for a {len}-letter target",
                    saved.id,
                    record.word.len()
                )));
            }
            engine.score(record.word)?;
        }
        engine.state.letter_hints = rank_by_best_comparison(
            engine
                .state
                .guesses
                .iter()
                .map(|g| (&g.word, g.comparisons.as_slice())),
        );

        if let Some(&bad) = saved.revealed.iter().find(|&&p| p >= len) {
            return Err(GameError::CorruptSave(format!(
                "board {} reveals position {bad} of a {len}-letter target",
                saved.id
            )));
        }

        engine.state.invalid_guesses = saved.invalid_guesses;
        engine.state.revealed = saved.revealed;
        Ok(engine)
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        if self.state.status.is_terminal() {
            return Err(GameError::BoardTerminated(self.state.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterComparison::{Correct, Present, Wrong};

    fn board(target: &str, cap: Option<u32>) -> BoardEngine {
        BoardEngine::new(BoardId(1), Word::new(target).unwrap(), cap)
    }

    #[test]
    fn new_board_is_active_and_empty() {
        let b = board("crane", Some(6));
        assert_eq!(b.status(), BoardStatus::Active);
        assert_eq!(b.state().valid_guesses(), 0);
        assert_eq!(b.state().remaining_guesses(), Some(6));
        assert_eq!(b.state().key_state(b'c'), LetterComparison::Unset);
    }

    #[test]
    fn scored_guess_is_recorded() {
        let mut b = board("crane", Some(6));
        let result = b.submit_guess("TRAIN").unwrap();

        assert_eq!(result.comparisons, vec![Wrong, Correct, Correct, Wrong, Present]);
        assert_eq!(result.status, BoardStatus::Active);
        assert_eq!(b.state().guesses().len(), 1);
        assert_eq!(b.state().guesses()[0].word.text(), "train");
        assert_eq!(b.state().key_state(b'R'), Correct);
        assert_eq!(b.state().key_state(b'n'), Present);
        assert_eq!(b.state().key_state(b't'), Wrong);
    }

    #[test]
    fn solving_is_terminal() {
        let mut b = board("crane", Some(6));
        b.submit_guess("slate").unwrap();
        let result = b.submit_guess("crane").unwrap();
        assert_eq!(result.status, BoardStatus::Solved);
        assert_eq!(b.state().valid_guesses(), 2);
    }

    #[test]
    fn cap_reached_exhausts_board() {
        let mut b = board("crane", Some(6));
        for _ in 0..5 {
            assert_eq!(b.submit_guess("slate").unwrap().status, BoardStatus::Active);
        }
        assert_eq!(
            b.submit_guess("slate").unwrap().status,
            BoardStatus::Exhausted
        );
        assert_eq!(b.state().remaining_guesses(), Some(0));
    }

    #[test]
    fn solving_on_last_guess_is_solved_not_exhausted() {
        let mut b = board("crane", Some(2));
        b.submit_guess("slate").unwrap();
        assert_eq!(b.submit_guess("crane").unwrap().status, BoardStatus::Solved);
    }

    #[test]
    fn uncapped_board_never_exhausts() {
        let mut b = board("crane", None);
        for _ in 0..50 {
            b.submit_guess("slate").unwrap();
        }
        assert_eq!(b.status(), BoardStatus::Active);
        assert_eq!(b.state().remaining_guesses(), None);
    }

    #[test]
    fn invalid_guess_leaves_board_untouched() {
        let mut b = board("crane", Some(6));
        b.submit_guess("slate").unwrap();
        let before = b.state().clone();

        for bad in ["cranes", "cran", "cr4ne", ""] {
            let err = b.submit_guess(bad).unwrap_err();
            assert!(err.is_invalid_guess(), "{bad}: {err}");
        }
        assert_eq!(b.state(), &before);
    }

    #[test]
    fn wrong_length_reports_expected() {
        let b = board("crane", Some(6));
        assert_eq!(
            b.validate("crate s").unwrap_err(),
            GuessError::Word(crate::core::WordError::InvalidCharacters)
        );
        assert_eq!(
            b.validate("cranes").unwrap_err(),
            GuessError::WrongLength {
                expected: 5,
                actual: 6
            }
        );
    }

    #[test]
    fn terminal_board_rejects_mutation() {
        let mut b = board("crane", Some(6));
        b.submit_guess("crane").unwrap();
        let before = b.state().clone();

        assert!(matches!(
            b.submit_guess("slate"),
            Err(GameError::BoardTerminated(BoardId(1)))
        ));
        assert!(matches!(
            b.record_invalid_attempt(),
            Err(GameError::BoardTerminated(_))
        ));
        assert!(matches!(b.reveal_hint(), Err(GameError::BoardTerminated(_))));
        assert_eq!(b.state(), &before);
    }

    #[test]
    fn invalid_attempts_do_not_touch_history() {
        let mut b = board("crane", Some(6));
        b.record_invalid_attempt().unwrap();
        b.record_invalid_attempt().unwrap();
        assert_eq!(b.state().invalid_guesses(), 2);
        assert_eq!(b.state().valid_guesses(), 0);
        assert!(b.state().guesses().is_empty());
    }

    #[test]
    fn hints_skip_known_positions() {
        let mut b = board("crane", Some(6));
        b.submit_guess("crate").unwrap(); // c, r, a and e correct

        let hint = b.reveal_hint().unwrap().unwrap();
        assert_eq!(hint, Hint { position: 3, letter: 'n' });
        assert_eq!(b.state().hints_used(), 1);

        // Nothing left to reveal
        assert_eq!(b.reveal_hint().unwrap(), None);
        assert_eq!(b.state().hints_used(), 1);
    }

    #[test]
    fn restore_round_trips_every_reachable_state() {
        let mut mid = board("crane", Some(6));
        mid.submit_guess("train").unwrap();
        mid.record_invalid_attempt().unwrap();
        mid.reveal_hint().unwrap();

        let mut solved = board("crane", Some(6));
        solved.submit_guess("slate").unwrap();
        solved.submit_guess("crane").unwrap();

        let mut exhausted = board("crane", Some(2));
        exhausted.submit_guess("slate").unwrap();
        exhausted.submit_guess("train").unwrap();

        for engine in [board("crane", None), mid, solved, exhausted] {
            let json = serde_json::to_string(engine.state()).unwrap();
            let saved: BoardState = serde_json::from_str(&json).unwrap();
            let restored = BoardEngine::restore(saved).unwrap();
            assert_eq!(restored.state(), engine.state());
        }
    }

    #[test]
    fn restore_rebuilds_keyboard_hints_from_guesses() {
        let mut b = board("crane", Some(6));
        b.submit_guess("nanny").unwrap();
        b.submit_guess("train").unwrap();

        let json = serde_json::to_string(b.state()).unwrap();
        assert!(!json.contains("letter_hints"));

        let saved: BoardState = serde_json::from_str(&json).unwrap();
        assert!(saved.letter_hints().is_empty());

        let restored = BoardEngine::restore(saved).unwrap();
        assert_eq!(restored.state().key_state(b'n'), Correct);
        assert_eq!(restored.state().key_state(b'y'), Wrong);
    }

    #[test]
    fn restored_keyboard_matches_live_keyboard() {
        let mut b = board("crane", Some(6));
        for guess in ["slate", "nanny", "train"] {
            b.submit_guess(guess).unwrap();
        }
        let saved: BoardState =
            serde_json::from_str(&serde_json::to_string(b.state()).unwrap()).unwrap();
        let restored = BoardEngine::restore(saved).unwrap();

        let ranked = rank_by_best_comparison(
            b.state()
                .guesses()
                .iter()
                .map(|g| (&g.word, g.comparisons.as_slice())),
        );
        assert_eq!(restored.state().letter_hints(), &ranked);
        assert_eq!(restored.state().letter_hints(), b.state().letter_hints());
        assert_eq!(restored.state().key_state(b's'), Wrong);
        assert_eq!(restored.state().key_state(b'a'), Correct);
    }

    #[test]
    fn restore_rejects_impossible_history() {
        let mut b = board("crane", Some(6));
        b.submit_guess("crane").unwrap();
        let mut json: serde_json::Value = serde_json::to_value(b.state()).unwrap();
        let extra = serde_json::json!({ "word": "slate", "comparisons": [] });
        json["guesses"].as_array_mut().unwrap().push(extra);

        let saved: BoardState = serde_json::from_value(json).unwrap();
        assert!(matches!(
            BoardEngine::restore(saved),
            Err(GameError::CorruptSave(_))
        ));
    }
}
