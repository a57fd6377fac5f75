//! Simulate command
//!
//! Plays many games with a bot that always guesses a word consistent with
//! everything it has seen, then folds the outcomes into statistics.

use crate::board::BoardState;
use crate::core::{Word, compare};
use crate::error::GameError;
use crate::session::{GameConfig, GameOutcome, GameSession};
use crate::stats::{StatsAggregator, StatsModel};
use crate::wordlists::WordSource;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// How to run a simulation
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub config: GameConfig,
    pub games: usize,
    /// Base seed; game `i` uses `seed + i`
    pub seed: u64,
    /// Clock ticks delivered before every guess
    pub secs_per_guess: u32,
    pub show_progress: bool,
}

/// Result of a simulation run
#[derive(Debug)]
pub struct SimulationResult {
    pub outcomes: Vec<GameOutcome>,
    pub stats: Arc<StatsModel>,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// Play `options.games` games in parallel
///
/// Outcomes come back in game order and are folded in that order, so a
/// given seed always yields the same statistics.
///
/// # Errors
/// Returns the first `GameError` a game hits, typically `NotEnoughWords`
/// when the word source is too small for the configuration.
pub fn run_simulation<W: WordSource + Sync>(
    options: &SimulationOptions,
    source: &W,
) -> Result<SimulationResult, GameError> {
    let pb = if options.show_progress {
        ProgressBar::new(options.games as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░"),
    );
    pb.set_message(options.config.mode.to_string());

    let start = Instant::now();
    let outcomes = (0..options.games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(i as u64));
            let outcome = play_bot(options.config.clone(), source, options.secs_per_guess, &mut rng);
            pb.inc(1);
            outcome
        })
        .collect::<Result<Vec<_>, _>>()?;
    pb.finish_with_message("Complete!");

    let aggregator = StatsAggregator::new();
    for outcome in &outcomes {
        aggregator.fold(outcome);
    }

    let duration = start.elapsed();
    let games_per_second = if duration.is_zero() {
        0.0
    } else {
        outcomes.len() as f64 / duration.as_secs_f64()
    };
    info!(games = outcomes.len(), secs = duration.as_secs_f64(), "simulation finished");

    Ok(SimulationResult {
        outcomes,
        stats: aggregator.snapshot(),
        duration,
        games_per_second,
    })
}

/// Play one game to the end with random consistent guesses
///
/// # Errors
/// Returns `GameError` if the session cannot be started.
pub fn play_bot<R: Rng + ?Sized>(
    config: GameConfig,
    source: &impl WordSource,
    secs_per_guess: u32,
    rng: &mut R,
) -> Result<GameOutcome, GameError> {
    let words = source.words_of_length(config.word_length);
    let mut session = GameSession::start(config, source, rng)?;

    loop {
        for _ in 0..secs_per_guess {
            session.tick()?;
            if let Some(outcome) = session.outcome() {
                return Ok(outcome.clone());
            }
        }

        let guess = {
            let boards = session.boards();
            let Some(board) = session
                .active_boards()
                .first()
                .and_then(|id| boards.iter().find(|b| b.id() == *id))
            else {
                return Err(GameError::AllBoardsFinished);
            };
            pick_consistent(board, &words, rng).ok_or(GameError::NotEnoughWords {
                length: board.target().len(),
                needed: 1,
                available: 0,
            })?
        };

        if let Some(outcome) = session.submit_guess(guess.text())?.outcome {
            return Ok(outcome);
        }
    }
}

/// A random word that would have produced every row on `board`
fn pick_consistent<R: Rng + ?Sized>(board: &BoardState, words: &[Word], rng: &mut R) -> Option<Word> {
    let candidates: Vec<&Word> = words
        .iter()
        .filter(|candidate| {
            board.guesses().iter().all(|row| {
                compare(candidate, &row.word).is_ok_and(|verdicts| verdicts == row.comparisons)
            })
        })
        .collect();
    candidates.choose(rng).map(|w| (*w).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Difficulty, GameMode, GameResult};
    use crate::wordlists::EmbeddedWordSource;

    fn options(config: GameConfig, games: usize) -> SimulationOptions {
        SimulationOptions {
            config,
            games,
            seed: 11,
            secs_per_guess: 3,
            show_progress: false,
        }
    }

    #[test]
    fn simulation_plays_every_game() {
        let source = EmbeddedWordSource::new();
        let result =
            run_simulation(&options(GameConfig::classic(Difficulty::Normal), 20), &source).unwrap();

        assert_eq!(result.outcomes.len(), 20);
        assert_eq!(result.stats.total_games, 20);
        assert_eq!(result.stats.decided_games, 20);
        let histogram_total: u32 = result.stats.guess_histogram.values().sum();
        assert_eq!(histogram_total, result.stats.total_wins);
        for outcome in &result.outcomes {
            assert!(outcome.valid_guesses() >= 1 && outcome.valid_guesses() <= 6);
            assert_eq!(outcome.elapsed_secs(), u64::from(outcome.valid_guesses()) * 3);
        }
    }

    #[test]
    fn same_seed_same_outcomes() {
        let source = EmbeddedWordSource::new();
        let opts = options(GameConfig::quad(Difficulty::Easy), 8);
        let first = run_simulation(&opts, &source).unwrap();
        let second = run_simulation(&opts, &source).unwrap();
        assert_eq!(first.outcomes, second.outcomes);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn zen_bot_always_solves() {
        let source = EmbeddedWordSource::new();
        let result =
            run_simulation(&options(GameConfig::zen(Difficulty::Normal), 5), &source).unwrap();
        for outcome in &result.outcomes {
            assert_eq!(outcome.result(), None);
            assert_eq!(outcome.words_solved(), 1);
        }
        assert_eq!(result.stats.decided_games, 0);
    }

    #[test]
    fn slow_bot_runs_out_of_time() {
        let source = EmbeddedWordSource::new();
        let config = GameConfig::timed(Difficulty::Hard);
        let mut opts = options(config, 3);
        opts.secs_per_guess = 100;
        let result = run_simulation(&opts, &source).unwrap();
        for outcome in &result.outcomes {
            assert_eq!(outcome.mode(), GameMode::Timed);
            assert_eq!(outcome.result(), Some(GameResult::Lose));
            assert_eq!(outcome.valid_guesses(), 0);
        }
    }

    #[test]
    fn bot_guesses_stay_consistent() {
        let source = EmbeddedWordSource::from_words(
            ["crane", "crate", "trace", "slate", "plumb"]
                .iter()
                .map(|w| Word::new(w).unwrap()),
        );
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = play_bot(GameConfig::zen(Difficulty::Normal), &source, 0, &mut rng).unwrap();

        let board = &outcome.boards()[0];
        for (i, row) in board.rows.iter().enumerate() {
            for earlier in &board.rows[..i] {
                assert_eq!(compare(&row.word, &earlier.word).unwrap(), earlier.comparisons);
            }
        }
    }

    #[test]
    fn too_few_words_is_an_error() {
        let source = EmbeddedWordSource::from_words([Word::new("crane").unwrap()]);
        let err = run_simulation(&options(GameConfig::quad(Difficulty::Easy), 2), &source).unwrap_err();
        assert!(matches!(err, GameError::NotEnoughWords { .. }));
    }
}
