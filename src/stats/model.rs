//! Running statistics over finished games
//!
//! Only counters are stored. Every rate is computed on read and is zero when
//! its denominator is zero.

use crate::session::{GameOutcome, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsModel {
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_games: u32,
    /// Games that ended in a win or a loss (zen and timed-out frenzy excluded)
    pub decided_games: u32,
    pub total_wins: u32,
    pub total_valid_guesses: u64,
    pub total_invalid_guesses: u64,
    pub total_hints_used: u64,
    pub total_time_secs: u64,
    pub total_words_solved: u64,
    /// Winning games keyed by number of valid guesses
    pub guess_histogram: BTreeMap<u32, u32>,
    /// How often each word opened a game
    pub opening_words: BTreeMap<String, u32>,
}

impl StatsModel {
    /// The model after one more finished game
    #[must_use]
    pub fn folded(&self, outcome: &GameOutcome) -> Self {
        let mut next = self.clone();

        next.total_games += 1;
        next.total_valid_guesses += u64::from(outcome.valid_guesses());
        next.total_invalid_guesses += u64::from(outcome.invalid_guesses());
        next.total_hints_used += u64::from(outcome.hints_used());
        next.total_time_secs += outcome.elapsed_secs();
        next.total_words_solved += u64::from(outcome.words_solved());
        if let Some(word) = outcome.opening_word() {
            *next.opening_words.entry(word.text().to_string()).or_insert(0) += 1;
        }

        match outcome.result() {
            Some(GameResult::Win) => {
                next.decided_games += 1;
                next.total_wins += 1;
                next.current_streak += 1;
                next.best_streak = next.best_streak.max(next.current_streak);
                *next.guess_histogram.entry(outcome.valid_guesses()).or_insert(0) += 1;
            }
            Some(GameResult::Lose) => {
                next.decided_games += 1;
                next.current_streak = 0;
            }
            None => {}
        }

        next
    }

    #[must_use]
    pub const fn total_losses(&self) -> u32 {
        self.decided_games - self.total_wins
    }

    /// Fraction of decided games that were won
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        ratio(u64::from(self.total_wins), u64::from(self.decided_games))
    }

    /// Seconds per game
    #[must_use]
    pub fn average_time_per_game(&self) -> f64 {
        ratio(self.total_time_secs, u64::from(self.total_games))
    }

    /// Seconds per solved word
    #[must_use]
    pub fn average_time_per_word(&self) -> f64 {
        ratio(self.total_time_secs, self.total_words_solved)
    }

    /// Seconds per valid guess
    #[must_use]
    pub fn average_time_per_guess(&self) -> f64 {
        ratio(self.total_time_secs, self.total_valid_guesses)
    }

    /// Mean valid guesses over winning games
    #[must_use]
    pub fn average_guesses_per_win(&self) -> f64 {
        let weighted: u64 = self
            .guess_histogram
            .iter()
            .map(|(&guesses, &games)| u64::from(guesses) * u64::from(games))
            .sum();
        ratio(weighted, u64::from(self.total_wins))
    }

    /// Most used opening word; ties go to the alphabetically first
    #[must_use]
    pub fn favourite_opening_word(&self) -> Option<&str> {
        self.opening_words
            .iter()
            .max_by(|(wa, ca), (wb, cb)| ca.cmp(cb).then_with(|| wb.cmp(wa)))
            .map(|(word, _)| word.as_str())
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
