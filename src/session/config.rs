//! Game configuration: mode, difficulty and the rules they imply

use crate::board::Activation;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Guess cap for every capped mode
pub const DEFAULT_GUESS_CAP: u32 = 6;

/// Simultaneous boards in quad mode
pub const QUAD_BOARDS: usize = 4;

/// Words to clear in a frenzy game unless configured otherwise
pub const DEFAULT_FRENZY_WORDS: usize = 10;

/// Default word length
pub const DEFAULT_WORD_LENGTH: usize = 5;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// One word, six guesses
    Classic,
    /// One word, six guesses, against the clock
    Timed,
    /// One word, unlimited guesses, no win or loss
    Zen,
    /// Four words at once, every guess goes to every board
    Quad,
    /// A run of words one after another, against the clock
    Frenzy,
}

impl GameMode {
    /// Whether games in this mode end in a win or a loss
    #[must_use]
    pub const fn is_winnable(self) -> bool {
        !matches!(self, Self::Zen)
    }

    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(self, Self::Timed | Self::Frenzy)
    }

    #[must_use]
    pub const fn activation(self) -> Activation {
        match self {
            Self::Frenzy => Activation::Sequential,
            _ => Activation::Simultaneous,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Timed => "timed",
            Self::Zen => "zen",
            Self::Quad => "quad",
            Self::Frenzy => "frenzy",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Time limit for a single timed word
    #[must_use]
    pub const fn time_limit_secs(self) -> u64 {
        match self {
            Self::Easy => 300,
            Self::Normal => 180,
            Self::Hard => 90,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        })
    }
}

/// Everything needed to set up one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub word_length: usize,
    /// Count-down limit; `None` means the clock counts up
    pub time_limit_secs: Option<u64>,
    /// Guesses per board; `None` means uncapped
    pub guess_cap: Option<u32>,
    pub board_count: usize,
    /// Set for the daily puzzle; targets then come from the day index
    pub day_index: Option<u32>,
}

impl GameConfig {
    /// Standard configuration for a mode
    #[must_use]
    pub const fn for_mode(mode: GameMode, difficulty: Difficulty) -> Self {
        match mode {
            GameMode::Classic => Self::classic(difficulty),
            GameMode::Timed => Self::timed(difficulty),
            GameMode::Zen => Self::zen(difficulty),
            GameMode::Quad => Self::quad(difficulty),
            GameMode::Frenzy => Self::frenzy(difficulty, DEFAULT_FRENZY_WORDS),
        }
    }

    #[must_use]
    pub const fn classic(difficulty: Difficulty) -> Self {
        Self::base(GameMode::Classic, difficulty, None, Some(DEFAULT_GUESS_CAP), 1)
    }

    #[must_use]
    pub const fn timed(difficulty: Difficulty) -> Self {
        Self::base(
            GameMode::Timed,
            difficulty,
            Some(difficulty.time_limit_secs()),
            Some(DEFAULT_GUESS_CAP),
            1,
        )
    }

    #[must_use]
    pub const fn zen(difficulty: Difficulty) -> Self {
        Self::base(GameMode::Zen, difficulty, None, None, 1)
    }

    #[must_use]
    pub const fn quad(difficulty: Difficulty) -> Self {
        Self::base(
            GameMode::Quad,
            difficulty,
            None,
            Some(DEFAULT_GUESS_CAP),
            QUAD_BOARDS,
        )
    }

    /// Sequential run of `words` targets on twice the single-word time limit
    #[must_use]
    pub const fn frenzy(difficulty: Difficulty, words: usize) -> Self {
        Self::base(
            GameMode::Frenzy,
            difficulty,
            Some(difficulty.time_limit_secs() * 2),
            Some(DEFAULT_GUESS_CAP),
            words,
        )
    }

    /// Classic game whose target is the word of the day
    #[must_use]
    pub const fn daily(day_index: u32) -> Self {
        let mut config = Self::classic(Difficulty::Normal);
        config.day_index = Some(day_index);
        config
    }

    #[must_use]
    pub const fn with_word_length(mut self, word_length: usize) -> Self {
        self.word_length = word_length;
        self
    }

    #[must_use]
    pub const fn with_guess_cap(mut self, guess_cap: Option<u32>) -> Self {
        self.guess_cap = guess_cap;
        self
    }

    #[must_use]
    pub const fn is_daily(&self) -> bool {
        self.day_index.is_some()
    }

    const fn base(
        mode: GameMode,
        difficulty: Difficulty,
        time_limit_secs: Option<u64>,
        guess_cap: Option<u32>,
        board_count: usize,
    ) -> Self {
        Self {
            mode,
            difficulty,
            word_length: DEFAULT_WORD_LENGTH,
            time_limit_secs,
            guess_cap,
            board_count,
            day_index: None,
        }
    }
}

/// Daily puzzle number for a calendar date (days since 1970-01-01)
///
/// Returns `None` for dates before 1970 or too far ahead for a `u32`.
#[must_use]
pub fn day_index(date: NaiveDate) -> Option<u32> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    u32::try_from(date.signed_duration_since(epoch).num_days()).ok()
}

/// Today's puzzle number; the daily word changes at local midnight
#[must_use]
pub fn today_index() -> Option<u32> {
    day_index(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_modes_default_to_six_guesses() {
        for mode in [GameMode::Classic, GameMode::Timed, GameMode::Quad, GameMode::Frenzy] {
            let config = GameConfig::for_mode(mode, Difficulty::Normal);
            assert_eq!(config.guess_cap, Some(DEFAULT_GUESS_CAP), "{mode}");
        }
        assert_eq!(GameConfig::zen(Difficulty::Normal).guess_cap, None);
    }

    #[test]
    fn board_counts_per_mode() {
        assert_eq!(GameConfig::classic(Difficulty::Easy).board_count, 1);
        assert_eq!(GameConfig::quad(Difficulty::Easy).board_count, 4);
        assert_eq!(GameConfig::frenzy(Difficulty::Easy, 7).board_count, 7);
    }

    #[test]
    fn only_timed_modes_have_limits() {
        assert_eq!(GameConfig::timed(Difficulty::Hard).time_limit_secs, Some(90));
        assert_eq!(GameConfig::frenzy(Difficulty::Hard, 3).time_limit_secs, Some(180));
        assert_eq!(GameConfig::classic(Difficulty::Hard).time_limit_secs, None);
        assert_eq!(GameConfig::zen(Difficulty::Hard).time_limit_secs, None);
    }

    #[test]
    fn daily_is_classic_with_day_index() {
        let config = GameConfig::daily(42);
        assert_eq!(config.mode, GameMode::Classic);
        assert_eq!(config.day_index, Some(42));
        assert!(config.is_daily());
        assert!(!GameConfig::classic(Difficulty::Normal).is_daily());
    }

    #[test]
    fn day_index_counts_calendar_days() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(day_index(date(1970, 1, 1)), Some(0));
        assert_eq!(day_index(date(1970, 1, 2)), Some(1));
        assert_eq!(day_index(date(2024, 2, 29)), Some(19_782));
        assert_eq!(day_index(date(1969, 12, 31)), None);
        assert!(today_index().is_some());
    }

    #[test]
    fn mode_rules() {
        assert!(!GameMode::Zen.is_winnable());
        assert!(GameMode::Frenzy.is_timed());
        assert_eq!(GameMode::Frenzy.activation(), Activation::Sequential);
        assert_eq!(GameMode::Quad.activation(), Activation::Simultaneous);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GameConfig::frenzy(Difficulty::Easy, 5).with_word_length(6);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"mode\":\"frenzy\""));
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
