//! User settings for the CLI
//!
//! Read from `~/.wordle_engine/config.toml` unless a path is given. A missing
//! file means defaults; a malformed one is an error.

use crate::session::Difficulty;
use crate::session::config::{DEFAULT_FRENZY_WORDS, DEFAULT_WORD_LENGTH};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const STORE_FILE: &str = "store.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub word_length: usize,
    pub difficulty: Difficulty,
    pub frenzy_words: usize,
    /// Default tracing filter; `RUST_LOG` wins when set
    pub log_level: String,
    /// Where the game store lives
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_length: DEFAULT_WORD_LENGTH,
            difficulty: Difficulty::default(),
            frenzy_words: DEFAULT_FRENZY_WORDS,
            log_level: "warn".to_string(),
            data_dir: Self::default_dir(),
        }
    }
}

impl Settings {
    /// `~/.wordle_engine`, or the working directory without a home
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wordle_engine")
    }

    #[must_use]
    pub fn default_path() -> PathBuf {
        Self::default_dir().join("config.toml")
    }

    /// Load from `path`, or from the default location
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Path of the JSON game store
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}
