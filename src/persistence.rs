//! Persistence collaborator
//!
//! Stores finished outcomes, the set of played daily puzzles and at most one
//! suspended session. The engine only calls into this through the
//! `Persistence` trait; the storage technology is up to the implementation.

use crate::error::StoreError;
use crate::session::{GameOutcome, SaveState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub trait Persistence {
    /// Every stored outcome, oldest first
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be read.
    fn outcomes(&self) -> Result<Vec<GameOutcome>, StoreError>;

    /// # Errors
    /// Returns `StoreError` if the store cannot be written.
    fn append_outcome(&mut self, outcome: &GameOutcome) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError` if the store cannot be read.
    fn has_played_daily(&self, day_index: u32) -> Result<bool, StoreError>;

    /// # Errors
    /// Returns `StoreError` if the store cannot be written.
    fn record_daily_played(&mut self, day_index: u32) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError` if the store cannot be written.
    fn save_session(&mut self, save: &SaveState) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError` if the store cannot be read.
    fn load_session(&self) -> Result<Option<SaveState>, StoreError>;

    /// # Errors
    /// Returns `StoreError` if the store cannot be written.
    fn clear_session(&mut self) -> Result<(), StoreError>;

    /// Store a finished game and mark its daily puzzle as played
    ///
    /// A daily whose day is already recorded is refused and nothing is
    /// appended, so each day counts at most once.
    ///
    /// # Errors
    /// - `DailyAlreadyRecorded` for a second outcome of the same day
    /// - `StoreError` if the store cannot be read or written
    fn record_outcome(&mut self, outcome: &GameOutcome) -> Result<(), StoreError> {
        if let Some(day) = outcome.day_index() {
            if self.has_played_daily(day)? {
                return Err(StoreError::DailyAlreadyRecorded(day));
            }
            self.append_outcome(outcome)?;
            return self.record_daily_played(day);
        }
        self.append_outcome(outcome)
    }
}

/// Everything a store holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub outcomes: Vec<GameOutcome>,
    #[serde(default)]
    pub daily_played: BTreeSet<u32>,
    #[serde(default)]
    pub saved_session: Option<SaveState>,
}

/// In-memory store for tests and simulations
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    #[must_use]
    pub const fn data(&self) -> &StoreData {
        &self.data
    }
}

impl Persistence for MemoryStore {
    fn outcomes(&self) -> Result<Vec<GameOutcome>, StoreError> {
        Ok(self.data.outcomes.clone())
    }

    fn append_outcome(&mut self, outcome: &GameOutcome) -> Result<(), StoreError> {
        self.data.outcomes.push(outcome.clone());
        Ok(())
    }

    fn has_played_daily(&self, day_index: u32) -> Result<bool, StoreError> {
        Ok(self.data.daily_played.contains(&day_index))
    }

    fn record_daily_played(&mut self, day_index: u32) -> Result<(), StoreError> {
        self.data.daily_played.insert(day_index);
        Ok(())
    }

    fn save_session(&mut self, save: &SaveState) -> Result<(), StoreError> {
        self.data.saved_session = Some(save.clone());
        Ok(())
    }

    fn load_session(&self) -> Result<Option<SaveState>, StoreError> {
        Ok(self.data.saved_session.clone())
    }

    fn clear_session(&mut self) -> Result<(), StoreError> {
        self.data.saved_session = None;
        Ok(())
    }
}

/// Store backed by a single JSON document
///
/// Every mutation rewrites the file through a temporary sibling and a
/// rename, so a crash leaves either the old or the new document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: StoreData,
}

impl JsonFileStore {
    /// Open a store, starting empty if the file does not exist yet
    ///
    /// # Errors
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            debug!(path = %path.display(), "no store file yet, starting empty");
            StoreData::default()
        };
        Ok(Self { path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.data)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "store written");
        Ok(())
    }
}

impl Persistence for JsonFileStore {
    fn outcomes(&self) -> Result<Vec<GameOutcome>, StoreError> {
        Ok(self.data.outcomes.clone())
    }

    fn append_outcome(&mut self, outcome: &GameOutcome) -> Result<(), StoreError> {
        self.data.outcomes.push(outcome.clone());
        info!(mode = %outcome.mode(), total = self.data.outcomes.len(), "outcome stored");
        self.write()
    }

    fn has_played_daily(&self, day_index: u32) -> Result<bool, StoreError> {
        Ok(self.data.daily_played.contains(&day_index))
    }

    fn record_daily_played(&mut self, day_index: u32) -> Result<(), StoreError> {
        if self.data.daily_played.insert(day_index) {
            self.write()?;
        }
        Ok(())
    }

    fn save_session(&mut self, save: &SaveState) -> Result<(), StoreError> {
        self.data.saved_session = Some(save.clone());
        self.write()
    }

    fn load_session(&self) -> Result<Option<SaveState>, StoreError> {
        Ok(self.data.saved_session.clone())
    }

    fn clear_session(&mut self) -> Result<(), StoreError> {
        if self.data.saved_session.take().is_some() {
            self.write()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::session::{Difficulty, GameConfig, GameSession};

    fn finished(config: GameConfig) -> GameOutcome {
        let mut session = GameSession::new(config, vec![Word::new("crane").unwrap()]).unwrap();
        session.submit_guess("crane").unwrap().outcome.unwrap()
    }

    #[test]
    fn record_outcome_marks_daily() {
        let mut store = MemoryStore::default();
        store.record_outcome(&finished(GameConfig::daily(7))).unwrap();
        store.record_outcome(&finished(GameConfig::classic(Difficulty::Normal))).unwrap();

        assert!(store.has_played_daily(7).unwrap());
        assert!(!store.has_played_daily(8).unwrap());
        assert_eq!(store.outcomes().unwrap().len(), 2);
        assert_eq!(store.data().daily_played.len(), 1);
    }

    #[test]
    fn second_daily_outcome_for_a_day_is_refused() {
        let mut store = MemoryStore::default();
        let first = finished(GameConfig::daily(42));
        let second = finished(GameConfig::daily(42));

        store.record_outcome(&first).unwrap();
        assert!(matches!(
            store.record_outcome(&second),
            Err(StoreError::DailyAlreadyRecorded(42))
        ));

        assert_eq!(store.outcomes().unwrap(), vec![first]);
        let stats = crate::stats::StatsAggregator::rebuild(&store.outcomes().unwrap()).snapshot();
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn memory_store_session_slot() {
        let mut store = MemoryStore::default();
        let session =
            GameSession::new(GameConfig::classic(Difficulty::Normal), vec![Word::new("crane").unwrap()])
                .unwrap();
        let save = session.save().unwrap();

        store.save_session(&save).unwrap();
        assert_eq!(store.load_session().unwrap(), Some(save));
        store.clear_session().unwrap();
        assert_eq!(store.load_session().unwrap(), None);
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut session =
            GameSession::new(GameConfig::classic(Difficulty::Normal), vec![Word::new("crane").unwrap()])
                .unwrap();
        session.submit_guess("train").unwrap();
        let save = session.save().unwrap();
        let outcome = finished(GameConfig::daily(3));

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.record_outcome(&outcome).unwrap();
            store.save_session(&save).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.outcomes().unwrap(), vec![outcome]);
        assert!(store.has_played_daily(3).unwrap());
        assert_eq!(store.load_session().unwrap(), Some(save.clone()));

        // The reloaded save resumes into an equivalent session
        let resumed = GameSession::restore(store.load_session().unwrap().unwrap()).unwrap();
        assert_eq!(resumed.save().unwrap(), save);
    }

    #[test]
    fn json_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Json(_))));
    }
}
