//! Single-writer statistics aggregator
//!
//! Readers take `Arc` snapshots. A fold builds the next model and swaps the
//! whole value in under the write lock, so a reader sees either the model
//! before the fold or the model after it.

use super::model::StatsModel;
use crate::session::{GameMode, GameOutcome};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
pub struct StatsAggregator {
    model: RwLock<Arc<StatsModel>>,
}

impl StatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a whole history, oldest first
    #[must_use]
    pub fn rebuild<'a>(outcomes: impl IntoIterator<Item = &'a GameOutcome>) -> Self {
        let model = outcomes
            .into_iter()
            .fold(StatsModel::default(), |model, outcome| model.folded(outcome));
        Self {
            model: RwLock::new(Arc::new(model)),
        }
    }

    /// Fold only the games of one mode
    #[must_use]
    pub fn rebuild_for_mode<'a>(
        outcomes: impl IntoIterator<Item = &'a GameOutcome>,
        mode: GameMode,
    ) -> Self {
        Self::rebuild(outcomes.into_iter().filter(|o| o.mode() == mode))
    }

    /// Add one finished game and return the new snapshot
    pub fn fold(&self, outcome: &GameOutcome) -> Arc<StatsModel> {
        let mut current = self.model.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(current.folded(outcome));
        *current = Arc::clone(&next);
        debug!(
            games = next.total_games,
            streak = next.current_streak,
            "stats folded"
        );
        next
    }

    /// Current model
    #[must_use]
    pub fn snapshot(&self) -> Arc<StatsModel> {
        Arc::clone(&self.model.read().unwrap_or_else(PoisonError::into_inner))
    }
}
