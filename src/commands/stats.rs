//! Stats command

use crate::persistence::Persistence;
use crate::session::GameMode;
use crate::stats::{StatsAggregator, StatsModel};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Rebuild statistics from the stored history, optionally for one mode
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn collect_stats(store: &impl Persistence, mode: Option<GameMode>) -> Result<Arc<StatsModel>> {
    let history = store.outcomes().context("Failed to read game history")?;
    let aggregator = match mode {
        Some(mode) => StatsAggregator::rebuild_for_mode(&history, mode),
        None => StatsAggregator::rebuild(&history),
    };
    Ok(aggregator.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::persistence::MemoryStore;
    use crate::session::{Difficulty, GameConfig, GameSession};

    fn record(store: &mut MemoryStore, config: GameConfig, target: &str, guess: &str) {
        let targets = vec![Word::new(target).unwrap(); config.board_count];
        let mut session = GameSession::new(config, targets).unwrap();
        loop {
            if let Some(outcome) = session.submit_guess(guess).unwrap().outcome {
                store.record_outcome(&outcome).unwrap();
                return;
            }
        }
    }

    #[test]
    fn empty_history_is_zero() {
        let stats = collect_stats(&MemoryStore::default(), None).unwrap();
        assert_eq!(*stats, StatsModel::default());
    }

    #[test]
    fn per_mode_filter() {
        let mut store = MemoryStore::default();
        record(&mut store, GameConfig::classic(Difficulty::Normal), "crane", "crane");
        record(&mut store, GameConfig::classic(Difficulty::Normal), "crane", "slate");
        record(&mut store, GameConfig::timed(Difficulty::Easy), "crane", "crane");

        let all = collect_stats(&store, None).unwrap();
        assert_eq!(all.total_games, 3);
        assert_eq!(all.total_wins, 2);
        assert_eq!(all.current_streak, 1);

        let classic = collect_stats(&store, Some(GameMode::Classic)).unwrap();
        assert_eq!(classic.total_games, 2);
        assert_eq!(classic.current_streak, 0);
        assert_eq!(classic.best_streak, 1);

        assert_eq!(collect_stats(&store, Some(GameMode::Quad)).unwrap().total_games, 0);
    }
}
