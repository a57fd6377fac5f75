//! Statistics over finished games

mod aggregator;
mod model;

pub use aggregator::StatsAggregator;
pub use model::StatsModel;
