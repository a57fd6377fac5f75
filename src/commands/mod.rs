//! Command implementations

pub mod play;
pub mod simulate;
pub mod stats;

pub use play::{PlayEnd, PlayOptions, run_play};
pub use simulate::{SimulationOptions, SimulationResult, play_bot, run_simulation};
pub use stats::collect_stats;
