//! Boards: the per-target guess state machine and the multi-board coordinator

mod engine;
mod multi;

pub use engine::{BoardEngine, BoardId, BoardState, BoardStatus, GuessRecord, GuessResult, Hint};
pub use multi::{Activation, Aggregate, MultiBoardCoordinator, MultiBoardState, MultiGuessResult};
