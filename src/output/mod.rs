//! Terminal output formatting
//!
//! Display utilities for boards, outcomes and statistics.

pub mod display;
pub mod formatters;

pub use display::{print_outcome, print_session, print_simulation, print_stats};
