//! Core domain types
//!
//! Words and the letter comparator. Everything here is pure and has no
//! knowledge of boards, clocks or sessions.

mod comparison;
mod word;

pub use comparison::{
    LetterComparison, LetterHints, compare, is_solved, rank_by_best_comparison, row_to_emoji,
};
pub(crate) use comparison::merge_row;
pub use word::{Word, WordError};
