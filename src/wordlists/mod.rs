//! Word lists and the word source collaborator
//!
//! Provides embedded word lists compiled into the binary for zero-cost access.

mod embedded;
pub mod loader;
mod source;

pub use embedded::{WORDS_4, WORDS_5, WORDS_6};
pub use source::{EmbeddedWordSource, WordSource};
