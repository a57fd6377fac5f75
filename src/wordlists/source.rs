//! Word source collaborator
//!
//! Supplies targets, answers dictionary lookups and picks the word of the
//! day. Dictionary membership is decided here, never by the boards.

use super::embedded::{WORDS_4, WORDS_5, WORDS_6};
use super::loader::words_from_slice;
use crate::core::Word;
use rustc_hash::{FxHashMap, FxHashSet};

/// Lookup interface used by sessions and front ends
pub trait WordSource {
    /// Every known word of `length` letters, sorted and without duplicates
    fn words_of_length(&self, length: usize) -> Vec<Word>;

    /// Whether `word` is a real word
    fn is_valid_dictionary_word(&self, word: &Word) -> bool;

    /// Word of the day, stable for a given day index and length
    ///
    /// Returns `None` when no word of that length is known.
    fn daily_word(&self, day_index: u32, length: usize) -> Option<Word> {
        let words = self.words_of_length(length);
        if words.is_empty() {
            return None;
        }
        let slot = daily_slot(day_index, words.len());
        words.into_iter().nth(slot)
    }
}

/// Scatter consecutive days across the list with a fixed multiplicative hash
fn daily_slot(day_index: u32, len: usize) -> usize {
    let mixed = u64::from(day_index).wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32;
    (mixed % len as u64) as usize
}

/// Word source backed by in-memory lists
#[derive(Debug, Clone, Default)]
pub struct EmbeddedWordSource {
    by_length: FxHashMap<usize, Vec<Word>>,
    lookup: FxHashSet<Word>,
}

impl EmbeddedWordSource {
    /// Source over the word lists compiled into the binary
    #[must_use]
    pub fn new() -> Self {
        let mut words = words_from_slice(WORDS_4);
        words.extend(words_from_slice(WORDS_5));
        words.extend(words_from_slice(WORDS_6));
        Self::from_words(words)
    }

    /// Source over an arbitrary word collection
    #[must_use]
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let lookup: FxHashSet<Word> = words.into_iter().collect();
        let mut by_length: FxHashMap<usize, Vec<Word>> = FxHashMap::default();
        for word in &lookup {
            by_length.entry(word.len()).or_default().push(word.clone());
        }
        for list in by_length.values_mut() {
            list.sort();
        }
        Self { by_length, lookup }
    }

    /// This source plus `words`
    #[must_use]
    pub fn extended(self, words: impl IntoIterator<Item = Word>) -> Self {
        Self::from_words(self.lookup.into_iter().chain(words))
    }

    /// Total number of known words
    #[must_use]
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

impl WordSource for EmbeddedWordSource {
    fn words_of_length(&self, length: usize) -> Vec<Word> {
        self.by_length.get(&length).cloned().unwrap_or_default()
    }

    fn is_valid_dictionary_word(&self, word: &Word) -> bool {
        self.lookup.contains(word)
    }
}
