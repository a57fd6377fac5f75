//! Letter comparison: scoring a guess against a target
//!
//! A comparison row has one verdict per letter:
//! - Wrong (letter not in word, or all its occurrences already credited)
//! - Present (letter in word, wrong position)
//! - Correct (letter in correct position)
//!
//! `Unset` marks keys that have not been guessed yet.

use super::Word;
use crate::error::ShapeMismatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-letter verdict, ordered `Unset < Wrong < Present < Correct`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LetterComparison {
    #[default]
    Unset,
    Wrong,
    Present,
    Correct,
}

/// Best comparison seen so far for each guessed letter (keyboard coloring)
pub type LetterHints = BTreeMap<u8, LetterComparison>;

impl LetterComparison {
    /// Emoji square for this verdict
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Wrong => '⬛',
            Self::Unset => '⬜',
        }
    }

}

/// Score `guess` against `target`
///
/// This implements the exact duplicate-letter rules.
///
/// # Algorithm
/// 1. First pass: Mark all exact matches (correct) and remove them from the available pool
/// 2. Second pass: Mark displaced letters (present) from what remains in the pool
///
/// # Errors
/// Returns `ShapeMismatch` if the words differ in length. Callers validate
/// guess length first, so this indicates a bug upstream.
///
/// # Examples
/// ```
/// use wordle_engine::core::{Word, LetterComparison::*, compare};
///
/// let target = Word::new("abcde").unwrap();
/// let guess = Word::new("eabcd").unwrap();
/// assert_eq!(compare(&target, &guess).unwrap(), vec![Present; 5]);
/// ```
pub fn compare(target: &Word, guess: &Word) -> Result<Vec<LetterComparison>, ShapeMismatch> {
    if target.len() != guess.len() {
        return Err(ShapeMismatch {
            target_len: target.len(),
            guess_len: guess.len(),
        });
    }

    let mut result = vec![LetterComparison::Wrong; target.len()];
    let mut target_available = target.letter_counts();

    // First pass: Mark exact position matches
    for (i, (&g, &t)) in guess.chars().iter().zip(target.chars()).enumerate() {
        if g == t {
            result[i] = LetterComparison::Correct;
            if let Some(count) = target_available.get_mut(&g) {
                *count = count.saturating_sub(1);
            }
        }
    }

    // Second pass: Mark displaced letters from the remaining pool
    for (i, &g) in guess.chars().iter().enumerate() {
        if result[i] == LetterComparison::Correct {
            continue;
        }
        if let Some(count) = target_available.get_mut(&g)
            && *count > 0
        {
            result[i] = LetterComparison::Present;
            *count -= 1;
        }
    }

    Ok(result)
}

/// Fold guess rows into the best comparison each letter has achieved
///
/// Letters that were never guessed are absent (implicitly `Unset`).
pub fn rank_by_best_comparison<'a, I>(rows: I) -> LetterHints
where
    I: IntoIterator<Item = (&'a Word, &'a [LetterComparison])>,
{
    let mut hints = LetterHints::new();
    for (guess, comparisons) in rows {
        merge_row(&mut hints, guess, comparisons);
    }
    hints
}

/// Merge one scored guess into an existing hint map
pub(crate) fn merge_row(hints: &mut LetterHints, guess: &Word, comparisons: &[LetterComparison]) {
    for (&letter, &comparison) in guess.chars().iter().zip(comparisons) {
        let best = hints.entry(letter).or_default();
        *best = (*best).max(comparison);
    }
}

/// Whether every letter in a row is correct
#[must_use]
pub fn is_solved(row: &[LetterComparison]) -> bool {
    !row.is_empty() && row.iter().all(|&c| c == LetterComparison::Correct)
}

/// Convert a row to an emoji string like "🟩🟨⬛🟩🟨"
#[must_use]
pub fn row_to_emoji(row: &[LetterComparison]) -> String {
    row.iter().map(|c| c.emoji()).collect()
}

#[cfg(test)]
mod tests {
    use super::LetterComparison::{Correct, Present, Unset, Wrong};
    use super::*;

    fn w(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn ordering_is_total() {
        assert!(Unset < Wrong);
        assert!(Wrong < Present);
        assert!(Present < Correct);
        assert_eq!(Wrong.max(Correct), Correct);
    }

    #[test]
    fn all_wrong() {
        let row = compare(&w("fghij"), &w("abcde")).unwrap();
        assert_eq!(row, vec![Wrong; 5]);
    }

    #[test]
    fn all_correct() {
        let row = compare(&w("crane"), &w("crane")).unwrap();
        assert!(is_solved(&row));
    }

    #[test]
    fn rotation_is_all_present() {
        let row = compare(&w("abcde"), &w("eabcd")).unwrap();
        assert_eq!(row, vec![Present, Present, Present, Present, Present]);
    }

    #[test]
    fn crane_vs_train() {
        // T(wrong) R(correct) A(correct) I(wrong) N(present)
        let row = compare(&w("crane"), &w("train")).unwrap();
        assert_eq!(row, vec![Wrong, Correct, Correct, Wrong, Present]);
    }

    #[test]
    fn repeated_guess_letter_credited_once() {
        // CRANE has a single E at the last position
        let row = compare(&w("crane"), &w("eeeee")).unwrap();
        assert_eq!(row, vec![Wrong, Wrong, Wrong, Wrong, Correct]);
        assert_eq!(row.iter().filter(|&&c| c != Wrong).count(), 1);
    }

    #[test]
    fn correct_takes_priority_over_earlier_present() {
        // The N at index 3 is exact, so the N at index 0 gets nothing
        let row = compare(&w("crane"), &w("nanny")).unwrap();
        assert_eq!(row, vec![Wrong, Present, Wrong, Correct, Wrong]);
    }

    #[test]
    fn duplicate_letters_in_both_words() {
        // SPEED vs ERASE: S(present) P(wrong) E(present) E(present) D(wrong)
        let row = compare(&w("erase"), &w("speed")).unwrap();
        assert_eq!(row, vec![Present, Wrong, Present, Present, Wrong]);

        // ROBOT vs FLOOR: R(present) O(present) B(wrong) O(correct) T(wrong)
        let row = compare(&w("floor"), &w("robot")).unwrap();
        assert_eq!(row, vec![Present, Present, Wrong, Correct, Wrong]);
    }

    #[test]
    fn never_more_marks_than_occurrences() {
        let target = w("level");
        for guess in ["eeeee", "lllll", "evele", "leell"] {
            let guess = w(guess);
            let row = compare(&target, &guess).unwrap();
            assert_eq!(row.len(), target.len());
            for letter in b'a'..=b'z' {
                let in_target = target.chars().iter().filter(|&&c| c == letter).count();
                let credited = guess
                    .chars()
                    .iter()
                    .zip(&row)
                    .filter(|&(&c, &v)| c == letter && v != Wrong)
                    .count();
                assert!(credited <= in_target, "{guess} over-credits {}", letter as char);
            }
            for (i, (&g, &t)) in guess.chars().iter().zip(target.chars()).enumerate() {
                if g == t {
                    assert_eq!(row[i], Correct);
                }
            }
        }
    }

    #[test]
    fn shape_mismatch_rejected() {
        let err = compare(&w("crane"), &w("cranes")).unwrap_err();
        assert_eq!(
            err,
            ShapeMismatch {
                target_len: 5,
                guess_len: 6
            }
        );
    }

    #[test]
    fn rank_keeps_best_comparison() {
        let target = w("crane");
        let g1 = w("nanny");
        let g2 = w("train");
        let r1 = compare(&target, &g1).unwrap();
        let r2 = compare(&target, &g2).unwrap();

        let hints = rank_by_best_comparison([(&g1, r1.as_slice()), (&g2, r2.as_slice())]);

        // N: correct in NANNY beats present in TRAIN
        assert_eq!(hints[&b'n'], Correct);
        assert_eq!(hints[&b'a'], Correct);
        assert_eq!(hints[&b'y'], Wrong);
        assert_eq!(hints[&b't'], Wrong);
        assert!(!hints.contains_key(&b'z'));
    }

    #[test]
    fn renders_share_row() {
        let row = compare(&w("crane"), &w("train")).unwrap();
        assert_eq!(row_to_emoji(&row), "⬛🟩🟩⬛🟨");
        assert_eq!(Unset.emoji(), '⬜');
    }
}
