//! Formatting utilities for terminal output

use crate::board::{BoardState, GuessRecord};
use crate::core::LetterComparison;
use colored::{ColoredString, Colorize};

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// One letter as a colored tile
#[must_use]
pub fn tile(letter: char, verdict: LetterComparison) -> ColoredString {
    let text = format!(" {} ", letter.to_ascii_uppercase());
    match verdict {
        LetterComparison::Correct => text.black().on_green().bold(),
        LetterComparison::Present => text.black().on_yellow().bold(),
        LetterComparison::Wrong => text.white().on_bright_black(),
        LetterComparison::Unset => text.normal(),
    }
}

/// A scored guess as a row of tiles
#[must_use]
pub fn colored_row(record: &GuessRecord) -> String {
    record
        .word
        .chars()
        .iter()
        .zip(&record.comparisons)
        .map(|(&letter, &verdict)| tile(char::from(letter), verdict).to_string())
        .collect()
}

/// Empty row placeholder for guesses still available
#[must_use]
pub fn blank_row(width: usize) -> String {
    " _ ".repeat(width).bright_black().to_string()
}

/// QWERTY keyboard colored by the best verdict seen per letter
#[must_use]
pub fn keyboard(state: &BoardState) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let keys: String = row
                .bytes()
                .map(|key| tile(char::from(key), state.key_state(key)).to_string())
                .collect();
            format!("{}{keys}", " ".repeat(indent * 2))
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// `m:ss`
#[must_use]
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
