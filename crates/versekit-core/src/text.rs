//! Text processing utilities.
//!
//! Provides line splitting and word extraction for the line and rhyme-scheme
//! analyses.

/// A non-blank line of input with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based position in the input, counting blank lines.
    pub number: usize,
    /// The line with surrounding whitespace trimmed.
    pub text: &'a str,
}

/// Split text into non-blank lines, keeping their original line numbers.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| Line {
            number: i + 1,
            text: line.trim(),
        })
        .filter(|line| !line.text.is_empty())
        .collect()
}

/// Extract words from text, splitting on whitespace and stripping punctuation.
///
/// Apostrophes and hyphens inside a word are kept (`don't`, `well-known`).
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// The last word of a line, if it has any.
pub fn last_word(line: &str) -> Option<String> {
    extract_words(line).pop()
}
