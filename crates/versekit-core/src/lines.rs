//! Per-line syllable counts for lyrics and poems.
//!
//! Each non-blank line is split into words and every word is counted through
//! the [`Lexicon`], so dictionary words get their recorded count and unknown
//! words fall back to the spelling estimate.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::lexicon::Lexicon;
use crate::syllables::{SyllableMode, SyllableSource};
use crate::text;

/// Syllable count of one word within a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordCount {
    /// The word, lowercased with surrounding punctuation removed.
    pub word: String,
    /// Number of syllables.
    pub syllables: usize,
    /// Dictionary or estimate.
    pub source: SyllableSource,
}

/// Syllable counts for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LineReport {
    /// 1-based line number in the analysed text.
    pub line: usize,
    /// The line text, trimmed.
    pub text: String,
    /// Total syllables in the line.
    pub syllables: usize,
    /// Per-word counts, in order.
    pub words: Vec<WordCount>,
}

/// Syllable counts for a whole text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinesReport {
    /// Counting mode used.
    pub mode: SyllableMode,
    /// One entry per non-blank line that has words.
    pub lines: Vec<LineReport>,
    /// Words counted across all lines.
    pub total_words: usize,
    /// Syllables counted across all lines.
    pub total_syllables: usize,
    /// Words whose count came from the estimate.
    pub estimated_words: usize,
}

/// Count syllables line by line.
///
/// Lines without any word (blank or punctuation only) are left out. Returns
/// [`AnalysisError::EmptyInput`] when the text has no words at all.
#[tracing::instrument(skip(lexicon, text), fields(text_len = text.len()))]
pub fn analyze_lines(
    lexicon: &Lexicon,
    text: &str,
    mode: SyllableMode,
) -> AnalysisResult<LinesReport> {
    let mut lines = Vec::new();

    for line in text::split_lines(text) {
        let words: Vec<WordCount> = text::extract_words(line.text)
            .into_iter()
            .map(|word| {
                let report = lexicon.syllables(&word, mode);
                WordCount {
                    word,
                    syllables: report.syllables,
                    source: report.source,
                }
            })
            .collect();
        if words.is_empty() {
            continue;
        }

        lines.push(LineReport {
            line: line.number,
            text: line.text.to_string(),
            syllables: words.iter().map(|w| w.syllables).sum(),
            words,
        });
    }

    if lines.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let all_words = || lines.iter().flat_map(|l| l.words.iter());
    let report = LinesReport {
        mode,
        total_words: all_words().count(),
        total_syllables: lines.iter().map(|l| l.syllables).sum(),
        estimated_words: all_words()
            .filter(|w| w.source == SyllableSource::Estimate)
            .count(),
        lines,
    };
    tracing::debug!(
        lines = report.lines.len(),
        syllables = report.total_syllables,
        "counted syllables"
    );
    Ok(report)
}
