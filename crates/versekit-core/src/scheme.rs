//! Rhyme scheme labelling.
//!
//! Labels each line by the rhyme key of its final word: the first distinct
//! key gets `A`, the next `B`, and so on (`Z` is followed by `AA`, `AB`, ...).
//! Lines whose final word has no rhyme key get `-`.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::lexicon::Lexicon;
use crate::rhyme::RhymeKey;
use crate::text;

/// Label for lines whose final word cannot be keyed.
pub const UNKNOWN_LABEL: &str = "-";

/// Rhyme label of one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SchemeLine {
    /// 1-based line number in the analysed text.
    pub line: usize,
    /// The line text, trimmed.
    pub text: String,
    /// Final word of the line.
    pub end_word: String,
    /// Rhyme key of the final word.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<RhymeKey>,
    /// Scheme letter(s), or `-` when the word has no key.
    pub label: String,
}

/// Rhyme scheme of a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SchemeReport {
    /// One entry per line that has a final word.
    pub lines: Vec<SchemeLine>,
    /// Labels joined in line order, e.g. `ABAB`.
    pub scheme: String,
}

/// Label the lines of `text` by the rhyme of their final words.
#[tracing::instrument(skip(lexicon, text), fields(text_len = text.len()))]
pub fn rhyme_scheme(lexicon: &Lexicon, text: &str) -> AnalysisResult<SchemeReport> {
    let mut labels: HashMap<RhymeKey, String> = HashMap::new();
    let mut lines = Vec::new();

    for line in text::split_lines(text) {
        let Some(end_word) = text::last_word(line.text) else {
            continue;
        };
        let key = lexicon.rhyme_key(&end_word);
        let label = match &key {
            Some(key) => {
                let next = labels.len();
                labels
                    .entry(key.clone())
                    .or_insert_with(|| scheme_label(next))
                    .clone()
            }
            None => UNKNOWN_LABEL.to_string(),
        };
        lines.push(SchemeLine {
            line: line.number,
            text: line.text.to_string(),
            end_word,
            key,
            label,
        });
    }

    if lines.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let scheme = lines.iter().map(|l| l.label.as_str()).collect();
    Ok(SchemeReport { lines, scheme })
}

/// Spreadsheet-style letters: 0 -> `A`, 25 -> `Z`, 26 -> `AA`.
fn scheme_label(mut n: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
