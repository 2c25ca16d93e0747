//! Syllable counting.
//!
//! Words found in the pronunciation dictionary are counted from their
//! canonical pronunciation (one syllable per vowel phone). Everything else
//! goes through [`estimate_syllables`], a vowel-group heuristic with a couple
//! of corrections. The heuristic is approximate by nature.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;

/// Letters treated as syllable nuclei by the heuristic.
const VOWELS: &[u8] = b"aeiouy";

/// Adjacent vowels that are usually pronounced as two syllables.
const HIATUS_DIGRAPHS: &[&str] = &["ia", "io", "eo", "ua", "ui", "iu", "ya", "yo", "ye"];

/// How syllables are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SyllableMode {
    /// Dictionary lookup, heuristic estimate for unknown words.
    #[default]
    Auto,
    /// Heuristic estimate only.
    Estimate,
}

impl SyllableMode {
    /// Returns the mode as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Estimate => "estimate",
        }
    }
}

impl std::fmt::Display for SyllableMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a syllable count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SyllableSource {
    /// Counted from the word's canonical dictionary pronunciation.
    Dictionary,
    /// Estimated by the spelling heuristic.
    Estimate,
}

/// Look up the syllable count of a dictionary word.
///
/// `word` must already be lowercase. Entries with no vowel phone (`hmm`,
/// `shh`) count as one syllable.
pub fn lookup_syllables(dictionary: &Dictionary, word: &str) -> Option<usize> {
    dictionary
        .get(word)
        .map(|entry| entry.canonical().syllables().max(1))
}

/// Estimate syllables from spelling.
///
/// Counts runs of vowel letters, drops a silent final `e` (but not `-le`),
/// and adds one for each vowel pair that usually splits (`ia`, `io`, ...).
/// Returns 0 for an empty string and at least 1 for anything else.
pub fn estimate_syllables(word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }

    let word: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    let bytes = word.as_bytes();
    let mut syllables: usize = 0;
    let mut previous_was_vowel = false;

    // Count vowel groups
    for &b in bytes {
        let is_vowel = VOWELS.contains(&b);
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    // Silent e
    if word.ends_with('e') && !word.ends_with("le") && syllables > 1 {
        syllables -= 1;
    }

    // Vowel pairs that split into two syllables
    syllables += HIATUS_DIGRAPHS
        .iter()
        .map(|digraph| word.matches(digraph).count())
        .sum::<usize>();

    syllables.max(1)
}

/// Count syllables: dictionary lookup with estimation fallback.
///
/// Returns the count together with where it came from.
pub fn count_syllables(
    dictionary: &Dictionary,
    word: &str,
    mode: SyllableMode,
) -> (usize, SyllableSource) {
    if mode == SyllableMode::Auto
        && let Some(count) = lookup_syllables(dictionary, word)
    {
        return (count, SyllableSource::Dictionary);
    }
    (estimate_syllables(word), SyllableSource::Estimate)
}
