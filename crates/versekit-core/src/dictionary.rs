//! Pronunciation dictionary parsing.
//!
//! Reads the line-oriented CMU dictionary format:
//!
//! ```text
//! ;;; comment lines start with three semicolons
//! read R EH1 D
//! read(2) R IY1 D
//! achill AE1 K IH0 L # place, irish
//! ```
//!
//! The first token is the word (with an optional `(N)` homograph marker),
//! the remaining tokens are phones up to the first token starting with `#`,
//! which opens a trailing comment. Alternate pronunciations accumulate under
//! the same base word in the order they appear.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::pronunciation::{PronunciationVariant, select_canonical};

/// A small CMU-format dictionary compiled into the crate.
pub const BUNDLED_DICTIONARY: &str = include_str!("../data/cmudict-sample.dict");

/// Prefix marking a comment line.
const COMMENT_MARKER: &str = ";;;";

/// Trailing homograph marker such as `(2)`.
static HOMOGRAPH_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)$").expect("valid regex"));

/// A base word and its pronunciations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    word: String,
    variants: Vec<PronunciationVariant>,
}

impl DictionaryEntry {
    /// The lowercased base word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// All recorded pronunciations, in source order. Never empty.
    pub fn variants(&self) -> &[PronunciationVariant] {
        &self.variants
    }

    /// The canonical pronunciation (most stress marks, earliest on ties).
    pub fn canonical(&self) -> &PronunciationVariant {
        // Entries are only created with their first variant.
        select_canonical(&self.variants).unwrap_or(&self.variants[0])
    }
}

/// Parsed pronunciation dictionary.
///
/// Entries keep the order in which their base word first appeared.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    positions: HashMap<String, usize>,
}

impl Dictionary {
    /// Look up an entry by base word. The word must already be lowercase.
    pub fn get(&self, word: &str) -> Option<&DictionaryEntry> {
        self.positions.get(word).map(|&i| &self.entries[i])
    }

    /// Whether the dictionary has an entry for `word`.
    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    /// Iterate entries in dictionary order.
    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }

    /// Number of base words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of pronunciation variants across all words.
    pub fn variant_count(&self) -> usize {
        self.entries.iter().map(|e| e.variants.len()).sum()
    }

    fn push_variant(&mut self, word: String, variant: PronunciationVariant) {
        if let Some(&i) = self.positions.get(&word) {
            self.entries[i].variants.push(variant);
        } else {
            self.positions.insert(word.clone(), self.entries.len());
            self.entries.push(DictionaryEntry {
                word,
                variants: vec![variant],
            });
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryEntry;
    type IntoIter = std::slice::Iter<'a, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Normalize a raw dictionary word: strip a trailing `(N)` marker and lowercase.
pub fn normalize_word(raw: &str) -> String {
    HOMOGRAPH_MARKER.replace(raw, "").to_lowercase()
}

/// Parse dictionary text.
///
/// Blank lines, `;;;` comment lines and lines with fewer than two tokens are
/// skipped. Parsing never fails; an empty result is for the caller to judge.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn parse_dictionary(text: &str) -> Dictionary {
    let mut dictionary = Dictionary::default();
    let mut skipped = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(raw_word) = tokens.next() else {
            skipped += 1;
            continue;
        };
        // After the word, a token starting with `#` opens a comment to end of line.
        let phones: Vec<&str> = tokens.take_while(|token| !token.starts_with('#')).collect();
        if phones.is_empty() {
            skipped += 1;
            continue;
        }

        let word = normalize_word(raw_word);
        if word.is_empty() {
            skipped += 1;
            continue;
        }
        dictionary.push_variant(word, PronunciationVariant::new(phones));
    }

    tracing::debug!(
        entries = dictionary.len(),
        variants = dictionary.variant_count(),
        skipped,
        "parsed pronunciation dictionary"
    );
    dictionary
}
