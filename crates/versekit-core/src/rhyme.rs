//! Rhyme keys and the rhyme index.
//!
//! A rhyme key is the phone sequence from the last stressed vowel to the end
//! of a pronunciation, stress digits removed and joined with `-`:
//!
//! | word  | phones            | key         |
//! |-------|-------------------|-------------|
//! | time  | `T AY1 M`         | `AY-M`      |
//! | ocean | `OW1 SH AH0 N`    | `OW-SH-AH-N`|
//! | the   | `DH AH0`          | `AH`        |
//! | hmm   | `HH M`            | (none)      |
//!
//! Two words whose keys are equal are perfect rhymes.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::pronunciation::{bare_phone, phone_stress};

/// Separator between phones in a rhyme key.
const KEY_SEPARATOR: &str = "-";

/// Perfect-rhyme signature of one pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RhymeKey(String);

impl RhymeKey {
    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RhymeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the rhyme key of a phone sequence.
///
/// The span starts at the last phone with primary or secondary stress, or
/// failing that the last phone with any stress digit. Returns `None` when no
/// phone carries a stress digit.
pub fn rhyme_key<S: AsRef<str>>(phones: &[S]) -> Option<RhymeKey> {
    let start = phones
        .iter()
        .rposition(|p| phone_stress(p.as_ref()).is_some_and(|s| s.is_stressed()))
        .or_else(|| phones.iter().rposition(|p| phone_stress(p.as_ref()).is_some()))?;

    let key = phones[start..]
        .iter()
        .map(|p| bare_phone(p.as_ref()))
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR);
    Some(RhymeKey(key))
}

/// Words grouped by the rhyme key of their canonical pronunciation.
///
/// Each word appears under at most one key. Built once, read-only afterward.
#[derive(Debug, Clone, Default)]
pub struct RhymeIndex {
    groups: HashMap<RhymeKey, Vec<String>>,
    word_count: usize,
    keyless_count: usize,
}

impl RhymeIndex {
    /// Build the index from every entry of `dictionary`, in dictionary order.
    #[tracing::instrument(skip_all, fields(entries = dictionary.len()))]
    pub fn build(dictionary: &Dictionary) -> Self {
        let mut index = Self::default();

        for entry in dictionary {
            match rhyme_key(entry.canonical().phones()) {
                Some(key) => {
                    index
                        .groups
                        .entry(key)
                        .or_default()
                        .push(entry.word().to_string());
                    index.word_count += 1;
                }
                None => index.keyless_count += 1,
            }
        }

        tracing::debug!(
            keys = index.groups.len(),
            words = index.word_count,
            keyless = index.keyless_count,
            "built rhyme index"
        );
        index
    }

    /// Words filed under `key`, in dictionary order.
    pub fn words(&self, key: &RhymeKey) -> &[String] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over every key and its words.
    pub fn iter(&self) -> impl Iterator<Item = (&RhymeKey, &[String])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of distinct rhyme keys.
    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of words filed under some key.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of dictionary words left out because they have no vowel phone.
    pub const fn keyless_count(&self) -> usize {
        self.keyless_count
    }
}
