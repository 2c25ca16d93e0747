//! The immutable dictionary + rhyme index value that queries run against.
//!
//! A [`Lexicon`] is built once and then only read. It is `Send + Sync`, so a
//! host can wrap it in an `Arc` and share it between any number of readers.
//! To pick up a new dictionary, build a new `Lexicon` and swap the reference.
//!
//! ```
//! use versekit_core::Lexicon;
//!
//! let lexicon = Lexicon::bundled().expect("bundled dictionary loads");
//! assert!(lexicon.lookup_rhymes("time").contains(&"dime"));
//! assert_eq!(lexicon.syllable_count("banana"), 3);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::{BUNDLED_DICTIONARY, Dictionary, parse_dictionary};
use crate::error::{LexiconError, LexiconResult};
use crate::pronunciation::PronunciationVariant;
use crate::rhyme::{RhymeIndex, RhymeKey, rhyme_key};
use crate::syllables::{self, SyllableMode, SyllableSource};

/// Origin label used for the compiled-in dictionary.
const BUNDLED_ORIGIN: &str = "bundled";

/// Where to load the pronunciation dictionary from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexiconSource {
    /// The sample dictionary compiled into the crate.
    #[default]
    Bundled,
    /// A CMU-format dictionary file.
    File(Utf8PathBuf),
}

impl LexiconSource {
    /// Choose a file source when a path is given, otherwise the bundled one.
    pub fn from_option(path: Option<&Utf8Path>) -> Self {
        path.map_or(Self::Bundled, |p| Self::File(p.to_path_buf()))
    }
}

impl std::fmt::Display for LexiconSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bundled => f.write_str(BUNDLED_ORIGIN),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

/// Size statistics for a loaded lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LexiconStats {
    /// Where the dictionary came from.
    pub origin: String,
    /// Distinct base words.
    pub words: usize,
    /// Pronunciation variants across all words.
    pub variants: usize,
    /// Distinct rhyme keys.
    pub rhyme_keys: usize,
    /// Words without any vowel phone, left out of the rhyme index.
    pub keyless_words: usize,
}

/// Syllable count of one word and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SyllableReport {
    /// The word as queried.
    pub word: String,
    /// Number of syllables.
    pub syllables: usize,
    /// Dictionary or estimate.
    pub source: SyllableSource,
}

/// Rhymes for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RhymeReport {
    /// The word as queried.
    pub word: String,
    /// Rhyme key of the word's canonical pronunciation, if it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<RhymeKey>,
    /// Canonical pronunciation, if the word is in the dictionary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Rhyming words in dictionary order (possibly truncated).
    pub rhymes: Vec<String>,
    /// Number of rhyming words before truncation.
    pub total: usize,
}

/// Parsed pronunciation dictionary plus its rhyme index.
#[derive(Debug, Clone)]
pub struct Lexicon {
    origin: String,
    dictionary: Dictionary,
    index: RhymeIndex,
}

impl Lexicon {
    /// Build a lexicon from dictionary text.
    ///
    /// `origin` names the text in errors and statistics. Fails if the text
    /// holds no usable entries, so an empty index is never mistaken for
    /// "nothing rhymes".
    #[tracing::instrument(skip(text), fields(text_len = text.len()))]
    pub fn from_text(text: &str, origin: &str) -> LexiconResult<Self> {
        let dictionary = parse_dictionary(text);
        if dictionary.is_empty() {
            return Err(LexiconError::Empty {
                origin: origin.to_string(),
            });
        }
        let index = RhymeIndex::build(&dictionary);
        tracing::debug!(
            origin,
            words = dictionary.len(),
            rhyme_keys = index.key_count(),
            "lexicon built"
        );
        Ok(Self {
            origin: origin.to_string(),
            dictionary,
            index,
        })
    }

    /// Build a lexicon from a CMU-format dictionary file.
    pub fn from_path(path: &Utf8Path) -> LexiconResult<Self> {
        let text = std::fs::read_to_string(path.as_std_path()).map_err(|source| {
            LexiconError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_text(&text, path.as_str())
    }

    /// Build a lexicon from the dictionary compiled into the crate.
    pub fn bundled() -> LexiconResult<Self> {
        Self::from_text(BUNDLED_DICTIONARY, BUNDLED_ORIGIN)
    }

    /// Build a lexicon from `source`.
    pub fn load(source: &LexiconSource) -> LexiconResult<Self> {
        match source {
            LexiconSource::Bundled => Self::bundled(),
            LexiconSource::File(path) => Self::from_path(path),
        }
    }

    /// The parsed dictionary.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The rhyme index.
    pub const fn index(&self) -> &RhymeIndex {
        &self.index
    }

    /// Whether `word` is in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.dictionary.contains(&normalize_query(word))
    }

    /// All pronunciations of `word`, in source order.
    pub fn pronunciations(&self, word: &str) -> Option<&[PronunciationVariant]> {
        self.dictionary
            .get(&normalize_query(word))
            .map(|entry| entry.variants())
    }

    /// Canonical pronunciation of `word`.
    pub fn canonical(&self, word: &str) -> Option<&PronunciationVariant> {
        self.dictionary
            .get(&normalize_query(word))
            .map(|entry| entry.canonical())
    }

    /// Rhyme key of the canonical pronunciation of `word`.
    pub fn rhyme_key(&self, word: &str) -> Option<RhymeKey> {
        self.canonical(word)
            .and_then(|variant| rhyme_key(variant.phones()))
    }

    /// Words that rhyme with `word`, in dictionary order, excluding `word`.
    ///
    /// Unknown and keyless words have no rhymes.
    pub fn lookup_rhymes(&self, word: &str) -> Vec<&str> {
        let word = normalize_query(word);
        let Some(key) = self.rhyme_key(&word) else {
            return Vec::new();
        };
        self.index
            .words(&key)
            .iter()
            .map(String::as_str)
            .filter(|candidate| *candidate != word)
            .collect()
    }

    /// Rhymes for `word` with its key and pronunciation, keeping at most
    /// `limit` rhymes.
    pub fn rhyme_report(&self, word: &str, limit: Option<usize>) -> RhymeReport {
        let rhymes = self.lookup_rhymes(word);
        let total = rhymes.len();
        RhymeReport {
            word: word.to_string(),
            key: self.rhyme_key(word),
            pronunciation: self.canonical(word).map(ToString::to_string),
            rhymes: rhymes
                .into_iter()
                .take(limit.unwrap_or(usize::MAX))
                .map(str::to_string)
                .collect(),
            total,
        }
    }

    /// Syllable count of `word`: dictionary when known, estimate otherwise.
    ///
    /// At least 1 for any non-empty word, 0 for an empty one.
    pub fn syllable_count(&self, word: &str) -> usize {
        self.syllables(word, SyllableMode::Auto).syllables
    }

    /// Syllable count of `word` with its source.
    pub fn syllables(&self, word: &str, mode: SyllableMode) -> SyllableReport {
        let (syllables, source) =
            syllables::count_syllables(&self.dictionary, &normalize_query(word), mode);
        SyllableReport {
            word: word.to_string(),
            syllables,
            source,
        }
    }

    /// Size statistics.
    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            origin: self.origin.clone(),
            words: self.dictionary.len(),
            variants: self.dictionary.variant_count(),
            rhyme_keys: self.index.key_count(),
            keyless_words: self.index.keyless_count(),
        }
    }
}

/// Dictionary words are stored trimmed and lowercase.
fn normalize_query(word: &str) -> String {
    word.trim().to_lowercase()
}
