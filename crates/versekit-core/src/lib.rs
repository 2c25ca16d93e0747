//! Core library for versekit.
//!
//! Parses a CMU-format pronunciation dictionary, groups its words by rhyme,
//! and counts syllables, falling back to a spelling heuristic for words the
//! dictionary does not know. Used by the `versekit` CLI and MCP server.
//!
//! # Modules
//!
//! - [`dictionary`] - CMU dictionary parsing
//! - [`pronunciation`] - Pronunciation variants and canonical selection
//! - [`rhyme`] - Rhyme keys and the rhyme index
//! - [`syllables`] - Dictionary and heuristic syllable counts
//! - [`lexicon`] - The loaded dictionary plus its index, queried by callers
//! - [`lines`] - Per-line syllable counts for lyrics and poems
//! - [`scheme`] - Rhyme scheme labelling
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use versekit_core::{Lexicon, SyllableMode};
//!
//! let lexicon = Lexicon::bundled().expect("bundled dictionary loads");
//!
//! let rhymes = lexicon.lookup_rhymes("ocean");
//! assert!(rhymes.contains(&"motion"));
//!
//! let report = lexicon.syllables("flarion", SyllableMode::Auto);
//! assert_eq!(report.syllables, 3);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod lexicon;
pub mod lines;
pub mod markdown;
pub mod pronunciation;
pub mod rhyme;
pub mod scheme;
pub mod syllables;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use dictionary::{Dictionary, DictionaryEntry, parse_dictionary};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, LexiconError, LexiconResult,
};
pub use lexicon::{Lexicon, LexiconSource, LexiconStats, RhymeReport, SyllableReport};
pub use lines::{LinesReport, analyze_lines};
pub use pronunciation::{PronunciationVariant, Stress, select_canonical};
pub use rhyme::{RhymeIndex, RhymeKey, rhyme_key};
pub use scheme::{SchemeReport, rhyme_scheme};
pub use syllables::{SyllableMode, SyllableSource, estimate_syllables};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Validate that input text does not exceed the size limit.
///
/// `None` disables the check.
pub fn validate_input_size(text: &str, max_bytes: Option<usize>) -> Result<(), AnalysisError> {
    match max_bytes {
        Some(max) if text.len() > max => Err(AnalysisError::InputTooLarge {
            size: text.len(),
            max,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_within_limit_passes() {
        assert!(validate_input_size("time", Some(4)).is_ok());
        assert!(validate_input_size(&"x".repeat(10), None).is_ok());
    }

    #[test]
    fn oversized_input_is_rejected() {
        let err = validate_input_size("rhyme", Some(4)).unwrap_err();
        assert!(err.to_string().contains("5 bytes"));
    }
}
