//! Error types for versekit-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while building a [`Lexicon`](crate::Lexicon).
///
/// These are the only fatal conditions in the phonetic core. Malformed
/// dictionary lines and keyless words are not errors.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The pronunciation dictionary could not be read.
    #[error("failed to read pronunciation dictionary {path}: {source}")]
    Read {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The dictionary parsed to zero entries.
    #[error("pronunciation dictionary {origin} contains no usable entries")]
    Empty {
        /// Where the dictionary text came from (a path or `bundled`).
        origin: String,
    },
}

/// Result type alias using [`LexiconError`].
pub type LexiconResult<T> = Result<T, LexiconError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input text is empty or has no countable words.
    #[error("no countable words in input")]
    EmptyInput,

    /// The input text exceeds the configured size limit.
    #[error("input too large: {size} bytes (limit: {max} bytes)")]
    InputTooLarge {
        /// Input size in bytes.
        size: usize,
        /// Configured limit in bytes.
        max: usize,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
