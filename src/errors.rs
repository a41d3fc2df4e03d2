//! Error types for puzzle searches, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E009) for documentation lookup:
//!
//! - E001: `NoAlphabetLetters` (Input has no letter of the configured alphabet)
//! - E002: `ParameterOutOfRange` (Numeric parameter outside its valid range)
//! - E003: `UnknownPartOfSpeech` (Unrecognized part-of-speech tag)
//! - E004: `UnknownLanguage` (Unrecognized language name)
//! - E005: `EmptySequence` (Marking sequence is empty)
//! - E006: `InsufficientCorpus` (No qualifying word for a required letter)
//! - E007: `CorpusLoad` (Corpus file could not be read)
//! - E008: `InvalidTimeLimit` (Time limit is negative, NaN or too large)
//! - E009: `UnsupportedLanguage` (Generator does not work for this language)
//!
//! Running out of time or steps is *not* an error: it is reported through
//! [`crate::engine::SearchStatus`] alongside whatever results were found.
//!
//! # Examples
//!
//! ```
//! use lexipuzzle::errors::PuzzleError;
//!
//! let err = PuzzleError::ParameterOutOfRange { name: "depth", value: 0, min: 1, max: 6 };
//! assert_eq!(err.code(), "E002");
//! println!("{}", err.display_detailed());
//! ```

use std::fmt::Display;
use std::time::Duration;

/// Unified error type for everything that can fail before or instead of a search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("\"{input}\" contains no {language} letters")]
    NoAlphabetLetters { input: String, language: String },

    #[error("{name}={value} is out of range (expected {min}..={max})")]
    ParameterOutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("unknown part of speech \"{tag}\"")]
    UnknownPartOfSpeech { tag: String },

    #[error("unknown language \"{name}\"")]
    UnknownLanguage { name: String },

    #[error("marking sequence must not be empty")]
    EmptySequence,

    #[error("not enough words for letter '{letter}' (needed {needed}, found {available})")]
    InsufficientCorpus {
        letter: char,
        needed: usize,
        available: usize,
    },

    #[error("failed to read corpus from '{path}': {reason}")]
    CorpusLoad { path: String, reason: String },

    #[error("time limit {value} is not a valid number of seconds")]
    InvalidTimeLimit { value: String },

    #[error("{operation} is not available for {language}")]
    UnsupportedLanguage { operation: &'static str, language: String },
}

impl PuzzleError {
    /// Shorthand used by parameter validation.
    pub(crate) fn check_range(
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    ) -> Result<(), PuzzleError> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(PuzzleError::ParameterOutOfRange { name, value, min, max })
        }
    }

    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PuzzleError::NoAlphabetLetters { .. } => "E001",
            PuzzleError::ParameterOutOfRange { .. } => "E002",
            PuzzleError::UnknownPartOfSpeech { .. } => "E003",
            PuzzleError::UnknownLanguage { .. } => "E004",
            PuzzleError::EmptySequence => "E005",
            PuzzleError::InsufficientCorpus { .. } => "E006",
            PuzzleError::CorpusLoad { .. } => "E007",
            PuzzleError::InvalidTimeLimit { .. } => "E008",
            PuzzleError::UnsupportedLanguage { .. } => "E009",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            PuzzleError::NoAlphabetLetters { .. } => "Input has no letter of the configured alphabet",
            PuzzleError::ParameterOutOfRange { .. } => "Numeric parameter outside its valid range",
            PuzzleError::UnknownPartOfSpeech { .. } => "Unrecognized part-of-speech tag",
            PuzzleError::UnknownLanguage { .. } => "Unrecognized language name",
            PuzzleError::EmptySequence => "Marking sequence is empty",
            PuzzleError::InsufficientCorpus { .. } => "No qualifying word for a required letter",
            PuzzleError::CorpusLoad { .. } => "Corpus file could not be read",
            PuzzleError::InvalidTimeLimit { .. } => "Time limit is negative, NaN or too large",
            PuzzleError::UnsupportedLanguage { .. } => "Generator does not work for this language",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            PuzzleError::NoAlphabetLetters { .. } => "The source phrase, starting word or secret word is checked before any search starts. Characters outside the alphabet are ignored, but at least one alphabet letter must remain.",
            PuzzleError::ParameterOutOfRange { .. } => "Depths, thresholds, side lengths and offsets each have a fixed valid range. Values outside it are rejected up front instead of producing an empty or endless search.",
            PuzzleError::UnknownPartOfSpeech { .. } => "Corpora are grouped by part of speech. Only nouns, verbs and adjectives are known.",
            PuzzleError::UnknownLanguage { .. } => "The language selects both the alphabet and the corpus files to load. Only russian and english are supported.",
            PuzzleError::EmptySequence => "Hiding letters before a marking sequence needs a non-empty sequence to look for.",
            PuzzleError::InsufficientCorpus { .. } => "A lookup that needs one word per secret letter found fewer qualifying words than the letter occurs. This differs from a search that completes with zero results, which is not an error.",
            PuzzleError::CorpusLoad { .. } => "The word lists are read from newline-delimited files in the cache directory. One of them is missing or unreadable.",
            PuzzleError::InvalidTimeLimit { .. } => "The time limit is given in (possibly fractional) seconds and must be a finite, non-negative number small enough to represent as a duration.",
            PuzzleError::UnsupportedLanguage { .. } => "Some generators only make sense for one alphabet. Roman-numeral removal chains need the Latin letters i, v, x, l, c, d and m.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            PuzzleError::NoAlphabetLetters { .. } => Some("Check the --language option matches the script of your input"),
            PuzzleError::ParameterOutOfRange { .. } => Some("Pick a value inside the range shown in the message"),
            PuzzleError::UnknownPartOfSpeech { .. } => Some("Use one of: nouns, verbs, adjectives"),
            PuzzleError::UnknownLanguage { .. } => Some("Use one of: russian, english"),
            PuzzleError::InsufficientCorpus { .. } => Some("Try a larger corpus, a different offset, or a secret word with fewer repeated letters"),
            PuzzleError::CorpusLoad { .. } => Some("Expected files like nouns_russian.txt, verbs_russian.txt, adjectives_russian.txt in the cache directory"),
            PuzzleError::InvalidTimeLimit { .. } => Some("Pass a non-negative number of seconds, e.g. --time-limit 2.5"),
            PuzzleError::UnsupportedLanguage { .. } => Some("Use --language english (the default for this generator)"),
            PuzzleError::EmptySequence => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }

    /// A time limit from a user-supplied number of seconds.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::InvalidTimeLimit`] for negative, NaN or overflowing values.
    pub fn time_limit_from_secs(secs: f64) -> Result<Duration, PuzzleError> {
        Duration::try_from_secs_f64(secs).map_err(|_| PuzzleError::InvalidTimeLimit { value: secs.to_string() })
    }

    pub(crate) fn corpus_load(path: impl Display, reason: impl Display) -> Self {
        PuzzleError::CorpusLoad { path: path.to_string(), reason: reason.to_string() }
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
