use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::errors::PuzzleError;

// Character-set constants
pub(crate) const RUSSIAN_LETTERS: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";
pub(crate) const ENGLISH_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
pub(crate) const ROMAN_NUMERAL_LETTERS: &str = "ivxlcdm";

static RUSSIAN_SET: LazyLock<HashSet<char>> = LazyLock::new(|| RUSSIAN_LETTERS.chars().collect());
static ENGLISH_SET: LazyLock<HashSet<char>> = LazyLock::new(|| ENGLISH_LETTERS.chars().collect());
static ROMAN_SET: LazyLock<HashSet<char>> = LazyLock::new(|| ROMAN_NUMERAL_LETTERS.chars().collect());

/// The language of a corpus. It fixes the alphabet words are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Russian,
    English,
}

impl Language {
    /// All letters of this language's alphabet, in alphabet order.
    #[must_use]
    pub fn letters(self) -> &'static str {
        match self {
            Language::Russian => RUSSIAN_LETTERS,
            Language::English => ENGLISH_LETTERS,
        }
    }

    /// Is `c` a (lowercase) letter of this alphabet?
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        match self {
            Language::Russian => RUSSIAN_SET.contains(&c),
            Language::English => ENGLISH_SET.contains(&c),
        }
    }

    /// Suffix of the corpus files holding this language's word lists.
    #[must_use]
    pub fn file_suffix(self) -> &'static str {
        match self {
            Language::Russian => "russian",
            Language::English => "english",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

impl FromStr for Language {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "russian" | "ru" => Ok(Language::Russian),
            "english" | "en" => Ok(Language::English),
            _ => Err(PuzzleError::UnknownLanguage { name: s.to_string() }),
        }
    }
}

/// Lowercase `phrase` and keep only letters of `language`'s alphabet.
///
/// # Errors
///
/// Returns [`PuzzleError::NoAlphabetLetters`] if nothing is left.
pub fn normalize_phrase(phrase: &str, language: Language) -> Result<String, PuzzleError> {
    let letters: String = phrase
        .to_lowercase()
        .chars()
        .filter(|&c| language.contains(c))
        .collect();

    if letters.is_empty() {
        return Err(PuzzleError::NoAlphabetLetters {
            input: phrase.to_string(),
            language: language.to_string(),
        });
    }
    Ok(letters)
}

pub(crate) trait LexChar {
    fn is_roman_numeral(&self) -> bool;
}

impl LexChar for char {
    fn is_roman_numeral(&self) -> bool {
        ROMAN_SET.contains(self)
    }
}
