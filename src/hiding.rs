//! Letter-hiding lookups: pick one carrier word per letter of a secret so the
//! secret can be read back from a fixed spot in each word.
//!
//! - [`hide_in_nth_letters`]: letter `n` of every carrier spells the secret
//!   (`деВственный наСмешливый моТор ...` hides `вст...` at `n = 2`).
//! - [`hide_before_sequence`]: the letter right before a marking sequence
//!   spells it (`выс[о]кот...`, `мя[г]кот...` hide `ог...` before `кот`).
//!
//! Both are deterministic: carriers are taken in corpus order, and a letter
//! that repeats in the secret gets a different carrier each time.

use std::collections::HashMap;

use log::{debug, info};

use crate::alphabet::{normalize_phrase, Language};
use crate::corpus::{Corpus, PartOfSpeech};
use crate::errors::PuzzleError;
use crate::partition::{by_position_letter, index_by, Position};

/// Largest letter offset [`hide_in_nth_letters`] accepts.
pub const MAX_OFFSET: usize = 31;

/// Which slice of each word list carriers are drawn from.
///
/// The most frequent words are skipped by default: they make the carriers
/// too easy to spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HidingParams {
    pub pool_skip: usize,
    pub pool_take: usize,
}

impl Default for HidingParams {
    fn default() -> Self {
        Self { pool_skip: 1000, pool_take: 4000 }
    }
}

fn pool(corpus: &Corpus, skip: usize, take: usize) -> impl Iterator<Item = &str> {
    PartOfSpeech::ALL
        .into_iter()
        .flat_map(move |pos| corpus.words(pos).iter().skip(skip).take(take).map(String::as_str))
}

/// Assign carriers to the letters of `secret` from `by_letter`.
///
/// Fails on the first letter (in order of appearance) without enough carriers.
fn assign(secret: &str, by_letter: &HashMap<char, Vec<&str>>) -> Result<Vec<String>, PuzzleError> {
    let mut needed: Vec<(char, usize)> = Vec::new();
    for c in secret.chars() {
        match needed.iter_mut().find(|(letter, _)| *letter == c) {
            Some((_, count)) => *count += 1,
            None => needed.push((c, 1)),
        }
    }
    for &(letter, count) in &needed {
        let available = by_letter.get(&letter).map_or(0, Vec::len);
        if available < count {
            return Err(PuzzleError::InsufficientCorpus { letter, needed: count, available });
        }
    }

    let mut used: HashMap<char, usize> = HashMap::new();
    let mut carriers = Vec::with_capacity(secret.chars().count());
    for c in secret.chars() {
        let next = used.entry(c).or_insert(0);
        if let Some(word) = by_letter.get(&c).and_then(|words| words.get(*next)) {
            carriers.push((*word).to_string());
        }
        *next += 1;
    }
    Ok(carriers)
}

/// One carrier per letter of `secret` whose letter at 0-based offset `n` is that letter.
///
/// Non-letters in `secret` are ignored.
///
/// # Errors
///
/// - [`PuzzleError::NoAlphabetLetters`] if `secret` has no letter of `language`.
/// - [`PuzzleError::ParameterOutOfRange`] if `n` exceeds [`MAX_OFFSET`].
/// - [`PuzzleError::InsufficientCorpus`] if the pool runs out of words for a letter.
pub fn hide_in_nth_letters(
    corpus: &Corpus,
    secret: &str,
    n: usize,
    language: Language,
    params: &HidingParams,
) -> Result<Vec<String>, PuzzleError> {
    PuzzleError::check_range("n", n, 0, MAX_OFFSET)?;
    let secret = normalize_phrase(secret, language)?;
    let by_letter = by_position_letter(pool(corpus, params.pool_skip, params.pool_take), Position::FromStart(n));
    debug!("offset {n}: carriers for {} distinct letters", by_letter.len());
    let carriers = assign(&secret, &by_letter)?;
    info!("hid \"{secret}\" at offset {n} in {} words", carriers.len());
    Ok(carriers)
}

/// One carrier per letter of `secret` in which that letter directly precedes
/// the first occurrence of `sequence`.
///
/// Every word of the corpus can be a carrier.
///
/// # Errors
///
/// - [`PuzzleError::EmptySequence`] if `sequence` is empty.
/// - [`PuzzleError::NoAlphabetLetters`] if `secret` has no letter of `language`.
/// - [`PuzzleError::InsufficientCorpus`] if some letter lacks enough carriers.
pub fn hide_before_sequence(
    corpus: &Corpus,
    secret: &str,
    sequence: &str,
    language: Language,
) -> Result<Vec<String>, PuzzleError> {
    let sequence = sequence.trim().to_lowercase();
    if sequence.is_empty() {
        return Err(PuzzleError::EmptySequence);
    }
    let secret = normalize_phrase(secret, language)?;
    let by_letter = index_by(corpus.all_words(), |word| match word.find(sequence.as_str()) {
        Some(at) if at > 0 => word[..at].chars().next_back(),
        _ => None,
    });
    let carriers = assign(&secret, &by_letter)?;
    info!("hid \"{secret}\" before \"{sequence}\" in {} words", carriers.len());
    Ok(carriers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whole_lists() -> HidingParams {
        HidingParams { pool_skip: 0, pool_take: usize::MAX }
    }

    #[test]
    fn test_nth_letter_spells_secret() {
        let corpus = Corpus::from_lists([
            (PartOfSpeech::Noun, vec!["окно", "кот", "стол", "ум"]),
            (PartOfSpeech::Verb, vec!["стоять"]),
        ]);
        let carriers = hide_in_nth_letters(&corpus, "Кот!", 1, Language::Russian, &whole_lists()).unwrap();
        assert_eq!(carriers, vec!["окно", "кот", "стол"]);
        for (carrier, letter) in carriers.iter().zip("кот".chars()) {
            assert_eq!(carrier.chars().nth(1), Some(letter));
        }
    }

    #[test]
    fn test_repeated_letters_get_distinct_carriers() {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["кот", "сок", "мор"])]);
        let carriers = hide_in_nth_letters(&corpus, "оо", 1, Language::Russian, &whole_lists()).unwrap();
        assert_eq!(carriers, vec!["кот", "сок"]);
    }

    #[test]
    fn test_not_enough_carriers() {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["кот", "сок"])]);
        let err = hide_in_nth_letters(&corpus, "ооо", 1, Language::Russian, &whole_lists()).unwrap_err();
        assert_eq!(err, PuzzleError::InsufficientCorpus { letter: 'о', needed: 3, available: 2 });
    }

    #[test]
    fn test_pool_skips_most_frequent_words() {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["кот", "сок", "мор"])]);
        let params = HidingParams { pool_skip: 1, pool_take: 1 };
        let carriers = hide_in_nth_letters(&corpus, "о", 1, Language::Russian, &params).unwrap();
        assert_eq!(carriers, vec!["сок"]);
    }

    #[test]
    fn test_nth_letter_is_deterministic() {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["окно", "кот", "стол", "сок", "акт"])]);
        let first = hide_in_nth_letters(&corpus, "кок", 1, Language::Russian, &whole_lists()).unwrap();
        let second = hide_in_nth_letters(&corpus, "кок", 1, Language::Russian, &whole_lists()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["окно", "кот", "акт"]);
    }

    #[test]
    fn test_before_sequence() {
        let corpus = Corpus::from_lists([
            (PartOfSpeech::Noun, vec!["мягкотелость", "кот", "высокотехнологический"]),
            (PartOfSpeech::Verb, vec!["щекотать"]),
        ]);
        let carriers = hide_before_sequence(&corpus, "ог", "кот", Language::Russian).unwrap();
        assert_eq!(carriers, vec!["высокотехнологический", "мягкотелость"]);
    }

    #[test]
    fn test_before_sequence_errors() {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["щекотать"])]);
        assert_eq!(
            hide_before_sequence(&corpus, "ог", "  ", Language::Russian).unwrap_err(),
            PuzzleError::EmptySequence
        );
        let err = hide_before_sequence(&corpus, "ог", "кот", Language::Russian).unwrap_err();
        assert_eq!(err, PuzzleError::InsufficientCorpus { letter: 'о', needed: 1, available: 0 });
    }

    #[test]
    fn test_offset_range() {
        let corpus = Corpus::default();
        let err = hide_in_nth_letters(&corpus, "а", 32, Language::Russian, &whole_lists()).unwrap_err();
        assert_eq!(err.code(), "E002");
    }
}
