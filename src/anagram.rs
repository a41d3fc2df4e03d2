//! Anagram decomposition: split a phrase into several dictionary words that
//! use exactly the phrase's letters.
//!
//! Each requested depth `d` is searched on its own: a result for depth 3 has
//! exactly three words, never two. Results of all depths are concatenated in
//! the order the depths were given.
//!
//! Words are chosen without replacement and in increasing corpus position, so
//! every unordered combination is visited once and `["тело", "фон"]` is never
//! reported again as `["фон", "тело"]`.
//!
//! # Example
//!
//! ```
//! use lexipuzzle::anagram::{find_anagrams, AnagramParams};
//! use lexipuzzle::alphabet::Language;
//! use lexipuzzle::corpus::{Corpus, PartOfSpeech};
//! use lexipuzzle::engine::SearchLimits;
//!
//! let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["кот", "сон", "нос", "ток"])]);
//! let params = AnagramParams { depths: vec![2], ..AnagramParams::default() };
//! let outcome = find_anagrams(&corpus, "кот, сон", Language::Russian, &params, &SearchLimits::default())?;
//! assert_eq!(outcome.len(), 4);
//! assert_eq!(outcome.solutions[0], ["кот", "сон"]);
//! assert_eq!(outcome.solutions[3], ["нос", "ток"]);
//! # Ok::<(), lexipuzzle::errors::PuzzleError>(())
//! ```

use std::collections::HashSet;

use log::info;

use crate::alphabet::{normalize_phrase, Language};
use crate::corpus::{Corpus, PartOfSpeech};
use crate::engine::{explore, ResultSet, SearchBudget, SearchLimits, SearchOutcome, SearchProblem};
use crate::errors::PuzzleError;
use crate::letters::LetterMultiset;
use crate::partition::{by_contained_letters, by_length};

/// Largest number of words a phrase may be split into.
pub const MAX_DEPTH: usize = 6;
/// Longest word length the length filter accepts.
pub const MAX_WORD_LEN: usize = 32;

/// Tunables for [`find_anagrams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnagramParams {
    /// Exact numbers of words to split into, each searched independently.
    pub depths: Vec<usize>,
    /// Shortest word that may take part.
    pub min_word_len: usize,
    /// Longest word that may take part.
    pub max_word_len: usize,
    /// Word list to draw from.
    pub part_of_speech: PartOfSpeech,
}

impl Default for AnagramParams {
    fn default() -> Self {
        Self {
            depths: vec![2, 3, 4],
            min_word_len: 3,
            max_word_len: 7,
            part_of_speech: PartOfSpeech::Noun,
        }
    }
}

impl AnagramParams {
    fn validate(&self) -> Result<(), PuzzleError> {
        for &depth in &self.depths {
            PuzzleError::check_range("depth", depth, 1, MAX_DEPTH)?;
        }
        PuzzleError::check_range("max_word_len", self.max_word_len, 1, MAX_WORD_LEN)?;
        PuzzleError::check_range("min_word_len", self.min_word_len, 1, self.max_word_len)
    }
}

/// Indices of the chosen words plus their combined letters.
#[derive(Debug, Clone, Default)]
struct AnagramPartial {
    chosen: Vec<usize>,
    letters: LetterMultiset,
}

struct AnagramProblem<'a> {
    target: LetterMultiset,
    words: &'a [&'a str],
    word_letters: &'a [LetterMultiset],
    // fewest letters any eligible word contributes
    min_letters: usize,
    depth: usize,
}

impl<'a> SearchProblem for AnagramProblem<'a> {
    type Partial = AnagramPartial;
    type Candidate = usize;
    type Solution = Vec<String>;

    fn expand<'s>(&'s self, partial: &'s AnagramPartial) -> Box<dyn Iterator<Item = usize> + 's> {
        if partial.chosen.len() >= self.depth {
            return Box::new(std::iter::empty());
        }
        let start = partial.chosen.last().map_or(0, |&i| i + 1);
        Box::new(start..self.words.len())
    }

    fn prune(&self, partial: &AnagramPartial, &candidate: &usize) -> bool {
        let cand_letters = &self.word_letters[candidate];
        if partial.letters.sum_exceeds(cand_letters, &self.target) {
            return true;
        }
        // the words still to come need room too
        let words_after = self.depth - partial.chosen.len() - 1;
        partial.letters.total() + cand_letters.total() + words_after * self.min_letters > self.target.total()
    }

    fn extend(&self, partial: &AnagramPartial, candidate: usize) -> AnagramPartial {
        let mut chosen = partial.chosen.clone();
        chosen.push(candidate);
        AnagramPartial {
            chosen,
            letters: partial.letters.add(&self.word_letters[candidate]),
        }
    }

    fn accept(&self, partial: &AnagramPartial, _can_grow: bool) -> bool {
        partial.chosen.len() == self.depth && partial.letters == self.target
    }

    fn solution(&self, partial: &AnagramPartial) -> Vec<String> {
        partial.chosen.iter().map(|&i| self.words[i].to_string()).collect()
    }
}

/// Find every way to split `phrase` into exactly `d` words, for each `d` in `params.depths`.
///
/// Non-letters in `phrase` are ignored and case is folded. Completing with no
/// splits is a normal, successful outcome.
///
/// # Errors
///
/// - [`PuzzleError::NoAlphabetLetters`] if `phrase` has no letter of `language`.
/// - [`PuzzleError::ParameterOutOfRange`] for a bad depth or word-length bound.
pub fn find_anagrams(
    corpus: &Corpus,
    phrase: &str,
    language: Language,
    params: &AnagramParams,
    limits: &SearchLimits,
) -> Result<SearchOutcome<Vec<String>>, PuzzleError> {
    params.validate()?;
    let normalized = normalize_phrase(phrase, language)?;
    let target = LetterMultiset::from_word(&normalized);
    let present: HashSet<char> = target.letters().collect();

    let sized = by_length(
        corpus.words(params.part_of_speech).iter().map(String::as_str),
        params.min_word_len,
        params.max_word_len,
    );
    // keep corpus (frequency) order rather than length order
    let words: Vec<&str> = by_contained_letters(
        corpus.words(params.part_of_speech).iter().map(String::as_str),
        &present,
    )
    .into_iter()
    .filter(|w| sized.contains(w))
    .collect();
    let word_letters: Vec<LetterMultiset> =
        words.iter().map(|w| LetterMultiset::from_letters(w, language)).collect();
    let min_letters = word_letters.iter().map(LetterMultiset::total).min().unwrap_or(0);

    info!(
        "anagrams of \"{normalized}\" ({} letters): {} eligible words, depths {:?}",
        target.total(),
        words.len(),
        params.depths
    );

    let mut budget = SearchBudget::new(limits);
    let mut results = ResultSet::new();
    for &depth in &params.depths {
        if budget.is_halted() {
            break;
        }
        let problem = AnagramProblem {
            target: target.clone(),
            words: &words,
            word_letters: &word_letters,
            min_letters,
            depth,
        };
        explore(&problem, AnagramPartial::default(), &mut budget, &mut results);
        info!("depth {depth}: {} splits so far", results.len());
    }
    Ok(budget.finish(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SearchStatus;

    fn nouns(words: &[&str]) -> Corpus {
        Corpus::from_lists([(PartOfSpeech::Noun, words.to_vec())])
    }

    fn depth(d: usize) -> AnagramParams {
        AnagramParams { depths: vec![d], ..AnagramParams::default() }
    }

    #[test]
    fn test_too_short_phrase_yields_nothing() {
        // 2 words of length >= 3 cannot fit a 3-letter target
        let corpus = nouns(&["кот", "ток", "окт"]);
        let outcome = find_anagrams(&corpus, "кот", Language::Russian, &depth(2), &SearchLimits::default()).unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        // nothing below the root is ever built
        assert_eq!(outcome.stats.nodes, 1);
    }

    #[test]
    fn test_two_word_split() {
        let corpus = nouns(&["тело", "фон", "лото", "нос"]);
        let outcome = find_anagrams(&corpus, "Фон, тело!", Language::Russian, &depth(2), &SearchLimits::default()).unwrap();
        assert_eq!(outcome.solutions, vec![vec!["тело".to_string(), "фон".to_string()]]);
    }

    #[test]
    fn test_every_split_uses_exactly_the_phrase_letters() {
        let corpus = nouns(&["сон", "нос", "кот", "ток", "кто", "лес", "сел", "оса", "сок", "кол", "лот", "нота", "тон"]);
        let params = AnagramParams { depths: vec![2, 3], ..AnagramParams::default() };
        let phrase = "сон кот лес";
        let outcome = find_anagrams(&corpus, phrase, Language::Russian, &params, &SearchLimits::default()).unwrap();
        assert!(!outcome.is_empty());
        let target = LetterMultiset::from_word(&normalize_phrase(phrase, Language::Russian).unwrap());
        for split in &outcome.solutions {
            assert_eq!(LetterMultiset::from_word(&split.concat()), target, "{split:?}");
        }
        // the same split is never reported twice
        let unique: HashSet<&Vec<String>> = outcome.solutions.iter().collect();
        assert_eq!(unique.len(), outcome.len());
    }

    #[test]
    fn test_leftover_letters_are_rejected() {
        let corpus = nouns(&["кот", "сон"]);
        let outcome = find_anagrams(&corpus, "котсоны", Language::Russian, &depth(2), &SearchLimits::default()).unwrap();
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_no_permutation_duplicates() {
        let corpus = nouns(&["кот", "ток", "сон"]);
        let outcome = find_anagrams(&corpus, "кот сон", Language::Russian, &depth(2), &SearchLimits::default()).unwrap();
        assert_eq!(
            outcome.solutions,
            vec![
                vec!["кот".to_string(), "сон".to_string()],
                vec!["ток".to_string(), "сон".to_string()],
            ]
        );
    }

    #[test]
    fn test_depths_are_exact_and_concatenated() {
        let corpus = nouns(&["лес", "сад", "сало", "дело", "сел"]);
        // "сало" and "дело" carry an "о" the phrase lacks; depth 3 cannot fit 6 letters
        let params = AnagramParams { depths: vec![2, 3], ..AnagramParams::default() };
        let outcome = find_anagrams(&corpus, "сад лес", Language::Russian, &params, &SearchLimits::default()).unwrap();
        assert_eq!(
            outcome.solutions,
            vec![
                vec!["лес".to_string(), "сад".to_string()],
                vec!["сад".to_string(), "сел".to_string()],
            ]
        );
    }

    #[test]
    fn test_words_with_foreign_letters_are_excluded() {
        let corpus = nouns(&["кот", "кит", "сон"]);
        let outcome = find_anagrams(&corpus, "кот сон", Language::Russian, &depth(2), &SearchLimits::default()).unwrap();
        assert!(outcome.solutions.iter().flatten().all(|w| w != "кит"));
    }

    #[test]
    fn test_invalid_inputs() {
        let corpus = nouns(&["кот"]);
        let limits = SearchLimits::default();
        let err = find_anagrams(&corpus, "123", Language::Russian, &depth(2), &limits).unwrap_err();
        assert_eq!(err.code(), "E001");
        let err = find_anagrams(&corpus, "кот", Language::Russian, &depth(0), &limits).unwrap_err();
        assert!(matches!(err, PuzzleError::ParameterOutOfRange { name: "depth", value: 0, .. }));
        let bad_lens = AnagramParams { min_word_len: 8, max_word_len: 7, ..AnagramParams::default() };
        assert!(find_anagrams(&corpus, "кот", Language::Russian, &bad_lens, &limits).is_err());
    }

    #[test]
    fn test_result_cap_applies_across_depths() {
        let corpus = nouns(&["кот", "ток", "сон", "нос"]);
        let params = AnagramParams { depths: vec![2, 3], ..AnagramParams::default() };
        let limits = SearchLimits::default().with_max_results(2);
        let outcome = find_anagrams(&corpus, "кот сон", Language::Russian, &params, &limits).unwrap();
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.status, SearchStatus::FoundEnough);
    }

    #[test]
    fn test_random_phrases_recover_their_words() {
        let lexicon = [
            "кот", "сон", "лес", "оса", "тело", "фон", "нота", "дом", "мир", "река", "рука", "луна", "сад", "гора",
            "снег", "окно",
        ];
        let corpus = nouns(&lexicon);
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..100 {
            let d = rng.usize(2..=4);
            let mut picks: Vec<usize> = (0..lexicon.len()).collect();
            rng.shuffle(&mut picks);
            picks.truncate(d);
            picks.sort_unstable();
            let chosen: Vec<String> = picks.iter().map(|&i| lexicon[i].to_string()).collect();
            let phrase = chosen.join(" ");

            let outcome = find_anagrams(&corpus, &phrase, Language::Russian, &depth(d), &SearchLimits::default()).unwrap();
            assert!(outcome.solutions.contains(&chosen), "{phrase}: {:?}", outcome.solutions);
            let target = LetterMultiset::from_word(&chosen.concat());
            for split in &outcome.solutions {
                assert_eq!(split.len(), d, "{phrase}: {split:?}");
                assert_eq!(LetterMultiset::from_word(&split.concat()), target, "{phrase}: {split:?}");
            }
        }
    }

    #[test]
    fn test_same_search_twice_gives_same_results() {
        let corpus = nouns(&["сон", "нос", "кот", "ток", "кто", "лес", "сел", "оса", "сок", "кол", "лот", "нота", "тон"]);
        let params = AnagramParams { depths: vec![2, 3], ..AnagramParams::default() };
        let run = || find_anagrams(&corpus, "сон кот лес", Language::Russian, &params, &SearchLimits::default()).unwrap();
        let (first, second) = (run(), run());
        assert!(!first.is_empty());
        assert_eq!(first.solutions, second.solutions);
        assert_eq!(first.status, second.status);
        assert_eq!(first.stats.nodes, second.stats.nodes);
    }
}
