//! Word chains: sequences of dictionary words, each one letter away from the last.
//!
//! Two flavours share the engine:
//!
//! - growth chains add one letter at the front or back of the previous word
//!   (`пол, поле, полет, эполет`);
//! - removal chains drop one Roman-numeral letter (`i v x l c d m`) anywhere in
//!   the previous word (`crackling, cracking, racking, raking`).
//!
//! Only maximal chains are reported: a chain is recorded when its last word
//! cannot be continued and the chain is at least `min_chain` words long. A
//! chain that could still grow is never reported, however long it already is.

use std::collections::HashSet;

use log::{debug, info};

use crate::alphabet::{normalize_phrase, Language, LexChar};
use crate::corpus::{Corpus, PartOfSpeech};
use crate::engine::{explore, ResultSet, SearchBudget, SearchLimits, SearchOutcome, SearchProblem};
use crate::errors::PuzzleError;
use crate::partition::{by_length, LengthBuckets};

/// Longest word either chain flavour can handle.
pub const MAX_WORD_LEN: usize = 32;

/// Tunables for [`find_growth_chains`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthParams {
    /// Alphabet letters are added from.
    pub language: Language,
    pub part_of_speech: PartOfSpeech,
    /// Word lengths taking part in chains.
    pub min_len: usize,
    pub max_len: usize,
    /// Chains start from words of these lengths, shortest first.
    pub min_root_len: usize,
    pub max_root_len: usize,
    /// Shortest chain worth reporting.
    pub min_chain: usize,
    /// Grow only from this word instead of from every root in the corpus.
    pub start: Option<String>,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            language: Language::Russian,
            part_of_speech: PartOfSpeech::Noun,
            min_len: 3,
            max_len: 9,
            min_root_len: 3,
            max_root_len: 5,
            min_chain: 4,
            start: None,
        }
    }
}

/// Tunables for [`find_removal_chains`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalParams {
    /// Only English has Roman-numeral letters to remove.
    pub language: Language,
    /// Longest word considered, roots included.
    pub max_len: usize,
    /// Shortest root; roots are tried from `max_len` down to this.
    pub min_root_len: usize,
    pub min_chain: usize,
}

impl Default for RemovalParams {
    fn default() -> Self {
        Self { language: Language::English, max_len: 12, min_root_len: 6, min_chain: 4 }
    }
}

struct GrowthProblem<'a> {
    buckets: LengthBuckets<'a>,
    alphabet: Vec<char>,
    min_chain: usize,
}

impl<'a> SearchProblem for GrowthProblem<'a> {
    type Partial = Vec<&'a str>;
    type Candidate = &'a str;
    type Solution = Vec<&'a str>;

    fn expand<'s>(&'s self, chain: &'s Vec<&'a str>) -> Box<dyn Iterator<Item = &'a str> + 's> {
        let Some(&last) = chain.last() else {
            return Box::new(std::iter::empty());
        };
        Box::new(self.alphabet.iter().flat_map(move |&c| {
            let prefixed = format!("{c}{last}");
            let suffixed = format!("{last}{c}");
            [self.buckets.get(&prefixed), self.buckets.get(&suffixed)]
                .into_iter()
                .flatten()
        }))
    }

    fn extend(&self, chain: &Vec<&'a str>, word: &'a str) -> Vec<&'a str> {
        let mut next = chain.clone();
        next.push(word);
        next
    }

    fn accept(&self, chain: &Vec<&'a str>, can_grow: bool) -> bool {
        !can_grow && chain.len() >= self.min_chain
    }

    fn solution(&self, chain: &Vec<&'a str>) -> Vec<&'a str> {
        chain.clone()
    }
}

struct RemovalProblem<'a> {
    buckets: LengthBuckets<'a>,
    min_chain: usize,
}

impl<'a> SearchProblem for RemovalProblem<'a> {
    type Partial = Vec<&'a str>;
    type Candidate = &'a str;
    type Solution = Vec<&'a str>;

    fn expand<'s>(&'s self, chain: &'s Vec<&'a str>) -> Box<dyn Iterator<Item = &'a str> + 's> {
        let Some(&last) = chain.last() else {
            return Box::new(std::iter::empty());
        };
        Box::new(
            last.char_indices()
                .filter(|(_, c)| c.is_roman_numeral())
                .filter_map(move |(i, c)| {
                    let shorter = format!("{}{}", &last[..i], &last[i + c.len_utf8()..]);
                    self.buckets.get(&shorter)
                }),
        )
    }

    fn extend(&self, chain: &Vec<&'a str>, word: &'a str) -> Vec<&'a str> {
        let mut next = chain.clone();
        next.push(word);
        next
    }

    fn accept(&self, chain: &Vec<&'a str>, can_grow: bool) -> bool {
        !can_grow && chain.len() >= self.min_chain
    }

    fn solution(&self, chain: &Vec<&'a str>) -> Vec<&'a str> {
        chain.clone()
    }
}

fn owned(outcome: SearchOutcome<Vec<&str>>) -> SearchOutcome<Vec<String>> {
    outcome.map(|chain| chain.into_iter().map(str::to_string).collect())
}

fn validate_lengths(min_len: usize, max_len: usize, min_chain: usize) -> Result<(), PuzzleError> {
    PuzzleError::check_range("max_len", max_len, 1, MAX_WORD_LEN)?;
    PuzzleError::check_range("min_len", min_len, 1, max_len)?;
    PuzzleError::check_range("min_chain", min_chain, 1, max_len)
}

/// Maximal chains grown one letter at a time from short roots.
///
/// Roots are all words of length `min_root_len`, then `min_root_len + 1` and
/// so on. A longer root is skipped when an earlier chain already passes
/// through it, so `поле` is not searched again after `пол, поле, ...`.
///
/// With `params.start` set, only that word is grown. It is normalized to the
/// alphabet first and need not be in the corpus itself.
///
/// # Errors
///
/// - [`PuzzleError::ParameterOutOfRange`] for inconsistent length bounds or a
///   start word outside `min_len..=max_len`.
/// - [`PuzzleError::NoAlphabetLetters`] if the start word has no letter of the language.
pub fn find_growth_chains(
    corpus: &Corpus,
    params: &GrowthParams,
    limits: &SearchLimits,
) -> Result<SearchOutcome<Vec<String>>, PuzzleError> {
    validate_lengths(params.min_len, params.max_len, params.min_chain)?;
    PuzzleError::check_range("max_root_len", params.max_root_len, params.min_len, params.max_len)?;
    PuzzleError::check_range("min_root_len", params.min_root_len, params.min_len, params.max_root_len)?;
    let start = match params.start.as_deref() {
        Some(word) => {
            let word = normalize_phrase(word, params.language)?;
            PuzzleError::check_range("start_len", word.chars().count(), params.min_len, params.max_len)?;
            Some(word)
        }
        None => None,
    };

    let problem = GrowthProblem {
        buckets: by_length(
            corpus.words(params.part_of_speech).iter().map(String::as_str),
            params.min_len,
            params.max_len,
        ),
        alphabet: params.language.letters().chars().collect(),
        min_chain: params.min_chain,
    };
    info!("growth chains over {} words", problem.buckets.len());

    let mut budget = SearchBudget::new(limits);
    let mut results = ResultSet::new();
    if let Some(start) = start.as_deref() {
        explore(&problem, vec![start], &mut budget, &mut results);
        let outcome = owned(budget.finish(results));
        info!("found {} growth chains from \"{start}\" ({:?})", outcome.len(), outcome.status);
        return Ok(outcome);
    }
    let mut covered: HashSet<&str> = HashSet::new();
    let mut tried: HashSet<&str> = HashSet::new();
    for len in params.min_root_len..=params.max_root_len {
        for &root in problem.buckets.bucket(len) {
            if budget.is_halted() {
                break;
            }
            if covered.contains(root) || !tried.insert(root) {
                continue;
            }
            let before = results.len();
            explore(&problem, vec![root], &mut budget, &mut results);
            for chain in results.iter().skip(before) {
                covered.extend(chain.iter().skip(1).copied());
            }
        }
        debug!("roots of length {len} done: {} chains", results.len());
    }
    let outcome = owned(budget.finish(results));
    info!("found {} growth chains ({:?})", outcome.len(), outcome.status);
    Ok(outcome)
}

/// Maximal chains that drop one Roman-numeral letter per step.
///
/// Words of every part of speech take part. Roots are tried from the longest
/// length down to `min_root_len`; unlike growth chains, no root is skipped.
///
/// # Errors
///
/// - [`PuzzleError::UnsupportedLanguage`] unless `params.language` is English.
/// - [`PuzzleError::ParameterOutOfRange`] for inconsistent length bounds.
pub fn find_removal_chains(
    corpus: &Corpus,
    params: &RemovalParams,
    limits: &SearchLimits,
) -> Result<SearchOutcome<Vec<String>>, PuzzleError> {
    if params.language != Language::English {
        return Err(PuzzleError::UnsupportedLanguage {
            operation: "roman-numeral chains",
            language: params.language.to_string(),
        });
    }
    validate_lengths(1, params.max_len, params.min_chain)?;
    PuzzleError::check_range("min_root_len", params.min_root_len, 1, params.max_len)?;

    let problem = RemovalProblem {
        buckets: by_length(corpus.all_words(), 1, params.max_len),
        min_chain: params.min_chain,
    };
    info!("removal chains over {} words", problem.buckets.len());

    let mut budget = SearchBudget::new(limits);
    let mut results = ResultSet::new();
    let mut tried: HashSet<&str> = HashSet::new();
    for len in (params.min_root_len..=params.max_len).rev() {
        for &root in problem.buckets.bucket(len) {
            if budget.is_halted() {
                break;
            }
            if tried.insert(root) {
                explore(&problem, vec![root], &mut budget, &mut results);
            }
        }
        debug!("roots of length {len} done: {} chains", results.len());
    }
    let outcome = owned(budget.finish(results));
    info!("found {} removal chains ({:?})", outcome.len(), outcome.status);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growth(words: &[&str]) -> Vec<Vec<String>> {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, words.to_vec())]);
        find_growth_chains(&corpus, &GrowthParams::default(), &SearchLimits::default())
            .unwrap()
            .solutions
    }

    fn is_strict_prefix(a: &[String], b: &[String]) -> bool {
        a.len() < b.len() && b.starts_with(a)
    }

    #[test]
    fn test_single_maximal_chain() {
        let chains = growth(&["пол", "поле", "полет", "эполет"]);
        assert_eq!(chains, vec![vec!["пол", "поле", "полет", "эполет"]]);
    }

    #[test]
    fn test_branching_chains_differ_in_last_word() {
        let chains = growth(&["бар", "барк", "барка", "баркан", "баркас"]);
        assert_eq!(
            chains,
            vec![
                vec!["бар", "барк", "барка", "баркан"],
                vec!["бар", "барк", "барка", "баркас"],
            ]
        );
    }

    #[test]
    fn test_short_chains_are_dropped() {
        assert!(growth(&["кот", "коты", "рис"]).is_empty());
    }

    #[test]
    fn test_no_chain_is_a_prefix_of_another() {
        let chains = growth(&[
            "пол", "поле", "полет", "эполет", "бар", "барк", "барка", "баркан", "баркас", "сор", "сорт",
            "сорта", "сортах", "ток", "тока", "итока",
        ]);
        assert!(!chains.is_empty());
        for a in &chains {
            assert!(a.len() >= 4);
            for b in &chains {
                assert!(!is_strict_prefix(a, b), "{a:?} is a prefix of {b:?}");
            }
        }
    }

    #[test]
    fn test_each_step_adds_one_letter_at_an_end() {
        for chain in growth(&["бар", "барк", "барка", "баркан", "баркас", "обаркан"]) {
            for pair in chain.windows(2) {
                let (short, long) = (&pair[0], &pair[1]);
                assert_eq!(long.chars().count(), short.chars().count() + 1);
                assert!(long.starts_with(short.as_str()) || long.ends_with(short.as_str()));
            }
        }
    }

    #[test]
    fn test_longer_roots_start_their_own_chains() {
        // "сорт" is not reachable from a 3-letter word here
        let chains = growth(&["сорт", "сорта", "сортах", "асортах"]);
        assert_eq!(chains, vec![vec!["сорт", "сорта", "сортах", "асортах"]]);
    }

    #[test]
    fn test_growth_is_idempotent() {
        let words = ["пол", "поле", "полет", "эполет", "бар", "барк", "барка", "баркан", "баркас"];
        assert_eq!(growth(&words), growth(&words));
    }

    #[test]
    fn test_removal_chain() {
        let corpus = Corpus::from_lists([
            (PartOfSpeech::Noun, vec!["racking", "cracking"]),
            (PartOfSpeech::Adjective, vec!["crackling"]),
            (PartOfSpeech::Verb, vec!["raking"]),
        ]);
        let outcome = find_removal_chains(&corpus, &RemovalParams::default(), &SearchLimits::default()).unwrap();
        assert_eq!(outcome.solutions, vec![vec!["crackling", "cracking", "racking", "raking"]]);
    }

    #[test]
    fn test_removal_same_word_by_two_routes_is_one_result() {
        // dropping either "l" of "mills" gives the same "mils"
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["dmills", "mills", "mils", "mis"])]);
        let params = RemovalParams { min_root_len: 6, ..RemovalParams::default() };
        let outcome = find_removal_chains(&corpus, &params, &SearchLimits::default()).unwrap();
        assert_eq!(outcome.solutions, vec![vec!["dmills", "mills", "mils", "mis"]]);
    }

    #[test]
    fn test_removal_roots_are_not_skipped() {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["dmills", "mills", "mils", "mis", "is"])]);
        let params = RemovalParams { min_root_len: 5, ..RemovalParams::default() };
        let outcome = find_removal_chains(&corpus, &params, &SearchLimits::default()).unwrap();
        // "mills" is searched again as a root although it sits inside the first chain
        assert_eq!(
            outcome.solutions,
            vec![vec!["dmills", "mills", "mils", "mis", "is"], vec!["mills", "mils", "mis", "is"]]
        );
    }

    fn growth_from(words: &[&str], start: &str) -> Result<Vec<Vec<String>>, PuzzleError> {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, words.to_vec())]);
        let params = GrowthParams { start: Some(start.to_string()), ..GrowthParams::default() };
        find_growth_chains(&corpus, &params, &SearchLimits::default()).map(|outcome| outcome.solutions)
    }

    #[test]
    fn test_chain_from_start_word() {
        let words = ["пол", "поле", "полет", "эполет", "бар", "барк", "барка", "баркан"];
        assert_eq!(growth_from(&words, "Пол!").unwrap(), vec![vec!["пол", "поле", "полет", "эполет"]]);
        assert_eq!(growth_from(&words, "бар").unwrap(), vec![vec!["бар", "барк", "барка", "баркан"]]);
        // "поле, полет, эполет" is maximal but too short
        assert!(growth_from(&words, "поле").unwrap().is_empty());
    }

    #[test]
    fn test_start_word_need_not_be_in_the_corpus() {
        let chains = growth_from(&["поле", "полет", "эполет"], "пол").unwrap();
        assert_eq!(chains, vec![vec!["пол", "поле", "полет", "эполет"]]);
    }

    #[test]
    fn test_invalid_start_word() {
        assert_eq!(growth_from(&["пол"], "123").unwrap_err().code(), "E001");
        assert!(matches!(
            growth_from(&["пол"], "по").unwrap_err(),
            PuzzleError::ParameterOutOfRange { name: "start_len", value: 2, min: 3, max: 9 }
        ));
        assert!(growth_from(&["пол"], "полетаминарод").is_err());
    }

    #[test]
    fn test_removal_chains_need_english() {
        let corpus = Corpus::from_lists([(PartOfSpeech::Noun, vec!["crackling", "cracking", "racking", "raking"])]);
        let params = RemovalParams { language: Language::Russian, ..RemovalParams::default() };
        let err = find_removal_chains(&corpus, &params, &SearchLimits::default()).unwrap_err();
        assert_eq!(err, PuzzleError::UnsupportedLanguage { operation: "roman-numeral chains", language: "russian".to_string() });
    }

    #[test]
    fn test_invalid_lengths() {
        let corpus = Corpus::default();
        let params = GrowthParams { min_root_len: 6, ..GrowthParams::default() };
        assert!(find_growth_chains(&corpus, &params, &SearchLimits::default()).is_err());
        let params = RemovalParams { max_len: 0, ..RemovalParams::default() };
        assert!(find_removal_chains(&corpus, &params, &SearchLimits::default()).is_err());
    }
}
