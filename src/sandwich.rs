//! Containment searches: words hidden inside longer words.
//!
//! - Double sandwiches split a word in two and find a longer word holding both
//!   halves around a short "filling" word: `лето` in `ЛЕ-пес-ТОк`.
//! - Stuffed words hold at least a few shorter nouns, overlaps allowed:
//!   `подарок` holds `рок, под, ода, дар`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, info};

use crate::corpus::{Corpus, PartOfSpeech};
use crate::errors::PuzzleError;
use crate::partition::{by_length, index_by};

/// Longest word considered.
pub const MAX_WORD_LEN: usize = 32;

// Common vowels of both alphabets; a word lacking one cannot hold a part that has it.
const SPLIT_LETTERS: [char; 8] = ['о', 'а', 'е', 'и', 'o', 'a', 'e', 'i'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleSandwichParams {
    /// Only this many nouns from the top of the list take part.
    pub pool_take: usize,
    /// Lengths of the word that gets split.
    pub min_word_len: usize,
    pub max_word_len: usize,
    /// Lengths of the filling between the halves.
    pub min_filling_len: usize,
    pub max_filling_len: usize,
    /// Shortest host word.
    pub min_host_len: usize,
}

impl Default for DoubleSandwichParams {
    fn default() -> Self {
        Self {
            pool_take: 5000,
            min_word_len: 4,
            max_word_len: 6,
            min_filling_len: 3,
            max_filling_len: 4,
            min_host_len: 7,
        }
    }
}

/// `word` split around a filling inside each of `hosts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DoubleSandwich {
    pub word: String,
    pub hosts: Vec<String>,
}

impl fmt::Display for DoubleSandwich {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.hosts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StuffingParams {
    /// Shortest host word (any part of speech).
    pub min_host_len: usize,
    /// Lengths of the nouns looked for inside hosts.
    pub min_part_len: usize,
    pub max_part_len: usize,
    /// Fewest parts a host must hold.
    pub min_parts: usize,
    /// Parts never counted, typically suffix-like nouns found in half the dictionary.
    pub ignored_parts: Vec<String>,
}

impl Default for StuffingParams {
    fn default() -> Self {
        Self {
            min_host_len: 7,
            min_part_len: 3,
            max_part_len: 5,
            min_parts: 4,
            ignored_parts: vec!["ост".to_string(), "ость".to_string()],
        }
    }
}

/// A `host` word with the nouns found inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stuffing {
    pub host: String,
    pub parts: Vec<String>,
}

impl fmt::Display for Stuffing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.host, self.parts.join(", "))
    }
}

/// True if `host` holds `first`, then a filling from `fillings`, then `second`.
fn holds_sandwich(
    host: &[char],
    first: &[char],
    second: &[char],
    fillings: &HashSet<&str>,
    filling_lens: std::ops::RangeInclusive<usize>,
) -> bool {
    (0..host.len()).filter(|&pos| host[pos..].starts_with(first)).any(|pos| {
        let mid = pos + first.len();
        filling_lens.clone().any(|len| {
            let end = mid + len;
            end + second.len() <= host.len()
                && host[end..].starts_with(second)
                && fillings.contains(host[mid..end].iter().collect::<String>().as_str())
        })
    })
}

/// Words that can be split in two around a filling word inside a longer word.
///
/// The halves are at least two letters each. Words come out shortest first,
/// each with its hosts in corpus order.
///
/// # Errors
///
/// [`PuzzleError::ParameterOutOfRange`] for inconsistent length bounds.
pub fn find_double_sandwiches(
    corpus: &Corpus,
    params: &DoubleSandwichParams,
) -> Result<Vec<DoubleSandwich>, PuzzleError> {
    PuzzleError::check_range("max_word_len", params.max_word_len, 4, MAX_WORD_LEN)?;
    PuzzleError::check_range("min_word_len", params.min_word_len, 4, params.max_word_len)?;
    PuzzleError::check_range("max_filling_len", params.max_filling_len, 1, MAX_WORD_LEN)?;
    PuzzleError::check_range("min_filling_len", params.min_filling_len, 1, params.max_filling_len)?;
    PuzzleError::check_range("min_host_len", params.min_host_len, 1, MAX_WORD_LEN)?;

    let buckets = by_length(
        corpus.words(PartOfSpeech::Noun).iter().take(params.pool_take).map(String::as_str),
        1,
        MAX_WORD_LEN,
    );
    let fillings: HashSet<&str> = (params.min_filling_len..=params.max_filling_len)
        .flat_map(|len| buckets.bucket(len).iter().copied())
        .collect();
    let hosts: Vec<(&str, Vec<char>)> = buckets
        .lengths()
        .filter(|&len| len >= params.min_host_len)
        .flat_map(|len| buckets.bucket(len).iter().copied())
        .map(|host| (host, host.chars().collect()))
        .collect();
    debug!("{} fillings, {} hosts", fillings.len(), hosts.len());

    let mut seen = HashSet::new();
    let mut sandwiches = Vec::new();
    for len in params.min_word_len..=params.max_word_len {
        for &word in buckets.bucket(len) {
            if !seen.insert(word) {
                continue;
            }
            let chars: Vec<char> = word.chars().collect();
            let mut found: Vec<&str> = Vec::new();
            for split in 2..=chars.len() - 2 {
                let (first, second) = chars.split_at(split);
                for (host, host_chars) in &hosts {
                    let host = *host;
                    let filling_lens = params.min_filling_len..=params.max_filling_len;
                    if !found.contains(&host) && holds_sandwich(host_chars, first, second, &fillings, filling_lens) {
                        found.push(host);
                    }
                }
            }
            if !found.is_empty() {
                sandwiches.push(DoubleSandwich {
                    word: word.to_string(),
                    hosts: found.into_iter().map(str::to_string).collect(),
                });
            }
        }
    }
    info!("found {} double sandwiches", sandwiches.len());
    Ok(sandwiches)
}

fn letter_mask(word: &str) -> u8 {
    SPLIT_LETTERS
        .iter()
        .enumerate()
        .filter(|(_, c)| word.contains(**c))
        .fold(0, |mask, (i, _)| mask | (1 << i))
}

/// Words (any part of speech) holding at least `min_parts` distinct nouns.
///
/// Hosts come out in corpus order, their parts in corpus order too.
///
/// # Errors
///
/// [`PuzzleError::ParameterOutOfRange`] for inconsistent length bounds or a
/// zero `min_parts`.
pub fn find_stuffed_words(corpus: &Corpus, params: &StuffingParams) -> Result<Vec<Stuffing>, PuzzleError> {
    PuzzleError::check_range("max_part_len", params.max_part_len, 1, MAX_WORD_LEN)?;
    PuzzleError::check_range("min_part_len", params.min_part_len, 1, params.max_part_len)?;
    PuzzleError::check_range("min_host_len", params.min_host_len, 1, MAX_WORD_LEN)?;
    PuzzleError::check_range("min_parts", params.min_parts, 1, MAX_WORD_LEN)?;

    let ignored: HashSet<&str> = params.ignored_parts.iter().map(String::as_str).collect();
    let mut rank: HashMap<&str, usize> = HashMap::new();
    for word in corpus.words(PartOfSpeech::Noun) {
        let len = word.chars().count();
        if (params.min_part_len..=params.max_part_len).contains(&len) && !ignored.contains(word.as_str()) {
            let next = rank.len();
            rank.entry(word.as_str()).or_insert(next);
        }
    }
    // parts grouped by which split letters they contain
    let by_mask = index_by(rank.keys().copied(), |part| Some(letter_mask(part)));
    debug!("{} parts in {} letter groups", rank.len(), by_mask.len());

    let mut seen = HashSet::new();
    let mut stuffed = Vec::new();
    for host in corpus.all_words() {
        if host.chars().count() < params.min_host_len || !seen.insert(host) {
            continue;
        }
        let host_mask = letter_mask(host);
        let mut parts: Vec<&str> = by_mask
            .iter()
            .filter(|(mask, _)| **mask & !host_mask == 0)
            .flat_map(|(_, group)| group.iter().copied())
            .filter(|&part| part != host && host.contains(part))
            .collect();
        if parts.len() >= params.min_parts {
            parts.sort_by_key(|part| rank.get(part).copied().unwrap_or(usize::MAX));
            stuffed.push(Stuffing {
                host: host.to_string(),
                parts: parts.into_iter().map(str::to_string).collect(),
            });
        }
    }
    info!("found {} stuffed words", stuffed.len());
    Ok(stuffed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nouns(words: &[&str]) -> Corpus {
        Corpus::from_lists([(PartOfSpeech::Noun, words.to_vec())])
    }

    #[test]
    fn test_double_sandwiches() {
        let corpus = nouns(&["река", "груз", "воз", "перегрузка", "перевозка", "лето", "пес", "лепесток"]);
        let found = find_double_sandwiches(&corpus, &DoubleSandwichParams::default()).unwrap();
        assert_eq!(
            found,
            vec![
                DoubleSandwich {
                    word: "река".to_string(),
                    hosts: vec!["перегрузка".to_string(), "перевозка".to_string()],
                },
                DoubleSandwich { word: "лето".to_string(), hosts: vec!["лепесток".to_string()] },
            ]
        );
        assert_eq!(found[1].to_string(), "лето: лепесток");
    }

    #[test]
    fn test_halves_must_surround_a_filling_word() {
        // "лепесток" holds "ле" and "то" around "пес", which is not a word here
        let corpus = nouns(&["лето", "лепесток", "кот"]);
        assert!(find_double_sandwiches(&corpus, &DoubleSandwichParams::default()).unwrap().is_empty());
    }

    #[test]
    fn test_double_sandwich_pool_is_the_top_of_the_list() {
        let corpus = nouns(&["лето", "пес", "лепесток"]);
        let params = DoubleSandwichParams { pool_take: 2, ..DoubleSandwichParams::default() };
        assert!(find_double_sandwiches(&corpus, &params).unwrap().is_empty());
    }

    #[test]
    fn test_stuffed_words() {
        let corpus = nouns(&["подарок", "рок", "под", "ода", "дар", "транспорт", "спор", "спорт", "порт", "транс", "кот"]);
        let found = find_stuffed_words(&corpus, &StuffingParams::default()).unwrap();
        let rendered: Vec<String> = found.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["подарок: рок, под, ода, дар", "транспорт: спор, спорт, порт, транс"]);
    }

    #[test]
    fn test_ignored_parts_and_threshold() {
        let corpus = Corpus::from_lists([
            (PartOfSpeech::Noun, vec!["ост", "рост", "про", "той"]),
            (PartOfSpeech::Adjective, vec!["простой"]),
        ]);
        assert!(find_stuffed_words(&corpus, &StuffingParams::default()).unwrap().is_empty());

        let three = StuffingParams { min_parts: 3, ..StuffingParams::default() };
        let found = find_stuffed_words(&corpus, &three).unwrap();
        assert_eq!(found, vec![Stuffing { host: "простой".to_string(), parts: vec!["рост".into(), "про".into(), "той".into()] }]);

        let nothing_ignored = StuffingParams { ignored_parts: Vec::new(), ..StuffingParams::default() };
        let found = find_stuffed_words(&corpus, &nothing_ignored).unwrap();
        assert_eq!(found[0].parts, vec!["ост", "рост", "про", "той"]);
    }

    #[test]
    fn test_letter_mask() {
        assert_eq!(letter_mask("кот"), 0b1);
        assert_eq!(letter_mask("река"), 0b110);
        assert_eq!(letter_mask("кт"), 0);
        assert_eq!(letter_mask("idea"), 0b1110_0000);
    }

    #[test]
    fn test_invalid_params() {
        let corpus = nouns(&[]);
        let params = DoubleSandwichParams { min_word_len: 3, ..DoubleSandwichParams::default() };
        assert_eq!(find_double_sandwiches(&corpus, &params).unwrap_err().code(), "E002");
        let params = StuffingParams { min_parts: 0, ..StuffingParams::default() };
        assert_eq!(find_stuffed_words(&corpus, &params).unwrap_err().code(), "E002");
    }
}
