//! Corpus partitioning: cheap, coarse candidate filters built once before a search.
//!
//! Every index here answers "which words could *possibly* extend a solution?",
//! never "which words *do*". Three families are provided:
//!
//! - by length ([`by_length`]): square and chain searches only ever look at
//!   words of one exact length at a time;
//! - by contained letters ([`by_contained_letters`]): a word with a letter the
//!   target phrase lacks can never be part of an anagram of it;
//! - by positional letter ([`by_position_letter`]): words keyed by the letter at
//!   a fixed offset from the start or end.
//!
//! Lengths and offsets count `char`s, not bytes, so Cyrillic words behave
//! exactly like Latin ones.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

/// One bucket of equal-length words: corpus order plus O(1) membership.
#[derive(Debug, Clone, Default)]
pub struct Bucket<'a> {
    words: Vec<&'a str>,
    members: HashSet<&'a str>,
}

impl<'a> Bucket<'a> {
    fn push(&mut self, word: &'a str) {
        self.words.push(word);
        self.members.insert(word);
    }

    /// Words in corpus order (duplicates included).
    #[must_use]
    pub fn words(&self) -> &[&'a str] {
        &self.words
    }

    /// The corpus-owned copy of `word`, if the bucket has it.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&'a str> {
        self.members.get(word).copied()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }
}

/// Words bucketed by exact length (in `char`s).
#[derive(Debug, Clone, Default)]
pub struct LengthBuckets<'a> {
    buckets: BTreeMap<usize, Bucket<'a>>,
}

impl<'a> LengthBuckets<'a> {
    /// The bucket for `len` (empty if no word has that length).
    #[must_use]
    pub fn bucket(&self, len: usize) -> &[&'a str] {
        self.buckets.get(&len).map(Bucket::words).unwrap_or(&[])
    }

    /// Membership test restricted to the bucket of `word`'s own length.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&'a str> {
        self.buckets.get(&word.chars().count()).and_then(|b| b.get(word))
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Lengths that have at least one word, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.keys().copied()
    }

    /// Total number of bucketed words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.words.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Bucket `words` by length, keeping only lengths in `min_len..=max_len`.
pub fn by_length<'a, I>(words: I, min_len: usize, max_len: usize) -> LengthBuckets<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buckets: BTreeMap<usize, Bucket<'a>> = BTreeMap::new();
    for word in words {
        let len = word.chars().count();
        if (min_len..=max_len).contains(&len) {
            buckets.entry(len).or_default().push(word);
        }
    }
    LengthBuckets { buckets }
}

/// Keep the words whose every letter is in `allowed`, in their original order.
pub fn by_contained_letters<'a, I>(words: I, allowed: &HashSet<char>) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    words
        .into_iter()
        .filter(|word| word.chars().all(|c| allowed.contains(&c)))
        .collect()
}

/// A fixed offset into a word, counted from either end (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    FromStart(usize),
    FromEnd(usize),
}

impl Position {
    /// The letter of `word` at this position, if the word is long enough.
    #[must_use]
    pub fn letter_of(self, word: &str) -> Option<char> {
        match self {
            Position::FromStart(n) => word.chars().nth(n),
            Position::FromEnd(n) => word.chars().rev().nth(n),
        }
    }
}

/// Group `words` by a derived key; words for which `key` is `None` are left out.
///
/// Each group keeps corpus order.
pub fn index_by<'a, I, K, F>(words: I, mut key: F) -> HashMap<K, Vec<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
    K: Eq + Hash,
    F: FnMut(&'a str) -> Option<K>,
{
    let mut index: HashMap<K, Vec<&'a str>> = HashMap::new();
    for word in words {
        if let Some(k) = key(word) {
            index.entry(k).or_default().push(word);
        }
    }
    index
}

/// Index `words` by the letter at `position`. Words too short for the offset are skipped.
pub fn by_position_letter<'a, I>(words: I, position: Position) -> HashMap<char, Vec<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
{
    index_by(words, |word| position.letter_of(word))
}
