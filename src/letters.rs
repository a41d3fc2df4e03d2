//! Letter multisets: the "bag of letters" view of a word or phrase.

use std::collections::BTreeMap;
use std::fmt;

use crate::alphabet::Language;

/// Mapping from letter to a positive count.
///
/// Letters with count zero are never stored, so two multisets compare equal
/// exactly when every letter occurs the same number of times in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LetterMultiset {
    counts: BTreeMap<char, usize>,
    total: usize,
}

impl LetterMultiset {
    /// Count every character of `word`.
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        let mut ms = Self::default();
        word.chars().for_each(|c| ms.push(c));
        ms
    }

    /// Count only the characters of `word` that belong to `language`'s alphabet.
    #[must_use]
    pub fn from_letters(word: &str, language: Language) -> Self {
        let mut ms = Self::default();
        word.chars().filter(|&c| language.contains(c)).for_each(|c| ms.push(c));
        ms
    }

    fn push(&mut self, c: char) {
        *self.counts.entry(c).or_insert(0) += 1;
        self.total += 1;
    }

    /// The count of `letter` (zero if absent).
    #[must_use]
    pub fn count(&self, letter: char) -> usize {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Number of letters, with multiplicity.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Distinct letters, in code-point order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().copied()
    }

    /// `(letter, count)` pairs in code-point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// Multiset union (sum of counts).
    #[must_use]
    pub fn add(&self, other: &LetterMultiset) -> LetterMultiset {
        let mut sum = self.clone();
        for (c, n) in other.iter() {
            *sum.counts.entry(c).or_insert(0) += n;
        }
        sum.total += other.total;
        sum
    }

    /// True if some letter occurs more often here than in `target`
    /// (including letters `target` does not have at all).
    #[must_use]
    pub fn exceeds(&self, target: &LetterMultiset) -> bool {
        self.iter().any(|(c, n)| n > target.count(c))
    }

    /// True if `self + other` would exceed `target`, without building the sum.
    #[must_use]
    pub fn sum_exceeds(&self, other: &LetterMultiset, target: &LetterMultiset) -> bool {
        other.iter().any(|(c, n)| self.count(c) + n > target.count(c))
    }
}

impl fmt::Display for LetterMultiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(c, n)| format!("{c}:{n}")).collect();
        write!(f, "{{{}}}", pairs.join(","))
    }
}
