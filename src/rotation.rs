//! Spinning words: nouns whose cyclic rotations are nouns too.
//!
//! ```text
//! ельник, никель
//! казна, наказ
//! насос, сосна
//! ```

use std::collections::BTreeSet;

use log::info;

use crate::corpus::{Corpus, PartOfSpeech};
use crate::errors::PuzzleError;
use crate::partition::by_length;

/// Longest word considered.
pub const MAX_WORD_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationParams {
    pub part_of_speech: PartOfSpeech,
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self { part_of_speech: PartOfSpeech::Noun, min_len: 4, max_len: 7 }
    }
}

/// The proper rotations of `word`: first letter moved to the back, once, twice, ...
fn rotations(word: &str) -> impl Iterator<Item = String> {
    let chars: Vec<char> = word.chars().collect();
    (1..chars.len()).map(move |k| chars[k..].iter().chain(&chars[..k]).collect())
}

/// Every group of two or more distinct words that are rotations of each other.
///
/// Each group is sorted, and groups come out in lexicographic order.
///
/// # Errors
///
/// [`PuzzleError::ParameterOutOfRange`] for inconsistent length bounds.
pub fn find_rotation_groups(corpus: &Corpus, params: &RotationParams) -> Result<Vec<Vec<String>>, PuzzleError> {
    PuzzleError::check_range("max_len", params.max_len, 2, MAX_WORD_LEN)?;
    PuzzleError::check_range("min_len", params.min_len, 2, params.max_len)?;

    let buckets = by_length(
        corpus.words(params.part_of_speech).iter().map(String::as_str),
        params.min_len,
        params.max_len,
    );

    let mut groups: BTreeSet<Vec<&str>> = BTreeSet::new();
    for len in buckets.lengths() {
        for &word in buckets.bucket(len) {
            let mut group: Vec<&str> = rotations(word).filter_map(|r| buckets.get(&r)).collect();
            group.push(word);
            group.sort_unstable();
            group.dedup();
            if group.len() > 1 {
                groups.insert(group);
            }
        }
    }
    info!("found {} rotation groups", groups.len());
    Ok(groups
        .into_iter()
        .map(|group| group.into_iter().map(str::to_string).collect())
        .collect())
}
