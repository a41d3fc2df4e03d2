//! Word clusters: groups of words sharing a prefix (or suffix) that is itself a noun.
//!
//! ```text
//! авто: авто, автобан, автобус, автоген, автомат, автор
//! ```

use std::collections::HashSet;
use std::fmt;

use log::info;

use crate::corpus::{Corpus, PartOfSpeech};
use crate::errors::PuzzleError;
use crate::partition::{by_length, index_by};

/// Longest shared affix supported.
pub const MAX_AFFIX_LEN: usize = 10;

/// Which end of the words the shared part sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Affix {
    #[default]
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterParams {
    pub affix: Affix,
    /// Length of the shared part, which must be a noun of exactly this length.
    pub affix_len: usize,
    pub min_word_len: usize,
    pub max_word_len: usize,
    /// Smallest group worth reporting.
    pub min_cluster: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            affix: Affix::Prefix,
            affix_len: 4,
            min_word_len: 4,
            max_word_len: 7,
            min_cluster: 4,
        }
    }
}

/// Words sharing `affix`, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordCluster {
    pub affix: String,
    pub words: Vec<String>,
}

impl fmt::Display for WordCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.affix, self.words.join(", "))
    }
}

fn affix_of(word: &str, affix: Affix, len: usize) -> Option<String> {
    let count = word.chars().count();
    if count < len {
        return None;
    }
    Some(match affix {
        Affix::Prefix => word.chars().take(len).collect(),
        Affix::Suffix => word.chars().skip(count - len).collect(),
    })
}

/// Group the words of every part of speech by their shared affix.
///
/// Only groups of at least `min_cluster` distinct words whose affix is a noun
/// are kept. Clusters come out ordered by affix.
///
/// # Errors
///
/// [`PuzzleError::ParameterOutOfRange`] if `affix_len` is outside `1..=10`
/// or the word-length bounds are inconsistent.
pub fn find_clusters(corpus: &Corpus, params: &ClusterParams) -> Result<Vec<WordCluster>, PuzzleError> {
    PuzzleError::check_range("affix_len", params.affix_len, 1, MAX_AFFIX_LEN)?;
    PuzzleError::check_range("min_word_len", params.min_word_len, 1, params.max_word_len)?;

    let affix_nouns: HashSet<&str> = by_length(
        corpus.words(PartOfSpeech::Noun).iter().map(String::as_str),
        params.affix_len,
        params.affix_len,
    )
    .bucket(params.affix_len)
    .iter()
    .copied()
    .collect();

    let mut words: Vec<&str> = corpus
        .all_words()
        .filter(|w| (params.min_word_len..=params.max_word_len).contains(&w.chars().count()))
        .collect();
    words.sort_unstable();
    words.dedup();

    let groups = index_by(words, |w| affix_of(w, params.affix, params.affix_len));
    let mut clusters: Vec<WordCluster> = groups
        .into_iter()
        .filter(|(affix, group)| group.len() >= params.min_cluster && affix_nouns.contains(affix.as_str()))
        .map(|(affix, group)| WordCluster {
            affix,
            words: group.into_iter().map(str::to_string).collect(),
        })
        .collect();
    clusters.sort_by(|a, b| a.affix.cmp(&b.affix));
    info!("found {} clusters sharing a {:?} of {}", clusters.len(), params.affix, params.affix_len);
    Ok(clusters)
}
