//! Word squares: `L` words of length `L` stacked so that column `i` spells row `i`.
//!
//! ```text
//! b i t
//! i c e
//! t e n
//! ```
//!
//! Rows are placed top to bottom. When row `k` is chosen, rows `0..k` have
//! already fixed its first `k` letters (the transpose constraint), so only
//! words starting with `rows[0][k]` are ever expanded and the rest is checked
//! letter by letter. A candidate is also dropped when some later column could
//! no longer be completed into a dictionary word.

use std::collections::{HashMap, HashSet};

use log::info;

use crate::corpus::{Corpus, PartOfSpeech};
use crate::engine::{search, SearchLimits, SearchOutcome, SearchProblem};
use crate::errors::PuzzleError;
use crate::partition::{by_length, by_position_letter, Position};

/// Smallest side a square may have.
pub const MIN_SIDE: usize = 2;
/// Largest side a square may have.
pub const MAX_SIDE: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareParams {
    /// Number of rows, columns and letters per word.
    pub side: usize,
    /// Also require both diagonals to be dictionary words (read either way).
    pub full_magic: bool,
    pub part_of_speech: PartOfSpeech,
}

impl Default for SquareParams {
    fn default() -> Self {
        Self {
            side: 5,
            full_magic: false,
            part_of_speech: PartOfSpeech::Noun,
        }
    }
}

struct SquareProblem<'a> {
    side: usize,
    words: Vec<&'a str>,
    letters: Vec<Vec<char>>,
    // indices of the words starting with a given letter
    by_first: HashMap<char, Vec<usize>>,
    prefixes: HashSet<Vec<char>>,
    lexicon: HashSet<Vec<char>>,
    full_magic: bool,
}

impl<'a> SquareProblem<'a> {
    fn new(words: Vec<&'a str>, side: usize, full_magic: bool) -> Self {
        let letters: Vec<Vec<char>> = words.iter().map(|w| w.chars().collect()).collect();
        let position: HashMap<&str, usize> =
            words.iter().enumerate().map(|(i, &w)| (w, i)).collect();
        let by_first: HashMap<char, Vec<usize>> = by_position_letter(words.iter().copied(), Position::FromStart(0))
            .into_iter()
            .map(|(c, group)| (c, group.into_iter().map(|w| position[w]).collect()))
            .collect();
        let prefixes: HashSet<Vec<char>> = letters
            .iter()
            .flat_map(|w| (1..side).map(move |n| w[..n].to_vec()))
            .collect();
        let lexicon: HashSet<Vec<char>> = letters.iter().cloned().collect();
        Self { side, words, letters, by_first, prefixes, lexicon, full_magic }
    }

    fn is_word_either_way(&self, mut line: Vec<char>) -> bool {
        if self.lexicon.contains(&line) {
            return true;
        }
        line.reverse();
        self.lexicon.contains(&line)
    }

    fn diagonals_are_words(&self, rows: &[usize]) -> bool {
        let n = self.side;
        let main = (0..n).map(|i| self.letters[rows[i]][i]).collect();
        let anti = (0..n).map(|i| self.letters[rows[i]][n - 1 - i]).collect();
        self.is_word_either_way(main) && self.is_word_either_way(anti)
    }
}

impl SearchProblem for SquareProblem<'_> {
    type Partial = Vec<usize>;
    type Candidate = usize;
    type Solution = Vec<String>;

    fn expand<'s>(&'s self, rows: &'s Vec<usize>) -> Box<dyn Iterator<Item = usize> + 's> {
        let k = rows.len();
        match rows.first() {
            _ if k >= self.side => Box::new(std::iter::empty()),
            None => Box::new(0..self.words.len()),
            Some(&top) => match self.by_first.get(&self.letters[top][k]) {
                Some(group) => Box::new(group.iter().copied()),
                None => Box::new(std::iter::empty()),
            },
        }
    }

    fn prune(&self, rows: &Vec<usize>, &candidate: &usize) -> bool {
        let k = rows.len();
        let cand = &self.letters[candidate];
        // transpose: letter r of the new row equals letter k of row r
        if rows.iter().enumerate().any(|(r, &row)| cand[r] != self.letters[row][k]) {
            return true;
        }
        // every later column must still be the start of some word
        (k + 1..self.side).any(|j| {
            let mut column: Vec<char> = rows.iter().map(|&row| self.letters[row][j]).collect();
            column.push(cand[j]);
            !self.prefixes.contains(&column)
        })
    }

    fn extend(&self, rows: &Vec<usize>, candidate: usize) -> Vec<usize> {
        let mut next = rows.clone();
        next.push(candidate);
        next
    }

    fn accept(&self, rows: &Vec<usize>, _can_grow: bool) -> bool {
        if rows.len() != self.side {
            return false;
        }
        let distinct: HashSet<usize> = rows.iter().copied().collect();
        distinct.len() == rows.len() && (!self.full_magic || self.diagonals_are_words(rows))
    }

    fn solution(&self, rows: &Vec<usize>) -> Vec<String> {
        rows.iter().map(|&i| self.words[i].to_string()).collect()
    }
}

/// Find every word square of side `params.side`, rows listed top to bottom.
///
/// Squares that repeat a row are not reported.
///
/// # Errors
///
/// [`PuzzleError::ParameterOutOfRange`] if the side is outside `2..=12`.
pub fn find_squares(
    corpus: &Corpus,
    params: &SquareParams,
    limits: &SearchLimits,
) -> Result<SearchOutcome<Vec<String>>, PuzzleError> {
    PuzzleError::check_range("side", params.side, MIN_SIDE, MAX_SIDE)?;

    let buckets = by_length(
        corpus.words(params.part_of_speech).iter().map(String::as_str),
        params.side,
        params.side,
    );
    let mut seen = HashSet::new();
    let words: Vec<&str> = buckets
        .bucket(params.side)
        .iter()
        .copied()
        .filter(|w| seen.insert(*w))
        .collect();
    info!("squares of side {}: {} candidate words", params.side, words.len());

    let problem = SquareProblem::new(words, params.side, params.full_magic);
    let outcome = search(&problem, [Vec::new()], limits);
    info!("found {} squares ({:?})", outcome.len(), outcome.status);
    Ok(outcome)
}
