//! Integration tests for the lexipuzzle generators.
//!
//! These tests go through the public API only: load or build a corpus, run a
//! generator under search limits, and check the reported solutions and status.

use std::collections::HashSet;
use std::time::Duration;

use lexipuzzle::alphabet::Language;
use lexipuzzle::anagram::{find_anagrams, AnagramParams};
use lexipuzzle::chain::{find_growth_chains, find_removal_chains, GrowthParams, RemovalParams};
use lexipuzzle::corpus::{Corpus, PartOfSpeech};
use lexipuzzle::engine::{SearchLimits, SearchStatus};
use lexipuzzle::errors::PuzzleError;
use lexipuzzle::letters::LetterMultiset;
use lexipuzzle::lock::find_lock_patterns;
use lexipuzzle::rotation::{find_rotation_groups, RotationParams};
use lexipuzzle::sandwich::{find_stuffed_words, StuffingParams};
use lexipuzzle::square::{find_squares, SquareParams};

/// Load the fixture corpus from `tests/fixtures`
fn load_fixture_corpus() -> Corpus {
    Corpus::load_from_dir("tests/fixtures", Language::Russian).expect("Failed to load fixture corpus")
}

fn nouns(words: &[&str]) -> Corpus {
    Corpus::from_lists([(PartOfSpeech::Noun, words.to_vec())])
}

#[cfg(test)]
mod corpus_loading {
    use super::*;

    #[test]
    fn test_fixture_lists_are_normalized() {
        let corpus = load_fixture_corpus();
        assert_eq!(corpus.words(PartOfSpeech::Noun).len(), 10);
        assert_eq!(corpus.words(PartOfSpeech::Verb), ["спать", "нести", "лить"]);
        assert_eq!(corpus.len(), 15);
    }

    #[test]
    fn test_missing_directory_is_a_corpus_error() {
        let err = Corpus::load_from_dir("tests/no_such_dir", Language::Russian).unwrap_err();
        assert_eq!(err.code(), "E007");
        assert!(err.to_string().contains("nouns_russian.txt"));
    }

    #[test]
    fn test_missing_language_files() {
        let err = Corpus::load_from_dir("tests/fixtures", Language::English).unwrap_err();
        assert!(matches!(err, PuzzleError::CorpusLoad { .. }));
    }
}

#[cfg(test)]
mod anagrams {
    use super::*;

    fn at_depth(depth: usize) -> AnagramParams {
        AnagramParams { depths: vec![depth], ..AnagramParams::default() }
    }

    #[test]
    fn test_fixture_anagrams() {
        let corpus = load_fixture_corpus();
        let outcome = find_anagrams(&corpus, "кот, сон", Language::Russian, &at_depth(2), &SearchLimits::default()).unwrap();
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        assert_eq!(outcome.len(), 4);

        let target = LetterMultiset::from_word("котсон");
        for words in &outcome.solutions {
            assert_eq!(LetterMultiset::from_word(&words.concat()), target);
        }
    }

    #[test]
    fn test_single_word_cannot_split_in_two() {
        let corpus = nouns(&["кот", "ток", "ко", "т"]);
        let outcome = find_anagrams(&corpus, "кот", Language::Russian, &at_depth(2), &SearchLimits::default()).unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.status, SearchStatus::Exhausted);
    }

    #[test]
    fn test_foreign_phrase_is_rejected() {
        let corpus = nouns(&["кот"]);
        let err = find_anagrams(&corpus, "cat", Language::Russian, &at_depth(2), &SearchLimits::default()).unwrap_err();
        assert_eq!(err.code(), "E001");
    }
}

#[cfg(test)]
mod squares {
    use super::*;

    #[test]
    fn test_fixture_square_is_symmetric() {
        let corpus = load_fixture_corpus();
        let params = SquareParams { side: 3, ..SquareParams::default() };
        let outcome = find_squares(&corpus, &params, &SearchLimits::default()).unwrap();
        assert_eq!(outcome.solutions, vec![vec!["кот", "оса", "тан"]]);

        let rows: Vec<Vec<char>> = outcome.solutions[0].iter().map(|r| r.chars().collect()).collect();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(rows[i][j], rows[j][i]);
            }
        }
    }

    #[test]
    fn test_side_out_of_range() {
        let params = SquareParams { side: 13, ..SquareParams::default() };
        let err = find_squares(&nouns(&[]), &params, &SearchLimits::default()).unwrap_err();
        assert_eq!(err, PuzzleError::ParameterOutOfRange { name: "side", value: 13, min: 2, max: 12 });
    }
}

#[cfg(test)]
mod chains {
    use super::*;

    #[test]
    fn test_fixture_growth_chain() {
        let corpus = load_fixture_corpus();
        let outcome = find_growth_chains(&corpus, &GrowthParams::default(), &SearchLimits::default()).unwrap();
        assert_eq!(outcome.solutions, vec![vec!["пол", "поле", "полет", "эполет"]]);
    }

    #[test]
    fn test_growth_is_idempotent() {
        let corpus = load_fixture_corpus();
        let first = find_growth_chains(&corpus, &GrowthParams::default(), &SearchLimits::default()).unwrap();
        let second = find_growth_chains(&corpus, &GrowthParams::default(), &SearchLimits::default()).unwrap();
        assert_eq!(first.solutions, second.solutions);
    }

    #[test]
    fn test_growth_from_a_start_word() {
        let corpus = load_fixture_corpus();
        let params = GrowthParams { start: Some("ПОЛ".to_string()), ..GrowthParams::default() };
        let outcome = find_growth_chains(&corpus, &params, &SearchLimits::default()).unwrap();
        assert_eq!(outcome.solutions, vec![vec!["пол", "поле", "полет", "эполет"]]);

        let params = GrowthParams { start: Some("кот".to_string()), ..GrowthParams::default() };
        assert!(find_growth_chains(&corpus, &params, &SearchLimits::default()).unwrap().is_empty());
    }

    #[test]
    fn test_removal_chains_reject_russian() {
        let params = RemovalParams { language: Language::Russian, ..RemovalParams::default() };
        let err = find_removal_chains(&load_fixture_corpus(), &params, &SearchLimits::default()).unwrap_err();
        assert_eq!(err.code(), "E009");
    }

    #[test]
    fn test_removal_chain_drops_roman_letters() {
        let corpus = nouns(&["crackling", "cracking", "racking", "raking", "aking"]);
        let params = RemovalParams { min_root_len: 5, ..RemovalParams::default() };
        let outcome = find_removal_chains(&corpus, &params, &SearchLimits::default()).unwrap();
        assert!(outcome.solutions.contains(&vec![
            "crackling".to_string(),
            "cracking".to_string(),
            "racking".to_string(),
            "raking".to_string(),
        ]));
        for chain in &outcome.solutions {
            for pair in chain.windows(2) {
                assert_eq!(pair[0].chars().count(), pair[1].chars().count() + 1);
            }
        }
    }
}

#[cfg(test)]
mod locks {
    use super::*;

    #[test]
    fn test_there_are_296_lock_patterns() {
        let outcome = find_lock_patterns(&SearchLimits::default());
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        let distinct: HashSet<String> = outcome.solutions.iter().map(ToString::to_string).collect();
        assert_eq!(distinct.len(), 296);
    }

    #[test]
    fn test_step_limit_truncates() {
        let outcome = find_lock_patterns(&SearchLimits::default().with_max_steps(50));
        assert!(matches!(outcome.status, SearchStatus::StepLimitReached { .. }));
        assert!(outcome.status.is_truncated());
        assert!(outcome.len() < 296);
    }

    #[test]
    fn test_generous_time_limit_finishes() {
        let outcome = find_lock_patterns(&SearchLimits::default().with_time_limit(Duration::from_secs(600)));
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        assert_eq!(outcome.len(), 296);
    }

    #[test]
    fn test_result_cap_is_exact() {
        let outcome = find_lock_patterns(&SearchLimits::default().with_max_results(3));
        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.status, SearchStatus::FoundEnough);
    }
}

#[cfg(test)]
mod word_play {
    use super::*;

    #[test]
    fn test_rotation_groups() {
        let corpus = nouns(&["насос", "кот", "сосна", "казна", "наказ", "окно"]);
        let groups = find_rotation_groups(&corpus, &RotationParams::default()).unwrap();
        assert_eq!(groups, vec![vec!["казна", "наказ"], vec!["насос", "сосна"]]);
    }

    #[test]
    fn test_stuffed_word() {
        let corpus = nouns(&["рок", "под", "ода", "дар", "подарок", "кот"]);
        let found = find_stuffed_words(&corpus, &StuffingParams::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_string(), "подарок: рок, под, ода, дар");
    }
}
