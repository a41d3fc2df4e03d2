//! The static lexicon the searches run over.
//!
//! A [`Corpus`] maps a part-of-speech tag to an ordered list of words, most
//! frequent first. The order matters only for *which* solutions come first
//! when a result cap is set, never for whether a solution exists.
//!
//! Word lists are plain newline-delimited files named `<pos>_<language>.txt`
//! (e.g. `nouns_russian.txt`). Producing those files is somebody else's job;
//! this module only reads them. Parsing from a string is target-independent
//! (it is what the WebAssembly build uses), while [`Corpus::load_from_dir`]
//! touches the filesystem and is native-only.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::alphabet::Language;
use crate::errors::PuzzleError;

/// Part-of-speech tag of a word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
}

impl PartOfSpeech {
    /// All tags, in the order [`Corpus::all_words`] walks them.
    pub const ALL: [PartOfSpeech; 3] = [PartOfSpeech::Noun, PartOfSpeech::Verb, PartOfSpeech::Adjective];

    /// Tag as used in corpus file names.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "nouns",
            PartOfSpeech::Verb => "verbs",
            PartOfSpeech::Adjective => "adjectives",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PartOfSpeech {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nouns" | "noun" => Ok(PartOfSpeech::Noun),
            "verbs" | "verb" => Ok(PartOfSpeech::Verb),
            "adjectives" | "adjective" => Ok(PartOfSpeech::Adjective),
            _ => Err(PuzzleError::UnknownPartOfSpeech { tag: s.to_string() }),
        }
    }
}

/// Word lists grouped by part of speech.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    lists: HashMap<PartOfSpeech, Vec<String>>,
}

impl Corpus {
    /// Build a corpus from already-normalized lists.
    pub fn from_lists<I, W>(lists: I) -> Self
    where
        I: IntoIterator<Item = (PartOfSpeech, Vec<W>)>,
        W: Into<String>,
    {
        let lists = lists
            .into_iter()
            .map(|(pos, words)| (pos, words.into_iter().map(Into::into).collect()))
            .collect();
        Corpus { lists }
    }

    /// Parse one newline-delimited word list.
    ///
    /// Lines are trimmed and lowercased; empty lines are skipped. Order is
    /// preserved and duplicates are kept (they only cost redundant search effort).
    #[must_use]
    pub fn parse_list(contents: &str) -> Vec<String> {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// Read `<pos>_<language>.txt` for every part of speech from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::CorpusLoad`] if any of the three files cannot be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_dir<P: AsRef<std::path::Path>>(dir: P, language: Language) -> Result<Corpus, PuzzleError> {
        let dir = dir.as_ref();
        let mut lists = HashMap::with_capacity(PartOfSpeech::ALL.len());
        for pos in PartOfSpeech::ALL {
            let path = dir.join(format!("{}_{}.txt", pos.tag(), language.file_suffix()));
            let data = std::fs::read_to_string(&path)
                .map_err(|e| PuzzleError::corpus_load(path.display(), e))?;
            let words = Self::parse_list(&data);
            log::debug!("loaded {} {pos} from {}", words.len(), path.display());
            lists.insert(pos, words);
        }
        Ok(Corpus { lists })
    }

    /// Words for one part of speech (empty if the corpus has none).
    #[must_use]
    pub fn words(&self, pos: PartOfSpeech) -> &[String] {
        self.lists.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nouns, then verbs, then adjectives.
    pub fn all_words(&self) -> impl Iterator<Item = &str> {
        PartOfSpeech::ALL
            .into_iter()
            .flat_map(move |pos| self.words(pos).iter().map(String::as_str))
    }

    /// Total number of words across all parts of speech.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
