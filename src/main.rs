use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use lexipuzzle::alphabet::Language;
use lexipuzzle::anagram::{find_anagrams, AnagramParams};
use lexipuzzle::chain::{find_growth_chains, find_removal_chains, GrowthParams, RemovalParams};
use lexipuzzle::clusters::{find_clusters, Affix, ClusterParams};
use lexipuzzle::corpus::Corpus;
use lexipuzzle::engine::{SearchLimits, SearchOutcome};
use lexipuzzle::errors::PuzzleError;
use lexipuzzle::hiding::{hide_before_sequence, hide_in_nth_letters, HidingParams};
use lexipuzzle::lock::find_lock_patterns;
use lexipuzzle::output::{format_lines, format_solution, status_line, write_results};
use lexipuzzle::rotation::{find_rotation_groups, RotationParams};
use lexipuzzle::sandwich::{find_double_sandwiches, find_stuffed_words, DoubleSandwichParams, StuffingParams};
use lexipuzzle::square::{find_squares, SquareParams};

/// Word-puzzle generator: anagrams, word squares, word chains, lock patterns
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding <pos>_<language>.txt word lists
    #[arg(short, long, global = true, default_value = "words_cache")]
    cache_dir: PathBuf,

    /// Corpus language (russian or english); russian unless the command needs english
    #[arg(short, long, global = true)]
    language: Option<Language>,

    /// Stop after this many results
    #[arg(short = 'n', long, global = true)]
    max_results: Option<usize>,

    /// Stop after this many seconds
    #[arg(short, long, global = true)]
    time_limit: Option<f64>,

    /// Stop after visiting this many search nodes
    #[arg(long, global = true)]
    max_steps: Option<u64>,

    /// Write results to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a phrase into dictionary words using exactly its letters
    Anagrams {
        phrase: String,
        /// Numbers of words to split into
        #[arg(short, long, value_delimiter = ',', default_values_t = [2, 3, 4])]
        depth: Vec<usize>,
        #[arg(long, default_value_t = 3)]
        min_len: usize,
        #[arg(long, default_value_t = 7)]
        max_len: usize,
    },
    /// Word squares that read the same across and down
    Squares {
        #[arg(short, long, default_value_t = 5)]
        side: usize,
        /// Also require both diagonals to be words
        #[arg(long)]
        full_magic: bool,
    },
    /// Maximal chains adding one letter at the front or back
    Chains {
        #[arg(long, default_value_t = 4)]
        min_chain: usize,
        /// Grow only from this word
        #[arg(long)]
        start: Option<String>,
    },
    /// Maximal chains removing one Roman-numeral letter at a time
    Roman {
        #[arg(long, default_value_t = 4)]
        min_chain: usize,
    },
    /// All "most complicated" 3x3 phone lock patterns
    Locks,
    /// Nouns whose cyclic rotations are nouns too
    Spinning {
        #[arg(long, default_value_t = 4)]
        min_len: usize,
        #[arg(long, default_value_t = 7)]
        max_len: usize,
    },
    /// Words whose two halves wrap a filling word inside a longer word
    DoubleSandwich,
    /// Long words stuffed with several shorter words
    Stuffing {
        #[arg(long, default_value_t = 4)]
        min_parts: usize,
    },
    /// Words grouped by a shared prefix (or suffix) that is itself a noun
    Clusters {
        #[arg(long, default_value_t = 4)]
        prefix_len: usize,
        /// Group by suffix instead of prefix
        #[arg(long)]
        suffix: bool,
    },
    /// Hide a secret word in the n-th letters of other words
    HideNth { secret: String, n: usize },
    /// Hide a secret word in the letters before a marking sequence
    HideBefore { secret: String, sequence: String },
}

impl Cli {
    fn limits(&self) -> Result<SearchLimits, PuzzleError> {
        Ok(SearchLimits {
            max_results: self.max_results,
            time_limit: self.time_limit.map(PuzzleError::time_limit_from_secs).transpose()?,
            max_steps: self.max_steps,
        })
    }

    /// The chosen language, or the command's own default.
    fn language(&self) -> Language {
        match (self.language, &self.command) {
            (Some(language), _) => language,
            (None, Command::Roman { .. }) => Language::English,
            (None, _) => Language::Russian,
        }
    }

    fn load_corpus(&self) -> Result<Corpus, PuzzleError> {
        let t_load = Instant::now();
        let corpus = Corpus::load_from_dir(&self.cache_dir, self.language())?;
        eprintln!("Loaded {} words in {:.3}s", corpus.len(), t_load.elapsed().as_secs_f64());
        Ok(corpus)
    }
}

/// Entry point of the lexipuzzle CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    lexipuzzle::log::init_logger(lexipuzzle::log::debug_requested());

    if let Err(e) = try_main() {
        // Print the error message to stderr, with detailed formatting if it's a PuzzleError
        if let Some(puzzle_err) = e.downcast_ref::<PuzzleError>() {
            eprintln!("Error: {}", puzzle_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Print a search outcome's solutions and its status line.
fn report<S>(cli: &Cli, outcome: &SearchOutcome<S>, render: impl Fn(&S) -> String, separator: &str) -> std::io::Result<()> {
    let text = outcome.solutions.iter().map(render).collect::<Vec<_>>().join(separator);
    write_results(cli.output.as_deref(), &text)?;
    eprintln!("{}", status_line(outcome));
    Ok(())
}

/// Core application logic: parse arguments, load the corpus if needed,
/// run the requested generator and print what it found.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let limits = cli.limits()?;
    let language = cli.language();
    let t_search = Instant::now();

    match &cli.command {
        Command::Anagrams { phrase, depth, min_len, max_len } => {
            let corpus = cli.load_corpus()?;
            let params = AnagramParams {
                depths: depth.clone(),
                min_word_len: *min_len,
                max_word_len: *max_len,
                ..AnagramParams::default()
            };
            let outcome = find_anagrams(&corpus, phrase, language, &params, &limits)?;
            report(&cli, &outcome, |words| format_solution(words.as_slice()), "\n")?;
        }
        Command::Squares { side, full_magic } => {
            let corpus = cli.load_corpus()?;
            let params = SquareParams { side: *side, full_magic: *full_magic, ..SquareParams::default() };
            let outcome = find_squares(&corpus, &params, &limits)?;
            report(&cli, &outcome, |rows| rows.join("\n"), "\n\n")?;
        }
        Command::Chains { min_chain, start } => {
            let corpus = cli.load_corpus()?;
            let params = GrowthParams {
                language,
                min_chain: *min_chain,
                start: start.clone(),
                ..GrowthParams::default()
            };
            let outcome = find_growth_chains(&corpus, &params, &limits)?;
            report(&cli, &outcome, |chain| format_solution(chain.as_slice()), "\n")?;
        }
        Command::Roman { min_chain } => {
            let corpus = cli.load_corpus()?;
            let params = RemovalParams { language, min_chain: *min_chain, ..RemovalParams::default() };
            let outcome = find_removal_chains(&corpus, &params, &limits)?;
            report(&cli, &outcome, |chain| format_solution(chain.as_slice()), "\n")?;
        }
        Command::Locks => {
            let outcome = find_lock_patterns(&limits);
            report(&cli, &outcome, ToString::to_string, "\n\n")?;
        }
        Command::Spinning { min_len, max_len } => {
            let corpus = cli.load_corpus()?;
            let params = RotationParams { min_len: *min_len, max_len: *max_len, ..RotationParams::default() };
            let groups = find_rotation_groups(&corpus, &params)?;
            let text = groups.iter().map(|group| format_solution(group.as_slice())).collect::<Vec<_>>().join("\n");
            write_results(cli.output.as_deref(), &text)?;
            eprintln!("✓ {} rotation groups", groups.len());
        }
        Command::DoubleSandwich => {
            let corpus = cli.load_corpus()?;
            let found = find_double_sandwiches(&corpus, &DoubleSandwichParams::default())?;
            write_results(cli.output.as_deref(), &format_lines(&found))?;
            eprintln!("✓ {} double sandwiches", found.len());
        }
        Command::Stuffing { min_parts } => {
            let corpus = cli.load_corpus()?;
            let params = StuffingParams { min_parts: *min_parts, ..StuffingParams::default() };
            let found = find_stuffed_words(&corpus, &params)?;
            write_results(cli.output.as_deref(), &format_lines(&found))?;
            eprintln!("✓ {} stuffed words", found.len());
        }
        Command::Clusters { prefix_len, suffix } => {
            let corpus = cli.load_corpus()?;
            let params = ClusterParams {
                affix: if *suffix { Affix::Suffix } else { Affix::Prefix },
                affix_len: *prefix_len,
                ..ClusterParams::default()
            };
            let clusters = find_clusters(&corpus, &params)?;
            write_results(cli.output.as_deref(), &format_lines(&clusters))?;
            eprintln!("✓ {} clusters", clusters.len());
        }
        Command::HideNth { secret, n } => {
            let corpus = cli.load_corpus()?;
            let carriers = hide_in_nth_letters(&corpus, secret, *n, language, &HidingParams::default())?;
            write_results(cli.output.as_deref(), &carriers.join(" "))?;
        }
        Command::HideBefore { secret, sequence } => {
            let corpus = cli.load_corpus()?;
            let carriers = hide_before_sequence(&corpus, secret, sequence, language)?;
            write_results(cli.output.as_deref(), &carriers.join(" "))?;
        }
    }

    eprintln!("Done in {:.3}s", t_search.elapsed().as_secs_f64());
    Ok(())
}
