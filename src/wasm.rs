use crate::alphabet::Language;
use crate::anagram::{find_anagrams, AnagramParams};
use crate::chain::{find_growth_chains, find_removal_chains, GrowthParams, RemovalParams};
use crate::clusters::{find_clusters, Affix, ClusterParams};
use crate::corpus::{Corpus, PartOfSpeech};
use crate::engine::{SearchLimits, SearchOutcome, SearchStatus};
use crate::errors::PuzzleError;
use crate::hiding::{hide_before_sequence, hide_in_nth_letters, HidingParams};
use crate::lock::find_lock_patterns;
use crate::rotation::{find_rotation_groups, RotationParams};
use crate::sandwich::{find_double_sandwiches, find_stuffed_words, DoubleSandwichParams, StuffingParams};
use crate::log::init_logger;
use crate::square::{find_squares, SquareParams};
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E001", "WASM002")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<PuzzleError> for WasmError {
    fn from(e: PuzzleError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn bad_argument(name: &str, expected: &str, e: impl std::fmt::Display) -> WasmError {
    WasmError {
        code: "WASM001".to_string(),
        message: format!("{name} must be {expected}: {e}"),
        description: "Invalid argument format".to_string(),
        details: format!("The {name} parameter could not be read as {expected}."),
        help: Some("Check the argument types against the function's documentation".to_string()),
    }
}

fn serialization_failed(e: impl std::fmt::Display) -> JsValue {
    WasmError {
        code: "WASM002".to_string(),
        message: format!("serialization failed: {e}"),
        description: "Failed to serialize result".to_string(),
        details: "The result could not be converted to JavaScript format.".to_string(),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
    .into()
}

/// Initialize logging and the panic hook.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

/// Word lists as sent from JavaScript: `{ nouns: string[], verbs: string[], adjectives: string[] }`.
#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct WordLists {
    nouns: Vec<String>,
    verbs: Vec<String>,
    adjectives: Vec<String>,
}

fn corpus_from_js(lists: JsValue) -> Result<Corpus, WasmError> {
    let lists: WordLists = serde_wasm_bindgen::from_value(lists)
        .map_err(|e| bad_argument("corpus", "{ nouns, verbs, adjectives } of string[]", e))?;
    Ok(Corpus::from_lists([
        (PartOfSpeech::Noun, lists.nouns),
        (PartOfSpeech::Verb, lists.verbs),
        (PartOfSpeech::Adjective, lists.adjectives),
    ]))
}

fn language_from_js(language: &str) -> Result<Language, WasmError> {
    language.parse().map_err(WasmError::from)
}

fn limits_from_js(max_results: Option<usize>, time_limit_secs: Option<f64>) -> Result<SearchLimits, WasmError> {
    Ok(SearchLimits {
        max_results,
        time_limit: time_limit_secs.map(PuzzleError::time_limit_from_secs).transpose()?,
        max_steps: None,
    })
}

#[derive(serde::Serialize)]
struct WasmSearchResult {
    solutions: Vec<Vec<String>>,
    status: String,
    nodes: u64,
}

fn status_name(status: &SearchStatus) -> &'static str {
    match status {
        SearchStatus::Exhausted => "exhausted",
        SearchStatus::FoundEnough => "found_enough",
        SearchStatus::TimedOut { .. } => "timed_out",
        SearchStatus::StepLimitReached { .. } => "step_limit_reached",
    }
}

fn search_result_to_js(outcome: SearchOutcome<Vec<String>>) -> Result<JsValue, JsValue> {
    let result = WasmSearchResult {
        status: status_name(&outcome.status).to_string(),
        nodes: outcome.stats.nodes,
        solutions: outcome.solutions,
    };
    to_value(&result).map_err(serialization_failed)
}

/// Parse a newline-separated word list into `string[]`.
#[wasm_bindgen]
pub fn parse_word_list(text: &str) -> Result<JsValue, JsValue> {
    to_value(&Corpus::parse_list(text)).map_err(serialization_failed)
}

/// JS entry: anagram splits of `phrase` into exactly `depth` words for each requested depth.
#[wasm_bindgen]
pub fn find_anagrams_wasm(
    corpus: JsValue,
    phrase: &str,
    language: &str,
    depths: Vec<u32>,
    max_results: Option<usize>,
    time_limit_secs: Option<f64>,
) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let params = AnagramParams {
        depths: depths.into_iter().map(|d| d as usize).collect(),
        ..AnagramParams::default()
    };
    let outcome = find_anagrams(
        &corpus,
        phrase,
        language_from_js(language)?,
        &params,
        &limits_from_js(max_results, time_limit_secs)?,
    )
    .map_err(WasmError::from)?;
    search_result_to_js(outcome)
}

/// JS entry: word squares of the given side; each solution lists the rows.
#[wasm_bindgen]
pub fn find_squares_wasm(
    corpus: JsValue,
    side: usize,
    full_magic: bool,
    max_results: Option<usize>,
    time_limit_secs: Option<f64>,
) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let params = SquareParams { side, full_magic, ..SquareParams::default() };
    let outcome = find_squares(&corpus, &params, &limits_from_js(max_results, time_limit_secs)?)
        .map_err(WasmError::from)?;
    search_result_to_js(outcome)
}

/// JS entry: maximal one-letter growth chains, from every root or only from `start`.
#[wasm_bindgen]
pub fn find_growth_chains_wasm(
    corpus: JsValue,
    language: &str,
    start: Option<String>,
    max_results: Option<usize>,
    time_limit_secs: Option<f64>,
) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let params = GrowthParams { language: language_from_js(language)?, start, ..GrowthParams::default() };
    let outcome = find_growth_chains(&corpus, &params, &limits_from_js(max_results, time_limit_secs)?)
        .map_err(WasmError::from)?;
    search_result_to_js(outcome)
}

/// JS entry: maximal Roman-numeral removal chains.
#[wasm_bindgen]
pub fn find_removal_chains_wasm(
    corpus: JsValue,
    language: &str,
    max_results: Option<usize>,
    time_limit_secs: Option<f64>,
) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let outcome = find_removal_chains(
        &corpus,
        &RemovalParams { language: language_from_js(language)?, ..RemovalParams::default() },
        &limits_from_js(max_results, time_limit_secs)?,
    )
    .map_err(WasmError::from)?;
    search_result_to_js(outcome)
}

/// JS entry: all lock patterns, each as three lines of step numbers.
#[wasm_bindgen]
pub fn find_lock_patterns_wasm() -> Result<JsValue, JsValue> {
    let outcome = find_lock_patterns(&SearchLimits::default()).map(|pattern| {
        pattern.to_string().lines().map(str::to_string).collect::<Vec<_>>()
    });
    search_result_to_js(outcome)
}

/// JS entry: prefix (or suffix) clusters; each solution starts with the shared affix.
#[wasm_bindgen]
pub fn find_clusters_wasm(corpus: JsValue, affix_len: usize, suffix: bool) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let params = ClusterParams {
        affix: if suffix { Affix::Suffix } else { Affix::Prefix },
        affix_len,
        ..ClusterParams::default()
    };
    let clusters = find_clusters(&corpus, &params).map_err(WasmError::from)?;
    let rows: Vec<Vec<String>> = clusters
        .into_iter()
        .map(|c| std::iter::once(c.affix).chain(c.words).collect())
        .collect();
    to_value(&rows).map_err(serialization_failed)
}

/// JS entry: groups of nouns that are rotations of each other.
#[wasm_bindgen]
pub fn find_rotation_groups_wasm(corpus: JsValue, min_len: usize, max_len: usize) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let params = RotationParams { min_len, max_len, ..RotationParams::default() };
    let groups = find_rotation_groups(&corpus, &params).map_err(WasmError::from)?;
    to_value(&groups).map_err(serialization_failed)
}

/// JS entry: double sandwiches; each row is the word followed by its hosts.
#[wasm_bindgen]
pub fn find_double_sandwiches_wasm(corpus: JsValue) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let found = find_double_sandwiches(&corpus, &DoubleSandwichParams::default()).map_err(WasmError::from)?;
    let rows: Vec<Vec<String>> = found
        .into_iter()
        .map(|s| std::iter::once(s.word).chain(s.hosts).collect())
        .collect();
    to_value(&rows).map_err(serialization_failed)
}

/// JS entry: stuffed words; each row is the host followed by its parts.
#[wasm_bindgen]
pub fn find_stuffed_words_wasm(corpus: JsValue, min_parts: usize) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let params = StuffingParams { min_parts, ..StuffingParams::default() };
    let found = find_stuffed_words(&corpus, &params).map_err(WasmError::from)?;
    let rows: Vec<Vec<String>> = found
        .into_iter()
        .map(|s| std::iter::once(s.host).chain(s.parts).collect())
        .collect();
    to_value(&rows).map_err(serialization_failed)
}

/// JS entry: carriers hiding `secret` at letter offset `n`.
#[wasm_bindgen]
pub fn hide_in_nth_letters_wasm(corpus: JsValue, secret: &str, n: usize, language: &str) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let carriers = hide_in_nth_letters(&corpus, secret, n, language_from_js(language)?, &HidingParams::default())
        .map_err(WasmError::from)?;
    to_value(&carriers).map_err(serialization_failed)
}

/// JS entry: carriers hiding `secret` right before `sequence`.
#[wasm_bindgen]
pub fn hide_before_sequence_wasm(corpus: JsValue, secret: &str, sequence: &str, language: &str) -> Result<JsValue, JsValue> {
    let corpus = corpus_from_js(corpus)?;
    let carriers = hide_before_sequence(&corpus, secret, sequence, language_from_js(language)?)
        .map_err(WasmError::from)?;
    to_value(&carriers).map_err(serialization_failed)
}

/// Generate a debug report for troubleshooting.
///
/// # Arguments
/// * `generator` - Which generator was running (e.g. "anagrams")
/// * `input` - The user input it was given
/// * `error_message` - The error message that was displayed
/// * `corpus_size` - Number of words in the corpus
#[wasm_bindgen]
pub fn get_debug_info(generator: &str, input: &str, error_message: &str, corpus_size: usize) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // writing to a String never fails
    let _ = writeln!(&mut report, "=== LEXIPUZZLE DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(
        &mut report,
        "Generated: {}",
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_else(|| "unknown".to_string())
    );
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Generator: {generator}");
    let _ = writeln!(&mut report, "Input: {input}");
    let _ = writeln!(&mut report, "Corpus Size: {corpus_size}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
        let _ = writeln!(
            &mut report,
            "Location: {}",
            window.location().href().unwrap_or_else(|_| "unknown".to_string())
        );
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
