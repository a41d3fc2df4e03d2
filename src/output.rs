//! Turning results into text.

use std::fmt::Display;

use crate::engine::{SearchOutcome, SearchStatus};

/// Words of one solution, comma separated.
#[must_use]
pub fn format_solution<S: AsRef<str>>(words: &[S]) -> String {
    words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

/// One item per line.
pub fn format_lines<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items.into_iter().map(|item| item.to_string()).collect::<Vec<_>>().join("\n")
}

/// A one-line summary of why a search stopped, for stderr.
#[must_use]
pub fn status_line<S>(outcome: &SearchOutcome<S>) -> String {
    let n = outcome.len();
    let nodes = outcome.stats.nodes;
    match outcome.status {
        SearchStatus::Exhausted => format!("✓ Search exhausted: {n} results ({nodes} nodes)"),
        SearchStatus::FoundEnough => format!("✓ Stopped after finding {n} results ({nodes} nodes)"),
        SearchStatus::TimedOut { elapsed } => format!(
            "⚠️  Timed out after {:.1}s with {n} results; some solutions may be missing",
            elapsed.as_secs_f64()
        ),
        SearchStatus::StepLimitReached { steps } => {
            format!("⚠️  Step limit of {steps} nodes reached with {n} results; some solutions may be missing")
        }
    }
}

/// Write `text` (plus a final newline) to `path`, or to stdout when `path` is `None`.
///
/// # Errors
///
/// Any I/O error from creating or writing the file.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_results(path: Option<&std::path::Path>, text: &str) -> std::io::Result<()> {
    use std::io::Write;

    match path {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))?;
            log::info!("wrote results to {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")
        }
    }
}
