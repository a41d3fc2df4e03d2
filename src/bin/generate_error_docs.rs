//! Generate error code documentation from the source of truth (the error enum).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from `PuzzleError` via its `code()`, `description()`, `details()`,
//! and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;

use lexipuzzle::errors::PuzzleError;

/// One sample of every `PuzzleError` variant, in code order
fn all_puzzle_error_variants() -> Vec<PuzzleError> {
    vec![
        PuzzleError::NoAlphabetLetters { input: "123".to_string(), language: "russian".to_string() },
        PuzzleError::ParameterOutOfRange { name: "depth", value: 7, min: 1, max: 6 },
        PuzzleError::UnknownPartOfSpeech { tag: "adverbs".to_string() },
        PuzzleError::UnknownLanguage { name: "klingon".to_string() },
        PuzzleError::EmptySequence,
        PuzzleError::InsufficientCorpus { letter: 'ъ', needed: 2, available: 1 },
        PuzzleError::CorpusLoad {
            path: "words_cache/nouns_russian.txt".to_string(),
            reason: "No such file or directory (os error 2)".to_string(),
        },
        PuzzleError::InvalidTimeLimit { value: "-1".to_string() },
        PuzzleError::UnsupportedLanguage { operation: "roman-numeral chains", language: "russian".to_string() },
    ]
}

fn write_error_docs(out: &mut String, errors: &[PuzzleError]) -> std::fmt::Result {
    for error in errors {
        writeln!(out, "### {}: {}\n", error.code(), error.description())?;
        writeln!(out, "**Details:** {}\n", error.details())?;

        if let Some(help_text) = error.help() {
            writeln!(out, "**How to fix:**")?;
            writeln!(out, "```\n{help_text}\n```\n")?;
        }

        writeln!(out, "**Example error message:**")?;
        writeln!(out, "```\n{error}\n```\n")?;

        writeln!(out, "**Detailed format:**")?;
        writeln!(out, "```\n{}\n```\n", error.display_detailed())?;

        writeln!(out, "---\n")?;
    }
    Ok(())
}

fn generate_docs() -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# Error Code Reference\n")?;
    writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n")?;

    writeln!(out, "## Table of Contents\n")?;
    writeln!(out, "- [Puzzle Errors (E001–E009)](#puzzle-errors)")?;
    writeln!(out, "- [How to Use Error Codes](#how-to-use-error-codes)\n")?;

    writeln!(out, "## Puzzle Errors\n")?;
    writeln!(out, "Errors raised while validating input or loading the corpus, before or instead of a search.")?;
    writeln!(out, "A search that stops on its time or step limit is not an error; it reports a status instead.\n")?;
    write_error_docs(&mut out, &all_puzzle_error_variants())?;

    writeln!(out, "\n## How to Use Error Codes\n")?;
    writeln!(out, "When you see an error like:\n")?;
    writeln!(out, "```\nError: marking sequence must not be empty (E005)\n```\n")?;
    writeln!(out, "1. Note the error code (e.g., `E005`)")?;
    writeln!(out, "2. Look it up in this document for detailed explanation")?;
    writeln!(out, "3. Follow the suggested resolution steps\n")?;

    writeln!(out, "## Error Display Formats\n")?;
    writeln!(out, "Errors are displayed in two formats:\n")?;
    writeln!(out, "### Simple Format")?;
    writeln!(out, "```\nError: <message>\n```\n")?;
    writeln!(out, "### Detailed Format (via `display_detailed()`)")?;
    writeln!(out, "```\n<message> (<code>)\n<help text if available>\n```")?;
    Ok(out)
}

fn main() -> std::process::ExitCode {
    match generate_docs() {
        Ok(docs) => {
            println!("{docs}");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented_once() {
        let docs = generate_docs().unwrap();
        for n in 1..=9 {
            let heading = format!("### E00{n}: ");
            assert_eq!(docs.matches(&heading).count(), 1, "missing or repeated {heading}");
        }
    }

    #[test]
    fn test_help_section_only_when_help_exists() {
        let docs = generate_docs().unwrap();
        // every variant except EmptySequence carries help text
        assert_eq!(docs.matches("**How to fix:**").count(), 8);
    }
}
