//! Tier 3: the line-oriented prompt.
//!
//! No full-screen rendering: the catalog is listed with ordinals on stderr
//! and one selection line is read back, normally from the controlling
//! terminal. This is the terminal fallback of the chain, so its own failure
//! (no terminal at all, or malformed input after bounded retries) is final
//! for the whole selection.
//!
//! For headless runs the `COPILOT_PICKER_CHOICE` environment variable
//! answers the prompt without any terminal.

use std::io::{BufRead, BufReader, IsTerminal, Write};

use crate::catalog::Copilot;
use crate::error::{PickerError, Result};
use crate::ui::PickerTheme;

use super::chain::SelectionTier;

/// Environment override answering the prompt non-interactively.
pub const CHOICE_ENV: &str = "COPILOT_PICKER_CHOICE";

/// Bounded retries for malformed selection lines.
const MAX_ATTEMPTS: usize = 3;

/// A parsed selection line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Every record.
    All,
    /// Explicitly none; a confirmed empty selection.
    None,
    /// Abandon the selection.
    Cancel,
    /// Zero-based catalog indices, ascending, deduplicated.
    Ordinals(Vec<usize>),
}

/// Parse one selection line against a catalog of `len` records.
///
/// Accepts comma/space-separated 1-based ordinals, `all`, `none`, and
/// `q`/`quit`. Blank lines and out-of-range or non-numeric ordinals are
/// rejected with a message suitable for re-prompting.
pub fn parse_choice(line: &str, len: usize) -> std::result::Result<Choice, String> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" => return Err("empty selection; enter numbers, 'all', 'none', or 'q'".into()),
        "all" => return Ok(Choice::All),
        "none" => return Ok(Choice::None),
        "q" | "quit" => return Ok(Choice::Cancel),
        _ => {}
    }

    let mut indices = Vec::new();
    for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let ordinal: usize = token
            .parse()
            .map_err(|_| format!("'{token}' is not a number"))?;
        if ordinal == 0 || ordinal > len {
            return Err(format!("{ordinal} is out of range (1-{len})"));
        }
        indices.push(ordinal - 1);
    }
    indices.sort_unstable();
    indices.dedup();
    Ok(Choice::Ordinals(indices))
}

/// The line-prompt tier.
#[derive(Default)]
pub struct LinePromptTier;

impl LinePromptTier {
    fn failed(message: impl Into<String>) -> PickerError {
        PickerError::EngineFailed {
            tier: "prompt".into(),
            message: message.into(),
        }
    }

    fn apply(choice: Choice, catalog: &[Copilot]) -> Result<Vec<Copilot>> {
        match choice {
            Choice::All => Ok(catalog.to_vec()),
            Choice::None => Ok(Vec::new()),
            Choice::Cancel => Err(Self::failed("cancelled by user")),
            Choice::Ordinals(indices) => {
                Ok(indices.into_iter().map(|i| catalog[i].clone()).collect())
            }
        }
    }

    fn list_catalog(catalog: &[Copilot], theme: &PickerTheme) {
        eprintln!();
        eprintln!("{}", theme.header.apply_to("Available copilots"));
        for (ordinal, record) in catalog.iter().enumerate() {
            eprintln!(
                "{}. {}",
                ordinal + 1,
                theme.highlight.apply_to(&record.name)
            );
            eprintln!(
                "   {}",
                theme.dim.apply_to(format!(
                    "{} · ID: {}",
                    record.description_or_default(),
                    record.copilot_id
                ))
            );
        }
        eprintln!();
        eprintln!(
            "{}",
            theme
                .hint
                .apply_to("Enter numbers (e.g. 1,3), 'all', 'none', or 'q' to cancel")
        );
    }

    fn open_terminal_input() -> Result<Box<dyn BufRead>> {
        #[cfg(unix)]
        if let Ok(tty) = std::fs::File::open("/dev/tty") {
            return Ok(Box::new(BufReader::new(tty)));
        }
        if std::io::stdin().is_terminal() {
            return Ok(Box::new(BufReader::new(std::io::stdin())));
        }
        Err(Self::failed("no controlling terminal to prompt on"))
    }

    fn prompt_loop(catalog: &[Copilot], mut input: Box<dyn BufRead>) -> Result<Vec<Copilot>> {
        for _ in 0..MAX_ATTEMPTS {
            eprint!("> ");
            std::io::stderr().flush().ok();

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(Self::failed("cancelled by user (end of input)"));
            }

            match parse_choice(&line, catalog.len()) {
                Ok(choice) => return Self::apply(choice, catalog),
                Err(message) => eprintln!("{message}"),
            }
        }
        Err(Self::failed(format!(
            "no valid selection after {MAX_ATTEMPTS} attempts"
        )))
    }
}

impl SelectionTier for LinePromptTier {
    fn name(&self) -> &'static str {
        "prompt"
    }

    fn needs_terminal(&self) -> bool {
        false
    }

    fn attempt(&self, catalog: &[Copilot]) -> Result<Vec<Copilot>> {
        let theme = PickerTheme::for_env();
        Self::list_catalog(catalog, &theme);

        if let Ok(value) = std::env::var(CHOICE_ENV) {
            tracing::debug!("answering prompt from {CHOICE_ENV}");
            let choice = parse_choice(&value, catalog.len())
                .map_err(|message| Self::failed(format!("{CHOICE_ENV}: {message}")))?;
            return Self::apply(choice, catalog);
        }

        let input = Self::open_terminal_input()?;
        Self::prompt_loop(catalog, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Copilot> {
        vec![
            Copilot::new("a1", "Alpha"),
            Copilot::new("b2", "Beta"),
            Copilot::new("c3", "Gamma"),
        ]
    }

    #[test]
    fn parses_comma_separated_ordinals() {
        assert_eq!(parse_choice("1,3", 3), Ok(Choice::Ordinals(vec![0, 2])));
    }

    #[test]
    fn parses_space_separated_ordinals() {
        assert_eq!(parse_choice("1 3", 3), Ok(Choice::Ordinals(vec![0, 2])));
        assert_eq!(parse_choice(" 2 , 3 ", 3), Ok(Choice::Ordinals(vec![1, 2])));
    }

    #[test]
    fn ordinals_are_sorted_and_deduplicated() {
        assert_eq!(
            parse_choice("3,1,3,1", 3),
            Ok(Choice::Ordinals(vec![0, 2]))
        );
    }

    #[test]
    fn keywords_parse_case_insensitively() {
        assert_eq!(parse_choice("ALL", 3), Ok(Choice::All));
        assert_eq!(parse_choice("none", 3), Ok(Choice::None));
        assert_eq!(parse_choice("q", 3), Ok(Choice::Cancel));
        assert_eq!(parse_choice("Quit", 3), Ok(Choice::Cancel));
    }

    #[test]
    fn blank_line_is_rejected_not_confirmed() {
        assert!(parse_choice("", 3).is_err());
        assert!(parse_choice("   ", 3).is_err());
    }

    #[test]
    fn out_of_range_ordinals_are_rejected() {
        assert!(parse_choice("0", 3).is_err());
        assert!(parse_choice("4", 3).is_err());
        assert!(parse_choice("1,9", 3).is_err());
    }

    #[test]
    fn non_numeric_tokens_are_rejected() {
        let err = parse_choice("1,two", 3).unwrap_err();
        assert!(err.contains("two"));
    }

    #[test]
    fn apply_preserves_catalog_order() {
        let selected =
            LinePromptTier::apply(Choice::Ordinals(vec![0, 2]), &catalog()).unwrap();
        let ids: Vec<_> = selected.iter().map(|c| c.copilot_id.as_str()).collect();
        assert_eq!(ids, ["a1", "c3"]);
    }

    #[test]
    fn apply_all_and_none() {
        assert_eq!(
            LinePromptTier::apply(Choice::All, &catalog()).unwrap().len(),
            3
        );
        assert!(LinePromptTier::apply(Choice::None, &catalog())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn apply_cancel_is_a_tier_failure() {
        let err = LinePromptTier::apply(Choice::Cancel, &catalog()).unwrap_err();
        assert!(err.to_string().contains("cancelled"));
    }

    #[test]
    fn prompt_loop_reads_a_valid_line() {
        let input: Box<dyn BufRead> = Box::new(std::io::Cursor::new(b"1,3\n".to_vec()));
        let selected = LinePromptTier::prompt_loop(&catalog(), input).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn prompt_loop_retries_malformed_lines() {
        let input: Box<dyn BufRead> = Box::new(std::io::Cursor::new(b"bogus\n\n2\n".to_vec()));
        let selected = LinePromptTier::prompt_loop(&catalog(), input).unwrap();
        assert_eq!(selected[0].copilot_id, "b2");
    }

    #[test]
    fn prompt_loop_gives_up_after_bounded_retries() {
        let input: Box<dyn BufRead> =
            Box::new(std::io::Cursor::new(b"x\ny\nz\n1\n".to_vec()));
        let err = LinePromptTier::prompt_loop(&catalog(), input).unwrap_err();
        assert!(err.to_string().contains("3 attempts"));
    }

    #[test]
    fn prompt_loop_treats_eof_as_cancel() {
        let input: Box<dyn BufRead> = Box::new(std::io::Cursor::new(Vec::new()));
        let err = LinePromptTier::prompt_loop(&catalog(), input).unwrap_err();
        assert!(err.to_string().contains("cancelled"));
    }

    #[test]
    fn tier_is_terminal_optional() {
        let tier = LinePromptTier;
        assert!(!tier.needs_terminal());
        assert_eq!(tier.name(), "prompt");
    }
}
