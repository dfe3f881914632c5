//! Legacy selection session.
//!
//! Same state-machine contract as the full-screen session, rendered with a
//! stock `dialoguer` multi-select instead of a hand-drawn frame. Kept as its
//! own tier so terminals that choke on the full-screen redraw still get an
//! interactive checklist.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::MultiSelect;

use crate::catalog::Copilot;
use crate::error::{PickerError, Result};

use super::{Outcome, SessionResult};

/// Rows shown before the list starts paging.
const PAGE_LENGTH: usize = 15;

/// Convert dialoguer errors to PickerError.
fn map_dialoguer_err(e: dialoguer::Error) -> PickerError {
    match e {
        dialoguer::Error::IO(io) => PickerError::Io(io),
        other => PickerError::Io(std::io::Error::other(other.to_string())),
    }
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Run one legacy session to a terminal outcome.
pub fn run_legacy(catalog: &[Copilot]) -> Result<SessionResult> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(PickerError::EngineInit {
            tier: "legacy".into(),
            message: "stderr is not a terminal".into(),
        });
    }

    let labels: Vec<String> = catalog
        .iter()
        .map(|record| record.display_line(76))
        .collect();

    let selection = MultiSelect::with_theme(&prompt_theme())
        .with_prompt("Select copilots to install · Space toggles · Enter confirms · Esc cancels")
        .items(&labels)
        .max_length(PAGE_LENGTH)
        .report(false)
        .interact_on_opt(&term);

    match selection {
        Ok(Some(indices)) => Ok(SessionResult {
            outcome: Outcome::Confirmed,
            checked: indices,
        }),
        Ok(None) => Ok(SessionResult::cancelled()),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
            Ok(SessionResult::cancelled())
        }
        Err(e) => Err(map_dialoguer_err(e)),
    }
}
