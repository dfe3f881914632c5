//! The `pick` command: the orchestrating side of a selection.
//!
//! Loads and validates the catalog, routes through the fallback chain, and
//! prints the confirmed subset as JSON on stdout. Selection data flows by
//! value from tier to caller; nothing here is shared with the engine process
//! except the channel and the terminal.

use std::io::Write;

use crate::catalog::{self, Copilot};
use crate::cli::args::PickArgs;
use crate::error::Result;
use crate::fallback::{default_tiers, run_chain};
use crate::terminal::{self, Capability};
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// Orchestrates one selection run.
pub struct PickCommand {
    args: PickArgs,
}

impl PickCommand {
    /// Create the command from parsed args.
    pub fn new(args: PickArgs) -> Self {
        Self { args }
    }

    fn load_catalog(&self) -> Result<Vec<Copilot>> {
        match &self.args.catalog {
            Some(path) => catalog::load_from_path(path),
            None => catalog::load_from_reader(std::io::stdin().lock(), "stdin"),
        }
    }

    fn capability(&self) -> Capability {
        if self.args.non_interactive {
            Capability::disabled("--non-interactive")
        } else {
            terminal::detect()
        }
    }
}

impl Command for PickCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let catalog = self.load_catalog()?;
        output.detail(&format!("loaded {} copilots", catalog.len()));

        let capability = self.capability();
        if !capability.interactive {
            output.detail(&format!("interactive tiers skipped: {}", capability.reason));
        }

        let tiers = default_tiers();
        let selected = run_chain(&tiers, &capability, &catalog)?;

        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        serde_json::to_writer(&mut lock, &selected)
            .map_err(|e| crate::error::PickerError::Other(e.into()))?;
        writeln!(lock)?;

        output.success(&format!(
            "Selected {} copilot{}",
            selected.len(),
            if selected.len() == 1 { "" } else { "s" }
        ));
        Ok(CommandResult::success())
    }
}
