//! The interactive selection engine.
//!
//! The engine runs in its own process (the hidden `engine` subcommand),
//! renders on the inherited terminal, and delivers its envelope over the
//! result channel. Two rendering strategies share one state machine:
//!
//! - [`screen`] — full-screen clear-and-redraw frames
//! - [`legacy`] — a stock dialoguer multi-select
//!
//! [`state`] holds the machine itself and is the only part with interesting
//! invariants; the renderers translate keys into its transitions.

pub mod legacy;
pub mod screen;
pub mod state;

use std::fmt;
use std::str::FromStr;

use crate::catalog::Copilot;
use crate::error::Result;

pub use state::{Outcome, SelectionState};

/// Which rendering strategy an engine process should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineTier {
    /// Full-screen frame renderer.
    Full,
    /// Dialoguer multi-select renderer.
    Legacy,
}

impl EngineTier {
    /// Stable name used in CLI args, logs, and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for EngineTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown engine tier: {other}")),
        }
    }
}

/// Terminal outcome of one engine session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    /// Confirmed or Cancelled; never Pending once a session returns.
    pub outcome: Outcome,
    /// Checked catalog indices; empty for cancelled sessions.
    pub checked: Vec<usize>,
}

impl SessionResult {
    /// A cancelled session with its check state discarded.
    pub fn cancelled() -> Self {
        Self {
            outcome: Outcome::Cancelled,
            checked: Vec::new(),
        }
    }

    /// Extract the result of a finished state machine.
    pub fn from_state(state: &SelectionState) -> Self {
        match state.outcome() {
            Outcome::Confirmed => Self {
                outcome: Outcome::Confirmed,
                checked: state.checked_indices(),
            },
            _ => Self::cancelled(),
        }
    }
}

/// Run one interactive session with the given rendering strategy.
pub fn run_session(tier: EngineTier, catalog: &[Copilot]) -> Result<SessionResult> {
    match tier {
        EngineTier::Full => {
            let state = screen::FullScreenSession::new(catalog)?.run()?;
            Ok(SessionResult::from_state(&state))
        }
        EngineTier::Legacy => legacy::run_legacy(catalog),
    }
}
