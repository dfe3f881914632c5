//! Interactive-terminal capability detection.
//!
//! Detection has no side effects and never fails: its result is an input to
//! the fallback chain's first routing decision, not an error condition.

use std::io::{stdin, stdout, IsTerminal};

/// Whether the current process can host a full interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// True when both stdin and stdout are attached to a terminal.
    pub interactive: bool,
    /// Human-readable explanation for the routing decision.
    pub reason: String,
}

impl Capability {
    /// A capability that was disabled by explicit request rather than
    /// detection (e.g. `--non-interactive`).
    pub fn disabled(reason: impl Into<String>) -> Self {
        Self {
            interactive: false,
            reason: reason.into(),
        }
    }
}

/// Inspect the controlling session.
///
/// Interactive requires a real terminal on both the input and the output
/// stream; a dumb terminal is reported non-interactive as well since the
/// full-screen tiers depend on cursor addressing.
pub fn detect() -> Capability {
    if !stdin().is_terminal() {
        return Capability::disabled("stdin is not a terminal");
    }
    if !stdout().is_terminal() {
        return Capability::disabled("stdout is not a terminal");
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.is_empty() || term == "dumb" {
            return Capability::disabled(format!("TERM is '{term}'"));
        }
    }
    Capability {
        interactive: true,
        reason: "stdin and stdout are attached to a terminal".into(),
    }
}
