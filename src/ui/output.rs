//! Output mode and status writer.
//!
//! Every human-facing line goes to stderr: stdout is reserved for the final
//! JSON payload and must never be mixed with status text.

use std::str::FromStr;

use super::theme::PickerTheme;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all status output including per-tier routing decisions.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show nothing except errors.
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows routing detail.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Status writer that respects the output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    theme: PickerTheme,
}

impl Output {
    /// Create a new status writer.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: PickerTheme::for_env(),
        }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Write a status line if the mode allows it.
    pub fn status(&self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
        }
    }

    /// Write a routing-detail line in verbose mode.
    pub fn detail(&self, msg: &str) {
        if self.mode.shows_detail() {
            eprintln!("{}", self.theme.dim.apply_to(msg));
        }
    }

    /// Write a warning (mode-gated).
    pub fn warning(&self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    /// Write an error (always shown).
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    /// Write a success line (mode-gated).
    pub fn success(&self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_success(msg));
        }
    }
}
