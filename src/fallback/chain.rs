//! The fallback chain controller.
//!
//! Tiers are an ordered list of strategies sharing one trait; the controller
//! walks the list, skipping terminal-bound tiers when the session has no
//! terminal, and recovers every per-tier failure as long as a lower tier
//! remains. Only exhaustion surfaces, as `SelectionAborted`.

use crate::catalog::Copilot;
use crate::error::{PickerError, Result};
use crate::terminal::Capability;

/// One fallback-chain strategy.
pub trait SelectionTier {
    /// Stable name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this tier can only run against an interactive terminal.
    fn needs_terminal(&self) -> bool;

    /// Run one selection attempt to completion.
    ///
    /// `Ok` is a confirmed selection (the empty subset included); any `Err`
    /// is a per-tier failure the controller may recover from, including a
    /// user cancellation.
    fn attempt(&self, catalog: &[Copilot]) -> Result<Vec<Copilot>>;
}

/// Walk the tiers until one confirms a selection.
pub fn run_chain(
    tiers: &[Box<dyn SelectionTier>],
    capability: &Capability,
    catalog: &[Copilot],
) -> Result<Vec<Copilot>> {
    let mut last_reason = String::from("no selection tiers available");

    for tier in tiers {
        if tier.needs_terminal() && !capability.interactive {
            tracing::info!(tier = tier.name(), "skipped: {}", capability.reason);
            continue;
        }

        tracing::debug!(tier = tier.name(), "attempting selection");
        match tier.attempt(catalog) {
            Ok(selected) => {
                tracing::info!(
                    tier = tier.name(),
                    selected = selected.len(),
                    "selection confirmed"
                );
                return Ok(selected);
            }
            Err(e) => {
                tracing::warn!(tier = tier.name(), "tier failed: {e}");
                last_reason = e.to_string();
            }
        }
    }

    Err(PickerError::SelectionAborted {
        reason: last_reason,
    })
}
