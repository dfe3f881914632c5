//! The two subprocess-backed interactive tiers.
//!
//! Each attempt owns a fresh result channel for its lifetime: acquired
//! before the engine starts, removed when the attempt returns, whichever
//! branch was taken. The orchestrator's only blocking operations are the
//! child wait and the channel read, which completes when the engine closes
//! its write end.

use crate::catalog::{envelope, Copilot};
use crate::channel::ResultChannel;
use crate::engine::EngineTier;
use crate::error::{PickerError, Result};

use super::chain::SelectionTier;
use super::process::{describe_status, spawn_engine};

/// An interactive tier that runs the engine in a subprocess.
pub struct SubprocessTier {
    tier: EngineTier,
}

impl SubprocessTier {
    /// Tier 1: the full-screen engine.
    pub fn full() -> Self {
        Self {
            tier: EngineTier::Full,
        }
    }

    /// Tier 2: the legacy dialoguer engine.
    pub fn legacy() -> Self {
        Self {
            tier: EngineTier::Legacy,
        }
    }
}

impl SelectionTier for SubprocessTier {
    fn name(&self) -> &'static str {
        self.tier.as_str()
    }

    fn needs_terminal(&self) -> bool {
        true
    }

    fn attempt(&self, catalog: &[Copilot]) -> Result<Vec<Copilot>> {
        let channel = ResultChannel::create()?;
        let catalog_path = channel.spool_catalog(catalog)?;

        // The reader must be parked before the engine starts so the engine's
        // write-open never blocks indefinitely.
        let reader = channel.begin_read();

        let mut child = match spawn_engine(self.tier, &catalog_path, channel.pipe_path()) {
            Ok(child) => child,
            Err(e) => {
                let _ = reader.collect();
                return Err(e);
            }
        };

        let status = child.wait();
        let payload = reader.collect()?;
        let status = status?;

        if !status.success() {
            return Err(PickerError::EngineFailed {
                tier: self.tier.as_str().into(),
                message: describe_status(status),
            });
        }

        envelope::resolve(catalog, &payload, self.tier.as_str())
    }
}
