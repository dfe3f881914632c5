//! Engine subprocess management.
//!
//! The engine is this same binary re-invoked with the hidden `engine`
//! subcommand. Its stdio is inherited so the interactive display owns the
//! real terminal; the envelope comes back over the result channel instead.

use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::engine::EngineTier;
use crate::error::{PickerError, Result};

/// Spawn an engine process for one tier.
pub fn spawn_engine(tier: EngineTier, catalog_path: &Path, channel_path: &Path) -> Result<Child> {
    let init_err = |message: String| PickerError::EngineInit {
        tier: tier.as_str().into(),
        message,
    };

    let exe = std::env::current_exe().map_err(|e| init_err(e.to_string()))?;

    let mut cmd = Command::new(exe);
    cmd.arg("engine")
        .arg("--tier")
        .arg(tier.as_str())
        .arg("--catalog")
        .arg(catalog_path)
        .arg("--channel")
        .arg(channel_path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    tracing::debug!(tier = tier.as_str(), "spawning engine process");
    cmd.spawn().map_err(|e| init_err(e.to_string()))
}

/// Describe a non-zero engine exit for diagnostics.
pub fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("engine exited with status {code}"),
        None => "engine terminated by signal".to_string(),
    }
}
