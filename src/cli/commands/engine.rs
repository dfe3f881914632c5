//! The hidden `engine` command: the subprocess side of a selection.
//!
//! Runs one interactive session on the inherited terminal and delivers the
//! envelope over the result channel. The envelope is written on every exit
//! path — empty for cancellations and caught errors — and the exit code
//! tells the orchestrator whether the session confirmed.

use crate::cli::args::EngineArgs;
use crate::error::Result;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// Runs one engine session.
pub struct EngineCommand {
    args: EngineArgs,
}

impl EngineCommand {
    /// Create the command from parsed args.
    pub fn new(args: EngineArgs) -> Self {
        Self { args }
    }
}

impl Command for EngineCommand {
    #[cfg(unix)]
    fn execute(&self, _output: &Output) -> Result<CommandResult> {
        use crate::catalog::{self, envelope};
        use crate::channel;
        use crate::engine::{self, EngineTier, Outcome};
        use crate::error::PickerError;

        let tier: EngineTier =
            self.args
                .tier
                .parse()
                .map_err(|message| PickerError::EngineInit {
                    tier: self.args.tier.clone(),
                    message,
                })?;

        let catalog = catalog::load_from_path(&self.args.catalog)?;
        let session = engine::run_session(tier, &catalog);

        let (payload, confirmed) = match &session {
            Ok(result) if result.outcome == Outcome::Confirmed => {
                let selected = envelope::from_checked_indices(&catalog, &result.checked);
                (envelope::to_json(&selected)?, true)
            }
            _ => ("[]".to_string(), false),
        };

        // The orchestrator's reader is already parked on the pipe; close the
        // channel before surfacing any session error.
        channel::write_payload(&self.args.channel, &payload)?;
        session?;

        if confirmed {
            Ok(CommandResult::success())
        } else {
            tracing::debug!(tier = tier.as_str(), "session cancelled");
            Ok(CommandResult::failure(1))
        }
    }

    #[cfg(not(unix))]
    fn execute(&self, _output: &Output) -> Result<CommandResult> {
        Err(crate::error::PickerError::EngineInit {
            tier: self.args.tier.clone(),
            message: "interactive engine tiers are unavailable on this platform".into(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    #[test]
    fn unknown_tier_is_engine_init_error() {
        let cmd = EngineCommand::new(EngineArgs {
            tier: "curses".into(),
            catalog: "/tmp/c.json".into(),
            channel: "/tmp/r.pipe".into(),
        });
        let err = cmd.execute(&Output::new(OutputMode::Quiet)).unwrap_err();
        assert!(matches!(err, crate::error::PickerError::EngineInit { .. }));
    }

    #[test]
    fn missing_catalog_fails_before_the_session() {
        let cmd = EngineCommand::new(EngineArgs {
            tier: "full".into(),
            catalog: "/nonexistent/catalog.json".into(),
            channel: "/tmp/r.pipe".into(),
        });
        let err = cmd.execute(&Output::new(OutputMode::Quiet)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PickerError::MalformedInput { .. }
        ));
    }
}
