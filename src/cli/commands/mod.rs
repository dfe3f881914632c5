//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`]; the `pick` command is the default when
//! no subcommand is given, mirroring the common `copilot-picker < list.json`
//! invocation.

pub mod dispatcher;
pub mod engine;
pub mod pick;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
