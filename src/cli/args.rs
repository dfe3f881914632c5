//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Copilot picker - interactive multi-select of copilots to install.
#[derive(Debug, Parser)]
#[command(name = "copilot-picker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pick copilots from a catalog (default if no command specified)
    Pick(PickArgs),

    /// Engine process for the interactive tiers
    #[command(hide = true)]
    Engine(EngineArgs),
}

/// Arguments for the `pick` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PickArgs {
    /// Catalog file (JSON array of copilots); read from stdin when omitted
    pub catalog: Option<PathBuf>,

    /// Skip the interactive tiers and go straight to the line prompt
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the hidden `engine` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EngineArgs {
    /// Rendering strategy
    #[arg(long, value_parser = ["full", "legacy"])]
    pub tier: String,

    /// Path to the spooled catalog
    #[arg(long)]
    pub catalog: PathBuf,

    /// Path to the result channel pipe
    #[arg(long)]
    pub channel: PathBuf,
}
