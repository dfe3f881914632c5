//! copilot-picker - interactive multi-select of copilots to install.
//!
//! Presents a catalog of copilot records as a terminal checklist, captures a
//! selection, and prints the chosen subset as JSON on stdout. The interactive
//! display monopolizes the terminal streams, so the selection itself travels
//! from the engine process back to the orchestrator over a dedicated result
//! channel, and the whole experience degrades tier by tier down to a plain
//! line prompt when the richer tiers are unavailable.
//!
//! # Modules
//!
//! - [`catalog`] - Record schema, catalog loading, and the result envelope
//! - [`channel`] - The per-invocation result channel (named pipe + cleanup)
//! - [`cli`] - Command-line interface and command dispatch
//! - [`engine`] - The interactive selection state machine and its renderers
//! - [`error`] - Error types and result aliases
//! - [`fallback`] - The tiered fallback chain controller
//! - [`terminal`] - Interactive-capability detection
//! - [`ui`] - Status output and styling (stderr only)
//!
//! # Example
//!
//! ```
//! use copilot_picker::catalog::load_from_reader;
//!
//! let json = r#"[{"copilot_id":"a1","name":"Alpha"}]"#;
//! let catalog = load_from_reader(json.as_bytes(), "example").unwrap();
//! assert_eq!(catalog[0].name, "Alpha");
//! ```

pub mod catalog;
pub mod channel;
pub mod cli;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod terminal;
pub mod ui;

pub use error::{PickerError, Result};
