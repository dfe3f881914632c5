//! Error types for picker operations.
//!
//! This module defines [`PickerError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Per-tier failures (`ChannelCreation`, `EngineInit`, `EngineFailed`) are
//!   recovered by the fallback chain as long as a lower tier remains
//! - `MalformedInput` and `SelectionAborted` are the only errors surfaced to
//!   the caller
//! - Use `anyhow::Error` (via `PickerError::Other`) for unexpected errors

use thiserror::Error;

/// Core error type for picker operations.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Catalog failed schema validation; fatal before any session starts.
    #[error("Malformed catalog from {source_name}: {message}")]
    MalformedInput {
        source_name: String,
        message: String,
    },

    /// Result channel could not be created; fatal for one tier only.
    #[error("Failed to create result channel at {path}: {message}")]
    ChannelCreation { path: String, message: String },

    /// Interactive rendering subsystem failed to start.
    #[error("Engine '{tier}' failed to initialize: {message}")]
    EngineInit { tier: String, message: String },

    /// Engine session ran but did not produce an accepted result.
    #[error("Engine '{tier}' failed: {message}")]
    EngineFailed { tier: String, message: String },

    /// No tier produced a confirmed selection.
    #[error("Selection aborted: {reason}")]
    SelectionAborted { reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PickerError {
    /// Whether the fallback chain may recover from this error by trying the
    /// next tier.
    pub fn is_tier_local(&self) -> bool {
        matches!(
            self,
            Self::ChannelCreation { .. } | Self::EngineInit { .. } | Self::EngineFailed { .. }
        )
    }
}

/// Result type alias for picker operations.
pub type Result<T> = std::result::Result<T, PickerError>;
