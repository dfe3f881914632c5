//! Tiered selection with deterministic degradation.
//!
//! The chain tries the richest experience first and cascades on any
//! failure: full-screen engine, then the legacy engine, then a plain line
//! prompt. The caller always gets a confirmed selection or an explicit
//! `SelectionAborted` — never a hang.

pub mod chain;
pub mod line_prompt;
pub mod process;
#[cfg(unix)]
pub mod tiers;

pub use chain::{run_chain, SelectionTier};
pub use line_prompt::{Choice, LinePromptTier, CHOICE_ENV};
#[cfg(unix)]
pub use tiers::SubprocessTier;

/// The default tier order for one invocation.
pub fn default_tiers() -> Vec<Box<dyn SelectionTier>> {
    #[cfg(unix)]
    {
        vec![
            Box::new(SubprocessTier::full()),
            Box::new(SubprocessTier::legacy()),
            Box::new(LinePromptTier),
        ]
    }
    #[cfg(not(unix))]
    {
        vec![Box::new(LinePromptTier)]
    }
}
