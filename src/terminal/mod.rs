//! Terminal capability inspection.

pub mod capability;

pub use capability::{detect, Capability};
