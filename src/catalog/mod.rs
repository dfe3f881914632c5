//! Copilot catalog: record schema, loading, and the result envelope.
//!
//! The catalog is the immutable, ordered input set presented for selection;
//! the envelope is the ordered, filtered output payload. Both live here so
//! the subsequence invariant (output order equals input order, no
//! duplicates) has a single home.

pub mod envelope;
pub mod loader;
pub mod record;

pub use loader::{load_from_path, load_from_reader, validate};
pub use record::{truncate, Copilot};
