//! Status output and styling.
//!
//! stdout belongs to the result payload; everything here writes to stderr.

pub mod output;
pub mod theme;

pub use output::{Output, OutputMode};
pub use theme::{should_use_colors, PickerTheme};
