//! Reporting utilities: equation rendering, output rounding and terminal summaries.

pub mod format;

pub use format::*;
