//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated request (`FitRequest`)
//! - the response record (`FitResult`) and failure body (`ErrorBody`)
//! - fit configuration (`FitConfig`, `BoundsPolicy`)

pub mod types;

pub use types::*;
