//! Input/output helpers.
//!
//! - request ingest + validation (`request`)
//! - request/result JSON files for the CLI (`document`)

pub mod document;
pub mod request;

pub use document::*;
pub use request::*;
