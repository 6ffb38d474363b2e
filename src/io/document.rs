//! Read requests and write results as JSON documents.
//!
//! Used by `bingham fit`, which accepts the same payload as `POST /fit` from a
//! file (or stdin) and emits the same result body.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::domain::{FitRequest, FitResult};
use crate::error::AppError;
use crate::io::request::parse_request_bytes;

/// Read and validate a request document. `None` reads stdin.
pub fn read_request_json(path: Option<&Path>) -> Result<FitRequest, AppError> {
    let mut body = Vec::new();
    match path {
        Some(path) => {
            let mut file = File::open(path)
                .map_err(|e| AppError::new(2, format!("Failed to open request JSON '{}': {e}", path.display())))?;
            file.read_to_end(&mut body)
                .map_err(|e| AppError::new(2, format!("Failed to read request JSON '{}': {e}", path.display())))?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut body)
                .map_err(|e| AppError::new(2, format!("Failed to read request JSON from stdin: {e}")))?;
        }
    }

    parse_request_bytes(&body).map_err(|e| AppError::new(3, e.to_string()))
}

/// Write a result as pretty JSON to `out`.
pub fn write_result_json<W: Write>(mut out: W, result: &FitResult) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut out, result)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
    writeln!(out).map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
    Ok(())
}

/// Write a result JSON file.
pub fn write_result_file(path: &Path, result: &FitResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display())))?;
    write_result_json(file, result)
}
