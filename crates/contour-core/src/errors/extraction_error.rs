//! Extraction errors.

use super::error_code::{self, ContourErrorCode};

/// Errors raised by the route, client, and schema extractors.
///
/// Unrecognised source shapes are never errors; they are skipped. This
/// covers the extractor's own setup going wrong.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Invalid extraction pattern for {name}: {message}")]
    InvalidPattern { name: String, message: String },
}

impl ContourErrorCode for ExtractionError {
    fn error_code(&self) -> &'static str {
        error_code::EXTRACTION_ERROR
    }
}
