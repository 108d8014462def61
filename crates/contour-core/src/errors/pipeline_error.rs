//! Pipeline errors and non-fatal error collection.

use std::path::PathBuf;

use super::error_code::{self, ContourErrorCode};
use super::{ConfigError, ExtractionError, IndexError};

/// Errors that can occur during pipeline execution.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Stage {stage} panicked: {message}")]
    StagePanicked { stage: String, message: String },

    #[error("Repository root does not exist: {path}")]
    RootNotFound { path: PathBuf },
}

impl PipelineError {
    /// Setup errors abort the run; everything else becomes a finding.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RootNotFound { .. } | Self::Config(_))
    }
}

impl ContourErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Index(e) => e.error_code(),
            Self::Extraction(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::StagePanicked { .. } => error_code::STAGE_PANIC,
            Self::RootNotFound { .. } => error_code::SETUP_ERROR,
        }
    }
}

/// Result of a pipeline run that accumulates non-fatal errors.
/// Allows partial results to be returned even when some stages fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the pipeline run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new pipeline result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
