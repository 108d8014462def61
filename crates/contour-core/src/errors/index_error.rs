//! Source index errors.

use std::path::PathBuf;

use super::error_code::{self, ContourErrorCode};

/// Errors raised while reading files through the source index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Path escapes repository root: {path}")]
    OutsideRoot { path: PathBuf },
}

impl IndexError {
    /// True when the error means "the input is simply absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl ContourErrorCode for IndexError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::INDEX_NOT_FOUND,
            Self::Io { .. } => error_code::INDEX_IO,
            Self::OutsideRoot { .. } => error_code::INDEX_OUTSIDE_ROOT,
        }
    }
}
