//! Configuration errors.

use super::error_code::{self, ContourErrorCode};

/// Errors raised while resolving the layered `ContourConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config layer exists but could not be read.
    #[error("Cannot read config layer {path}")]
    FileNotFound { path: String },

    /// A config layer is not valid TOML for `ContourConfig`.
    #[error("Malformed config in {path}: {message}")]
    ParseError { path: String, message: String },

    /// A layout path is absolute, empty, or escapes the repository root.
    #[error("Layout setting {field} rejected: {message}")]
    ValidationFailed { field: String, message: String },

    /// An extraction setting is not a usable identifier or extension.
    #[error("Extraction setting {field} rejected: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// The dotted config key at fault, when one is known.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { field, .. } | Self::InvalidValue { field, .. } => Some(field.as_str()),
            Self::FileNotFound { .. } | Self::ParseError { .. } => None,
        }
    }

    /// Parse failures abort loading at every layer; unreadable user config does not.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }
}

impl ContourErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
