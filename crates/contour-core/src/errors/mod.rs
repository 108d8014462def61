//! Error handling for Contour.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod extraction_error;
pub mod index_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use error_code::ContourErrorCode;
pub use extraction_error::ExtractionError;
pub use index_error::IndexError;
pub use pipeline_error::{PipelineError, PipelineResult};
