//! ContourErrorCode trait for report-friendly error strings.

/// Every error enum implements this to expose a stable, machine-readable code
/// that survives into stage-failure findings.
pub trait ContourErrorCode {
    /// Returns the error code string (e.g., "INDEX_NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INDEX_NOT_FOUND: &str = "INDEX_NOT_FOUND";
pub const INDEX_IO: &str = "INDEX_IO";
pub const INDEX_OUTSIDE_ROOT: &str = "INDEX_OUTSIDE_ROOT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const EXTRACTION_ERROR: &str = "EXTRACTION_ERROR";
pub const STAGE_PANIC: &str = "STAGE_PANIC";
pub const SETUP_ERROR: &str = "SETUP_ERROR";
