//! contour-core: shared foundation for the Contour contract auditor.
//!
//! - Errors: one `thiserror` enum per subsystem, each carrying a stable error code
//! - Config: TOML-based, layered resolution (CLI > env > project > user > defaults)
//! - Tracing: `CONTOUR_LOG`-driven `EnvFilter` setup
//! - Types: findings, severities, collection aliases

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::ContourConfig;
pub use errors::{ContourErrorCode, PipelineError};
pub use types::finding::{Finding, Severity};
