//! Reporters: render an `AuditReport` for the reporting collaborator.
//! Rendering only; persisting the output is the caller's job.

pub mod json;

pub use json::JsonReporter;

use crate::pipeline::AuditReport;

/// Trait for audit output formats.
pub trait Reporter {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &AuditReport) -> Result<String, String>;
}
