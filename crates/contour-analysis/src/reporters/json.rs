//! JSON reporter: structured JSON output.

use serde_json::json;

use contour_core::types::Severity;

use super::Reporter;
use crate::pipeline::{AuditReport, StageStatus};

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &AuditReport) -> Result<String, String> {
        let diff = &report.contract_diff;
        let count = |severity: Severity| {
            report
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .count()
        };

        let output = json!({
            "version": contour_core::constants::VERSION,
            "summary": {
                "outcome": diff.outcome,
                "backend_endpoints": diff.backend_total,
                "frontend_calls": diff.frontend_total,
                "missing_in_frontend": diff.missing_total,
                "extra_in_frontend": diff.extra_total,
                "truncated": diff.is_truncated(),
                "failed_stages": report
                    .stages
                    .iter()
                    .filter(|s| s.status == StageStatus::Failed)
                    .count(),
                "findings_by_severity": {
                    "high": count(Severity::High),
                    "medium": count(Severity::Medium),
                    "low": count(Severity::Low),
                    "info": count(Severity::Info),
                },
                "disk_reads": report.disk_reads,
            },
            "component_map": report.component_map,
            "contract_diff": diff,
            "findings": report.findings,
            "stages": report.stages,
        });

        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
