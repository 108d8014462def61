//! The `Stage` capability and the boundary that isolates stage failures.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use contour_core::config::ContourConfig;
use contour_core::errors::{ContourErrorCode, PipelineError};
use contour_core::types::{Finding, Severity};
use serde::{Deserialize, Serialize};

use crate::index::SourceIndex;

/// The closed set of pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    RouteMounts,
    RouteEndpoints,
    Services,
    SchemaTables,
    ClientCalls,
    ContractDiff,
}

impl StageId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RouteMounts => "route_mounts",
            Self::RouteEndpoints => "route_endpoints",
            Self::Services => "services",
            Self::SchemaTables => "schema_tables",
            Self::ClientCalls => "client_calls",
            Self::ContractDiff => "contract_diff",
        }
    }
}

/// Execution order. Every stage finishes before the next starts.
pub const PIPELINE: [StageId; 6] = [
    StageId::RouteMounts,
    StageId::RouteEndpoints,
    StageId::Services,
    StageId::SchemaTables,
    StageId::ClientCalls,
    StageId::ContractDiff,
];

/// Read-only inputs shared by every stage.
#[derive(Clone, Copy)]
pub struct StageContext<'a> {
    pub index: &'a SourceIndex,
    pub config: &'a ContourConfig,
}

/// A pipeline stage: context in, owned artifact out.
///
/// Upstream artifacts a stage depends on are borrowed by the stage value
/// itself, so a stage can read them but never mutate them.
pub trait Stage {
    type Artifact: Default;

    const ID: StageId;

    fn run(&self, ctx: &StageContext<'_>) -> Result<Self::Artifact, PipelineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Completed,
    Failed,
}

/// Per-stage execution record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: StageId,
    pub status: StageStatus,
    pub duration_ms: u64,
}

/// Collects what happened at the stage boundary.
#[derive(Debug, Default)]
pub struct StageLedger {
    pub reports: Vec<StageReport>,
    pub findings: Vec<Finding>,
    pub errors: Vec<PipelineError>,
}

/// Run one stage, converting an `Err` or a panic into a stage-failure
/// finding plus an empty artifact so later stages still run.
pub fn run_stage<S: Stage>(stage: &S, ctx: &StageContext<'_>, ledger: &mut StageLedger) -> S::Artifact {
    let span = tracing::info_span!("stage", name = S::ID.name());
    let _guard = span.enter();
    let start = Instant::now();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| stage.run(ctx)));
    let duration_ms = start.elapsed().as_millis() as u64;

    let (artifact, status) = match outcome {
        Ok(Ok(artifact)) => {
            tracing::debug!(duration_ms, "stage complete");
            (artifact, StageStatus::Completed)
        }
        Ok(Err(error)) => {
            tracing::warn!(duration_ms, error = %error, "stage failed");
            record_failure(S::ID, error, ledger);
            (S::Artifact::default(), StageStatus::Failed)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(duration_ms, message = %message, "stage panicked");
            let error = PipelineError::StagePanicked {
                stage: S::ID.name().to_string(),
                message,
            };
            record_failure(S::ID, error, ledger);
            (S::Artifact::default(), StageStatus::Failed)
        }
    };

    ledger.reports.push(StageReport {
        stage: S::ID,
        status,
        duration_ms,
    });
    artifact
}

fn record_failure(stage: StageId, error: PipelineError, ledger: &mut StageLedger) {
    ledger.findings.push(
        Finding::new(
            stage.name(),
            format!("Stage failed: {}", stage.name()),
            error.coded_string(),
            Severity::High,
        )
        .tag("stage_failure")
        .tag(error.error_code()),
    );
    ledger.errors.push(error);
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
