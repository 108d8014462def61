//! Orchestrator: runs every stage in `PIPELINE` order over one repository.

use std::path::Path;

use contour_core::config::ContourConfig;
use contour_core::errors::{PipelineError, PipelineResult};
use contour_core::types::Finding;
use serde::Serialize;

use super::component_map::ComponentMap;
use super::stage::{run_stage, StageContext, StageLedger, StageReport, PIPELINE};
use super::stages::{
    ClientCallStage, ContractDiffStage, RouteEndpointStage, RouteMountStage, SchemaStage,
    ServiceStage,
};
use crate::index::SourceIndex;
use crate::structural::contracts::ContractDiff;

/// Everything one audit run produced, ready for a reporter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub component_map: ComponentMap,
    pub contract_diff: ContractDiff,
    pub findings: Vec<Finding>,
    pub stages: Vec<StageReport>,
    /// Files read from disk during the run.
    pub disk_reads: usize,
}

/// Audit the repository at `root`.
///
/// Only setup problems (an invalid config, a missing root) return `Err`.
/// Stage failures become findings and are also listed in
/// `PipelineResult::errors`.
pub fn run_audit(
    root: &Path,
    config: &ContourConfig,
) -> Result<PipelineResult<AuditReport>, PipelineError> {
    // Configs built in code skip `load`; empty receivers would match any call.
    ContourConfig::validate(config)?;
    if !root.is_dir() {
        return Err(PipelineError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    let index = SourceIndex::open(root).map_err(|_| PipelineError::RootNotFound {
        path: root.to_path_buf(),
    })?;

    let span = tracing::info_span!("audit", root = %index.root().display());
    let _guard = span.enter();

    let ctx = StageContext {
        index: &index,
        config,
    };
    let mut ledger = StageLedger::default();

    let mounts = run_stage(&RouteMountStage, &ctx, &mut ledger);
    let routes = run_stage(&RouteEndpointStage { mounts: &mounts }, &ctx, &mut ledger);
    let services = run_stage(&ServiceStage, &ctx, &mut ledger);
    let tables = run_stage(&SchemaStage, &ctx, &mut ledger);
    let client = run_stage(&ClientCallStage, &ctx, &mut ledger);
    let contract_diff = run_stage(
        &ContractDiffStage {
            routes: &routes,
            client: &client,
        },
        &ctx,
        &mut ledger,
    );
    debug_assert!(ledger.reports.iter().map(|r| r.stage).eq(PIPELINE));

    let StageLedger {
        reports,
        findings: mut stage_findings,
        errors,
    } = ledger;

    let mut findings = contract_diff.findings();
    findings.append(&mut stage_findings);

    tracing::info!(
        findings = findings.len(),
        failed_stages = errors.len(),
        disk_reads = index.disk_reads(),
        "audit complete"
    );

    let report = AuditReport {
        component_map: ComponentMap::new(routes, services, tables, client),
        contract_diff,
        findings,
        stages: reports,
        disk_reads: index.disk_reads(),
    };

    let mut result = PipelineResult::new(report);
    for error in errors {
        result.add_error(error);
    }
    Ok(result)
}
