//! The concrete pipeline stages.

use std::path::Path;

use contour_core::errors::PipelineError;
use contour_core::types::collections::BTreeSet;

use super::stage::{Stage, StageContext, StageId};
use crate::structural::contracts::extractors::{ClientCallExtractor, ExpressRouteExtractor};
use crate::structural::contracts::{
    diff_contracts, ClientEndpoint, ContractDiff, ContractSet, MountResolver, RouteModule,
    RouteMount,
};
use crate::structural::schema::TableExtractor;

/// Resolves the wiring entry point into route mounts.
pub struct RouteMountStage;

impl Stage for RouteMountStage {
    type Artifact = Vec<RouteMount>;
    const ID: StageId = StageId::RouteMounts;

    fn run(&self, ctx: &StageContext<'_>) -> Result<Self::Artifact, PipelineError> {
        let wiring_path = ctx.index.wiring_file(ctx.config);
        let Some(wiring) = ctx.index.maybe_read_text(&wiring_path) else {
            return Ok(Vec::new());
        };
        let resolver = MountResolver::new(ctx.config)?;
        let mounts = resolver.resolve(ctx.index, &wiring_path, &wiring);
        tracing::info!(count = mounts.len(), "route mounts resolved");
        Ok(mounts)
    }
}

/// Extracts endpoints from each mounted router module.
pub struct RouteEndpointStage<'a> {
    pub mounts: &'a [RouteMount],
}

impl Stage for RouteEndpointStage<'_> {
    type Artifact = Vec<RouteModule>;
    const ID: StageId = StageId::RouteEndpoints;

    fn run(&self, ctx: &StageContext<'_>) -> Result<Self::Artifact, PipelineError> {
        let extractor = ExpressRouteExtractor::new(ctx.config)?;
        let modules: Vec<RouteModule> = self
            .mounts
            .iter()
            .map(|mount| {
                let endpoints = ctx
                    .index
                    .maybe_read_text(Path::new(&mount.file_path))
                    .map(|content| extractor.extract(mount, &content))
                    .unwrap_or_default();
                RouteModule {
                    mount: mount.clone(),
                    endpoints,
                }
            })
            .collect();
        let total: usize = modules.iter().map(|m| m.endpoints.len()).sum();
        tracing::info!(modules = modules.len(), backend_endpoints = total, "route endpoints extracted");
        Ok(modules)
    }
}

/// Lists service modules.
pub struct ServiceStage;

impl Stage for ServiceStage {
    type Artifact = Vec<String>;
    const ID: StageId = StageId::Services;

    fn run(&self, ctx: &StageContext<'_>) -> Result<Self::Artifact, PipelineError> {
        let services: Vec<String> = ctx
            .index
            .service_modules(ctx.config)
            .iter()
            .map(|path| ctx.index.relative(path))
            .collect();
        tracing::info!(count = services.len(), "service modules listed");
        Ok(services)
    }
}

/// Collects table names from SQL schema files.
pub struct SchemaStage;

impl Stage for SchemaStage {
    type Artifact = Vec<String>;
    const ID: StageId = StageId::SchemaTables;

    fn run(&self, ctx: &StageContext<'_>) -> Result<Self::Artifact, PipelineError> {
        let extractor = TableExtractor::new()?;
        let mut tables = BTreeSet::new();
        for file in ctx.index.schema_files(ctx.config) {
            if let Some(sql) = ctx.index.maybe_read_text(&file) {
                tables.extend(extractor.extract(&sql));
            }
        }
        tracing::info!(count = tables.len(), "schema tables collected");
        Ok(tables.into_iter().collect())
    }
}

/// Extracts call sites from the frontend API client.
pub struct ClientCallStage;

impl Stage for ClientCallStage {
    type Artifact = Vec<ClientEndpoint>;
    const ID: StageId = StageId::ClientCalls;

    fn run(&self, ctx: &StageContext<'_>) -> Result<Self::Artifact, PipelineError> {
        let client_path = ctx.index.client_file(ctx.config);
        let Some(content) = ctx.index.maybe_read_text(&client_path) else {
            return Ok(Vec::new());
        };
        let extractor = ClientCallExtractor::new(ctx.config)?;
        let calls = extractor.extract(&content, &ctx.index.relative(&client_path));
        tracing::info!(client_endpoints = calls.len(), "client calls extracted");
        Ok(calls)
    }
}

/// Reconciles backend endpoints against frontend calls.
pub struct ContractDiffStage<'a> {
    pub routes: &'a [RouteModule],
    pub client: &'a [ClientEndpoint],
}

impl Stage for ContractDiffStage<'_> {
    type Artifact = ContractDiff;
    const ID: StageId = StageId::ContractDiff;

    fn run(&self, _ctx: &StageContext<'_>) -> Result<Self::Artifact, PipelineError> {
        let backend = ContractSet::from_routes(self.routes);
        let frontend = ContractSet::from_client(self.client);
        let diff = diff_contracts(&backend, &frontend);
        tracing::info!(
            outcome = ?diff.outcome,
            missing = diff.missing_total,
            extra = diff.extra_total,
            "contract diff computed"
        );
        Ok(diff)
    }
}
