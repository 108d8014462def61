//! ComponentMap: the aggregate artifact of one analysis run.

use serde::Serialize;

use crate::structural::contracts::{ClientEndpoint, RouteEndpoint, RouteModule};

/// Routes (with nested endpoints), services, tables and client calls
/// discovered in one run. Built once from owned stage artifacts; read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentMap {
    routes: Vec<RouteModule>,
    services: Vec<String>,
    tables: Vec<String>,
    client_endpoints: Vec<ClientEndpoint>,
}

impl ComponentMap {
    pub fn new(
        routes: Vec<RouteModule>,
        services: Vec<String>,
        tables: Vec<String>,
        client_endpoints: Vec<ClientEndpoint>,
    ) -> Self {
        Self {
            routes,
            services,
            tables,
            client_endpoints,
        }
    }

    pub fn routes(&self) -> &[RouteModule] {
        &self.routes
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn client_endpoints(&self) -> &[ClientEndpoint] {
        &self.client_endpoints
    }

    /// Every backend endpoint across all mounts, in mount order.
    pub fn endpoints(&self) -> impl Iterator<Item = &RouteEndpoint> {
        self.routes.iter().flat_map(|m| m.endpoints.iter())
    }

    pub fn endpoint_count(&self) -> usize {
        self.routes.iter().map(|m| m.endpoints.len()).sum()
    }
}
