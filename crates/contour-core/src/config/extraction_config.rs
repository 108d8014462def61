//! Extraction configuration: receiver names and middleware markers.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_APP_OBJECT, DEFAULT_AUTH_MIDDLEWARE, DEFAULT_CLIENT_OBJECTS, DEFAULT_ROUTER_OBJECT,
    DEFAULT_SOURCE_EXTENSIONS,
};

/// Configuration for the route and client extractors.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Receiver of mount statements. Default: `app`.
    pub app_object: Option<String>,
    /// Receiver of route definitions. Default: `router`.
    pub router_object: Option<String>,
    /// Receivers of frontend client calls.
    #[serde(default)]
    pub client_objects: Vec<String>,
    /// Identifiers that flag a router module as authenticated.
    #[serde(default)]
    pub auth_middleware: Vec<String>,
    /// Extensions tried when a module specifier has none.
    #[serde(default)]
    pub source_extensions: Vec<String>,
}

impl ExtractionConfig {
    pub fn effective_app_object(&self) -> &str {
        self.app_object.as_deref().unwrap_or(DEFAULT_APP_OBJECT)
    }

    pub fn effective_router_object(&self) -> &str {
        self.router_object.as_deref().unwrap_or(DEFAULT_ROUTER_OBJECT)
    }

    pub fn effective_client_objects(&self) -> Vec<String> {
        or_defaults(&self.client_objects, &DEFAULT_CLIENT_OBJECTS)
    }

    pub fn effective_auth_middleware(&self) -> Vec<String> {
        or_defaults(&self.auth_middleware, &DEFAULT_AUTH_MIDDLEWARE)
    }

    pub fn effective_source_extensions(&self) -> Vec<String> {
        or_defaults(&self.source_extensions, &DEFAULT_SOURCE_EXTENSIONS)
    }
}

fn or_defaults(configured: &[String], defaults: &[&str]) -> Vec<String> {
    if configured.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        configured.to_vec()
    }
}
