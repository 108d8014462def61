//! Repository layout configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CLIENT_FILE, DEFAULT_ROUTES_DIR, DEFAULT_SCHEMA_DIR, DEFAULT_SERVICES_DIR,
    DEFAULT_WIRING_FILE,
};

/// Where the audited inputs live, relative to the repository root.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// HTTP wiring entry point. Default: `backend/src/app.ts`.
    pub wiring_file: Option<String>,
    /// Router module directory. Default: `backend/src/routes`.
    pub routes_dir: Option<String>,
    /// Service module directory. Default: `backend/src/services`.
    pub services_dir: Option<String>,
    /// SQL schema directory. Default: `backend/db`.
    pub schema_dir: Option<String>,
    /// Frontend API client. Default: `frontend/src/lib/api.ts`.
    pub client_file: Option<String>,
}

impl LayoutConfig {
    pub fn effective_wiring_file(&self) -> &str {
        self.wiring_file.as_deref().unwrap_or(DEFAULT_WIRING_FILE)
    }

    pub fn effective_routes_dir(&self) -> &str {
        self.routes_dir.as_deref().unwrap_or(DEFAULT_ROUTES_DIR)
    }

    pub fn effective_services_dir(&self) -> &str {
        self.services_dir.as_deref().unwrap_or(DEFAULT_SERVICES_DIR)
    }

    pub fn effective_schema_dir(&self) -> &str {
        self.schema_dir.as_deref().unwrap_or(DEFAULT_SCHEMA_DIR)
    }

    pub fn effective_client_file(&self) -> &str {
        self.client_file.as_deref().unwrap_or(DEFAULT_CLIENT_FILE)
    }

    /// All configured paths paired with their field names, for validation.
    pub(crate) fn named_paths(&self) -> [(&'static str, &str); 5] {
        [
            ("layout.wiring_file", self.effective_wiring_file()),
            ("layout.routes_dir", self.effective_routes_dir()),
            ("layout.services_dir", self.effective_services_dir()),
            ("layout.schema_dir", self.effective_schema_dir()),
            ("layout.client_file", self.effective_client_file()),
        ]
    }
}
