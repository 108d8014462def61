//! Shared constants for the Contour analysis engine.

/// Contour version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Mismatch records kept per kind. Fixed so report size stays bounded.
pub const MAX_MISMATCHES_PER_KIND: usize = 12;

/// HTTP verbs recognised on backend routers.
pub const ROUTER_METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

/// HTTP verbs recognised on the frontend API client.
pub const CLIENT_METHODS: [&str; 4] = ["get", "post", "put", "delete"];

// ---- Layout defaults ----

/// Default location of the HTTP wiring entry point.
pub const DEFAULT_WIRING_FILE: &str = "backend/src/app.ts";

/// Default directory holding router modules.
pub const DEFAULT_ROUTES_DIR: &str = "backend/src/routes";

/// Default directory holding service modules.
pub const DEFAULT_SERVICES_DIR: &str = "backend/src/services";

/// Default directory holding SQL schema files.
pub const DEFAULT_SCHEMA_DIR: &str = "backend/db";

/// Default location of the frontend API client.
pub const DEFAULT_CLIENT_FILE: &str = "frontend/src/lib/api.ts";

// ---- Extraction defaults ----

/// Default receiver for `<app>.use(...)` mount statements.
pub const DEFAULT_APP_OBJECT: &str = "app";

/// Default receiver for `<router>.<method>(...)` route definitions.
pub const DEFAULT_ROUTER_OBJECT: &str = "router";

/// Default receivers for frontend client calls.
pub const DEFAULT_CLIENT_OBJECTS: [&str; 3] = ["api", "apiClient", "client"];

/// Identifiers that mark a router module as authenticated.
pub const DEFAULT_AUTH_MIDDLEWARE: [&str; 6] = [
    "authenticate",
    "requireAuth",
    "authMiddleware",
    "verifyToken",
    "isAuthenticated",
    "requireRole",
];

/// Extensions tried, in order, when a module specifier has none.
pub const DEFAULT_SOURCE_EXTENSIONS: [&str; 6] = ["ts", "js", "tsx", "jsx", "mjs", "cjs"];

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "contour.toml";
