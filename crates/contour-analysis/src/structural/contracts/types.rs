//! Contract tracking types: mounts, endpoints, client calls, mismatches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP verbs the extractors recognise.
///
/// Declared in alphabetical order so the derived `Ord` matches the
/// lexicographic order of the upper-case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Delete,
    Get,
    Patch,
    Post,
    Put,
}

impl HttpMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Patch => "PATCH",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }

    /// Parse a lower-case verb as written in source (`get`, `post`, ...).
    pub fn from_source(verb: &str) -> Option<Self> {
        match verb {
            "delete" => Some(Self::Delete),
            "get" => Some(Self::Get),
            "patch" => Some(Self::Patch),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One resolved `app.use(basePath, identifier)` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMount {
    /// Local identifier bound to the router module.
    pub identifier: String,
    /// URL prefix the router is mounted under.
    pub base_path: String,
    /// Router module, relative to the repository root.
    pub file_path: String,
}

/// A backend endpoint defined in a router module.
///
/// `full_path` is derived from the mount base at construction and has no
/// setter, so it can never drift from `normalized_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEndpoint {
    method: HttpMethod,
    raw_path: String,
    normalized_path: String,
    full_path: String,
    source_line: u32,
    file_auth_flag: bool,
}

impl RouteEndpoint {
    pub fn new(
        method: HttpMethod,
        raw_path: impl Into<String>,
        normalized_path: impl Into<String>,
        base_path: &str,
        source_line: u32,
        file_auth_flag: bool,
    ) -> Self {
        let normalized_path = normalized_path.into();
        let full_path = super::normalize::join_mount_path(base_path, &normalized_path);
        Self {
            method,
            raw_path: raw_path.into(),
            normalized_path,
            full_path,
            source_line,
            file_auth_flag,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path exactly as written in source.
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    pub fn normalized_path(&self) -> &str {
        &self.normalized_path
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn source_line(&self) -> u32 {
        self.source_line
    }

    /// File-level flag: some auth middleware name appears somewhere in the
    /// router module. It does not mean this particular route is guarded.
    pub fn file_auth_flag(&self) -> bool {
        self.file_auth_flag
    }
}

/// A router module together with the endpoints extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteModule {
    pub mount: RouteMount,
    pub endpoints: Vec<RouteEndpoint>,
}

/// A frontend API-client call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientEndpoint {
    pub method: HttpMethod,
    pub normalized_path: String,
    pub source_line: u32,
    pub file_path: String,
}

/// Where a contract entry was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    pub file_path: String,
    pub line: u32,
}

/// Which side of the contract is missing an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// Backend exposes it, frontend never calls it.
    MissingInFrontend,
    /// Frontend calls it, backend never defines it.
    ExtraInFrontend,
}

impl MismatchKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingInFrontend => "missing_in_frontend",
            Self::ExtraInFrontend => "extra_in_frontend",
        }
    }
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single endpoint present on one side of the contract only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMismatch {
    pub kind: MismatchKind,
    pub method: HttpMethod,
    pub path: String,
    pub provenance: Provenance,
}

/// How a contract comparison concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffOutcome {
    /// At least one mismatch on either side.
    Drift,
    /// Both sides had endpoints and they agree.
    Aligned,
    /// One or both sides were empty; no real comparison happened.
    #[default]
    NothingToCompare,
}

/// Result of the contract diff: capped mismatch lists plus pre-cap totals.
/// Built and rendered by `diff.rs`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractDiff {
    pub outcome: DiffOutcome,
    pub missing_in_frontend: Vec<ContractMismatch>,
    pub extra_in_frontend: Vec<ContractMismatch>,
    /// Distinct backend `(method, path)` pairs compared.
    pub backend_total: usize,
    /// Distinct frontend `(method, path)` pairs compared.
    pub frontend_total: usize,
    /// Missing-in-frontend count before the cap.
    pub missing_total: usize,
    /// Extra-in-frontend count before the cap.
    pub extra_total: usize,
}
