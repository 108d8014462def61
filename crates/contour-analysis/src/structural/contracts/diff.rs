//! Contract diff engine: backend ↔ frontend set reconciliation.
//!
//! Both sides are reduced to `(method, path)` keys with the provenance of
//! their first occurrence. The set differences are sorted by key, capped at
//! `MAX_MISMATCHES_PER_KIND`, and turned into findings. All `ContractDiff`
//! behaviour (construction, counts, rendering) lives here; `types.rs` holds
//! only its shape.

use contour_core::constants::MAX_MISMATCHES_PER_KIND;
use contour_core::types::collections::BTreeMap;
use contour_core::types::{Finding, Severity};

use super::types::*;

/// Agent name stamped on every contract finding.
pub const CONTRACT_AGENT: &str = "contract_diff";

/// Ordered `(method, path)` key. Field order gives the required sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointKey {
    pub method: HttpMethod,
    pub path: String,
}

/// One side of the contract: unique keys with first-seen provenance.
#[derive(Debug, Clone, Default)]
pub struct ContractSet {
    entries: BTreeMap<EndpointKey, Provenance>,
}

impl ContractSet {
    /// Backend side: every endpoint's full path, in mount order.
    pub fn from_routes(routes: &[RouteModule]) -> Self {
        let mut set = Self::default();
        for module in routes {
            for ep in &module.endpoints {
                set.insert(ep.method(), ep.full_path(), &module.mount.file_path, ep.source_line());
            }
        }
        set
    }

    /// Frontend side: every client call's normalized path.
    pub fn from_client(calls: &[ClientEndpoint]) -> Self {
        let mut set = Self::default();
        for call in calls {
            set.insert(call.method, &call.normalized_path, &call.file_path, call.source_line);
        }
        set
    }

    /// Insert a key; an existing key keeps its original provenance.
    pub fn insert(&mut self, method: HttpMethod, path: &str, file_path: &str, line: u32) {
        self.entries
            .entry(EndpointKey {
                method,
                path: path.to_string(),
            })
            .or_insert_with(|| Provenance {
                file_path: file_path.to_string(),
                line,
            });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &EndpointKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in `self` absent from `other`, already in key order.
    fn minus<'a>(&'a self, other: &'a ContractSet) -> impl Iterator<Item = (&'a EndpointKey, &'a Provenance)> {
        self.entries.iter().filter(move |(key, _)| !other.contains(key))
    }
}

/// Compute the contract diff between the backend and frontend sets.
pub fn diff_contracts(backend: &ContractSet, frontend: &ContractSet) -> ContractDiff {
    let (missing_in_frontend, missing_total) =
        capped(backend.minus(frontend), MismatchKind::MissingInFrontend);
    let (extra_in_frontend, extra_total) =
        capped(frontend.minus(backend), MismatchKind::ExtraInFrontend);

    let outcome = if missing_total + extra_total > 0 {
        DiffOutcome::Drift
    } else if backend.is_empty() || frontend.is_empty() {
        DiffOutcome::NothingToCompare
    } else {
        DiffOutcome::Aligned
    };

    ContractDiff {
        outcome,
        missing_in_frontend,
        extra_in_frontend,
        backend_total: backend.len(),
        frontend_total: frontend.len(),
        missing_total,
        extra_total,
    }
}

fn capped<'a>(
    entries: impl Iterator<Item = (&'a EndpointKey, &'a Provenance)>,
    kind: MismatchKind,
) -> (Vec<ContractMismatch>, usize) {
    let mut kept = Vec::new();
    let mut total = 0;
    for (key, provenance) in entries {
        total += 1;
        if kept.len() < MAX_MISMATCHES_PER_KIND {
            kept.push(ContractMismatch {
                kind,
                method: key.method,
                path: key.path.clone(),
                provenance: provenance.clone(),
            });
        }
    }
    (kept, total)
}

impl ContractDiff {
    pub fn mismatch_count(&self) -> usize {
        self.missing_in_frontend.len() + self.extra_in_frontend.len()
    }

    /// True when some mismatches were dropped by the cap.
    pub fn is_truncated(&self) -> bool {
        self.missing_total > self.missing_in_frontend.len()
            || self.extra_total > self.extra_in_frontend.len()
    }

    /// Render the diff as findings: one per mismatch, or exactly one
    /// informational record when there is no drift.
    pub fn findings(&self) -> Vec<Finding> {
        if self.outcome != DiffOutcome::Drift {
            return vec![self.aligned_finding()];
        }

        self.missing_in_frontend
            .iter()
            .chain(&self.extra_in_frontend)
            .map(mismatch_finding)
            .collect()
    }

    fn aligned_finding(&self) -> Finding {
        let verified = self.outcome == DiffOutcome::Aligned;
        let description = if verified {
            format!(
                "All {} backend endpoint(s) and {} frontend call(s) agree.",
                self.backend_total, self.frontend_total
            )
        } else {
            format!(
                "No drift found, but nothing was compared: {} backend endpoint(s), {} frontend call(s).",
                self.backend_total, self.frontend_total
            )
        };
        Finding::new(CONTRACT_AGENT, "API contracts aligned", description, Severity::Info)
            .tag("contracts")
            .tag("aligned")
            .tag(if verified { "verified" } else { "unverified" })
    }
}

fn mismatch_finding(mismatch: &ContractMismatch) -> Finding {
    let (title, description, severity) = match mismatch.kind {
        MismatchKind::MissingInFrontend => (
            "Backend endpoint not called by frontend",
            format!(
                "{} {} is exposed by the backend but no frontend client call targets it.",
                mismatch.method, mismatch.path
            ),
            Severity::Medium,
        ),
        MismatchKind::ExtraInFrontend => (
            "Frontend calls undefined endpoint",
            format!(
                "{} {} is called by the frontend client but no backend route defines it.",
                mismatch.method, mismatch.path
            ),
            Severity::High,
        ),
    };
    Finding::new(CONTRACT_AGENT, title, description, severity)
        .at(mismatch.provenance.file_path.clone(), mismatch.provenance.line)
        .tag("contracts")
        .tag(mismatch.kind.name())
        .tag(mismatch.method.name())
}
