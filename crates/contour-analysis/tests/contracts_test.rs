//! Contract diff engine: ordering, capping, provenance, and path normalization.

use contour_analysis::structural::contracts::normalize::{join_mount_path, normalize_path};
use contour_analysis::structural::contracts::{
    diff_contracts, ClientEndpoint, ContractSet, DiffOutcome, HttpMethod, MismatchKind,
    RouteEndpoint, RouteModule, RouteMount,
};
use contour_core::constants::MAX_MISMATCHES_PER_KIND;
use contour_core::types::Severity;
use proptest::prelude::*;

fn client(method: HttpMethod, path: &str, line: u32) -> ClientEndpoint {
    ClientEndpoint {
        method,
        normalized_path: path.to_string(),
        source_line: line,
        file_path: "frontend/src/lib/api.ts".to_string(),
    }
}

fn module(base: &str, file: &str, routes: &[(HttpMethod, &str, u32)]) -> RouteModule {
    RouteModule {
        mount: RouteMount {
            identifier: "r".to_string(),
            base_path: base.to_string(),
            file_path: file.to_string(),
        },
        endpoints: routes
            .iter()
            .map(|(m, p, line)| RouteEndpoint::new(*m, *p, *p, base, *line, false))
            .collect(),
    }
}

#[test]
fn test_mismatches_are_sorted_by_method_then_path() {
    let backend = ContractSet::from_routes(&[module(
        "/api",
        "backend/src/routes/a.ts",
        &[
            (HttpMethod::Put, "/z", 1),
            (HttpMethod::Delete, "/b", 2),
            (HttpMethod::Get, "/b", 3),
            (HttpMethod::Delete, "/a", 4),
            (HttpMethod::Patch, "/a", 5),
            (HttpMethod::Post, "/a", 6),
        ],
    )]);
    let diff = diff_contracts(&backend, &ContractSet::default());

    let keys: Vec<String> = diff
        .missing_in_frontend
        .iter()
        .map(|m| format!("{} {}", m.method, m.path))
        .collect();
    assert_eq!(
        keys,
        vec!["DELETE /api/a", "DELETE /api/b", "GET /api/b", "PATCH /api/a", "POST /api/a", "PUT /api/z"]
    );
    assert!(diff.missing_in_frontend.iter().all(|m| m.kind == MismatchKind::MissingInFrontend));
}

#[test]
fn test_each_kind_is_capped_independently() {
    let calls: Vec<ClientEndpoint> = (0..20)
        .map(|i| client(HttpMethod::Get, &format!("/extra/{i:02}"), i + 1))
        .collect();
    let routes: Vec<(HttpMethod, String, u32)> = (0..15)
        .map(|i| (HttpMethod::Post, format!("/missing/{i:02}"), i + 1))
        .collect();
    let borrowed: Vec<(HttpMethod, &str, u32)> =
        routes.iter().map(|(m, p, l)| (*m, p.as_str(), *l)).collect();

    let backend = ContractSet::from_routes(&[module("/", "backend/src/routes/m.ts", &borrowed)]);
    let frontend = ContractSet::from_client(&calls);
    let diff = diff_contracts(&backend, &frontend);

    assert_eq!(diff.missing_in_frontend.len(), MAX_MISMATCHES_PER_KIND);
    assert_eq!(diff.extra_in_frontend.len(), MAX_MISMATCHES_PER_KIND);
    assert_eq!(diff.missing_total, 15);
    assert_eq!(diff.extra_total, 20);
    assert!(diff.is_truncated());
    // The cap keeps the first entries in sort order.
    assert_eq!(diff.extra_in_frontend[0].path, "/extra/00");
    assert_eq!(diff.extra_in_frontend[11].path, "/extra/11");
    assert_eq!(diff.findings().len(), 2 * MAX_MISMATCHES_PER_KIND);
}

#[test]
fn test_first_occurrence_keeps_provenance() {
    let calls = vec![
        client(HttpMethod::Get, "/api/x", 7),
        client(HttpMethod::Get, "/api/x", 2),
    ];
    let diff = diff_contracts(&ContractSet::default(), &ContractSet::from_client(&calls));
    assert_eq!(diff.extra_total, 1);
    assert_eq!(diff.extra_in_frontend[0].provenance.line, 7);
}

#[test]
fn test_method_is_part_of_the_key() {
    let backend = ContractSet::from_routes(&[module(
        "/api/items",
        "backend/src/routes/items.ts",
        &[(HttpMethod::Get, "/", 1)],
    )]);
    let frontend = ContractSet::from_client(&[client(HttpMethod::Post, "/api/items", 1)]);
    let diff = diff_contracts(&backend, &frontend);

    assert_eq!(diff.outcome, DiffOutcome::Drift);
    assert_eq!(diff.missing_total, 1);
    assert_eq!(diff.extra_total, 1);

    let findings = diff.findings();
    assert_eq!(findings[0].severity, Severity::Medium);
    assert_eq!(findings[1].severity, Severity::High);
    assert!(findings.iter().all(|f| f.has_tag("contracts")));
}

#[test]
fn test_empty_sets_are_unverified() {
    let diff = diff_contracts(&ContractSet::default(), &ContractSet::default());
    assert_eq!(diff.outcome, DiffOutcome::NothingToCompare);
    let findings = diff.findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Info);
    assert!(findings[0].has_tag("unverified"));
    assert!(!findings[0].has_tag("verified"));
}

fn path_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}",
        ":[a-z]{1,4}",
        "[a-z]{1,4}".prop_map(|s| format!("${{{s}}}")),
        "[a-z]{1,3}".prop_map(|s| format!("${{obj.{s}}}")),
    ]
}

fn api_path() -> impl Strategy<Value = String> {
    prop::collection::vec(path_segment(), 0..5).prop_map(|segs| format!("/{}", segs.join("/")))
}

fn method() -> impl Strategy<Value = HttpMethod> {
    prop_oneof![
        Just(HttpMethod::Get),
        Just(HttpMethod::Post),
        Just(HttpMethod::Put),
        Just(HttpMethod::Delete),
    ]
}

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in api_path()) {
        let once = normalize_path(&raw).unwrap();
        prop_assert!(!once.contains("${"), "normalized path still contains \"${{\": {}", once);
        prop_assert_eq!(normalize_path(&once), Some(once.clone()));
    }

    #[test]
    fn joined_paths_never_double_slash(base in "/|/[a-z]{1,6}/?", route in api_path()) {
        let route = normalize_path(&route).unwrap();
        let joined = join_mount_path(&base, &route);
        prop_assert!(!joined.contains("//"));
        prop_assert!(joined.starts_with('/'));
    }

    #[test]
    fn diff_is_sorted_capped_and_counts_are_exact(
        backend_calls in prop::collection::vec((method(), api_path()), 0..40),
        frontend_calls in prop::collection::vec((method(), api_path()), 0..40),
    ) {
        let as_client = |calls: &[(HttpMethod, String)]| -> Vec<ClientEndpoint> {
            calls
                .iter()
                .enumerate()
                .map(|(i, (m, p))| client(*m, &normalize_path(p).unwrap(), i as u32 + 1))
                .collect()
        };
        let backend = ContractSet::from_client(&as_client(&backend_calls));
        let frontend = ContractSet::from_client(&as_client(&frontend_calls));
        let diff = diff_contracts(&backend, &frontend);

        for list in [&diff.missing_in_frontend, &diff.extra_in_frontend] {
            prop_assert!(list.len() <= MAX_MISMATCHES_PER_KIND);
            let keys: Vec<_> = list.iter().map(|m| (m.method, m.path.clone())).collect();
            let mut sorted = keys.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(keys, sorted);
        }
        prop_assert_eq!(diff.missing_in_frontend.len(), diff.missing_total.min(MAX_MISMATCHES_PER_KIND));
        prop_assert_eq!(diff.extra_in_frontend.len(), diff.extra_total.min(MAX_MISMATCHES_PER_KIND));
        prop_assert_eq!(
            diff.outcome == DiffOutcome::Drift,
            diff.missing_total + diff.extra_total > 0
        );
        let findings = diff.findings();
        if diff.outcome == DiffOutcome::Drift {
            prop_assert_eq!(findings.len(), diff.mismatch_count());
        } else {
            prop_assert_eq!(findings.len(), 1);
        }
    }
}
