//! Source index tests: caching, absence handling, deterministic listings.

use std::path::Path;

use contour_analysis::index::SourceIndex;
use contour_core::config::ContourConfig;
use contour_core::errors::IndexError;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_each_file_is_read_at_most_once() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "backend/src/app.ts", "app.use('/a', a);");
    let index = SourceIndex::open(dir.path()).unwrap();

    let first = index.read_text("backend/src/app.ts").unwrap();
    let second = index.read_text("backend/src/app.ts").unwrap();
    let third = index.maybe_read_text(index.root().join("backend/src/app.ts")).unwrap();

    assert_eq!(&*first, "app.use('/a', a);");
    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(index.disk_reads(), 1);
    assert_eq!(index.cached_files(), 1);
}

#[test]
fn test_dot_segments_share_a_cache_entry() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "backend/src/routes/a.ts", "x");
    let index = SourceIndex::open(dir.path()).unwrap();

    index.read_text("backend/src/routes/a.ts").unwrap();
    index.read_text("backend/src/./routes/../routes/a.ts").unwrap();
    assert_eq!(index.disk_reads(), 1);
}

#[test]
fn test_missing_file_is_not_found_or_none() {
    let dir = tempfile::tempdir().unwrap();
    let index = SourceIndex::open(dir.path()).unwrap();

    let err = index.read_text("frontend/src/lib/api.ts").unwrap_err();
    assert!(matches!(err, IndexError::NotFound { .. }));
    assert!(index.maybe_read_text("frontend/src/lib/api.ts").is_none());
    assert_eq!(index.disk_reads(), 0);
}

#[test]
fn test_paths_outside_root_are_rejected() {
    let outer = tempfile::tempdir().unwrap();
    write(outer.path(), "secret.txt", "s");
    write(outer.path(), "repo/keep.txt", "k");
    let index = SourceIndex::open(&outer.path().join("repo")).unwrap();

    let err = index.read_text("../secret.txt").unwrap_err();
    assert!(matches!(err, IndexError::OutsideRoot { .. }));
    assert!(index.maybe_read_text("../secret.txt").is_none());
}

#[test]
fn test_listings_are_sorted_filtered_and_skip_hidden() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "backend/src/services/zeta.ts", "");
    write(dir.path(), "backend/src/services/alpha.js", "");
    write(dir.path(), "backend/src/services/nested/beta.ts", "");
    write(dir.path(), "backend/src/services/notes.md", "");
    write(dir.path(), "backend/src/services/.cache/gen.ts", "");
    let index = SourceIndex::open(dir.path()).unwrap();

    let config = ContourConfig::default();
    let listed: Vec<String> = index
        .service_modules(&config)
        .iter()
        .map(|p| index.relative(p))
        .collect();
    assert_eq!(
        listed,
        vec![
            "backend/src/services/alpha.js",
            "backend/src/services/nested/beta.ts",
            "backend/src/services/zeta.ts",
        ]
    );
    assert!(index.route_modules(&config).is_empty());
    assert!(index.is_dir("backend/src/services"));
    assert!(!index.is_dir("backend/src/routes"));
    assert!(index.is_file("backend/src/services/zeta.ts"));
    assert!(!index.is_file("backend/src/services"));
}

#[test]
fn test_open_fails_for_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let err = SourceIndex::open(&dir.path().join("absent")).unwrap_err();
    assert!(err.is_not_found());
}
