//! JSON reporter output shape.

use contour_analysis::reporters::{json::JsonReporter, Reporter};
use contour_analysis::run_audit;
use contour_core::config::ContourConfig;

#[test]
fn test_json_report_carries_summary_and_findings() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("backend/src/routes")).unwrap();
    std::fs::create_dir_all(root.join("frontend/src/lib")).unwrap();
    std::fs::write(
        root.join("backend/src/app.ts"),
        "import items from './routes/items';\napp.use('/api/items', items);\n",
    )
    .unwrap();
    std::fs::write(
        root.join("backend/src/routes/items.ts"),
        "router.get('/', list);\nrouter.post('/', create);\n",
    )
    .unwrap();
    std::fs::write(
        root.join("frontend/src/lib/api.ts"),
        "api.get('/api/items');\napi.delete('/api/items/1');\n",
    )
    .unwrap();

    let report = run_audit(root, &ContourConfig::default()).unwrap().data;
    let reporter = JsonReporter;
    assert_eq!(reporter.name(), "json");

    let output = reporter.generate(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let summary = &value["summary"];
    assert_eq!(summary["outcome"], "drift");
    assert_eq!(summary["backend_endpoints"], 2);
    assert_eq!(summary["frontend_calls"], 2);
    assert_eq!(summary["missing_in_frontend"], 1);
    assert_eq!(summary["extra_in_frontend"], 1);
    assert_eq!(summary["truncated"], false);
    assert_eq!(summary["failed_stages"], 0);
    assert_eq!(summary["findings_by_severity"]["high"], 1);
    assert_eq!(summary["findings_by_severity"]["medium"], 1);

    let findings = value["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[1]["severity"], "high");
    assert_eq!(findings[1]["line"], 2);

    assert_eq!(value["contract_diff"]["missing_in_frontend"][0]["method"], "POST");
    assert_eq!(value["stages"].as_array().unwrap().len(), 6);
    assert_eq!(value["stages"][0]["stage"], "route_mounts");
    assert_eq!(
        value["component_map"]["routes"][0]["endpoints"][1]["full_path"],
        "/api/items"
    );
}
