use cpuprofile_analyzer::commands::{execute_analyze, load_profile_file, validate_args, AnalyzeArgs};
use cpuprofile_analyzer::output::read_report;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_profile_file() -> NamedTempFile {
    let value = json!({
        "startTime": 100,
        "endTime": 3_000_100,
        "nodes": [
            {"id": 1, "callFrame": {"functionName": "(root)"}, "children": [2, 3]},
            {"id": 2, "callFrame": {"functionName": "render", "url": "/ui/view.js", "lineNumber": 8}, "hitCount": 4, "children": [4]},
            {"id": 3, "callFrame": {"functionName": "render", "url": "/ui/list.js", "lineNumber": 2}, "hitCount": 1, "children": [4]},
            {"id": 4, "callFrame": {"functionName": "layout", "url": "/ui/layout.js", "lineNumber": 30}, "hitCount": 2}
        ],
        "samples": [2, 2, 4, 2, 3, 4, 2],
        "timeDeltas": [10, 10, 10, 10, 10, 10, 10]
    });

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

#[test]
fn test_load_profile_file() {
    let file = write_profile_file();
    let profile = load_profile_file(file.path()).unwrap();

    assert_eq!(profile.nodes().len(), 4);
    assert_eq!(profile.duration_secs(), 3.0);
}

#[test]
fn test_load_invalid_profile_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[1, 2, 3]").unwrap();

    assert!(load_profile_file(file.path()).is_err());
}

#[test]
fn test_execute_analyze_writes_report() {
    let profile = write_profile_file();
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("report.json");

    let args = AnalyzeArgs {
        profile_path: profile.path().to_path_buf(),
        function_name: Some("render".to_string()),
        output_json: Some(out_path.clone()),
        ..Default::default()
    };
    validate_args(&args).unwrap();

    let report = execute_analyze(args).unwrap();
    let targets = report.targets.as_ref().unwrap();

    // Ordered by hit count
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].node_id, 2);
    assert_eq!(targets[1].node_id, 3);

    // Shared layout node resolves to its first parent
    assert_eq!(targets[0].callers.total_samples, 6);
    assert_eq!(targets[1].callers.total_samples, 1);
    assert_eq!(targets[1].callers.skipped_samples, 2);

    let saved = read_report(&out_path).unwrap();
    assert_eq!(saved.targets, report.targets);
}

#[test]
fn test_execute_analyze_strict_parents() {
    let profile = write_profile_file();

    let args = AnalyzeArgs {
        profile_path: profile.path().to_path_buf(),
        function_name: Some("layout".to_string()),
        strict_parents: true,
        ..Default::default()
    };

    let report = execute_analyze(args).unwrap();
    let callers = &report.targets.unwrap()[0].callers;
    assert_eq!(callers.rows.len(), 1);
    assert_eq!(callers.rows[0].signature, "[ambiguous]");
    assert!(callers.rows[0].incomplete);
}

#[test]
fn test_execute_analyze_no_match_succeeds() {
    let profile = write_profile_file();

    let args = AnalyzeArgs {
        profile_path: profile.path().to_path_buf(),
        function_name: Some("missing".to_string()),
        ..Default::default()
    };

    let report = execute_analyze(args).unwrap();
    assert_eq!(report.target_count(), 0);
}

#[test]
fn test_execute_analyze_missing_file_fails() {
    let args = AnalyzeArgs {
        profile_path: "/definitely/not/here.cpuprofile".into(),
        ..Default::default()
    };

    assert!(execute_analyze(args).is_err());
}
