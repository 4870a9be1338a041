use cpuprofile_analyzer::aggregator::{aggregate_callers, CallerAggregation};
use cpuprofile_analyzer::graph::{
    build_adjacency, collect_descendants, walk_up, AdjacencyIndex, ParentPolicy,
};
use cpuprofile_analyzer::parser::{load, Profile};
use cpuprofile_analyzer::report::{build_report, render_report, AnalysisOptions, TargetFilter};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;

fn profile_from(value: serde_json::Value) -> Profile {
    load(value.to_string().as_bytes()).unwrap()
}

fn first_parent_callers(
    profile: &Profile,
    adjacency: &AdjacencyIndex,
    target: u64,
) -> CallerAggregation {
    let descendants = collect_descendants(target, adjacency);
    aggregate_callers(
        profile,
        adjacency,
        target,
        &descendants,
        20,
        ParentPolicy::FirstParent,
    )
}

/// root(0) -> A(1) -> B(2)
fn three_node_profile(samples: &[u64]) -> Profile {
    profile_from(json!({
        "startTime": 0,
        "endTime": 600,
        "nodes": [
            {"id": 0, "callFrame": {"functionName": "root", "url": "/app/main.js", "lineNumber": 0}, "hitCount": 0, "children": [1]},
            {"id": 1, "callFrame": {"functionName": "A", "url": "/app/a.js", "lineNumber": 10}, "hitCount": 2, "children": [2]},
            {"id": 2, "callFrame": {"functionName": "B", "url": "/app/b.js", "lineNumber": 20}, "hitCount": 3, "children": []}
        ],
        "samples": samples,
        "timeDeltas": [100, 200, 300]
    }))
}

/// Deterministic multi-parent graph with recursion and a self edge
fn tangled_profile() -> Profile {
    let mut nodes = Vec::new();
    let mut state: u64 = 0x2545_f491;
    let count = 60u64;

    for id in 1..=count {
        let mut children = Vec::new();
        for _ in 0..3 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let child = 1 + (state >> 33) % count;
            if child > id || child == 7 {
                children.push(child);
            }
        }
        if id == 7 {
            children.push(7);
        }
        nodes.push(json!({
            "id": id,
            "callFrame": {"functionName": format!("fn{}", id % 13), "url": format!("/src/m{}.js", id % 5), "lineNumber": id},
            "hitCount": id % 4,
            "children": children
        }));
    }

    let mut samples = Vec::new();
    let mut deltas = Vec::new();
    for i in 0..500u64 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        samples.push(1 + (state >> 33) % count);
        deltas.push((i % 17) as i64 * 10);
    }

    profile_from(json!({
        "startTime": 0,
        "endTime": 5_000_000,
        "nodes": nodes,
        "samples": samples,
        "timeDeltas": deltas
    }))
}

#[test]
fn test_three_node_scenario_all_samples_on_target() {
    let profile = three_node_profile(&[2, 2, 2]);
    let adjacency = build_adjacency(profile.nodes());

    let result = first_parent_callers(&profile, &adjacency, 2);

    assert_eq!(result.entries.len(), 1);
    let entry = &result.entries[0];
    let names: Vec<&str> = entry.callers.iter().map(|f| f.function_name.as_str()).collect();
    assert_eq!(names, vec!["root", "A"]);
    assert_eq!(entry.signature, "root@main.js:0 -> A@a.js:10");
    assert_eq!(entry.count, 3);
    assert_eq!(entry.total_micros, 600);
}

#[test]
fn test_three_node_scenario_caller_sample_not_counted() {
    // The sample on A never has B on its stack
    let profile = three_node_profile(&[1, 2, 2]);
    let adjacency = build_adjacency(profile.nodes());

    let result = first_parent_callers(&profile, &adjacency, 2);

    assert_eq!(result.entries[0].count, 2);
    assert_eq!(result.entries[0].total_micros, 500);
    assert_eq!(result.skipped_samples, 0);
}

#[test]
fn test_three_node_report_by_name() {
    let profile = three_node_profile(&[2, 2, 2]);
    let filter = TargetFilter::new(Some("B".to_string()), None);
    let report = build_report(&profile, &AnalysisOptions::new().with_filter(filter));

    let targets = report.targets.unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].callers.total_samples, 3);
    assert_eq!(targets[0].callers.total_ms, 0.6);
    assert_eq!(targets[0].callers.avg_ms, 0.2);
}

#[test]
fn test_zero_matches_reported() {
    let profile = three_node_profile(&[2, 2, 2]);
    let filter = TargetFilter::new(Some("nope".to_string()), None);
    let report = build_report(&profile, &AnalysisOptions::new().with_filter(filter));

    assert_eq!(report.target_count(), 0);
    assert!(render_report(&report).contains("Target Nodes Found: 0"));
}

#[test]
fn test_empty_samples() {
    let profile = profile_from(json!({
        "nodes": [
            {"id": 1, "callFrame": {"functionName": "main"}, "hitCount": 4, "children": [2]},
            {"id": 2, "callFrame": {"functionName": "work"}, "hitCount": 9}
        ],
        "samples": [],
        "timeDeltas": []
    }));

    let filter = TargetFilter::new(Some("work".to_string()), None);
    let report = build_report(&profile, &AnalysisOptions::new().with_filter(filter));
    let targets = report.targets.unwrap();
    assert!(targets[0].callers.rows.is_empty());
    assert_eq!(targets[0].callers.total_samples, 0);

    let fallback = build_report(&profile, &AnalysisOptions::new());
    let hot: Vec<u64> = fallback.hot_nodes.unwrap().iter().map(|r| r.node_id).collect();
    assert_eq!(hot, vec![2, 1]);
}

#[test]
fn test_walks_never_repeat_nodes() {
    let profile = tangled_profile();
    let adjacency = build_adjacency(profile.nodes());

    for node in profile.nodes() {
        for policy in [ParentPolicy::FirstParent, ParentPolicy::Strict] {
            let walk = walk_up(node.id, &profile, &adjacency, 20, policy);
            let unique: HashSet<u64> = walk.frames.iter().map(|f| f.node_id).collect();
            assert_eq!(unique.len(), walk.frames.len());
            assert!(walk.frames.len() <= 20);
        }
    }
}

#[test]
fn test_descendants_terminate_with_self_edge() {
    let profile = tangled_profile();
    let adjacency = build_adjacency(profile.nodes());

    let found = collect_descendants(7, &adjacency);
    assert!(found.contains(&7));
    assert!(found.len() <= profile.nodes().len());
}

#[test]
fn test_counts_match_samples_containing_target() {
    let profile = tangled_profile();
    let adjacency = build_adjacency(profile.nodes());

    for target in [1u64, 7, 12, 30] {
        let result = first_parent_callers(&profile, &adjacency, target);
        let counted: u64 = result.entries.iter().map(|e| e.count).sum();

        let expected = profile
            .samples()
            .iter()
            .filter(|s| {
                walk_up(s.node_id, &profile, &adjacency, 20, ParentPolicy::FirstParent)
                    .position_of(target)
                    .is_some()
            })
            .count() as u64;

        assert_eq!(counted, expected, "target {}", target);
        assert_eq!(result.qualifying_samples, expected);
    }
}

#[test]
fn test_caller_analysis_is_deterministic() {
    let profile = tangled_profile();
    let filter = TargetFilter::new(Some("fn3".to_string()), None);
    let options = AnalysisOptions::new().with_filter(filter).with_top_n(50);

    let first = build_report(&profile, &options);
    let second = build_report(&profile, &options);

    assert_eq!(first.targets, second.targets);
    assert_eq!(first.hot_nodes, second.hot_nodes);
}
