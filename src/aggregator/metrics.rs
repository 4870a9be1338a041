//! Callee sample counts and caller summary statistics.
//!
//! Callee analysis answers "what does the target spend its time calling":
//! every sample that landed exactly on one of the target's descendants is
//! counted against that descendant.

use super::stack_builder::AggregatedStackEntry;
use crate::parser::Profile;
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Samples that landed exactly on one descendant node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescendantSampleEntry {
    pub node_id: u64,
    pub sample_count: u64,
    pub total_micros: u64,
}

/// Callee analysis result for one target node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalleeAggregation {
    pub target_id: u64,

    /// Ranked by sample count desc, then node id
    pub entries: Vec<DescendantSampleEntry>,

    /// Samples that landed on the target itself
    pub self_samples: u64,

    /// Sum of `sample_count` over all entries
    pub descendant_samples: u64,
}

/// Count samples per descendant of `target_id`
///
/// **Public** - main entry point for callee analysis
///
/// `descendants` is the target's subtree from `collect_descendants`, shared
/// with the caller analysis of the same target.
pub fn count_descendant_samples(
    profile: &Profile,
    target_id: u64,
    descendants: &BTreeSet<u64>,
) -> CalleeAggregation {
    let mut counts: HashMap<u64, DescendantSampleEntry> = HashMap::new();
    let mut self_samples: u64 = 0;

    for sample in profile.samples() {
        if sample.node_id == target_id {
            self_samples += 1;
        }

        if descendants.contains(&sample.node_id) {
            let entry = counts
                .entry(sample.node_id)
                .or_insert_with(|| DescendantSampleEntry {
                    node_id: sample.node_id,
                    sample_count: 0,
                    total_micros: 0,
                });
            entry.sample_count += 1;
            entry.total_micros += sample.cost_micros();
        }
    }

    let mut entries: Vec<DescendantSampleEntry> = counts.into_values().collect();
    entries.sort_by(|a, b| {
        b.sample_count
            .cmp(&a.sample_count)
            .then_with(|| a.node_id.cmp(&b.node_id))
    });

    let descendant_samples: u64 = entries.iter().map(|e| e.sample_count).sum();

    debug!(
        "Target {}: {} descendants, {} sampled, {} descendant samples",
        target_id,
        descendants.len(),
        entries.len(),
        descendant_samples
    );

    CalleeAggregation {
        target_id,
        entries,
        self_samples,
        descendant_samples,
    }
}

/// Totals across every aggregated caller entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallerSummary {
    pub total_samples: u64,

    pub total_micros: u64,

    pub avg_micros: f64,

    /// Median single-sample cost across all entries
    pub median_micros: u64,

    pub unique_stacks: usize,
}

impl CallerSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Samples: {} | Time: {}us | Avg: {:.1}us | Median: {}us | Stacks: {}",
            self.total_samples,
            self.total_micros,
            self.avg_micros,
            self.median_micros,
            self.unique_stacks
        )
    }
}

/// Calculate caller summary statistics
///
/// **Public** - provides summary totals for the report
pub fn summarize_callers(entries: &[AggregatedStackEntry]) -> CallerSummary {
    if entries.is_empty() {
        return CallerSummary::default();
    }

    let total_samples: u64 = entries.iter().map(|e| e.count).sum();
    let total_micros: u64 = entries.iter().map(|e| e.total_micros).sum();

    let mut costs: Vec<u64> = entries
        .iter()
        .flat_map(|e| e.sample_micros.iter().copied())
        .collect();
    costs.sort_unstable();
    let median_micros = costs.get(costs.len() / 2).copied().unwrap_or(0);

    CallerSummary {
        total_samples,
        total_micros,
        avg_micros: if total_samples > 0 {
            total_micros as f64 / total_samples as f64
        } else {
            0.0
        },
        median_micros,
        unique_stacks: entries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::stack_builder::aggregate_callers;
    use crate::graph::{build_adjacency, collect_descendants, ParentPolicy};
    use crate::parser::load;
    use serde_json::json;

    fn profile() -> Profile {
        let value = json!({
            "nodes": [
                {"id": 1, "callFrame": {"functionName": "root"}, "children": [2]},
                {"id": 2, "callFrame": {"functionName": "handler"}, "hitCount": 1, "children": [3, 4]},
                {"id": 3, "callFrame": {"functionName": "parse"}, "hitCount": 3},
                {"id": 4, "callFrame": {"functionName": "render"}, "hitCount": 3}
            ],
            "samples": [3, 4, 3, 2, 4, 3, 4],
            "timeDeltas": [1, 2, 3, 4, 5, 6, 7]
        });
        load(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_count_descendant_samples() {
        let profile = profile();
        let adjacency = build_adjacency(profile.nodes());

        let descendants = collect_descendants(2, &adjacency);

        let callees = count_descendant_samples(&profile, 2, &descendants);

        assert_eq!(callees.self_samples, 1);
        assert_eq!(callees.descendant_samples, 6);
        // Ties on count fall back to node id
        assert_eq!(callees.entries[0].node_id, 3);
        assert_eq!(callees.entries[0].sample_count, 3);
        assert_eq!(callees.entries[0].total_micros, 10);
        assert_eq!(callees.entries[1].node_id, 4);
        assert_eq!(callees.entries[1].total_micros, 14);
    }

    #[test]
    fn test_leaf_target_has_no_callees() {
        let profile = profile();
        let adjacency = build_adjacency(profile.nodes());

        let descendants = collect_descendants(3, &adjacency);

        let callees = count_descendant_samples(&profile, 3, &descendants);
        assert!(callees.entries.is_empty());
        assert_eq!(callees.self_samples, 3);
    }

    #[test]
    fn test_summarize_callers() {
        let profile = profile();
        let adjacency = build_adjacency(profile.nodes());

        let descendants = collect_descendants(2, &adjacency);

        let callers = aggregate_callers(
            &profile,
            &adjacency,
            2,
            &descendants,
            20,
            ParentPolicy::FirstParent,
        );
        let summary = summarize_callers(&callers.entries);

        assert_eq!(summary.total_samples, 7);
        assert_eq!(summary.total_micros, 28);
        assert_eq!(summary.avg_micros, 4.0);
        assert_eq!(summary.median_micros, 4);
        assert_eq!(summary.unique_stacks, 1);
        assert_eq!(
            summary.summary(),
            "Samples: 7 | Time: 28us | Avg: 4.0us | Median: 4us | Stacks: 1"
        );
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize_callers(&[]);
        assert_eq!(summary.total_samples, 0);
        assert_eq!(summary.unique_stacks, 0);
    }
}
