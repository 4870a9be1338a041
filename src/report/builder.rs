//! Build ranked, bounded analysis reports.
//!
//! With a target filter, each matched node gets a caller section and a
//! callee section. Without one, the report falls back to the top nodes by
//! `hitCount` and never touches the stack machinery.

use super::schema::{
    AnalysisReport, CalleeRow, CalleeSection, CallerPathRow, CallerSection, HotNodeRow,
    ProfileOverview, TargetReport,
};
use super::targets::{find_targets, TargetFilter};
use crate::aggregator::{
    aggregate_callers, count_descendant_samples, summarize_callers, AggregatedStackEntry,
    CalleeAggregation, CallerAggregation,
};
use crate::graph::{build_adjacency, collect_descendants, AdjacencyIndex, ParentPolicy};
use crate::parser::{Profile, ProfileNode};
use crate::utils::config::{
    DEFAULT_MAX_DEPTH, DEFAULT_TOP_N, MICROS_PER_MILLI, REPORT_SCHEMA_VERSION,
};
use chrono::Utc;
use log::{debug, info};

/// Parameters for one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub filter: TargetFilter,
    pub top_n: usize,
    pub max_depth: usize,
    pub parent_policy: ParentPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            filter: TargetFilter::default(),
            top_n: DEFAULT_TOP_N,
            max_depth: DEFAULT_MAX_DEPTH,
            parent_policy: ParentPolicy::FirstParent,
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_parent_policy(mut self, parent_policy: ParentPolicy) -> Self {
        self.parent_policy = parent_policy;
        self
    }
}

/// Build the full report for a loaded profile
///
/// **Public** - main entry point for analysis
///
/// # Arguments
/// * `profile` - Loaded profile
/// * `options` - Filter, result size and walk parameters
///
/// # Returns
/// A report ready for text rendering or JSON output. Zero matched targets
/// is a valid report, not an error.
pub fn build_report(profile: &Profile, options: &AnalysisOptions) -> AnalysisReport {
    let overview = build_overview(profile);

    let (hot_nodes, targets) = if options.filter.is_empty() {
        info!("No target filter, ranking top {} nodes by hit count", options.top_n);
        (Some(rank_hot_nodes(profile, options.top_n)), None)
    } else {
        let matched = find_targets(profile, &options.filter);
        info!("Target nodes found: {}", matched.len());

        let reports = if matched.is_empty() {
            Vec::new()
        } else {
            let adjacency = build_adjacency(profile.nodes());
            matched
                .into_iter()
                .map(|node| analyze_target(profile, &adjacency, node, options))
                .collect()
        };
        (None, Some(reports))
    };

    AnalysisReport {
        version: REPORT_SCHEMA_VERSION.to_string(),
        filter: options.filter.clone(),
        overview,
        hot_nodes,
        targets,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Whole-profile figures for the report header
pub fn build_overview(profile: &Profile) -> ProfileOverview {
    ProfileOverview {
        node_count: profile.nodes().len(),
        sample_count: profile.samples().len(),
        duration_secs: profile.duration_secs(),
        sampled_ms: to_ms(profile.total_sampled_micros()),
        total_hits: profile.total_hits(),
    }
}

/// Rank nodes with direct hits by `hitCount`
///
/// **Public** - fallback report when no target filter is supplied
pub fn rank_hot_nodes(profile: &Profile, top_n: usize) -> Vec<HotNodeRow> {
    let total_hits = profile.total_hits();

    let mut nodes: Vec<&ProfileNode> = profile
        .nodes()
        .iter()
        .filter(|node| node.hit_count > 0)
        .collect();
    nodes.sort_by(|a, b| b.hit_count.cmp(&a.hit_count).then_with(|| a.id.cmp(&b.id)));

    nodes
        .into_iter()
        .take(top_n)
        .map(|node| HotNodeRow {
            node_id: node.id,
            function_name: node.display_name().to_string(),
            hit_count: node.hit_count,
            percentage: percentage(node.hit_count, total_hits),
            location: node.location(),
        })
        .collect()
}

/// Run caller and callee analysis for one matched node
///
/// **Private** - internal helper for build_report
fn analyze_target(
    profile: &Profile,
    adjacency: &AdjacencyIndex,
    node: &ProfileNode,
    options: &AnalysisOptions,
) -> TargetReport {
    debug!("Analyzing target {} ({})", node.id, node.label());

    let descendants = collect_descendants(node.id, adjacency);

    let callers = aggregate_callers(
        profile,
        adjacency,
        node.id,
        &descendants,
        options.max_depth,
        options.parent_policy,
    );
    let callees = count_descendant_samples(profile, node.id, &descendants);

    TargetReport {
        node_id: node.id,
        function_name: node.display_name().to_string(),
        location: node.location(),
        hit_count: node.hit_count,
        callers: build_caller_section(&callers, options.top_n),
        callees: build_callee_section(profile, &callees, options.top_n),
    }
}

/// Convert a caller aggregation into its top-N section
pub fn build_caller_section(aggregation: &CallerAggregation, top_n: usize) -> CallerSection {
    let summary = summarize_callers(&aggregation.entries);
    debug!("Target {} callers: {}", aggregation.target_id, summary.summary());

    let rows = aggregation
        .entries
        .iter()
        .take(top_n)
        .map(|entry| caller_row(entry, summary.total_samples))
        .collect();

    CallerSection {
        rows,
        total_samples: summary.total_samples,
        total_ms: to_ms(summary.total_micros),
        avg_ms: summary.avg_micros / MICROS_PER_MILLI,
        median_ms: to_ms(summary.median_micros),
        unique_stacks: summary.unique_stacks,
        skipped_samples: aggregation.skipped_samples,
    }
}

fn caller_row(entry: &AggregatedStackEntry, total_samples: u64) -> CallerPathRow {
    CallerPathRow {
        callers: entry.callers.iter().map(|f| f.label().to_string()).collect(),
        signature: entry.signature.clone(),
        incomplete: entry.incomplete,
        sample_count: entry.count,
        percentage: percentage(entry.count, total_samples),
        avg_ms: entry.avg_micros() / MICROS_PER_MILLI,
        min_ms: to_ms(entry.min_micros()),
        max_ms: to_ms(entry.max_micros()),
        total_ms: to_ms(entry.total_micros),
    }
}

/// Convert a callee aggregation into its top-N section
pub fn build_callee_section(
    profile: &Profile,
    aggregation: &CalleeAggregation,
    top_n: usize,
) -> CalleeSection {
    let rows = aggregation
        .entries
        .iter()
        .take(top_n)
        .filter_map(|entry| {
            let node = profile.node(entry.node_id)?;
            Some(CalleeRow {
                node_id: entry.node_id,
                function_name: node.display_name().to_string(),
                sample_count: entry.sample_count,
                percentage: percentage(entry.sample_count, aggregation.descendant_samples),
                total_ms: to_ms(entry.total_micros),
                location: node.location(),
            })
        })
        .collect();

    CalleeSection {
        rows,
        self_samples: aggregation.self_samples,
        descendant_samples: aggregation.descendant_samples,
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        (part as f64 / whole as f64) * 100.0
    } else {
        0.0
    }
}

fn to_ms(micros: u64) -> f64 {
    micros as f64 / MICROS_PER_MILLI
}
