//! Group per-sample call stacks into caller signatures.
//!
//! For a target node, every sample whose reconstructed ancestor chain
//! passes through the target is attributed to the chain of callers above
//! the target. Equal caller chains collapse into one entry.
//!
//! Signature format: `outer@file.js:1 -> middle@file.js:7 -> inner@lib.js:30`

use crate::graph::{walk_up, AdjacencyIndex, CallStackFrame, ParentPolicy, WalkEnd};
use crate::parser::Profile;
use crate::utils::config::{AMBIGUOUS_MARKER, NO_CALLERS, SIGNATURE_SEPARATOR, TRUNCATED_MARKER};
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// One equivalence class of caller paths
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedStackEntry {
    /// Caller frames, outermost first, excluding the target
    pub callers: Vec<CallStackFrame>,

    /// Deterministic key built from the caller labels
    pub signature: String,

    /// Set when the walk stopped before a genuine root
    pub incomplete: bool,

    pub count: u64,

    pub total_micros: u64,

    /// Cost of each contributing sample, in sample order
    pub sample_micros: Vec<u64>,
}

impl AggregatedStackEntry {
    fn new(callers: Vec<CallStackFrame>, signature: String, incomplete: bool) -> Self {
        Self {
            callers,
            signature,
            incomplete,
            count: 0,
            total_micros: 0,
            sample_micros: Vec::new(),
        }
    }

    fn record(&mut self, cost_micros: u64) {
        self.count += 1;
        self.total_micros += cost_micros;
        self.sample_micros.push(cost_micros);
    }

    pub fn avg_micros(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_micros as f64 / self.count as f64
        }
    }

    pub fn min_micros(&self) -> u64 {
        self.sample_micros.iter().copied().min().unwrap_or(0)
    }

    pub fn max_micros(&self) -> u64 {
        self.sample_micros.iter().copied().max().unwrap_or(0)
    }
}

/// Caller analysis result for one target node
#[derive(Debug, Clone, PartialEq)]
pub struct CallerAggregation {
    pub target_id: u64,

    /// Ranked: count desc, then total time desc, then signature
    pub entries: Vec<AggregatedStackEntry>,

    /// Samples attributed to some entry
    pub qualifying_samples: u64,

    /// Samples inside the target's subtree whose walk never reached the target
    pub skipped_samples: u64,
}

/// Aggregate the caller chains of `target_id` over every sample
///
/// **Public** - main entry point for caller analysis
///
/// `descendants` is the target's subtree from `collect_descendants`; only
/// samples on the target or one of those nodes can have it on their stack.
///
/// # Algorithm
/// 1. Filter samples to the target and its descendants
/// 2. Walk up from each such sample node (once per distinct node)
/// 3. Keep walks that contain the target, take the frames above it
/// 4. Aggregate by signature, then rank
pub fn aggregate_callers(
    profile: &Profile,
    adjacency: &AdjacencyIndex,
    target_id: u64,
    descendants: &BTreeSet<u64>,
    max_depth: usize,
    policy: ParentPolicy,
) -> CallerAggregation {
    let mut entries: Vec<AggregatedStackEntry> = Vec::new();
    let mut by_signature: HashMap<String, usize> = HashMap::new();

    // sample node id -> entry slot, None when the walk misses the target
    let mut resolved: HashMap<u64, Option<usize>> = HashMap::new();

    let mut qualifying_samples: u64 = 0;
    let mut skipped_samples: u64 = 0;

    for sample in profile.samples() {
        if sample.node_id != target_id && !descendants.contains(&sample.node_id) {
            continue;
        }

        let slot = *resolved.entry(sample.node_id).or_insert_with(|| {
            resolve_slot(
                sample.node_id,
                profile,
                adjacency,
                target_id,
                max_depth,
                policy,
                &mut entries,
                &mut by_signature,
            )
        });

        match slot {
            Some(idx) => {
                entries[idx].record(sample.cost_micros());
                qualifying_samples += 1;
            }
            None => skipped_samples += 1,
        }
    }

    rank_entries(&mut entries);

    debug!(
        "Target {}: {} qualifying samples, {} skipped, {} unique caller signatures",
        target_id,
        qualifying_samples,
        skipped_samples,
        entries.len()
    );

    CallerAggregation {
        target_id,
        entries,
        qualifying_samples,
        skipped_samples,
    }
}

/// Walk once for a sample node and find (or create) its entry
///
/// **Private** - internal helper for aggregate_callers
#[allow(clippy::too_many_arguments)]
fn resolve_slot(
    node_id: u64,
    profile: &Profile,
    adjacency: &AdjacencyIndex,
    target_id: u64,
    max_depth: usize,
    policy: ParentPolicy,
    entries: &mut Vec<AggregatedStackEntry>,
    by_signature: &mut HashMap<String, usize>,
) -> Option<usize> {
    let walk = walk_up(node_id, profile, adjacency, max_depth, policy);
    let position = walk.position_of(target_id)?;

    let callers: Vec<CallStackFrame> = walk.frames[position + 1..]
        .iter()
        .rev()
        .cloned()
        .collect();
    let signature = build_signature(&callers, walk.end);

    let idx = *by_signature.entry(signature.clone()).or_insert_with(|| {
        entries.push(AggregatedStackEntry::new(
            callers,
            signature,
            walk.is_incomplete(),
        ));
        entries.len() - 1
    });

    Some(idx)
}

/// Build the signature string for a caller chain
///
/// **Public** - exposed for report rendering and tests
///
/// Chains cut short by the depth ceiling or by strict parent resolution
/// start with a marker frame so they never read as root-level calls.
pub fn build_signature(callers: &[CallStackFrame], end: WalkEnd) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(callers.len() + 1);

    match end {
        WalkEnd::Truncated => parts.push(TRUNCATED_MARKER),
        WalkEnd::Ambiguous => parts.push(AMBIGUOUS_MARKER),
        WalkEnd::Root | WalkEnd::Cycle | WalkEnd::DeadEnd => {}
    }

    parts.extend(callers.iter().map(|frame| frame.label()));

    if parts.is_empty() {
        NO_CALLERS.to_string()
    } else {
        parts.join(SIGNATURE_SEPARATOR)
    }
}

/// Sort entries by count, then total time, then signature
///
/// **Private** - deterministic so repeated runs rank identically
fn rank_entries(entries: &mut [AggregatedStackEntry]) {
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.total_micros.cmp(&a.total_micros))
            .then_with(|| a.signature.cmp(&b.signature))
    });
}
