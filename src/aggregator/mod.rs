//! Aggregation of sampled stacks around a target node.
//!
//! This module transforms a profile and its adjacency into:
//! - Caller signatures (who calls the target, how often, at what cost)
//! - Callee sample counts (what the target spends its time calling)
//! - Summary statistics over the caller entries

pub mod metrics;
pub mod stack_builder;

// Re-export main types and functions
pub use metrics::{
    count_descendant_samples, summarize_callers, CalleeAggregation, CallerSummary,
    DescendantSampleEntry,
};
pub use stack_builder::{
    aggregate_callers, build_signature, AggregatedStackEntry, CallerAggregation,
};
