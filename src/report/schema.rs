//! Output schema definitions for analysis reports.
//!
//! This module defines the structure rendered as text and written as JSON.
//! Schema is versioned to allow future evolution.

use super::targets::TargetFilter;
use serde::{Deserialize, Serialize};

/// Top-level analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Filter the report was built with
    pub filter: TargetFilter,

    pub overview: ProfileOverview,

    /// Top nodes by hit count, present when no filter was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot_nodes: Option<Vec<HotNodeRow>>,

    /// One section per matched node, present when a filter was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<TargetReport>>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

impl AnalysisReport {
    /// Number of matched target nodes (0 in hot-node mode)
    pub fn target_count(&self) -> usize {
        self.targets.as_ref().map_or(0, Vec::len)
    }
}

/// Whole-profile figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOverview {
    pub node_count: usize,
    pub sample_count: usize,
    pub duration_secs: f64,
    pub sampled_ms: f64,
    pub total_hits: u64,
}

/// Row of the fallback report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotNodeRow {
    pub node_id: u64,
    pub function_name: String,
    pub hit_count: u64,
    /// Percentage of the profile's total hit count
    pub percentage: f64,
    pub location: String,
}

/// Caller and callee analysis for one matched node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetReport {
    pub node_id: u64,
    pub function_name: String,
    pub location: String,
    pub hit_count: u64,
    pub callers: CallerSection,
    pub callees: CalleeSection,
}

/// Ranked caller chains plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerSection {
    pub rows: Vec<CallerPathRow>,
    pub total_samples: u64,
    pub total_ms: f64,
    pub avg_ms: f64,
    pub median_ms: f64,
    pub unique_stacks: usize,
    /// Samples under the target whose walk never reached it
    pub skipped_samples: u64,
}

/// One aggregated caller chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerPathRow {
    /// Caller labels, outermost first
    pub callers: Vec<String>,
    pub signature: String,
    /// Chain stopped at the depth ceiling or an ambiguous parent
    pub incomplete: bool,
    pub sample_count: u64,
    /// Percentage of the target's qualifying samples
    pub percentage: f64,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub total_ms: f64,
}

/// Ranked descendants by exact sample count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalleeSection {
    pub rows: Vec<CalleeRow>,
    pub self_samples: u64,
    pub descendant_samples: u64,
}

/// One descendant of the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalleeRow {
    pub node_id: u64,
    pub function_name: String,
    pub sample_count: u64,
    /// Percentage of all sampled-descendant samples
    pub percentage: f64,
    pub total_ms: f64,
    pub location: String,
}
