//! Target selection, ranking and rendering of analysis results.
//!
//! This module handles:
//! - Matching target nodes by function name and file
//! - Ranking caller chains and callees into bounded sections
//! - The fallback top-N report by hit count
//! - Plain-text rendering

pub mod builder;
pub mod schema;
pub mod targets;
pub mod text;

// Re-export main types and functions
pub use builder::{build_report, rank_hot_nodes, AnalysisOptions};
pub use schema::{
    AnalysisReport, CalleeRow, CalleeSection, CallerPathRow, CallerSection, HotNodeRow,
    ProfileOverview, TargetReport,
};
pub use targets::{find_targets, TargetFilter};
pub use text::render_report;
