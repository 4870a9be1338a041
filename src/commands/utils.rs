use super::analyze::load_profile_file;
use crate::graph::build_adjacency;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a profile file and print its structure
pub fn validate_profile_file(file_path: &Path) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = load_profile_file(file_path)?;
    let adjacency = build_adjacency(profile.nodes());

    println!("✓ Valid cpuprofile JSON");
    println!("  Nodes: {}", profile.nodes().len());
    println!("  Edges: {}", adjacency.edge_count());
    println!("  Roots: {}", adjacency.roots().len());
    println!("  Shared Nodes: {}", adjacency.shared_node_count());
    println!("  Samples: {}", profile.samples().len());
    println!("  Total Hits: {}", profile.total_hits());
    println!("  Duration: {:.2}s", profile.duration_secs());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Profile Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Caller and callee analysis for V8 .cpuprofile files.");
}
