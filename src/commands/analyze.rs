//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the profile file
//! 2. Selects target nodes (or falls back to hot nodes)
//! 3. Aggregates callers and callees per target
//! 4. Prints the text report
//! 5. Optionally writes the JSON report

use super::models::AnalyzeArgs;
use crate::output::write_report;
use crate::parser::{load, Profile};
use crate::report::{build_report, render_report, AnalysisOptions, AnalysisReport, TargetFilter};
use crate::utils::config::{MAX_PROFILE_BYTES, MAX_TOP_N};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was printed, so callers can inspect it
///
/// # Errors
/// * Missing, oversized or malformed profile file
/// * Report file write errors
///
/// Zero matched targets is a successful run.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    info!("Step 1/3: Loading profile {}", args.profile_path.display());
    let profile = load_profile_file(&args.profile_path)?;

    debug!(
        "Profile: {} nodes, {} samples, {:.2}s",
        profile.nodes().len(),
        profile.samples().len(),
        profile.duration_secs()
    );

    info!("Step 2/3: Analyzing...");
    let options = AnalysisOptions::new()
        .with_filter(TargetFilter::new(args.function_name.clone(), args.file.clone()))
        .with_top_n(args.top_n)
        .with_max_depth(args.max_depth)
        .with_parent_policy(args.parent_policy());
    let report = build_report(&profile, &options);

    info!("Step 3/3: Writing results...");
    println!("{}", render_report(&report));

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Read and parse a profile file, rejecting files above the size ceiling
///
/// **Public** - shared by analyze and validate
pub fn load_profile_file(path: &Path) -> Result<Profile> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot access profile file {}", path.display()))?;

    if metadata.len() > MAX_PROFILE_BYTES {
        anyhow::bail!(
            "Profile file is too large ({} bytes, max {})",
            metadata.len(),
            MAX_PROFILE_BYTES
        );
    }

    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read profile file {}", path.display()))?;

    load(&raw).with_context(|| format!("Failed to parse profile {}", path.display()))
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.profile_path.as_os_str().is_empty() {
        anyhow::bail!("Profile path cannot be empty");
    }

    if args.top_n == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top_n > MAX_TOP_N {
        anyhow::bail!("top is too large (max {})", MAX_TOP_N);
    }

    if args.max_depth == 0 {
        anyhow::bail!("max_depth must be greater than 0");
    }

    Ok(())
}
