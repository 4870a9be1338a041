//! Plain-text rendering of analysis reports.

use super::schema::{AnalysisReport, CalleeSection, CallerSection, HotNodeRow, TargetReport};
use crate::utils::config::SIGNATURE_SEPARATOR;

const RULE_WIDTH: usize = 80;

const NO_MATCH_HINT: &str =
    "No node with direct hits matched. Try a shorter function name or drop the file filter.";

/// Render a report for terminal output
///
/// **Public** - used by the analyze command
pub fn render_report(report: &AnalysisReport) -> String {
    let mut lines = Vec::new();
    let rule = "=".repeat(RULE_WIDTH);

    lines.push(rule.clone());
    lines.push("CPU PROFILE ANALYSIS".to_string());
    lines.push(rule.clone());
    lines.push(format!("Nodes:    {}", report.overview.node_count));
    lines.push(format!("Samples:  {}", report.overview.sample_count));
    lines.push(format!("Duration: {:.2}s", report.overview.duration_secs));
    lines.push(format!("Sampled:  {:.2}ms", report.overview.sampled_ms));

    if let Some(hot_nodes) = &report.hot_nodes {
        render_hot_nodes(&mut lines, hot_nodes);
    }

    if let Some(targets) = &report.targets {
        if let Some(name) = &report.filter.function_name {
            lines.push(format!("Target Function: {}", name));
        }
        if let Some(file) = &report.filter.file {
            lines.push(format!("Target File: {}", file));
        }
        lines.push(format!("Target Nodes Found: {}", targets.len()));

        if targets.is_empty() {
            lines.push(NO_MATCH_HINT.to_string());
        }

        for (i, target) in targets.iter().enumerate() {
            render_target(&mut lines, i + 1, target);
        }
    }

    lines.push(rule);
    lines.join("\n")
}

fn render_hot_nodes(lines: &mut Vec<String>, rows: &[HotNodeRow]) {
    lines.push(String::new());
    lines.push("TOP FUNCTIONS BY HIT COUNT".to_string());
    lines.push(format!(
        "{:>4}  {:>8}  {:>7}  {:<30}  LOCATION",
        "#", "HITS", "%", "FUNCTION"
    ));

    for (i, row) in rows.iter().enumerate() {
        lines.push(format!(
            "{:>4}  {:>8}  {:>6.1}%  {:<30}  {}",
            i + 1,
            row.hit_count,
            row.percentage,
            row.function_name,
            row.location
        ));
    }
}

fn render_target(lines: &mut Vec<String>, index: usize, target: &TargetReport) {
    lines.push(String::new());
    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!(
        "[{}] {} (node {}, {} hits) at {}",
        index, target.function_name, target.node_id, target.hit_count, target.location
    ));
    lines.push("-".repeat(RULE_WIDTH));

    render_callers(lines, &target.callers);
    render_callees(lines, &target.callees);
}

fn render_callers(lines: &mut Vec<String>, section: &CallerSection) {
    lines.push("CALLERS".to_string());

    if section.rows.is_empty() {
        lines.push("  (no samples with this node on the stack)".to_string());
    }

    for (i, row) in section.rows.iter().enumerate() {
        let chain = if row.callers.is_empty() {
            row.signature.clone()
        } else {
            row.signature.replace(SIGNATURE_SEPARATOR, "\n       -> ")
        };
        lines.push(format!(
            "  {:>2}. {} samples ({:.1}%), avg {:.3}ms, total {:.3}ms{}",
            i + 1,
            row.sample_count,
            row.percentage,
            row.avg_ms,
            row.total_ms,
            if row.incomplete { " [incomplete]" } else { "" }
        ));
        lines.push(format!("       {}", chain));
    }

    lines.push(format!(
        "  Total: {} samples, {:.3}ms, avg {:.3}ms, {} unique stacks",
        section.total_samples, section.total_ms, section.avg_ms, section.unique_stacks
    ));
    if section.skipped_samples > 0 {
        lines.push(format!(
            "  Skipped: {} samples whose reconstructed stack did not reach this node",
            section.skipped_samples
        ));
    }
}

fn render_callees(lines: &mut Vec<String>, section: &CalleeSection) {
    lines.push("CALLEES".to_string());
    lines.push(format!(
        "  Self samples: {}, descendant samples: {}",
        section.self_samples, section.descendant_samples
    ));

    for (i, row) in section.rows.iter().enumerate() {
        lines.push(format!(
            "  {:>2}. {:<30} {:>6} samples ({:>5.1}%)  {}",
            i + 1,
            row.function_name,
            row.sample_count,
            row.percentage,
            row.location
        ));
    }
}
