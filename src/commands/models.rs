use crate::graph::ParentPolicy;
use crate::utils::config::{DEFAULT_MAX_DEPTH, DEFAULT_TOP_N};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the .cpuprofile file
    pub profile_path: PathBuf,

    /// Function name (exact or substring) to analyze
    pub function_name: Option<String>,

    /// Substring of the script url to restrict targets to
    pub file: Option<String>,

    /// Number of rows per ranked section
    pub top_n: usize,

    /// Maximum frames collected per ancestor walk
    pub max_depth: usize,

    /// Stop walks at nodes with several parents instead of picking the first
    pub strict_parents: bool,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            profile_path: PathBuf::from("profile.cpuprofile"),
            function_name: None,
            file: None,
            top_n: DEFAULT_TOP_N,
            max_depth: DEFAULT_MAX_DEPTH,
            strict_parents: false,
            output_json: None,
        }
    }
}

impl AnalyzeArgs {
    pub fn parent_policy(&self) -> ParentPolicy {
        if self.strict_parents {
            ParentPolicy::Strict
        } else {
            ParentPolicy::FirstParent
        }
    }
}
