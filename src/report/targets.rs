//! Target node selection by function name and file filters.

use crate::parser::{Profile, ProfileNode};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which nodes to analyze
///
/// Empty strings behave like absent filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFilter {
    /// Exact name or substring of the function name
    pub function_name: Option<String>,

    /// Substring of the script url
    pub file: Option<String>,
}

impl TargetFilter {
    pub fn new(function_name: Option<String>, file: Option<String>) -> Self {
        Self {
            function_name: function_name.filter(|s| !s.is_empty()),
            file: file.filter(|s| !s.is_empty()),
        }
    }

    /// True when neither filter is set
    pub fn is_empty(&self) -> bool {
        self.function_name_filter().is_none() && self.file_filter().is_none()
    }

    fn function_name_filter(&self) -> Option<&str> {
        self.function_name.as_deref().filter(|s| !s.is_empty())
    }

    fn file_filter(&self) -> Option<&str> {
        self.file.as_deref().filter(|s| !s.is_empty())
    }

    /// Check a node against both filters and require a direct hit
    pub fn matches(&self, node: &ProfileNode) -> bool {
        let name_ok = match self.function_name_filter() {
            None => true,
            Some(name) => node.function_name == name || node.function_name.contains(name),
        };

        let file_ok = match self.file_filter() {
            None => true,
            Some(file) => node.url.contains(file),
        };

        name_ok && file_ok && node.hit_count > 0
    }
}

/// Find every node matching `filter`
///
/// **Public** - main entry point for target selection
///
/// # Returns
/// Matching nodes ordered by `hitCount` descending, ties by id. An empty
/// result is a normal outcome.
pub fn find_targets<'a>(profile: &'a Profile, filter: &TargetFilter) -> Vec<&'a ProfileNode> {
    let mut targets: Vec<&ProfileNode> = profile
        .nodes()
        .iter()
        .filter(|node| filter.matches(node))
        .collect();

    targets.sort_by(|a, b| b.hit_count.cmp(&a.hit_count).then_with(|| a.id.cmp(&b.id)));

    debug!("Filter {:?} matched {} nodes", filter, targets.len());

    targets
}
