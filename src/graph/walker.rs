//! Ancestor walks: reconstruct the call stack above a sampled node.
//!
//! The flattened format cannot tell which parent of a shared node was the
//! real caller for a given sample. [`ParentPolicy::FirstParent`] resolves
//! this deterministically to the first parent met while indexing;
//! [`ParentPolicy::Strict`] refuses to guess and stops the walk instead.

use super::adjacency::AdjacencyIndex;
use crate::parser::{Profile, ProfileNode};
use std::collections::HashSet;

/// How a walk picks a caller for a node with several parents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentPolicy {
    /// Follow the first parent recorded during indexing
    #[default]
    FirstParent,
    /// Stop at the first node with more than one parent
    Strict,
}

/// Why a walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEnd {
    /// Reached a node without parents
    Root,
    /// Hit the depth ceiling while a parent was still available
    Truncated,
    /// The next parent was already on the walked chain
    Cycle,
    /// The starting node is not in the node table
    DeadEnd,
    /// Strict mode met a node with several parents
    Ambiguous,
}

/// A single reconstructed step of a call stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStackFrame {
    pub node_id: u64,
    pub function_name: String,
    pub url: String,
    pub line_number: i64,
    label: String,
}

impl CallStackFrame {
    fn from_node(node: &ProfileNode) -> Self {
        Self {
            node_id: node.id,
            function_name: node.function_name.clone(),
            url: node.url.clone(),
            line_number: node.line_number,
            label: node.label(),
        }
    }

    /// `functionName@shortFileName:lineNumber`
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Result of [`walk_up`]: frames innermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorWalk {
    pub frames: Vec<CallStackFrame>,
    pub end: WalkEnd,
}

impl AncestorWalk {
    /// Index of `node_id` in `frames`, if the walk passed through it
    pub fn position_of(&self, node_id: u64) -> Option<usize> {
        self.frames.iter().position(|f| f.node_id == node_id)
    }

    /// True if the walk stopped somewhere other than a genuine root
    pub fn is_incomplete(&self) -> bool {
        matches!(self.end, WalkEnd::Truncated | WalkEnd::Ambiguous)
    }
}

/// Walk from `node_id` towards the root
///
/// **Public** - used by caller aggregation
///
/// # Arguments
/// * `node_id` - Node to start from (included as the first frame)
/// * `profile` - Source of frame names and locations
/// * `adjacency` - Parent edges
/// * `max_depth` - Maximum number of frames to collect
/// * `policy` - How to treat nodes with several parents
///
/// # Returns
/// The frames visited, never containing the same node twice, and the
/// reason the walk stopped
pub fn walk_up(
    node_id: u64,
    profile: &Profile,
    adjacency: &AdjacencyIndex,
    max_depth: usize,
    policy: ParentPolicy,
) -> AncestorWalk {
    let mut frames = Vec::new();
    let mut visited = HashSet::new();
    let mut current = node_id;

    let end = loop {
        let Some(node) = profile.node(current) else {
            break WalkEnd::DeadEnd;
        };

        if frames.len() >= max_depth {
            break WalkEnd::Truncated;
        }

        visited.insert(current);
        frames.push(CallStackFrame::from_node(node));

        let parents = adjacency.parents_of(current);
        let Some(&parent) = parents.first() else {
            break WalkEnd::Root;
        };

        if policy == ParentPolicy::Strict && parents.len() > 1 {
            break WalkEnd::Ambiguous;
        }

        if visited.contains(&parent) {
            break WalkEnd::Cycle;
        }

        current = parent;
    };

    AncestorWalk { frames, end }
}
