//! Transitive closure over child edges.

use super::adjacency::AdjacencyIndex;
use std::collections::BTreeSet;

/// Collect every node reachable from `node_id` through child edges
///
/// **Public** - used by callee analysis and sample classification
///
/// Iterative depth-first search with a visited set, so deep chains and
/// cycles cannot exhaust the stack. `node_id` itself is only part of the
/// result when some descendant calls back into it. Child ids that are not
/// in the node table are skipped.
pub fn collect_descendants(node_id: u64, adjacency: &AdjacencyIndex) -> BTreeSet<u64> {
    let mut found = BTreeSet::new();
    let mut pending: Vec<u64> = adjacency.children_of(node_id).to_vec();

    while let Some(id) = pending.pop() {
        if !adjacency.contains(id) || !found.insert(id) {
            continue;
        }
        pending.extend_from_slice(adjacency.children_of(id));
    }

    found
}
