//! Parent/child adjacency derived from the node table's `children` lists.

use crate::parser::ProfileNode;
use log::debug;
use std::collections::HashMap;

/// Read-only parent and child edges for one profile
///
/// Every node of the table has an entry in the child map, so membership
/// doubles as a "known node" check for child ids that point nowhere.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    parents: HashMap<u64, Vec<u64>>,
    children: HashMap<u64, Vec<u64>>,
    edge_count: usize,
}

impl AdjacencyIndex {
    /// Parents in the order they were met while indexing
    pub fn parents_of(&self, id: u64) -> &[u64] {
        self.parents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn children_of(&self, id: u64) -> &[u64] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first parent recorded for `id`, used to resolve shared nodes
    pub fn first_parent(&self, id: u64) -> Option<u64> {
        self.parents_of(id).first().copied()
    }

    /// True if `id` is a node of the indexed table
    pub fn contains(&self, id: u64) -> bool {
        self.children.contains_key(&id)
    }

    /// Number of child edges read from the table
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Nodes of the table with no parent, in id order
    pub fn roots(&self) -> Vec<u64> {
        let mut roots: Vec<u64> = self
            .children
            .keys()
            .filter(|id| self.parents_of(**id).is_empty())
            .copied()
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Number of nodes reachable from more than one parent
    pub fn shared_node_count(&self) -> usize {
        self.parents.values().filter(|p| p.len() > 1).count()
    }
}

/// Build adjacency in a single pass over every child edge
///
/// **Public** - main entry point for indexing
///
/// Child ids that do not name a node are kept as edges; traversals treat
/// them as dead ends.
pub fn build_adjacency(nodes: &[ProfileNode]) -> AdjacencyIndex {
    let mut index = AdjacencyIndex::default();

    for node in nodes {
        index.children.entry(node.id).or_default();
    }

    for node in nodes {
        for &child_id in &node.child_ids {
            index.edge_count += 1;

            if let Some(children) = index.children.get_mut(&node.id) {
                children.push(child_id);
            }

            let parents = index.parents.entry(child_id).or_default();
            if !parents.contains(&node.id) {
                parents.push(node.id);
            }
        }
    }

    debug!(
        "Indexed {} nodes, {} edges, {} shared nodes",
        nodes.len(),
        index.edge_count,
        index.shared_node_count()
    );

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, children: Vec<u64>) -> ProfileNode {
        ProfileNode {
            id,
            function_name: format!("f{}", id),
            url: String::new(),
            line_number: 0,
            column_number: 0,
            hit_count: 0,
            child_ids: children,
        }
    }

    #[test]
    fn test_every_child_edge_has_parent() {
        let nodes = vec![
            node(1, vec![2, 3]),
            node(2, vec![4]),
            node(3, vec![4]),
            node(4, vec![]),
        ];
        let index = build_adjacency(&nodes);

        for n in &nodes {
            for &child in &n.child_ids {
                assert!(index.parents_of(child).contains(&n.id));
            }
        }
        assert_eq!(index.edge_count(), 4);
    }

    #[test]
    fn test_first_parent_follows_table_order() {
        let nodes = vec![
            node(1, vec![2, 3]),
            node(3, vec![4]),
            node(2, vec![4]),
            node(4, vec![]),
        ];
        let index = build_adjacency(&nodes);

        assert_eq!(index.parents_of(4), &[3, 2]);
        assert_eq!(index.first_parent(4), Some(3));
        assert_eq!(index.shared_node_count(), 1);
        assert_eq!(index.roots(), vec![1]);
    }

    #[test]
    fn test_dangling_child_is_kept() {
        let nodes = vec![node(1, vec![99])];
        let index = build_adjacency(&nodes);

        assert_eq!(index.children_of(1), &[99]);
        assert!(!index.contains(99));
        assert_eq!(index.first_parent(99), Some(1));
    }
}
