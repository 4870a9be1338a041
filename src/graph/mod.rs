//! Call-graph indexing and traversal.
//!
//! The node table is a DAG: V8 merges identical call-site chains, so one
//! node can be listed as a child under several parents. These modules
//! derive parent/child adjacency from the table and walk it iteratively
//! with explicit visited sets.

pub mod adjacency;
pub mod descendants;
pub mod walker;

pub use adjacency::{build_adjacency, AdjacencyIndex};
pub use descendants::collect_descendants;
pub use walker::{walk_up, AncestorWalk, CallStackFrame, ParentPolicy, WalkEnd};
