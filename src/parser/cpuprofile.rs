//! Profile loader for `.cpuprofile` JSON.
//!
//! Turns raw bytes into a [`Profile`]: an arena of nodes addressed by their
//! profile id, plus the chronological sample sequence with per-sample cost.

use super::schema::{RawCpuProfile, RawNode};
use crate::utils::config::{ANONYMOUS_FUNCTION, MICROS_PER_SECOND, UNKNOWN_FILE};
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::collections::HashMap;

/// One node of the flattened call graph
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileNode {
    pub id: u64,
    pub function_name: String,
    pub url: String,
    pub line_number: i64,
    pub column_number: i64,
    pub hit_count: u64,
    pub child_ids: Vec<u64>,
}

impl ProfileNode {
    /// Function name, or a placeholder for anonymous frames
    pub fn display_name(&self) -> &str {
        if self.function_name.is_empty() {
            ANONYMOUS_FUNCTION
        } else {
            &self.function_name
        }
    }

    /// Last path segment of the script url
    pub fn short_file(&self) -> &str {
        let trimmed = self.url.trim_end_matches('/');
        match trimmed.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_FILE,
        }
    }

    /// Signature label: `functionName@shortFileName:lineNumber`
    pub fn label(&self) -> String {
        format!(
            "{}@{}:{}",
            self.display_name(),
            self.short_file(),
            self.line_number
        )
    }

    /// Full source location: `url:lineNumber`
    pub fn location(&self) -> String {
        let url = if self.url.is_empty() {
            UNKNOWN_FILE
        } else {
            &self.url
        };
        format!("{}:{}", url, self.line_number)
    }
}

impl From<RawNode> for ProfileNode {
    fn from(raw: RawNode) -> Self {
        Self {
            id: raw.id,
            function_name: raw.call_frame.function_name,
            url: raw.call_frame.url,
            line_number: raw.call_frame.line_number,
            column_number: raw.call_frame.column_number,
            hit_count: raw.hit_count,
            child_ids: raw.children,
        }
    }
}

/// One observation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub node_id: u64,
    pub time_delta_micros: i64,
}

impl Sample {
    /// Cost attributed to this sample; negative deltas count as zero
    pub fn cost_micros(&self) -> u64 {
        self.time_delta_micros.max(0) as u64
    }
}

/// Parsed profile (internal representation)
#[derive(Debug, Clone)]
pub struct Profile {
    nodes: Vec<ProfileNode>,
    positions: HashMap<u64, usize>,
    samples: Vec<Sample>,
    start_time: f64,
    end_time: f64,
}

impl Profile {
    /// Build a profile from already-deserialized wire data
    ///
    /// # Errors
    /// * `ParseError::InvalidFormat` - two nodes share the same id
    pub fn from_raw(raw: RawCpuProfile) -> Result<Self, ParseError> {
        let mut positions = HashMap::with_capacity(raw.nodes.len());
        let mut nodes = Vec::with_capacity(raw.nodes.len());

        for raw_node in raw.nodes {
            if positions.insert(raw_node.id, nodes.len()).is_some() {
                return Err(ParseError::InvalidFormat(format!(
                    "duplicate node id {}",
                    raw_node.id
                )));
            }
            nodes.push(ProfileNode::from(raw_node));
        }

        if raw.samples.len() != raw.time_deltas.len() {
            warn!(
                "samples ({}) and timeDeltas ({}) differ in length, using the shorter",
                raw.samples.len(),
                raw.time_deltas.len()
            );
        }

        let samples: Vec<Sample> = raw
            .samples
            .iter()
            .zip(raw.time_deltas.iter())
            .map(|(&node_id, &time_delta_micros)| Sample {
                node_id,
                time_delta_micros,
            })
            .collect();

        if nodes.is_empty() {
            warn!("Profile has an empty node table");
        }

        debug!(
            "Loaded profile: {} nodes, {} samples",
            nodes.len(),
            samples.len()
        );

        Ok(Self {
            nodes,
            positions,
            samples,
            start_time: raw.start_time,
            end_time: raw.end_time,
        })
    }

    /// All nodes in node-table order
    pub fn nodes(&self) -> &[ProfileNode] {
        &self.nodes
    }

    /// Look up a node by its profile id
    pub fn node(&self, id: u64) -> Option<&ProfileNode> {
        self.positions.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Samples in chronological order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// `endTime - startTime` in the profile's native unit (microseconds)
    pub fn duration_micros(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_micros() / MICROS_PER_SECOND
    }

    /// Sum of all attributed sample costs
    pub fn total_sampled_micros(&self) -> u64 {
        self.samples.iter().map(Sample::cost_micros).sum()
    }

    /// Sum of `hitCount` over every node
    pub fn total_hits(&self) -> u64 {
        self.nodes.iter().map(|n| n.hit_count).sum()
    }
}

/// Parse raw `.cpuprofile` bytes
///
/// **Public** - main entry point for loading
///
/// # Arguments
/// * `raw` - File contents as read by the caller
///
/// # Returns
/// A profile ready for adjacency indexing
///
/// # Errors
/// * `ParseError::JsonError` - Not well-formed JSON or `nodes` is missing
/// * `ParseError::InvalidFormat` - Structurally inconsistent node table
pub fn load(raw: &[u8]) -> Result<Profile, ParseError> {
    let raw_profile: RawCpuProfile = serde_json::from_slice(raw)?;
    Profile::from_raw(raw_profile)
}
