//! Input JSON schema definitions for `.cpuprofile` files.
//!
//! These types mirror the V8 / Chrome DevTools wire format verbatim.
//! Optional fields default so partial profiles still deserialize.

use serde::{Deserialize, Serialize};

/// Top-level `.cpuprofile` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCpuProfile {
    /// Flattened call graph
    pub nodes: Vec<RawNode>,

    /// Profile start timestamp (microseconds)
    #[serde(default)]
    pub start_time: f64,

    /// Profile end timestamp (microseconds)
    #[serde(default)]
    pub end_time: f64,

    /// Node id observed at each sampling tick
    #[serde(default)]
    pub samples: Vec<u64>,

    /// Microseconds attributed to the interval ending at each sample
    #[serde(default)]
    pub time_deltas: Vec<i64>,
}

/// One entry of the node table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: u64,

    pub call_frame: RawCallFrame,

    /// Samples where execution stopped exactly at this node
    #[serde(default)]
    pub hit_count: u64,

    /// Ids of the nodes this call site called into
    #[serde(default)]
    pub children: Vec<u64>,
}

/// Call-site identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCallFrame {
    #[serde(default)]
    pub function_name: String,

    #[serde(default)]
    pub url: String,

    /// 0-based, -1 when unknown
    #[serde(default = "unknown_position")]
    pub line_number: i64,

    /// 0-based, -1 when unknown
    #[serde(default = "unknown_position")]
    pub column_number: i64,
}

fn unknown_position() -> i64 {
    -1
}
