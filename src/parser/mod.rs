//! Profile parsing and the in-memory profile model.
//!
//! This module handles:
//! - Deserializing raw `.cpuprofile` JSON
//! - Validating node table structure
//! - Exposing nodes, samples and timing to the analysis stages

pub mod cpuprofile;
pub mod schema;

// Re-export main types
pub use cpuprofile::{load, Profile, ProfileNode, Sample};
pub use schema::{RawCallFrame, RawCpuProfile, RawNode};
