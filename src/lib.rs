//! CPU Profile Analyzer
//!
//! Caller and callee analysis for V8 `.cpuprofile` files.
//!
//! The pipeline:
//! 1. [`parser::load`] turns raw bytes into a [`parser::Profile`]
//! 2. [`graph::build_adjacency`] derives parent/child edges
//! 3. [`aggregator`] groups sampled stacks around a target node
//! 4. [`report::build_report`] ranks and bounds the results
//!
//! ## Getting Started
//!
//! ```bash
//! profile-analyzer analyze app.cpuprofile --function handleRequest
//! ```

pub mod aggregator;
pub mod commands;
pub mod graph;
pub mod output;
pub mod parser;
pub mod report;
pub mod utils;
