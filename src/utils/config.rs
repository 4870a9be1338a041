//! Configuration and constants for the analyzer.

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Number of ranked rows emitted per report section
pub const DEFAULT_TOP_N: usize = 20;

/// Upper bound accepted for `--top`
pub const MAX_TOP_N: usize = 1000;

/// Maximum number of frames an ancestor walk collects
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Profiles larger than this are rejected before parsing (512 MiB)
pub const MAX_PROFILE_BYTES: u64 = 512 * 1024 * 1024;

/// Joins caller frames inside a signature, outermost first
pub const SIGNATURE_SEPARATOR: &str = " -> ";

/// Leading pseudo-frame for a caller chain cut off by the depth ceiling
pub const TRUNCATED_MARKER: &str = "[truncated]";

/// Leading pseudo-frame for a caller chain stopped at a multi-parent node
pub const AMBIGUOUS_MARKER: &str = "[ambiguous]";

/// Label used when a call frame has an empty function name
pub const ANONYMOUS_FUNCTION: &str = "(anonymous)";

/// Label used when a call frame has no script url
pub const UNKNOWN_FILE: &str = "(unknown)";

/// cpuprofile timestamps and deltas are in microseconds
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;
pub const MICROS_PER_MILLI: f64 = 1_000.0;

/// Signature for a target with nothing above it on the stack
pub const NO_CALLERS: &str = "(no callers)";
