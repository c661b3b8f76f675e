//! Default signal thresholds
//!
//! Named here so a `swiftlens.toml` can override them per signal; no
//! detector carries a magic literal.

/// Transitive dependents at which a file's blast radius is reported
pub const BLAST_RADIUS_WARNING: usize = 5;
pub const BLAST_RADIUS_ERROR: usize = 10;

/// In-degree at which a file becomes a coupling hub
pub const CENTRAL_FILE_WARNING: usize = 5;
pub const CENTRAL_FILE_ERROR: usize = 10;

/// Out-degree at which a file imports too much
pub const GOD_FILE_WARNING: usize = 10;
pub const GOD_FILE_ERROR: usize = 15;

/// Forward import-chain depth
pub const DEEP_CHAIN_WARNING: usize = 5;
pub const DEEP_CHAIN_ERROR: usize = 8;

/// Inheritance depth
pub const DEEP_HIERARCHY_WARNING: usize = 3;
pub const DEEP_HIERARCHY_ERROR: usize = 5;

/// Direct conformer count for a protocol
pub const WIDE_PROTOCOL_WARNING: usize = 5;
pub const WIDE_PROTOCOL_ERROR: usize = 10;

/// Internal call count for a function
pub const HOT_FUNCTION_WARNING: usize = 5;
pub const HOT_FUNCTION_ERROR: usize = 10;

/// Martin instability threshold and the coupling floor below which the
/// ratio is considered noise
pub const INSTABILITY_THRESHOLD: f64 = 0.8;
pub const MIN_COUPLING: usize = 3;

/// In-degree floor for reporting a fully concrete file
pub const LOW_ABSTRACTNESS_MIN_IN_DEGREE: usize = 3;

/// Distance from the main sequence `A + I = 1`
pub const MAIN_SEQUENCE_DISTANCE: f64 = 0.7;
