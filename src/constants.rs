//! Shared constants.

/// Quartile probabilities reported in every summary.
pub const QUARTILES: [f64; 3] = [0.25, 0.5, 0.75];

/// Minimum complete cases for a correlation.
pub const MIN_CORRELATION_CASES: usize = 2;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "SAMPLING_DIST_";
