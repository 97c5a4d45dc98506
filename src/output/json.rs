//! JSON serialization for resampling results.
//!
//! `NaN` fields (e.g. the standard deviation of a single value) serialize
//! as `null`.

use serde::Serialize;

use crate::result::{EmpiricalDistribution, SummaryRecord};

/// Serialize a distribution to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for these types).
pub fn to_json(dist: &EmpiricalDistribution) -> Result<String, serde_json::Error> {
    serde_json::to_string(dist)
}

/// Serialize a distribution to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for these types).
pub fn to_json_pretty(dist: &EmpiricalDistribution) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(dist)
}

#[derive(Serialize)]
struct Report<'a> {
    statistic: &'a str,
    group_size: usize,
    trials_requested: usize,
    successful: usize,
    dropped: usize,
    skipped: usize,
    seed: Option<u64>,
    summary: Option<SummaryRecord>,
}

/// Serialize run metadata plus the summary (no per-trial values).
///
/// `summary` is `null` when no trial succeeded.
pub fn summary_report(dist: &EmpiricalDistribution) -> Result<String, serde_json::Error> {
    let report = Report {
        statistic: &dist.statistic,
        group_size: dist.group_size,
        trials_requested: dist.trials_requested,
        successful: dist.len(),
        dropped: dist.dropped_count(),
        skipped: dist.trials_skipped,
        seed: dist.seed,
        summary: dist.summarize().ok(),
    };
    serde_json::to_string_pretty(&report)
}
