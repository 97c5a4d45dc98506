//! Reduction of an empirical distribution to scalar summaries.

use crate::constants::QUARTILES;
use crate::error::SummaryError;
use crate::result::{EmpiricalDistribution, SummaryRecord};
use crate::statistics::{quantile_sorted, Welford};

/// Summarize the successful trials of a run.
///
/// Deterministic given the difference sequence. Fails with
/// [`SummaryError::EmptyDistribution`] when no trial succeeded, which
/// includes runs cancelled before their first trial.
pub fn summarize(distribution: &EmpiricalDistribution) -> Result<SummaryRecord, SummaryError> {
    summarize_values(&distribution.differences)
}

/// Summarize an arbitrary slice of values.
pub fn summarize_values(values: &[f64]) -> Result<SummaryRecord, SummaryError> {
    if values.is_empty() {
        return Err(SummaryError::EmptyDistribution);
    }

    let moments: Welford = values.iter().copied().collect();

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    let [q25, median, q75] = QUARTILES.map(|p| quantile_sorted(&sorted, p));

    Ok(SummaryRecord {
        count: values.len(),
        mean: moments.mean(),
        std_dev: moments.sample_std_dev(),
        min: sorted[0],
        q25,
        median,
        q75,
        max: sorted[sorted.len() - 1],
    })
}
