//! Run results: the empirical distribution and its summary.

use serde::{Deserialize, Serialize};

use crate::error::{StatisticError, SummaryError};
use crate::statistics::compute_quantile;
use crate::summary::summarize;

/// Empirical sampling distribution of a statistic difference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmpiricalDistribution {
    /// statistic(group 1) − statistic(group 2) per successful trial, in
    /// trial order.
    pub differences: Vec<f64>,

    /// Trials dropped because the statistic failed on a group.
    pub dropped: DropCounts,

    /// Trials requested by the caller.
    pub trials_requested: usize,

    /// Trials never started because the run was stopped early.
    pub trials_skipped: usize,

    /// Whether a cancellation flag or time budget stopped the run.
    pub stopped_early: bool,

    /// Rows per group.
    pub group_size: usize,

    /// Name of the statistic.
    pub statistic: String,

    /// Base seed, when trials were seeded from one.
    pub seed: Option<u64>,

    /// Wall-clock time of the run.
    pub runtime_secs: f64,
}

impl EmpiricalDistribution {
    /// Number of successful trials.
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// True if no trial succeeded.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Successful differences in trial order.
    pub fn values(&self) -> &[f64] {
        &self.differences
    }

    /// Total dropped trials.
    pub fn dropped_count(&self) -> usize {
        self.dropped.total()
    }

    /// True if any trial was dropped or skipped.
    pub fn is_degraded(&self) -> bool {
        self.dropped_count() > 0 || self.trials_skipped > 0
    }

    /// Quantile `p` of the differences (R-7 linear interpolation).
    pub fn quantile(&self, p: f64) -> Result<f64, SummaryError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SummaryError::InvalidQuantile(p));
        }
        if self.differences.is_empty() {
            return Err(SummaryError::EmptyDistribution);
        }
        Ok(compute_quantile(&mut self.differences.clone(), p))
    }

    /// Reduce to scalar summaries.
    pub fn summarize(&self) -> Result<SummaryRecord, SummaryError> {
        summarize(self)
    }
}

/// Dropped-trial counts by failure kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCounts {
    /// Too few usable values in a group.
    pub empty_input: usize,
    /// Zero variance in a group.
    pub degenerate_variance: usize,
    /// Any other statistic failure.
    pub other: usize,
}

/// Failure kind of a dropped trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DropKind {
    EmptyInput,
    DegenerateVariance,
    Other,
}

impl From<&StatisticError> for DropKind {
    fn from(err: &StatisticError) -> Self {
        match err {
            StatisticError::EmptyStatisticInput { .. } => DropKind::EmptyInput,
            StatisticError::DegenerateVariance { .. } => DropKind::DegenerateVariance,
            StatisticError::Column(_) | StatisticError::Other(_) => DropKind::Other,
        }
    }
}

impl DropCounts {
    /// Count one failure.
    pub fn record(&mut self, err: &StatisticError) {
        self.add(DropKind::from(err));
    }

    pub(crate) fn add(&mut self, kind: DropKind) {
        match kind {
            DropKind::EmptyInput => self.empty_input += 1,
            DropKind::DegenerateVariance => self.degenerate_variance += 1,
            DropKind::Other => self.other += 1,
        }
    }

    /// Sum over all kinds.
    pub fn total(&self) -> usize {
        self.empty_input + self.degenerate_variance + self.other
    }
}

/// Fixed-shape summary of a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Bessel-corrected standard deviation; `NaN` when `count == 1`.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// 25th percentile.
    pub q25: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub q75: f64,
    /// Largest value.
    pub max: f64,
}

impl SummaryRecord {
    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }
}

#[cfg(test)]
pub(crate) fn make_distribution(differences: Vec<f64>) -> EmpiricalDistribution {
    EmpiricalDistribution {
        trials_requested: differences.len(),
        differences,
        dropped: DropCounts::default(),
        trials_skipped: 0,
        stopped_early: false,
        group_size: 10,
        statistic: "mean(x)".to_string(),
        seed: Some(7),
        runtime_secs: 0.01,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;

    #[test]
    fn test_drop_counts() {
        let mut counts = DropCounts::default();
        counts.record(&StatisticError::EmptyStatisticInput {
            column: "x".into(),
            required: 2,
            found: 0,
        });
        counts.record(&StatisticError::DegenerateVariance { column: "x".into() });
        counts.record(&StatisticError::DegenerateVariance { column: "y".into() });
        counts.record(&StatisticError::Column(DataError::UnknownColumn("z".into())));
        assert_eq!(
            counts,
            DropCounts {
                empty_input: 1,
                degenerate_variance: 2,
                other: 1
            }
        );
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_quantile_bounds() {
        let dist = make_distribution(vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(dist.quantile(0.0).unwrap(), 1.0);
        assert_eq!(dist.quantile(1.0).unwrap(), 4.0);
        assert!((dist.quantile(0.5).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(dist.quantile(1.5), Err(SummaryError::InvalidQuantile(1.5)));
        // Order of stored differences is untouched
        assert_eq!(dist.values(), &[4.0, 1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_empty_quantile() {
        let dist = make_distribution(Vec::new());
        assert!(dist.is_empty());
        assert!(!dist.is_degraded());
        assert_eq!(dist.quantile(0.5), Err(SummaryError::EmptyDistribution));
    }
}
