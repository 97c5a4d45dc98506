//! Error types.
//!
//! Errors are split by where they can surface:
//! - [`DataError`]: building or reshaping a [`Dataset`](crate::Dataset)
//! - [`StatisticError`]: evaluating a statistic on one group (contained per trial)
//! - [`ResampleError`]: configuration problems, raised before any trial runs
//! - [`SummaryError`]: reducing an empirical distribution

use thiserror::Error;

/// Errors from constructing or transforming a dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// A column was added with a different row count than the others.
    #[error("column '{column}' has {got} rows, expected {expected}")]
    LengthMismatch {
        /// Offending column.
        column: String,
        /// Row count of the dataset.
        expected: usize,
        /// Row count of the column.
        got: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// No column with this name.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Column exists but holds categorical data.
    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    /// Column exists but holds numeric data.
    #[error("column '{0}' is not categorical")]
    NotCategorical(String),

    /// Records disagree on whether a column holds numbers or labels.
    #[error("column '{0}' mixes numeric and categorical values")]
    MixedColumn(String),

    /// Requested reference level does not occur in the column.
    #[error("level '{level}' not found in column '{column}'")]
    UnknownLevel {
        /// Categorical column.
        column: String,
        /// Missing level.
        level: String,
    },
}

/// Failure evaluating a statistic on a single group.
///
/// Inside a resampling run these never reach the caller: the trial is
/// dropped and counted in [`DropCounts`](crate::DropCounts).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatisticError {
    /// Too few non-missing (or complete-case) values.
    #[error("statistic on '{column}' needs at least {required} values, found {found}")]
    EmptyStatisticInput {
        /// Column (or column pair) the statistic was evaluated on.
        column: String,
        /// Minimum usable values.
        required: usize,
        /// Usable values found.
        found: usize,
    },

    /// A column has zero variance over the usable values.
    #[error("column '{column}' has zero variance")]
    DegenerateVariance {
        /// Constant column.
        column: String,
    },

    /// Underlying column lookup failed.
    #[error(transparent)]
    Column(#[from] DataError),

    /// Failure reported by a user-supplied statistic.
    #[error("{0}")]
    Other(String),
}

/// Configuration errors surfaced before any trial executes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResampleError {
    /// Group size is zero or two groups do not fit in the dataset.
    #[error("invalid group size {group_size}: need 1 <= 2 * group_size <= {dataset_len}")]
    InvalidSampleSize {
        /// Requested group size.
        group_size: usize,
        /// Rows in the dataset.
        dataset_len: usize,
    },

    /// Zero trials requested.
    #[error("number of trials must be positive")]
    InvalidTrialCount,

    /// A column the statistic needs is missing or not numeric.
    #[error("statistic '{statistic}': {source}")]
    Column {
        /// Statistic name.
        statistic: String,
        /// Lookup failure.
        #[source]
        source: DataError,
    },
}

/// Errors reducing an empirical distribution to summaries.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SummaryError {
    /// No successful trials to summarize.
    #[error("cannot summarize an empty distribution")]
    EmptyDistribution,

    /// Quantile probability outside [0, 1].
    #[error("quantile probability {0} outside [0, 1]")]
    InvalidQuantile(f64),
}
