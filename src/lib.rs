//! # sampling-dist
//!
//! Empirical sampling distributions of summary statistics.
//!
//! Each trial draws two disjoint random groups of `m` rows from a dataset,
//! evaluates a statistic (mean, Pearson correlation, or any closure) on
//! both, and records the difference. Across many trials the spread of those
//! differences estimates the statistic's standard error, which for a mean
//! shrinks as σ·√(2/m).
//!
//! Outputs:
//! - The ordered per-trial differences
//! - Counts of trials dropped because the statistic was undefined on a group
//! - A summary: count, mean, standard deviation, min, quartiles, max
//!
//! ## Quick Start
//!
//! ```ignore
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use sampling_dist::{run_resampling, summarize, Dataset, Mean};
//!
//! let data = Dataset::builder()
//!     .numeric("BMXBMI", bmi_values)
//!     .build()?;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let dist = run_resampling(&data, 100, 1_000, &Mean::new("BMXBMI"), &mut rng)?;
//! let summary = summarize(&dist)?;
//! println!("SE of mean difference: {:.3}", summary.std_dev);
//! ```
//!
//! For parallel execution with reproducible results, use [`Resampler`].
//!
//! ## Logging
//!
//! The crate emits `tracing` events (run start/finish at `info`, dropped
//! trials at `debug`, degraded runs at `warn`) and never installs a
//! subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod constants;
mod error;
mod resampler;
mod result;
mod statistic;
mod summary;
#[cfg(feature = "parallel")]
mod thread_pool;
mod types;

// Functional modules
pub mod dataset;
pub mod output;
pub mod sampling;
pub mod statistics;

// Re-exports for public API
pub use config::Config;
pub use constants::{MIN_CORRELATION_CASES, QUARTILES};
pub use dataset::{Column, ColumnData, Dataset, DatasetBuilder, DescribeError};
pub use error::{DataError, ResampleError, StatisticError, SummaryError};
pub use resampler::Resampler;
pub use result::{DropCounts, EmpiricalDistribution, SummaryRecord};
pub use sampling::{run_resampling, run_resampling_until, StopCondition, Subsampler};
pub use statistic::{Group, Mean, PearsonCorrelation, Statistic};
pub use statistics::standard_error_of_difference;
pub use summary::{summarize, summarize_values};
pub use types::{Record, Value};
