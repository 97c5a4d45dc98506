//! Repeated disjoint subsampling.
//!
//! - [`Subsampler`] draws two disjoint groups per trial
//! - the driver runs trials, containing per-trial statistic failures

mod driver;
mod subsample;

pub use driver::{run_resampling, run_resampling_until, run_seeded, StopCondition};
pub use subsample::{counter_rng_seed, Subsampler};
