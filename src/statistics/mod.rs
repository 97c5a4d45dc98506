//! Numeric building blocks.
//!
//! - Quantile computation (R-7 linear interpolation)
//! - Welford accumulators for mean, variance and co-moment

mod descriptive;
mod quantile;

pub use descriptive::{standard_error_of_difference, Welford, WelfordCovariance};
pub use quantile::{compute_quantile, compute_quantiles, quantile_sorted};
