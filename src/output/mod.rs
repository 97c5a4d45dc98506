//! Rendering of resampling results.

pub mod json;
pub mod terminal;

pub use json::{summary_report, to_json, to_json_pretty};
pub use terminal::format_distribution;
