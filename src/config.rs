//! Configuration for resampling runs.

use std::env;

use crate::constants::ENV_PREFIX;

/// Configuration options for [`Resampler`](crate::Resampler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rows per group (default: 100).
    pub group_size: usize,

    /// Number of trials (default: 1,000).
    pub trials: usize,

    /// Base seed for per-trial RNG streams.
    ///
    /// `None` draws a fresh seed per run; the drawn seed is recorded on the
    /// resulting distribution so the run can be replayed.
    pub seed: Option<u64>,

    /// Optional guardrail for max duration in milliseconds.
    pub max_duration_ms: Option<u64>,

    /// Run trials on the rayon pool (default: true). Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_size: 100,
            trials: 1_000,
            seed: None,
            max_duration_ms: None,
            parallel: true,
        }
    }
}

impl Config {
    /// Overlay settings from `SAMPLING_DIST_*` environment variables.
    ///
    /// Recognised: `GROUP_SIZE`, `TRIALS`, `SEED`, `MAX_DURATION_MS`,
    /// `PARALLEL` (`true`/`false`/`1`/`0`). Unparsable values are ignored.
    pub fn from_env(mut self) -> Self {
        if let Some(m) = parse_env("GROUP_SIZE") {
            self.group_size = m;
        }
        if let Some(t) = parse_env("TRIALS") {
            self.trials = t;
        }
        if let Some(seed) = parse_env("SEED") {
            self.seed = Some(seed);
        }
        if let Some(ms) = parse_env("MAX_DURATION_MS") {
            self.max_duration_ms = Some(ms);
        }
        if let Some(parallel) = parse_bool_env("PARALLEL") {
            self.parallel = parallel;
        }
        self
    }
}

fn env_key(key: &str) -> String {
    format!("{ENV_PREFIX}{key}")
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(env_key(key)).ok()?.trim().parse().ok()
}

fn parse_bool_env(key: &str) -> Option<bool> {
    match env::var(env_key(key)).ok()?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
