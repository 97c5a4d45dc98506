//! Trial orchestration.
//!
//! Two entry points share the same per-trial logic:
//! - [`run_resampling`] / [`run_resampling_until`] consume one caller-owned
//!   RNG sequentially.
//! - [`run_seeded`] derives an independent Xoshiro256++ stream per trial
//!   from a base seed, which makes the ordered result identical whether the
//!   trials run sequentially or on the rayon pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::subsample::{counter_rng_seed, Subsampler};
use crate::dataset::Dataset;
use crate::error::ResampleError;
use crate::result::{DropCounts, DropKind, EmpiricalDistribution};
use crate::statistic::Statistic;

/// Early-stop signals checked before each trial.
#[derive(Debug, Clone, Default)]
pub struct StopCondition {
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl StopCondition {
    /// Never stops early.
    pub fn none() -> Self {
        Self::default()
    }

    /// Stop once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Stop once `budget` has elapsed from now.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.deadline = Some(Instant::now() + budget);
        self
    }

    /// True if no further trial should start.
    pub fn should_stop(&self) -> bool {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Outcome of a single trial.
#[derive(Debug, Clone, Copy)]
enum TrialOutcome {
    Difference(f64),
    Dropped(DropKind),
    Skipped,
}

fn run_trial<S, R>(
    trial: usize,
    sampler: &Subsampler<'_>,
    statistic: &S,
    rng: &mut R,
) -> TrialOutcome
where
    S: Statistic + ?Sized,
    R: Rng + ?Sized,
{
    let (first, second) = sampler.draw(rng);
    let diff = statistic
        .evaluate(&first)
        .and_then(|a| statistic.evaluate(&second).map(|b| a - b));
    match diff {
        Ok(d) => TrialOutcome::Difference(d),
        Err(err) => {
            tracing::debug!(trial, error = %err, "trial dropped");
            TrialOutcome::Dropped(DropKind::from(&err))
        }
    }
}

/// Check configuration before any trial runs.
fn prepare<'a, S: Statistic + ?Sized>(
    dataset: &'a Dataset,
    group_size: usize,
    trials: usize,
    statistic: &S,
) -> Result<Subsampler<'a>, ResampleError> {
    if trials == 0 {
        return Err(ResampleError::InvalidTrialCount);
    }
    let sampler = Subsampler::new(dataset, group_size)?;
    for column in statistic.columns() {
        dataset
            .numeric(column)
            .map_err(|source| ResampleError::Column {
                statistic: statistic.name(),
                source,
            })?;
    }
    Ok(sampler)
}

fn assemble(
    outcomes: impl IntoIterator<Item = TrialOutcome>,
    trials: usize,
    group_size: usize,
    statistic: String,
    seed: Option<u64>,
    started: Instant,
) -> EmpiricalDistribution {
    let mut differences = Vec::with_capacity(trials);
    let mut dropped = DropCounts::default();
    let mut skipped = 0;

    for outcome in outcomes {
        match outcome {
            TrialOutcome::Difference(d) => differences.push(d),
            TrialOutcome::Dropped(kind) => dropped.add(kind),
            TrialOutcome::Skipped => skipped += 1,
        }
    }

    let dist = EmpiricalDistribution {
        differences,
        dropped,
        trials_requested: trials,
        trials_skipped: skipped,
        stopped_early: skipped > 0,
        group_size,
        statistic,
        seed,
        runtime_secs: started.elapsed().as_secs_f64(),
    };

    if dist.stopped_early {
        tracing::warn!(
            completed = dist.len() + dist.dropped_count(),
            skipped = dist.trials_skipped,
            "resampling stopped early"
        );
    }
    if dist.dropped_count() > 0 {
        tracing::warn!(
            dropped = dist.dropped_count(),
            requested = trials,
            "trials dropped after statistic failures"
        );
    }
    tracing::info!(
        statistic = %dist.statistic,
        successful = dist.len(),
        runtime_secs = dist.runtime_secs,
        "resampling finished"
    );
    dist
}

/// Run `trials` subsampling trials with a caller-supplied RNG.
///
/// Each trial draws two disjoint groups of `group_size` rows, evaluates
/// `statistic` on both, and records the difference. Trials whose statistic
/// fails are dropped and counted rather than aborting the run.
///
/// # Errors
///
/// [`ResampleError`] for zero trials, an unusable group size, or statistic
/// columns that are absent or not numeric. Nothing runs in those cases.
pub fn run_resampling<S, R>(
    dataset: &Dataset,
    group_size: usize,
    trials: usize,
    statistic: &S,
    rng: &mut R,
) -> Result<EmpiricalDistribution, ResampleError>
where
    S: Statistic + ?Sized,
    R: Rng + ?Sized,
{
    run_resampling_until(dataset, group_size, trials, statistic, rng, &StopCondition::none())
}

/// [`run_resampling`] with early-stop signals.
///
/// Trials not started when `stop` fires are reported as skipped; the
/// partial distribution remains a valid input to
/// [`summarize`](crate::summarize).
pub fn run_resampling_until<S, R>(
    dataset: &Dataset,
    group_size: usize,
    trials: usize,
    statistic: &S,
    rng: &mut R,
    stop: &StopCondition,
) -> Result<EmpiricalDistribution, ResampleError>
where
    S: Statistic + ?Sized,
    R: Rng + ?Sized,
{
    let sampler = prepare(dataset, group_size, trials, statistic)?;
    let started = Instant::now();
    tracing::info!(
        statistic = %statistic.name(),
        group_size,
        trials,
        rows = dataset.len(),
        "resampling started"
    );

    let mut stopped = false;
    let outcomes = (0..trials).map(|i| {
        stopped = stopped || stop.should_stop();
        if stopped {
            TrialOutcome::Skipped
        } else {
            run_trial(i, &sampler, statistic, &mut *rng)
        }
    });

    Ok(assemble(
        outcomes,
        trials,
        group_size,
        statistic.name(),
        None,
        started,
    ))
}

/// Run trials with per-trial RNG streams derived from `seed`.
///
/// With `parallel` set (and the `parallel` feature enabled) trials run on
/// the shared rayon pool; the ordered result is identical either way.
pub fn run_seeded<S>(
    dataset: &Dataset,
    group_size: usize,
    trials: usize,
    statistic: &S,
    seed: u64,
    parallel: bool,
    stop: &StopCondition,
) -> Result<EmpiricalDistribution, ResampleError>
where
    S: Statistic + ?Sized,
{
    let sampler = prepare(dataset, group_size, trials, statistic)?;
    let started = Instant::now();
    tracing::info!(
        statistic = %statistic.name(),
        group_size,
        trials,
        seed,
        parallel,
        rows = dataset.len(),
        "resampling started"
    );

    let trial = |i: usize| {
        if stop.should_stop() {
            return TrialOutcome::Skipped;
        }
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
        run_trial(i, &sampler, statistic, &mut rng)
    };

    let name = statistic.name();

    #[cfg(feature = "parallel")]
    if parallel {
        let outcomes: Vec<TrialOutcome> =
            crate::thread_pool::install(|| (0..trials).into_par_iter().map(trial).collect());
        return Ok(assemble(outcomes, trials, group_size, name, Some(seed), started));
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    Ok(assemble(
        (0..trials).map(trial),
        trials,
        group_size,
        name,
        Some(seed),
        started,
    ))
}
