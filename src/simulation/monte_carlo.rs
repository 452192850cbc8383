//! Monte Carlo success-rate estimation.
//!
//! Repeats the reset-on-win trial with identical parameters and counts how
//! often the profit goal is met. Trial `i` of a seeded run draws from its own
//! `ChaCha8Rng` seeded with `seed + i`, so results don't depend on whether
//! the trials run sequentially or across the rayon pool.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::strategy::martingale::run_trial;
use crate::strategy::source::RandomSource;
use crate::types::{SimError, StopReason, TrialParams};

/// Trials per estimate unless configured otherwise.
pub const DEFAULT_TRIALS: u32 = 1000;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Independent trials per estimate.
    #[serde(default = "default_trials")]
    pub trials: u32,
    /// Base seed for reproducible runs (None = fresh entropy per trial).
    #[serde(default)]
    pub seed: Option<u64>,
    /// Spread trials over the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_trials() -> u32 {
    DEFAULT_TRIALS
}

fn default_parallel() -> bool {
    true
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        validate_trials(self.trials)
    }
}

fn validate_trials(trials: u32) -> Result<(), SimError> {
    if trials == 0 {
        return Err(SimError::invalid("trials", "must run at least one trial"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// How many trials ended for each reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTally {
    pub target_reached: u32,
    pub table_limit: u32,
    pub insufficient_funds: u32,
}

impl StopTally {
    pub fn record(&mut self, reason: StopReason) {
        match reason {
            StopReason::TargetReached => self.target_reached += 1,
            StopReason::TableLimit => self.table_limit += 1,
            StopReason::InsufficientFunds => self.insufficient_funds += 1,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            target_reached: self.target_reached + other.target_reached,
            table_limit: self.table_limit + other.table_limit,
            insufficient_funds: self.insufficient_funds + other.insufficient_funds,
        }
    }

    pub fn total(&self) -> u32 {
        self.target_reached + self.table_limit + self.insufficient_funds
    }
}

/// Empirical probability of reaching the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEstimate {
    pub trials: u32,
    pub successes: u32,
    /// `successes / trials`, in [0, 1].
    pub win_pct: f64,
    /// Binomial standard error, `sqrt(p(1 - p) / n)`.
    pub std_error: f64,
    pub stops: StopTally,
}

impl SuccessEstimate {
    fn from_tally(stops: StopTally) -> Self {
        let trials = stops.total();
        let successes = stops.target_reached;
        let n = trials as f64;
        let win_pct = if trials > 0 { successes as f64 / n } else { 0.0 };
        let std_error = if trials > 0 {
            (win_pct * (1.0 - win_pct) / n).sqrt()
        } else {
            0.0
        };
        Self {
            trials,
            successes,
            win_pct,
            std_error,
            stops,
        }
    }
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Estimate the chance of reaching `params.target` over `config.trials` trials.
pub fn estimate_success_rate(
    params: &TrialParams,
    config: &MonteCarloConfig,
) -> Result<SuccessEstimate, SimError> {
    params.validate()?;
    config.validate()?;

    let seed = config.seed;
    let stops = if config.parallel {
        (0..config.trials)
            .into_par_iter()
            .map(|idx| run_indexed_trial(params, seed, idx))
            .try_fold(StopTally::default, |mut tally, reason| {
                tally.record(reason?);
                Ok::<_, SimError>(tally)
            })
            .try_reduce(StopTally::default, |a, b| Ok(a.merge(b)))?
    } else {
        let mut tally = StopTally::default();
        for idx in 0..config.trials {
            tally.record(run_indexed_trial(params, seed, idx)?);
        }
        tally
    };

    let estimate = SuccessEstimate::from_tally(stops);
    info!(
        target = %params.target,
        trials = estimate.trials,
        successes = estimate.successes,
        win_pct = %format!("{:.1}%", estimate.win_pct * 100.0),
        table_limit = estimate.stops.table_limit,
        insufficient_funds = estimate.stops.insufficient_funds,
        "Estimate complete"
    );
    Ok(estimate)
}

/// Run `trials` trials back to back, all drawing from one injected source.
pub fn estimate_with_source<R>(
    params: &TrialParams,
    trials: u32,
    rng: &mut R,
) -> Result<SuccessEstimate, SimError>
where
    R: RandomSource + ?Sized,
{
    params.validate()?;
    validate_trials(trials)?;

    let mut stops = StopTally::default();
    for _ in 0..trials {
        stops.record(run_trial(params, rng)?.stop_reason);
    }
    Ok(SuccessEstimate::from_tally(stops))
}

fn run_indexed_trial(
    params: &TrialParams,
    seed: Option<u64>,
    idx: u32,
) -> Result<StopReason, SimError> {
    let mut rng = trial_rng(seed, idx);
    Ok(run_trial(params, &mut rng)?.stop_reason)
}

/// Independent stream for trial `idx`.
fn trial_rng(seed: Option<u64>, idx: u32) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(idx as u64)),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
