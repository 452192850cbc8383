//! Target sweep: one success-rate estimate per profit goal.
//!
//! Every target is estimated with the same Monte Carlo config, including the
//! base seed, so a seeded sweep compares targets on identical draw streams.
//! A path that reaches a larger goal passes every smaller goal first, which
//! makes a seeded curve non-increasing in the target.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::monte_carlo::{estimate_success_rate, MonteCarloConfig, SuccessEstimate};
use crate::types::{SimError, TrialParams};

/// One point on the success-rate curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPoint {
    pub target: Decimal,
    pub win_pct: f64,
    pub std_error: f64,
}

/// A full sweep with the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub generated_at: DateTime<Utc>,
    /// Shared parameters; each point overrides `target`.
    pub params: TrialParams,
    pub trials: u32,
    pub seed: Option<u64>,
    /// In the same order as the requested targets.
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    pub fn win_pcts(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.win_pct).collect()
    }
}

/// Success rate for each target, in input order.
pub fn sweep_targets(
    targets: &[Decimal],
    base: &TrialParams,
    config: &MonteCarloConfig,
) -> Result<Vec<f64>, SimError> {
    base.validate()?;
    config.validate()?;

    targets
        .iter()
        .map(|&target| estimate_success_rate(&base.with_target(target), config).map(|e| e.win_pct))
        .collect()
}

/// Run the sweep and keep per-target detail for reporting.
pub fn run_sweep(
    targets: &[Decimal],
    base: &TrialParams,
    config: &MonteCarloConfig,
) -> Result<SweepReport, SimError> {
    base.validate()?;
    config.validate()?;

    info!(
        targets = targets.len(),
        trials = config.trials,
        seed = ?config.seed,
        bankroll = %base.initial_bankroll,
        limits = %base.limits,
        "Starting target sweep"
    );

    let mut points = Vec::with_capacity(targets.len());
    for &target in targets {
        let estimate: SuccessEstimate = estimate_success_rate(&base.with_target(target), config)?;
        points.push(SweepPoint {
            target,
            win_pct: estimate.win_pct,
            std_error: estimate.std_error,
        });
    }

    Ok(SweepReport {
        generated_at: Utc::now(),
        params: base.clone(),
        trials: config.trials,
        seed: config.seed,
        points,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
