//! Monte Carlo estimation, target sweeps, and trial reporting.

pub mod monte_carlo;
pub mod report;
pub mod sweep;

pub use monte_carlo::{
    estimate_success_rate, estimate_with_source, MonteCarloConfig, StopTally, SuccessEstimate,
    DEFAULT_TRIALS,
};
pub use sweep::{run_sweep, sweep_targets, SweepPoint, SweepReport};
