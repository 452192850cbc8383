//! Human-readable narration and chart data for finished trials.
//!
//! Nothing here renders; the binary prints the strings and serializes the
//! chart series for whatever plotting tool consumes them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::sweep::SweepReport;
use crate::types::{StopReason, TableLimits, TrialOutcome, WalkawayOutcome};

/// Describe how a reset-on-win trial ended.
pub fn narrate_trial(outcome: &TrialOutcome, limits: &TableLimits) -> String {
    narrate(
        outcome.stop_reason,
        outcome.gain,
        outcome.final_bankroll,
        outcome.final_bet,
        limits,
    )
}

/// Describe how a walk-away trial ended.
pub fn narrate_walkaway(outcome: &WalkawayOutcome, limits: &TableLimits) -> String {
    narrate(
        outcome.stop_reason,
        outcome.last_winnings,
        outcome.final_bankroll,
        outcome.final_bet,
        limits,
    )
}

fn narrate(
    reason: StopReason,
    won: Decimal,
    bankroll: Decimal,
    next_bet: Decimal,
    limits: &TableLimits,
) -> String {
    match reason {
        StopReason::TargetReached => format!("Congratulations! You won ${won}!"),
        StopReason::TableLimit => format!(
            "To make your money back you'd need to bet ${next_bet}, which exceeds the maximum bet (${}). You end up with ${bankroll}.",
            limits.max_bet
        ),
        StopReason::InsufficientFunds => format!(
            "You're down to ${bankroll}, which is not enough to make the required bet of ${next_bet}."
        ),
    }
}

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// Bankroll trajectory with the labels a line chart needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// `(spin, bankroll)`; spin 0 is the starting bankroll.
    pub points: Vec<(usize, Decimal)>,
}

pub fn bankroll_chart(bankroll_log: &[Decimal], target: Decimal) -> ChartSeries {
    ChartSeries {
        title: format!("Repeated Martingale, Goal=${target}"),
        x_label: "Roulette Spins".to_string(),
        y_label: "Bankroll".to_string(),
        points: bankroll_log.iter().copied().enumerate().collect(),
    }
}

// ---------------------------------------------------------------------------
// Sweep logging
// ---------------------------------------------------------------------------

/// Emit one log line per sweep point.
pub fn log_sweep_report(report: &SweepReport) {
    for point in &report.points {
        info!(
            target = %point.target,
            win_pct = %format!("{:.1}%", point.win_pct * 100.0),
            std_error = %format!("{:.2}%", point.std_error * 100.0),
            "Sweep point"
        );
    }
    info!(
        points = report.points.len(),
        trials = report.trials,
        seed = ?report.seed,
        "Sweep complete"
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
