//! Shared types for the Martingale simulator.
//!
//! Parameters, per-trial outcomes, and the error type used across the
//! strategy and simulation modules. Money is `Decimal` so that doubling
//! and comparing stakes is exact; probabilities stay `f64`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Table limits
// ---------------------------------------------------------------------------

/// Betting limits posted at the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLimits {
    /// Smallest stake accepted; also the stake a fresh sequence starts with.
    pub min_bet: Decimal,
    /// Largest single stake accepted.
    pub max_bet: Decimal,
}

impl TableLimits {
    pub fn new(min_bet: Decimal, max_bet: Decimal) -> Self {
        Self { min_bet, max_bet }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.min_bet <= Decimal::ZERO {
            return Err(SimError::invalid(
                "min_bet",
                format!("must be positive, got {}", self.min_bet),
            ));
        }
        if self.max_bet < self.min_bet {
            return Err(SimError::invalid(
                "max_bet",
                format!("{} is below min_bet {}", self.max_bet, self.min_bet),
            ));
        }
        // A stake at the limit still gets doubled once before the loop sees it.
        if self.max_bet.checked_mul(Decimal::TWO).is_none() {
            return Err(SimError::invalid(
                "max_bet",
                format!("{} is too large to double", self.max_bet),
            ));
        }
        Ok(())
    }

    /// Most consecutive losses a doubling sequence can absorb before the
    /// next stake would exceed `max_bet`.
    pub fn max_losing_streak(&self) -> u32 {
        let mut bet = self.min_bet;
        let mut streak = 0;
        while bet <= self.max_bet && bet > Decimal::ZERO {
            streak += 1;
            match bet.checked_mul(Decimal::TWO) {
                Some(next) => bet = next,
                None => break,
            }
        }
        streak
    }
}

impl fmt::Display for TableLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min ${} / max ${}", self.min_bet, self.max_bet)
    }
}

// ---------------------------------------------------------------------------
// Trial parameters
// ---------------------------------------------------------------------------

/// Immutable inputs to a single reset-on-win trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialParams {
    pub initial_bankroll: Decimal,
    /// Profit goal; the trial succeeds once `gain >= target`.
    pub target: Decimal,
    pub limits: TableLimits,
    /// Chance of winning a single round (0.0–1.0).
    pub win_probability: f64,
}

impl TrialParams {
    pub fn new(
        initial_bankroll: Decimal,
        target: Decimal,
        limits: TableLimits,
        win_probability: f64,
    ) -> Self {
        Self {
            initial_bankroll,
            target,
            limits,
            win_probability,
        }
    }

    /// Same parameters with a different profit goal.
    pub fn with_target(&self, target: Decimal) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }

    /// Reject parameters that cannot describe a real table.
    ///
    /// Any target is accepted: a non-positive one is met before the first spin.
    pub fn validate(&self) -> Result<(), SimError> {
        self.limits.validate()?;
        validate_bankroll(self.initial_bankroll, self.target, &self.limits)?;
        validate_probability(self.win_probability)
    }
}

/// The bankroll never exceeds `bankroll + goal + max_bet`, so that sum
/// (with one extra stake of slack) must fit in a `Decimal`.
pub(crate) fn validate_bankroll(
    bankroll: Decimal,
    goal: Decimal,
    limits: &TableLimits,
) -> Result<(), SimError> {
    if bankroll < Decimal::ZERO {
        return Err(SimError::invalid(
            "initial_bankroll",
            format!("must be non-negative, got {bankroll}"),
        ));
    }
    let ceiling = limits
        .max_bet
        .checked_mul(Decimal::TWO)
        .and_then(|stakes| stakes.checked_add(goal.max(Decimal::ZERO)))
        .and_then(|headroom| headroom.checked_add(bankroll));
    if ceiling.is_none() {
        return Err(SimError::invalid(
            "initial_bankroll",
            format!("{bankroll} leaves no room to reach the target without overflow"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_probability(p: f64) -> Result<(), SimError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::invalid(
            "win_probability",
            format!("must be within [0, 1], got {p}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Stop reasons
// ---------------------------------------------------------------------------

/// Why a trial stopped. Ruin and the table limit are ordinary outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The profit goal was met (or, for the walk-away policy, a round was won).
    TargetReached,
    /// The next doubled stake would exceed `max_bet`.
    TableLimit,
    /// The bankroll cannot cover the next stake.
    InsufficientFunds,
}

impl StopReason {
    pub fn is_success(self) -> bool {
        matches!(self, StopReason::TargetReached)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::TargetReached => write!(f, "target reached"),
            StopReason::TableLimit => write!(f, "table limit"),
            StopReason::InsufficientFunds => write!(f, "insufficient funds"),
        }
    }
}

// ---------------------------------------------------------------------------
// Trial outcomes
// ---------------------------------------------------------------------------

/// Result of one reset-on-win trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub reached_target: bool,
    pub stop_reason: StopReason,
    /// Bankroll before the first spin and after every spin.
    pub bankroll_log: Vec<Decimal>,
    /// `stakes[i]` is the bet placed on spin `i + 1`.
    pub stakes: Vec<Decimal>,
    pub final_bankroll: Decimal,
    /// The stake that would have been placed next.
    pub final_bet: Decimal,
    /// Profit relative to the starting bankroll.
    pub gain: Decimal,
    pub longest_losing_streak: u32,
}

impl TrialOutcome {
    pub fn spins(&self) -> usize {
        self.stakes.len()
    }
}

impl fmt::Display for TrialOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} spins: bankroll ${} (gain ${}, next bet ${})",
            self.stop_reason,
            self.spins(),
            self.final_bankroll,
            self.gain,
            self.final_bet,
        )
    }
}

/// Result of one walk-away trial: stop at the first winning round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkawayOutcome {
    pub won: bool,
    pub stop_reason: StopReason,
    /// Net result of the last round played (zero if no round was played).
    pub last_winnings: Decimal,
    pub bankroll_log: Vec<Decimal>,
    pub final_bankroll: Decimal,
    /// Stake after the final doubling.
    pub final_bet: Decimal,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised before any round is simulated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
