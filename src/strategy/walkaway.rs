//! Walk-away Martingale: double after every round and leave at the first win.
//!
//! Kept as a reference policy alongside [`super::martingale::run_trial`];
//! the Monte Carlo estimator does not use it.

use rust_decimal::Decimal;
use tracing::debug;

use super::roulette::play_round;
use super::source::RandomSource;
use crate::types::{
    validate_bankroll, validate_probability, SimError, StopReason, TableLimits, WalkawayOutcome,
};

/// Play until a single round comes up positive or the sequence can't continue.
///
/// The stake doubles after every round, including the winning one, so
/// `final_bet` is always twice the last stake placed.
pub fn run_walkaway_trial<R>(
    bankroll: Decimal,
    limits: &TableLimits,
    win_probability: f64,
    rng: &mut R,
) -> Result<WalkawayOutcome, SimError>
where
    R: RandomSource + ?Sized,
{
    limits.validate()?;
    validate_bankroll(bankroll, Decimal::ZERO, limits)?;
    validate_probability(win_probability)?;

    let mut bankroll = bankroll;
    let mut bet = limits.min_bet;
    let mut winnings = Decimal::ZERO;
    let mut bankroll_log = vec![bankroll];

    while bankroll >= bet && bet <= limits.max_bet && winnings <= Decimal::ZERO {
        winnings = play_round(bet, win_probability, rng);
        bankroll += winnings;
        bankroll_log.push(bankroll);
        bet *= Decimal::TWO;
    }

    let stop_reason = if winnings > Decimal::ZERO {
        StopReason::TargetReached
    } else if bet > limits.max_bet {
        StopReason::TableLimit
    } else {
        StopReason::InsufficientFunds
    };

    debug!(
        spins = bankroll_log.len() - 1,
        bankroll = %bankroll,
        last_winnings = %winnings,
        reason = %stop_reason,
        "Walk-away trial finished"
    );

    Ok(WalkawayOutcome {
        won: stop_reason.is_success(),
        stop_reason,
        last_winnings: winnings,
        bankroll_log,
        final_bankroll: bankroll,
        final_bet: bet,
    })
}
