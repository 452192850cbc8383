//! Reset-on-win Martingale trial.
//!
//! Double the stake after every loss, drop back to the table minimum after
//! every win, and keep playing until the profit goal is met, the bankroll
//! can't cover the next stake, or the next stake would break the table limit.

use rust_decimal::Decimal;
use tracing::debug;

use super::roulette::play_round;
use super::source::RandomSource;
use crate::types::{SimError, StopReason, TrialOutcome, TrialParams};

/// Run one trial from `params.initial_bankroll` until a stop condition holds.
///
/// Parameters are validated before the first draw. Running out of money or
/// hitting the table limit is reported through `stop_reason`, never as an error.
/// Wins reset the stake, so the trial length grows with `target / min_bet`.
pub fn run_trial<R>(params: &TrialParams, rng: &mut R) -> Result<TrialOutcome, SimError>
where
    R: RandomSource + ?Sized,
{
    params.validate()?;

    let min_bet = params.limits.min_bet;
    let max_bet = params.limits.max_bet;
    let start = params.initial_bankroll;

    let mut bankroll = start;
    let mut bet = min_bet;
    let mut gain = Decimal::ZERO;
    let mut bankroll_log = vec![start];
    let mut stakes = Vec::new();
    let mut streak = 0u32;
    let mut longest_losing_streak = 0u32;

    while bankroll >= bet && bet <= max_bet && gain < params.target {
        let winnings = play_round(bet, params.win_probability, rng);
        stakes.push(bet);
        bankroll += winnings;
        bankroll_log.push(bankroll);
        gain = bankroll - start;

        if winnings < Decimal::ZERO {
            bet *= Decimal::TWO;
            streak += 1;
            longest_losing_streak = longest_losing_streak.max(streak);
        } else {
            bet = min_bet;
            streak = 0;
        }
    }

    let stop_reason = classify_stop(gain, params.target, bet, max_bet);

    debug!(
        target = %params.target,
        spins = stakes.len(),
        bankroll = %bankroll,
        gain = %gain,
        next_bet = %bet,
        reason = %stop_reason,
        "Trial finished"
    );

    Ok(TrialOutcome {
        reached_target: stop_reason.is_success(),
        stop_reason,
        bankroll_log,
        stakes,
        final_bankroll: bankroll,
        final_bet: bet,
        gain,
        longest_losing_streak,
    })
}

/// Exit precedence: goal met, then table limit, then funds.
fn classify_stop(gain: Decimal, target: Decimal, bet: Decimal, max_bet: Decimal) -> StopReason {
    if gain >= target {
        StopReason::TargetReached
    } else if bet > max_bet {
        StopReason::TableLimit
    } else {
        StopReason::InsufficientFunds
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
