//! Even-money round resolution.

use rust_decimal::Decimal;

use super::source::RandomSource;

/// Resolve one round: `+bet` with probability `win_probability`, else `-bet`.
pub fn play_round<R>(bet: Decimal, win_probability: f64, rng: &mut R) -> Decimal
where
    R: RandomSource + ?Sized,
{
    if rng.next_uniform() < win_probability {
        bet
    } else {
        -bet
    }
}
