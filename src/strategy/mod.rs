//! Betting strategies — round resolution, the reset-on-win Martingale,
//! and the walk-away variant.

pub mod martingale;
pub mod roulette;
pub mod source;
pub mod walkaway;

pub use martingale::run_trial;
pub use roulette::play_round;
pub use source::RandomSource;
pub use walkaway::run_walkaway_trial;
