//! Injectable uniform random source.
//!
//! Every spin consumes exactly one draw, so two trials fed the same
//! stream of draws follow the same path.

use rand::rngs::StdRng;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// A stream of uniform samples in `[0, 1)`.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;
}

impl RandomSource for ChaCha8Rng {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RandomSource for StdRng {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
