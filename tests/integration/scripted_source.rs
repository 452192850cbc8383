//! Scripted random source for integration testing.
//!
//! Replays a fixed list of draws so trial paths can be written out by hand,
//! and records how many draws were consumed.

use martingale::strategy::RandomSource;

/// Draw that always wins at any positive win probability.
pub const WIN: f64 = 0.0;
/// Draw that loses at any win probability below 0.99.
pub const LOSS: f64 = 0.99;

pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.to_vec(),
            cursor: 0,
        }
    }

    /// Build a script from a compact pattern such as `"LLW"`.
    pub fn from_pattern(pattern: &str) -> Self {
        let draws: Vec<f64> = pattern
            .chars()
            .map(|c| match c {
                'W' => WIN,
                'L' => LOSS,
                other => panic!("unknown outcome {other:?} in pattern"),
            })
            .collect();
        Self::new(&draws)
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.draws.len() - self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        let draw = *self
            .draws
            .get(self.cursor)
            .unwrap_or_else(|| panic!("script exhausted after {} draws", self.cursor));
        self.cursor += 1;
        draw
    }
}
