//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Table and bankroll settings become [`TrialParams`]; the Monte Carlo
//! section maps straight onto [`MonteCarloConfig`].

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

use crate::simulation::MonteCarloConfig;
use crate::types::{TableLimits, TrialParams};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,
    pub sweep: SweepConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub initial_bankroll: Decimal,
    pub min_bet: Decimal,
    pub max_bet: Decimal,
    pub win_probability: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SweepConfig {
    pub targets: Vec<Decimal>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config
            .trial_params(Decimal::ZERO)
            .validate()
            .context("Invalid simulation settings")?;
        config
            .monte_carlo
            .validate()
            .context("Invalid monte_carlo settings")?;
        Ok(config)
    }

    pub fn limits(&self) -> TableLimits {
        TableLimits::new(self.simulation.min_bet, self.simulation.max_bet)
    }

    /// Trial parameters for a single profit goal.
    pub fn trial_params(&self, target: Decimal) -> TrialParams {
        TrialParams::new(
            self.simulation.initial_bankroll,
            target,
            self.limits(),
            self.simulation.win_probability,
        )
    }
}
