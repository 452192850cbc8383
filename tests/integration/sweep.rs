//! Target sweeps driven from configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use martingale::config::AppConfig;
use martingale::simulation::{run_sweep, sweep_targets, MonteCarloConfig};

const CONFIG: &str = r#"
[simulation]
initial_bankroll = 1000.0
min_bet = 5.0
max_bet = 500.0
win_probability = 0.5

[monte_carlo]
trials = 1000
seed = 31337

[sweep]
targets = [5.0, 10.0, 20.0]
"#;

#[test]
fn test_configured_sweep_is_ordered_and_monotone() {
    let cfg = AppConfig::parse(CONFIG).unwrap();
    let base = cfg.trial_params(Decimal::ZERO);
    let pcts = sweep_targets(&cfg.sweep.targets, &base, &cfg.monte_carlo).unwrap();

    assert_eq!(pcts.len(), 3);
    assert!(pcts.iter().all(|p| (0.0..=1.0).contains(p)));
    assert!(pcts[0] >= pcts[1] && pcts[1] >= pcts[2], "{pcts:?}");
}

#[test]
fn test_repeated_seed_is_deterministic() {
    let cfg = AppConfig::parse(CONFIG).unwrap();
    let base = cfg.trial_params(Decimal::ZERO);
    let first = sweep_targets(&cfg.sweep.targets, &base, &cfg.monte_carlo).unwrap();
    let second = sweep_targets(&cfg.sweep.targets, &base, &cfg.monte_carlo).unwrap();
    assert_eq!(first, second);

    let sequential = MonteCarloConfig {
        parallel: false,
        ..cfg.monte_carlo.clone()
    };
    let third = sweep_targets(&cfg.sweep.targets, &base, &sequential).unwrap();
    assert_eq!(first, third);
}

#[test]
fn test_large_goals_rarely_reached() {
    let cfg = AppConfig::parse(CONFIG).unwrap();
    let base = cfg.trial_params(Decimal::ZERO);
    let report = run_sweep(&[dec!(5), dec!(5000)], &base, &cfg.monte_carlo).unwrap();
    assert!(report.points[0].win_pct > 0.9);
    assert!(report.points[1].win_pct < report.points[0].win_pct);
    assert!(report.points.iter().all(|p| p.std_error >= 0.0));
}
