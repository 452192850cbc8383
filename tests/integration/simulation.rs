//! End-to-end trial and estimation behaviour.
//!
//! Hand-scripted paths pin down the staking rules; seeded runs check the
//! statistical properties of the estimator.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use martingale::simulation::{estimate_success_rate, estimate_with_source, MonteCarloConfig};
use martingale::strategy::{run_trial, run_walkaway_trial};
use martingale::types::{StopReason, TableLimits, TrialParams};

use crate::scripted_source::ScriptedSource;

fn table() -> TableLimits {
    TableLimits::new(dec!(5), dec!(500))
}

fn params(bankroll: Decimal, target: Decimal, p: f64) -> TrialParams {
    TrialParams::new(bankroll, target, table(), p)
}

#[test]
fn test_scripted_trial_path() {
    let mut rng = ScriptedSource::from_pattern("LWLLW");
    let out = run_trial(&params(dec!(200), dec!(10), 0.5), &mut rng).unwrap();
    assert!(out.reached_target);
    assert_eq!(
        out.bankroll_log,
        vec![dec!(200), dec!(195), dec!(205), dec!(200), dec!(190), dec!(210)]
    );
    assert_eq!(out.stakes, vec![dec!(5), dec!(10), dec!(5), dec!(10), dec!(20)]);
    assert_eq!(rng.remaining(), 0);
}

#[test]
fn test_estimate_from_scripted_stream() {
    // Three trials back to back: win, loss-then-win, seven straight losses.
    let mut rng = ScriptedSource::from_pattern("WLWLLLLLLL");
    let est = estimate_with_source(&params(dec!(10_000), dec!(5), 0.5), 3, &mut rng).unwrap();
    assert_eq!(est.trials, 3);
    assert_eq!(est.successes, 2);
    assert_eq!(est.stops.table_limit, 1);
    assert_eq!(rng.consumed(), 10);
}

#[test]
fn test_walkaway_scripted() {
    let mut rng = ScriptedSource::from_pattern("LLLW");
    let out = run_walkaway_trial(dec!(1000), &table(), 0.5, &mut rng).unwrap();
    assert!(out.won);
    assert_eq!(out.last_winnings, dec!(40));
    assert_eq!(out.final_bankroll, dec!(1005));
    assert_eq!(rng.remaining(), 0);
}

#[test]
fn test_log_invariants_hold_across_seeds() {
    for seed in 0..300 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let p = params(dec!(700), dec!(150), 0.4737);
        let out = run_trial(&p, &mut rng).unwrap();

        assert_eq!(out.bankroll_log[0], dec!(700));
        assert_eq!(*out.bankroll_log.last().unwrap(), out.final_bankroll);
        for (step, stake) in out.bankroll_log.windows(2).zip(&out.stakes) {
            assert_eq!((step[1] - step[0]).abs(), *stake);
        }
        match out.stop_reason {
            StopReason::TargetReached => assert!(out.gain >= dec!(150)),
            StopReason::TableLimit => assert!(out.final_bet > dec!(500)),
            StopReason::InsufficientFunds => assert!(out.final_bankroll < out.final_bet),
        }
        assert!(out.final_bankroll >= Decimal::ZERO);
    }
}

#[test]
fn test_hopeless_table_terminates_quickly() {
    // ceil(log2(max_bet / min_bet)) + 2
    let bound = 9;
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let out = run_trial(&params(dec!(1_000_000), dec!(5), 0.0), &mut rng).unwrap();
        assert!(!out.reached_target);
        assert!(out.spins() <= bound);
    }
}

#[test]
fn test_single_unit_goal_reference_value() {
    // The only way to miss a one-unit goal is seven losses in a row.
    let reference = 1.0 - 0.5_f64.powi(7);
    let est = estimate_success_rate(&params(dec!(100_000), dec!(5), 0.5), &MonteCarloConfig::seeded(1))
        .unwrap();
    assert!((est.win_pct - reference).abs() < 0.05, "got {}", est.win_pct);
}

#[test]
fn test_independent_runs_show_binomial_spread() {
    // Max bet 40 allows four straight losses; a 20 goal needs four clean cycles.
    let p = TrialParams::new(dec!(100_000), dec!(20), TableLimits::new(dec!(5), dec!(40)), 0.5);
    let expected = (15.0_f64 / 16.0).powi(4);

    let estimates: Vec<f64> = (0..20u64)
        .map(|k| {
            let cfg = MonteCarloConfig::seeded(k * 100_000);
            estimate_success_rate(&p, &cfg).unwrap().win_pct
        })
        .collect();

    let n = estimates.len() as f64;
    let mean = estimates.iter().sum::<f64>() / n;
    let variance = estimates.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let binomial = expected * (1.0 - expected) / 1000.0;

    assert!((mean - expected).abs() < 0.02, "mean {mean} vs {expected}");
    assert!(
        variance > binomial * 0.25 && variance < binomial * 4.0,
        "variance {variance} vs binomial {binomial}"
    );
}

#[test]
fn test_unseeded_estimates_are_valid() {
    let cfg = MonteCarloConfig {
        trials: 200,
        ..MonteCarloConfig::default()
    };
    let est = estimate_success_rate(&params(dec!(1000), dec!(50), 0.5), &cfg).unwrap();
    assert_eq!(est.stops.total(), 200);
    assert!((0.0..=1.0).contains(&est.win_pct));
}
