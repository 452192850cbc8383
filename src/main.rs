//! Martingale — command-line entry point.
//!
//! Loads configuration, initialises structured logging, and runs either a
//! full target sweep or a single narrated trial. Results go to stdout as
//! JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use tracing::info;

use martingale::config::AppConfig;
use martingale::simulation::report::{bankroll_chart, log_sweep_report, narrate_trial, narrate_walkaway};
use martingale::simulation::run_sweep;
use martingale::strategy::{run_trial, run_walkaway_trial};

#[derive(Parser, Debug)]
#[command(name = "martingale")]
#[command(about = "Estimate how often the Martingale strategy reaches a profit goal")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the success rate for every configured target (default)
    Sweep,
    /// Play one reset-on-win trial and print its narration and chart data
    Trial {
        /// Profit goal for this trial
        #[arg(short, long)]
        target: Decimal,
        /// Seed for a reproducible trial
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Play one walk-away trial (leave after the first win)
    Walkaway {
        /// Seed for a reproducible trial
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let args = Args::parse();
    let cfg = AppConfig::load(&args.config)?;

    init_logging();

    info!(
        config = %args.config,
        bankroll = %cfg.simulation.initial_bankroll,
        limits = %cfg.limits(),
        win_probability = cfg.simulation.win_probability,
        "Martingale simulator starting"
    );

    match args.command.unwrap_or(Command::Sweep) {
        Command::Sweep => {
            let base = cfg.trial_params(Decimal::ZERO);
            let report = run_sweep(&cfg.sweep.targets, &base, &cfg.monte_carlo)?;
            log_sweep_report(&report);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialise sweep report")?
            );
        }
        Command::Trial { target, seed } => {
            let mut rng = make_rng(seed);
            let outcome = run_trial(&cfg.trial_params(target), &mut rng)?;
            info!(outcome = %outcome, "Trial complete");
            println!("{}", narrate_trial(&outcome, &cfg.limits()));
            let chart = bankroll_chart(&outcome.bankroll_log, target);
            println!(
                "{}",
                serde_json::to_string_pretty(&chart).context("Failed to serialise chart data")?
            );
        }
        Command::Walkaway { seed } => {
            let mut rng = make_rng(seed);
            let outcome = run_walkaway_trial(
                cfg.simulation.initial_bankroll,
                &cfg.limits(),
                cfg.simulation.win_probability,
                &mut rng,
            )?;
            println!("{}", narrate_walkaway(&outcome, &cfg.limits()));
            println!(
                "{}",
                serde_json::to_string(&outcome.bankroll_log).context("Failed to serialise bankroll log")?
            );
        }
    }

    Ok(())
}

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("martingale=info"));

    let json_logging = std::env::var("MARTINGALE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
