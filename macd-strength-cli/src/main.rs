//! MACD Strength CLI: bar-file evaluation and trailing-stop updates.
//!
//! Commands:
//! - `evaluate`: run one cycle per CSV bar file and print a JSON outcome per line
//! - `trail`: advance an open plan by one price and report any exit
//! - `check-config`: validate a TOML config and print its fingerprint

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use macd_strength_cli::commands::{check_config, evaluate_files, load_config, load_plan, trail};
use macd_strength_cli::obs::{init_tracing, LogFormat};
use macd_strength_core::engine::SignalEngine;

#[derive(Parser)]
#[command(
    name = "macd-strength",
    about = "MACD strength signal engine"
)]
struct Cli {
    /// Log output format (filter via MACD_STRENGTH_LOG).
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Default log level when MACD_STRENGTH_LOG is unset.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate each bar file as an independent instrument.
    Evaluate {
        /// Path to a TOML config file. Defaults to built-in parameters.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Account balance in margin currency. Treated as 0 when omitted.
        #[arg(long)]
        balance: Option<f64>,

        /// CSV bar files (timestamp ms, open, high, low, close, volume).
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Advance an open trade plan by one observed price.
    Trail {
        /// Path to a TOML config file. Defaults to built-in parameters.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Trade plan JSON, as printed by `evaluate`.
        #[arg(long)]
        plan: PathBuf,

        /// Latest traded price.
        #[arg(long)]
        price: f64,
    },
    /// Validate a config file and print its fingerprint.
    CheckConfig {
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format)?;

    match cli.command {
        Commands::Evaluate {
            config,
            balance,
            files,
        } => run_evaluate(config, balance, files),
        Commands::Trail {
            config,
            plan,
            price,
        } => run_trail(config, plan, price),
        Commands::CheckConfig { config } => {
            let report = check_config(load_config(Some(config.as_path()))?);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn run_evaluate(config: Option<PathBuf>, balance: Option<f64>, files: Vec<PathBuf>) -> Result<()> {
    let engine = SignalEngine::new(load_config(config.as_deref())?);
    tracing::info!(fingerprint = engine.fingerprint(), files = files.len(), "evaluating");

    let outcomes = evaluate_files(&engine, &files, balance.unwrap_or(0.0), chrono::Utc::now());
    let mut failed = 0usize;
    for outcome in &outcomes {
        if outcome.is_error() {
            failed += 1;
        }
        println!("{}", serde_json::to_string(outcome)?);
    }

    if failed > 0 {
        eprintln!("{failed} of {} file(s) failed", outcomes.len());
        std::process::exit(1);
    }
    Ok(())
}

fn run_trail(config: Option<PathBuf>, plan: PathBuf, price: f64) -> Result<()> {
    let engine = SignalEngine::new(load_config(config.as_deref())?);
    let plan = load_plan(&plan)?;
    let update = trail(&engine, &plan, price)?;
    println!("{}", serde_json::to_string_pretty(&update)?);
    Ok(())
}
