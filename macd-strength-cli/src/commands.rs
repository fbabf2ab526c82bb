//! Command handlers. Each returns data; printing is left to `main`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use macd_strength_core::config::EngineConfig;
use macd_strength_core::domain::TradePlan;
use macd_strength_core::engine::{CycleOutcome, SignalEngine, TrailUpdate};

use crate::bars::load_bars;

/// Loads the config at `path`, or the built-in defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("invalid config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// One bar file's cycle result. Exactly one of `outcome` and `error` is set.
#[derive(Debug, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CycleOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Evaluates each file as an independent instrument, in parallel.
/// Results keep the order of `paths`.
pub fn evaluate_files(
    engine: &SignalEngine,
    paths: &[PathBuf],
    balance: f64,
    now: DateTime<Utc>,
) -> Vec<FileOutcome> {
    paths
        .par_iter()
        .map(|path| {
            let result = load_bars(path).and_then(|bars| {
                engine
                    .run_cycle(&bars, balance, now)
                    .with_context(|| format!("cycle aborted for {}", path.display()))
            });
            match result {
                Ok(outcome) => FileOutcome {
                    path: path.clone(),
                    outcome: Some(outcome),
                    error: None,
                },
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %format!("{err:#}"), "evaluation failed");
                    FileOutcome {
                        path: path.clone(),
                        outcome: None,
                        error: Some(format!("{err:#}")),
                    }
                }
            }
        })
        .collect()
}

pub fn load_plan(path: &Path) -> Result<TradePlan> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid plan {}", path.display()))
}

/// Advances an open plan by one observed price.
pub fn trail(engine: &SignalEngine, plan: &TradePlan, price: f64) -> Result<TrailUpdate> {
    Ok(engine.update_trailing(plan, price)?)
}

#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub fingerprint: String,
    pub min_bars: usize,
    pub config: EngineConfig,
}

pub fn check_config(config: EngineConfig) -> ConfigReport {
    ConfigReport {
        fingerprint: config.fingerprint(),
        min_bars: config.strategy.min_bars(),
        config,
    }
}
