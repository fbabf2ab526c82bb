//! Error taxonomy for an evaluation cycle.
//!
//! Configuration errors are fatal before the engine runs. Input errors abort the
//! current cycle. Insufficient data is not an error at all: it is reported as a
//! no-signal outcome (see `signal::NoSignalReason`).

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::BarError;

/// Invalid values handed in by an upstream collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InputError {
    #[error("entry price must be positive; received {0}")]
    NonPositiveEntryPrice(f64),

    #[error("account balance must be positive to size a position; received {0}")]
    NonPositiveBalance(f64),

    #[error("price must be a finite number; received {0}")]
    NonFinitePrice(f64),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid bar series: {0}")]
    Bars(#[from] BarError),

    #[error("invalid input: {0}")]
    Input(#[from] InputError),
}
