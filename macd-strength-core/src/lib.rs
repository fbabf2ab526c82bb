//! MACD Strength Core: the decision path of a single-asset signal engine.
//!
//! This crate contains the whole decision path of one evaluation cycle:
//! - Domain types (bars, bar series, sides, trade plans)
//! - Indicator library (EMA, MACD, RSI, ATR, Bollinger, rolling means) and the normalizer
//! - Signal scorer with independent crossover, trend, volume, and strength gates
//! - Margin-risk position sizer
//! - Trailing-stop engine with ratchet invariant
//! - Plan builder and the cycle-level `SignalEngine`
//!
//! It performs no I/O beyond reading a config file; market data, balances,
//! and order submission belong to the caller.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod planner;
pub mod position_management;
pub mod signal;
pub mod sizers;
pub mod snapshot;

pub mod prelude {
    pub use crate::config::{
        ConfigError, EngineConfig, InstrumentConfig, SizingConfig, StrategyConfig, StrategyParams,
        StrengthTier, TrailingStopConfig,
    };
    pub use crate::domain::{Bar, BarError, BarSeries, Side, TradePlan};
    pub use crate::engine::{CycleOutcome, SignalEngine, TrailUpdate};
    pub use crate::error::{EngineError, InputError};
    pub use crate::planner::build_trade_plan;
    pub use crate::position_management::{
        exit_trigger, pct_to_price, price_to_roi, ExitTrigger, PositionTracker, TrailingStopEngine,
    };
    pub use crate::signal::{NoSignalReason, ScoreState, SignalEvaluation};
    pub use crate::sizers::{contract_size, MarginSizer, Sizer};
    pub use crate::snapshot::IndicatorSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a cycle produces or consumes is Send + Sync,
    /// so independent instruments can be evaluated on separate threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::BarSeries>();
        require_sync::<domain::BarSeries>();
        require_send::<domain::TradePlan>();
        require_sync::<domain::TradePlan>();

        // Config
        require_send::<config::EngineConfig>();
        require_sync::<config::EngineConfig>();

        // Cycle types
        require_send::<snapshot::IndicatorSnapshot>();
        require_sync::<snapshot::IndicatorSnapshot>();
        require_send::<signal::SignalEvaluation>();
        require_sync::<signal::SignalEvaluation>();
        require_send::<engine::SignalEngine>();
        require_sync::<engine::SignalEngine>();
        require_send::<engine::CycleOutcome>();
        require_sync::<engine::CycleOutcome>();

        // Errors cross thread boundaries in the CLI
        require_send::<error::EngineError>();
        require_sync::<error::EngineError>();
    }

    /// Sizers are usable as trait objects.
    #[test]
    fn sizer_is_object_safe() {
        let config = config::EngineConfig::default();
        let sizer: Box<dyn sizers::Sizer> =
            Box::new(sizers::MarginSizer::new(&config.sizing, &config.instrument));
        assert_eq!(sizer.size(5000.0, 2000.0), Ok(2));
    }
}
