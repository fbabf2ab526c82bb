//! SignalEngine: one evaluation cycle, start to finish.
//!
//! bar series → snapshot → scorer → (if fired) plan. The engine holds only its
//! validated configuration; nothing computed in one cycle is reused by the next.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::{BarSeries, TradePlan};
use crate::error::EngineError;
use crate::planner::build_trade_plan;
use crate::position_management::{exit_trigger, ExitTrigger, PositionTracker, TrailingStopEngine};
use crate::signal::{self, NoSignalReason, SignalEvaluation};
use crate::snapshot::IndicatorSnapshot;

/// Result of one cycle, serializable for audit logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleOutcome {
    pub symbol: String,
    pub config_fingerprint: String,
    pub evaluation: SignalEvaluation,
    pub snapshot: Option<IndicatorSnapshot>,
    pub plan: Option<TradePlan>,
}

/// Result of advancing an open plan by one price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailUpdate {
    pub plan: TradePlan,
    pub exit: Option<ExitTrigger>,
}

#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: EngineConfig,
    fingerprint: String,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        let fingerprint = config.fingerprint();
        Self {
            config,
            fingerprint,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    fn tracker(&self) -> PositionTracker {
        PositionTracker::new(TrailingStopEngine::new(
            self.config.trailing,
            self.config.instrument.leverage(),
        ))
    }

    /// Scores the latest bar without building a plan.
    pub fn evaluate(&self, bars: &BarSeries) -> (Option<IndicatorSnapshot>, SignalEvaluation) {
        let strategy = &self.config.strategy;
        let min_bars = strategy.min_bars();
        if bars.len() < min_bars {
            debug!(
                bars = bars.len(),
                min_bars, "bar series shorter than the longest indicator window"
            );
        }

        let Some(snapshot) = IndicatorSnapshot::compute(bars, strategy) else {
            return (None, SignalEvaluation::no_signal(NoSignalReason::NoBars));
        };
        debug!(
            timestamp = %snapshot.timestamp,
            close = snapshot.close,
            macd_delta = snapshot.macd_delta,
            bb_width = snapshot.bb_width,
            rsi = snapshot.rsi,
            "indicator snapshot"
        );

        let evaluation = signal::evaluate(&snapshot, strategy);
        (Some(snapshot), evaluation)
    }

    /// Runs a full cycle. Entry is the latest close.
    ///
    /// Insufficient data completes with no side. A fired signal with a
    /// non-positive balance or entry aborts the cycle with an error.
    pub fn run_cycle(
        &self,
        bars: &BarSeries,
        balance: f64,
        now: DateTime<Utc>,
    ) -> Result<CycleOutcome, EngineError> {
        let symbol = self.config.instrument.symbol();
        let (snapshot, evaluation) = self.evaluate(bars);

        let plan = match (evaluation.side, snapshot.as_ref()) {
            (Some(side), Some(snap)) => {
                let plan = build_trade_plan(side, snap.close, &self.config, balance, now)
                    .map_err(|err| {
                        warn!(symbol, %side, error = %err, "cycle aborted");
                        err
                    })?;
                if let Some(score) = &evaluation.score {
                    info!(
                        symbol,
                        %side,
                        score_long = score.score_long,
                        score_short = score.score_short,
                        required = score.required,
                        entry = plan.entry_price,
                        stop = plan.stop_loss_price,
                        take_profit = plan.take_profit_price,
                        size = plan.size,
                        fingerprint = %self.fingerprint,
                        "signal fired"
                    );
                }
                Some(plan)
            }
            _ => {
                if let Some(reason) = &evaluation.reason {
                    debug!(
                        symbol,
                        %reason,
                        long_blocked = ?evaluation.long_gates.and_then(|g| g.first_blocked()),
                        short_blocked = ?evaluation.short_gates.and_then(|g| g.first_blocked()),
                        "no signal"
                    );
                }
                None
            }
        };

        Ok(CycleOutcome {
            symbol: symbol.to_string(),
            config_fingerprint: self.fingerprint.clone(),
            evaluation,
            snapshot,
            plan,
        })
    }

    /// Advances an open plan to `price` and reports any exit it triggers.
    pub fn update_trailing(&self, plan: &TradePlan, price: f64) -> Result<TrailUpdate, EngineError> {
        let next = self.tracker().on_price(plan, price).map_err(|err| {
            warn!(side = %plan.side, price, error = %err, "trailing update rejected");
            err
        })?;
        if next.trailing_stop_price != plan.trailing_stop_price {
            info!(
                side = %next.side,
                peak_roi = next.peak_roi,
                from = plan.trailing_stop_price,
                to = next.trailing_stop_price,
                "trailing stop moved"
            );
        }
        let exit = exit_trigger(&next, price);
        Ok(TrailUpdate { plan: next, exit })
    }
}
