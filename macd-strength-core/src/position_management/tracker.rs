//! Open-position tracking: advance peak ROI and the trailing stop on each price,
//! and report which protective level the price has reached.

use serde::{Deserialize, Serialize};

use crate::domain::{Side, TradePlan};
use crate::error::InputError;

use super::roi::price_to_roi;
use super::trailing::TrailingStopEngine;

/// Protective level hit by the latest price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitTrigger {
    /// Price reached the stop while it still sat at the static loss cap.
    StopLoss,
    /// Price reached the stop after it had trailed off the loss cap.
    TrailingStop,
    TakeProfit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionTracker {
    engine: TrailingStopEngine,
}

impl PositionTracker {
    pub fn new(engine: TrailingStopEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &TrailingStopEngine {
        &self.engine
    }

    /// Folds `price` into the plan's peak ROI and returns the plan with the
    /// ratcheted trailing stop. The input plan is left as it was.
    pub fn on_price(&self, plan: &TradePlan, price: f64) -> Result<TradePlan, InputError> {
        if !price.is_finite() {
            return Err(InputError::NonFinitePrice(price));
        }
        let roi = price_to_roi(plan.side, plan.entry_price, price, self.engine.leverage())?;
        let peak_roi = plan.peak_roi.max(roi);
        let stop = self.engine.next_stop(
            plan.side,
            plan.entry_price,
            peak_roi,
            Some(plan.trailing_stop_price),
        );
        Ok(plan.with_trailing(peak_roi, stop))
    }
}

/// Which exit, if any, `price` triggers against `plan`.
///
/// The stop is checked first, so a price gapping through both levels of a
/// malformed plan reports the stop.
pub fn exit_trigger(plan: &TradePlan, price: f64) -> Option<ExitTrigger> {
    let (stop_hit, target_hit) = match plan.side {
        Side::Long => (
            price <= plan.trailing_stop_price,
            price >= plan.take_profit_price,
        ),
        Side::Short => (
            price >= plan.trailing_stop_price,
            price <= plan.take_profit_price,
        ),
    };

    if stop_hit {
        if plan.trailing_engaged() {
            Some(ExitTrigger::TrailingStop)
        } else {
            Some(ExitTrigger::StopLoss)
        }
    } else if target_hit {
        Some(ExitTrigger::TakeProfit)
    } else {
        None
    }
}
