//! TradePlan: the execution intent handed to the order-submission adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Side;

/// Structured execution intent for a fired signal.
///
/// Immutable after creation. The trailing stop and peak ROI are advanced by
/// building a new plan with [`TradePlan::with_trailing`], never by mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub side: Side,
    pub entry_price: f64,
    pub stop_loss_price: f64,
    pub trailing_stop_price: f64,
    pub take_profit_price: f64,
    pub size: u64,
    pub peak_roi: f64,
    pub created_at: DateTime<Utc>,
}

impl TradePlan {
    /// Returns a copy carrying a new peak ROI and trailing stop.
    pub fn with_trailing(&self, peak_roi: f64, trailing_stop_price: f64) -> Self {
        Self {
            peak_roi,
            trailing_stop_price,
            ..self.clone()
        }
    }

    /// Whether the trailing stop has moved off the static stop-loss level.
    pub fn trailing_engaged(&self) -> bool {
        self.side.tighter(self.trailing_stop_price, self.stop_loss_price) != self.stop_loss_price
    }

    /// Flat key/value view for downstream order placement and audit logs.
    pub fn to_record(&self) -> Vec<(&'static str, String)> {
        vec![
            ("side", self.side.to_string()),
            ("entry_price", self.entry_price.to_string()),
            ("stop_loss_price", self.stop_loss_price.to_string()),
            ("trailing_stop_price", self.trailing_stop_price.to_string()),
            ("take_profit_price", self.take_profit_price.to_string()),
            ("size", self.size.to_string()),
            ("peak_roi", self.peak_roi.to_string()),
            ("timestamp_ms", self.created_at.timestamp_millis().to_string()),
        ]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
