//! Trailing-stop engine: converts peak ROI into a stop price.
//!
//! Below `start_roi` the stop sits at the static cap, `-stop_loss_roi`. At or
//! above it the stop targets `max(0, peak_roi - step_roi)`, never worse than the
//! static cap, so the gap back to the peak stays `step_roi`. The result is then
//! ratcheted against the previous stop.
//!
//! Peak ROI is owned by the caller and must be updated as
//! `max(peak_roi, price_to_roi(current_price))` before each call.

use crate::config::TrailingStopConfig;
use crate::domain::Side;

use super::ratchet::ratchet;
use super::roi::pct_to_price;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailingStopEngine {
    config: TrailingStopConfig,
    leverage: u32,
}

impl TrailingStopEngine {
    pub fn new(config: TrailingStopConfig, leverage: u32) -> Self {
        Self { config, leverage }
    }

    pub fn config(&self) -> &TrailingStopConfig {
        &self.config
    }

    pub fn leverage(&self) -> u32 {
        self.leverage
    }

    /// The static loss cap: the price at `-stop_loss_roi`.
    pub fn static_stop(&self, side: Side, entry_price: f64) -> f64 {
        pct_to_price(side, entry_price, -self.config.stop_loss_roi(), self.leverage)
    }

    /// Stop level implied by `peak_roi` alone, before the ratchet.
    pub fn candidate(&self, side: Side, entry_price: f64, peak_roi: f64) -> f64 {
        let static_stop = self.static_stop(side, entry_price);
        if peak_roi < self.config.start_roi() {
            return static_stop;
        }
        let target_roi = (peak_roi - self.config.step_roi()).max(0.0);
        let trailing = pct_to_price(side, entry_price, target_roi, self.leverage);
        side.tighter(static_stop, trailing)
    }

    /// New stop price; never looser than `previous` when one is given.
    pub fn next_stop(
        &self,
        side: Side,
        entry_price: f64,
        peak_roi: f64,
        previous: Option<f64>,
    ) -> f64 {
        ratchet(side, self.candidate(side, entry_price, peak_roi), previous)
    }
}
