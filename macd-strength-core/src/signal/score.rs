//! Composite strength score: weighted sum of normalized MACD, Bollinger and RSI
//! components, computed for both sides.

use serde::Serialize;

use crate::config::StrategyConfig;
use crate::indicators::{diff, normalize};
use crate::snapshot::IndicatorSnapshot;

/// Share of the MACD component taken by delta magnitude; the rest is impulse.
const MACD_MAGNITUDE_SHARE: f64 = 0.7;
const MACD_IMPULSE_SHARE: f64 = 0.3;

/// Scored composite values and their per-component breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreState {
    pub score_long: f64,
    pub score_short: f64,
    pub required: f64,
    pub macd_component_long: f64,
    pub macd_component_short: f64,
    pub bb_component: f64,
    pub rsi_component_long: f64,
    pub rsi_component_short: f64,
}

impl ScoreState {
    /// Descriptive key → value view for logging and audit.
    pub fn to_record(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("score_long", self.score_long),
            ("score_short", self.score_short),
            ("required", self.required),
            ("macd_component_long", self.macd_component_long),
            ("macd_component_short", self.macd_component_short),
            ("bb_component", self.bb_component),
            ("rsi_component_long", self.rsi_component_long),
            ("rsi_component_short", self.rsi_component_short),
        ]
    }
}

/// Rewards longs while RSI is below 70, saturating across a 40-point band.
pub fn rsi_component_long(rsi: f64) -> f64 {
    (100.0 * (70.0 - rsi) / 40.0).clamp(0.0, 100.0)
}

/// Rewards shorts while RSI is above 30, saturating across a 40-point band.
pub fn rsi_component_short(rsi: f64) -> f64 {
    (100.0 * (rsi - 30.0) / 40.0).clamp(0.0, 100.0)
}

/// Long and short MACD components: shared delta magnitude plus side-specific impulse.
pub fn macd_components(delta_history: &[f64], lookback: usize) -> (f64, f64) {
    let magnitude: Vec<f64> = delta_history.iter().map(|d| d.abs()).collect();
    let impulse = diff(delta_history);
    // f64::max discards NaN, so the undefined leading entry is carried over by hand.
    let rising: Vec<f64> = impulse
        .iter()
        .map(|d| if d.is_nan() { f64::NAN } else { d.max(0.0) })
        .collect();
    let falling: Vec<f64> = impulse
        .iter()
        .map(|d| if d.is_nan() { f64::NAN } else { (-d).max(0.0) })
        .collect();

    let mag = normalize(&magnitude, lookback);
    let long = MACD_MAGNITUDE_SHARE * mag + MACD_IMPULSE_SHARE * normalize(&rising, lookback);
    let short = MACD_MAGNITUDE_SHARE * mag + MACD_IMPULSE_SHARE * normalize(&falling, lookback);
    (long, short)
}

pub fn composite_scores(snapshot: &IndicatorSnapshot, config: &StrategyConfig) -> ScoreState {
    let lookback = config.params().normalization_lookback;
    let weights = config.weights();

    let (macd_long, macd_short) = macd_components(&snapshot.delta_history, lookback);
    let bb = normalize(&snapshot.bb_width_history, lookback);
    let rsi_long = rsi_component_long(snapshot.rsi);
    let rsi_short = rsi_component_short(snapshot.rsi);

    ScoreState {
        score_long: weights.macd * macd_long + weights.bb * bb + weights.rsi * rsi_long,
        score_short: weights.macd * macd_short + weights.bb * bb + weights.rsi * rsi_short,
        required: config.strength_tier().threshold(),
        macd_component_long: macd_long,
        macd_component_short: macd_short,
        bb_component: bb,
        rsi_component_long: rsi_long,
        rsi_component_short: rsi_short,
    }
}
