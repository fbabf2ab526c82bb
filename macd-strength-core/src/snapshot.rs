//! IndicatorSnapshot: every indicator the scorer reads, computed once per cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::StrategyConfig;
use crate::domain::BarSeries;
use crate::indicators::{atr, bollinger, latest, macd, rsi, volume_average};

/// Latest indicator values plus the histories needed for crossover detection
/// and normalization. Owned by a single evaluation cycle.
///
/// Scalars may be NaN when their window has not filled yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub fast_ema: f64,
    pub slow_ema: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub macd_delta: f64,
    pub macd_slope: f64,
    pub bb_width: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
    pub rsi: f64,
    pub atr: f64,
    pub atr_percent: f64,
    pub volume: f64,
    pub volume_average: f64,

    #[serde(skip)]
    pub delta_history: Vec<f64>,
    #[serde(skip)]
    pub bb_width_history: Vec<f64>,
    #[serde(skip)]
    pub rsi_history: Vec<f64>,
}

impl IndicatorSnapshot {
    /// Computes all indicators over `bars`. Returns `None` for an empty series.
    pub fn compute(bars: &BarSeries, config: &StrategyConfig) -> Option<Self> {
        let current = *bars.current()?;
        let p = config.params();

        let closes = bars.closes();
        let highs = bars.highs();
        let lows = bars.lows();
        let volumes = bars.volumes();

        let macd = macd(&closes, p.fast_length, p.slow_length, p.signal_length);
        let bands = bollinger(&closes, p.bb_window, p.bb_multiplier);
        let rsi = rsi(&closes, p.rsi_length);
        let atr = latest(&atr(&highs, &lows, &closes, p.atr_length));
        let volume_average = latest(&volume_average(&volumes, p.volume_ma_length));

        let atr_percent = if current.close != 0.0 {
            atr / current.close * 100.0
        } else {
            0.0
        };

        Some(Self {
            timestamp: current.timestamp,
            close: current.close,
            fast_ema: latest(&macd.fast_ema),
            slow_ema: latest(&macd.slow_ema),
            macd_line: latest(&macd.line),
            macd_signal: latest(&macd.signal),
            macd_delta: latest(&macd.delta),
            macd_slope: latest(&macd.slope),
            bb_width: latest(&bands.width),
            bb_upper: latest(&bands.upper),
            bb_lower: latest(&bands.lower),
            rsi: latest(&rsi),
            atr,
            atr_percent,
            volume: current.volume,
            volume_average,
            delta_history: macd.delta,
            bb_width_history: bands.width,
            rsi_history: rsi,
        })
    }

    /// Named view of the scalar values, for audit logs.
    pub fn to_record(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("close", self.close),
            ("fast_ema", self.fast_ema),
            ("slow_ema", self.slow_ema),
            ("macd_line", self.macd_line),
            ("macd_signal", self.macd_signal),
            ("macd_delta", self.macd_delta),
            ("macd_slope", self.macd_slope),
            ("bb_width", self.bb_width),
            ("bb_upper", self.bb_upper),
            ("bb_lower", self.bb_lower),
            ("rsi", self.rsi),
            ("atr", self.atr),
            ("atr_percent", self.atr_percent),
            ("volume", self.volume),
            ("volume_average", self.volume_average),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyParams;
    use crate::indicators::make_bars;

    #[test]
    fn empty_series_has_no_snapshot() {
        let bars = BarSeries::new(vec![]).unwrap();
        assert!(IndicatorSnapshot::compute(&bars, &StrategyConfig::default()).is_none());
    }

    #[test]
    fn snapshot_tracks_latest_bar() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let snap = IndicatorSnapshot::compute(&bars, &StrategyConfig::default()).unwrap();

        assert_eq!(snap.close, 159.0);
        assert_eq!(snap.timestamp, bars.current().unwrap().timestamp);
        assert_eq!(snap.delta_history.len(), 60);
        assert_eq!(snap.bb_width_history.len(), 60);
        assert_eq!(snap.rsi_history.len(), 60);
        assert_eq!(snap.macd_delta, *snap.delta_history.last().unwrap());
        assert!(snap.fast_ema > snap.slow_ema);
        // Every change is a gain, so RSI takes the neutral value.
        assert_eq!(snap.rsi, 50.0);
        assert!(snap.bb_width > 0.0);
        assert!(snap.atr > 0.0);
        assert!((snap.atr_percent - snap.atr / snap.close * 100.0).abs() < 1e-12);
        // Default volume window is 50 bars; 60 are available.
        assert_eq!(snap.volume_average, 1000.0);
    }

    #[test]
    fn short_series_leaves_windows_undefined() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        let snap = IndicatorSnapshot::compute(&bars, &StrategyConfig::default()).unwrap();
        assert_eq!(snap.delta_history.len(), 3);
        assert!(snap.bb_width.is_nan());
        assert!(snap.rsi.is_nan());
        assert!(snap.atr.is_nan());
        assert!(snap.volume_average.is_nan());
        assert!(snap.macd_delta.is_finite());
    }

    #[test]
    fn config_lengths_flow_through() {
        let params = StrategyParams {
            bb_window: 3,
            rsi_length: 2,
            volume_ma_length: 2,
            ..Default::default()
        };
        let config = StrategyConfig::new(params).unwrap();
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        let snap = IndicatorSnapshot::compute(&bars, &config).unwrap();
        assert!(snap.bb_width.is_finite());
        assert!(snap.rsi.is_finite());
        assert_eq!(snap.volume_average, 1000.0);
    }
}
