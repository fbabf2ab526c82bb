//! Indicator library: stateless transforms over a bar series.
//!
//! Every function returns a series aligned with its input. Leading entries that
//! lack a full lookback window are `f64::NAN` ("undefined"); callers treat an
//! undefined latest value as insufficient data, never as an error.
//! The one exception is ATR, whose leading gap is back-filled.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod normalize;
pub mod rsi;
pub mod sma;

pub use atr::{atr, true_range};
pub use bollinger::{bollinger, bollinger_width, BollingerBands};
pub use ema::ema;
pub use macd::{macd, Macd};
pub use normalize::normalize;
pub use rsi::rsi;
pub use sma::{rolling_mean, volume_average};

/// Last entry of a series, or NaN when the series is empty.
pub fn latest(series: &[f64]) -> f64 {
    series.last().copied().unwrap_or(f64::NAN)
}

/// First differences: `out[i] = values[i] - values[i-1]`, `out[0]` undefined.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = values[i] - values[i - 1];
    }
    out
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> crate::domain::BarSeries {
    use crate::domain::{Bar, BarSeries};
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar::new(
                base + chrono::Duration::minutes(5 * i as i64),
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
                1000.0,
            )
        })
        .collect();
    BarSeries::new(bars).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
