//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR is the simple rolling mean of True Range over `length` bars.
//! Leading entries before the first full window are back-filled with the first
//! defined value, so the series has no gaps once any window has filled.

use super::rolling_mean;

pub const DEFAULT_ATR_LENGTH: usize = 14;

/// Compute the True Range series.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let n = highs.len().min(lows.len()).min(closes.len());
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    tr[0] = highs[0] - lows[0];
    for i in 1..n {
        let (h, l, pc) = (highs[i], lows[i], closes[i - 1]);
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }

    tr
}

pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], length: usize) -> Vec<f64> {
    let tr = true_range(highs, lows, closes);
    let mut result = rolling_mean(&tr, length);

    if let Some(first) = result.iter().position(|v| !v.is_nan()) {
        let seed = result[first];
        for v in result.iter_mut().take(first) {
            *v = seed;
        }
    }

    result
}
