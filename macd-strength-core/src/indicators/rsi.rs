//! Relative Strength Index (RSI).
//!
//! Simple rolling means of gains and losses over exactly `length` price changes.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: length (needs length+1 closes).
//! Edge case: avg_loss == 0 → RSI = 50, all-gain windows included.

use super::diff;

pub const DEFAULT_RSI_LENGTH: usize = 14;
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn rsi(closes: &[f64], length: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    if length == 0 || n < length + 1 {
        return result;
    }

    let changes = diff(closes);
    for i in length..n {
        let window = &changes[i + 1 - length..=i];
        if window.iter().any(|c| c.is_nan()) {
            continue;
        }
        let avg_gain = window.iter().map(|c| c.max(0.0)).sum::<f64>() / length as f64;
        let avg_loss = window.iter().map(|c| (-c).max(0.0)).sum::<f64>() / length as f64;
        result[i] = compute_rsi(avg_gain, avg_loss);
    }

    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        NEUTRAL_RSI
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_all_gains_is_neutral() {
        let result = rsi(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0], 3);
        assert_eq!(result[3], 50.0);
        assert_eq!(result[5], 50.0);
    }

    #[test]
    fn rsi_flat_window_is_neutral() {
        let result = rsi(&[100.0; 6], 3);
        assert_eq!(result[5], 50.0);
    }

    #[test]
    fn rsi_all_losses() {
        let result = rsi(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0], 3);
        assert_approx(result[3], 0.0, 1e-9);
    }

    #[test]
    fn rsi_mixed() {
        // Changes: +0.34, -0.25, -0.48, +0.72
        // RSI[3]: gains 0.34, losses 0.73 over 3
        // RSI[4]: gains 0.72, losses 0.73 over 3
        let result = rsi(&[44.0, 44.34, 44.09, 43.61, 44.33], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
        assert_approx(result[4], 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let result = rsi(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0], 3);
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_short_series_is_undefined() {
        let result = rsi(&[1.0, 2.0, 3.0], 14);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
