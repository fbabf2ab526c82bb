//! Normalizer: rescales the latest value of a series to [0, 100] against the
//! min/max of its own trailing window.

/// Relative tolerance under which a window counts as flat.
const FLAT_TOLERANCE: f64 = 1e-9;

/// `(current - min) / (max - min) * 100`, clamped to [0, 100].
///
/// The window is the trailing `lookback` entries; undefined (NaN) entries in it
/// are ignored for min/max. Returns 0 when the series is empty, the window is
/// flat, or the current value is undefined.
pub fn normalize(series: &[f64], lookback: usize) -> f64 {
    let Some(&current) = series.last() else {
        return 0.0;
    };
    if current.is_nan() || lookback == 0 {
        return 0.0;
    }

    let start = series.len().saturating_sub(lookback);
    let (low, high) = series[start..]
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = high - low;
    if !range.is_finite() || range <= FLAT_TOLERANCE * high.abs().max(low.abs()) {
        return 0.0;
    }

    ((current - low) / range * 100.0).clamp(0.0, 100.0)
}
