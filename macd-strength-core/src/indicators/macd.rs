//! MACD: fast EMA minus slow EMA, its EMA signal line, the delta between them,
//! and the bar-to-bar slope of that delta.

use super::{diff, ema};

/// Full MACD history, every vector aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub fast_ema: Vec<f64>,
    pub slow_ema: Vec<f64>,
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    /// `line - signal`; the series whose zero crossings drive entries.
    pub delta: Vec<f64>,
    /// `delta[t] - delta[t-1]`; undefined at index 0.
    pub slope: Vec<f64>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&line, signal);
    let delta: Vec<f64> = line
        .iter()
        .zip(&signal_line)
        .map(|(l, s)| l - s)
        .collect();
    let slope = diff(&delta);

    Macd {
        fast_ema,
        slow_ema,
        line,
        signal: signal_line,
        delta,
        slope,
    }
}
