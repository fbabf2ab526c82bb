//! Signal scorer: MACD crossover detection followed by the gate chain,
//! evaluated once per cycle on the latest snapshot.

pub mod gates;
pub mod score;

pub use gates::{
    base_condition, detect_crossover, strength_gate, trend_gate, volume_gate, Crossover,
    GateReport,
};
pub use score::{composite_scores, ScoreState};

use serde::Serialize;
use std::fmt;

use crate::config::StrategyConfig;
use crate::domain::Side;
use crate::snapshot::IndicatorSnapshot;

/// Why a cycle produced no actionable decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoSignalReason {
    /// The bar series was empty.
    NoBars,
    /// Crossover detection needs at least two MACD delta observations.
    InsufficientDeltaHistory { observations: usize },
    /// A rolling window has not filled yet, so its latest value is undefined.
    WindowNotFilled { indicator: &'static str },
    /// Data was sufficient but no side passed every gate.
    GatesNotPassed,
}

impl NoSignalReason {
    pub fn is_insufficient_data(&self) -> bool {
        !matches!(self, NoSignalReason::GatesNotPassed)
    }
}

impl fmt::Display for NoSignalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoSignalReason::NoBars => write!(f, "insufficient data: no bars"),
            NoSignalReason::InsufficientDeltaHistory { observations } => write!(
                f,
                "insufficient data for MACD crossover: {observations} delta observation(s), need 2"
            ),
            NoSignalReason::WindowNotFilled { indicator } => {
                write!(f, "insufficient data: {indicator} window not filled")
            }
            NoSignalReason::GatesNotPassed => write!(f, "no side passed every gate"),
        }
    }
}

/// Decision for one cycle plus everything needed to audit it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalEvaluation {
    pub side: Option<Side>,
    pub crossover: Option<Crossover>,
    pub score: Option<ScoreState>,
    pub long_gates: Option<GateReport>,
    pub short_gates: Option<GateReport>,
    pub reason: Option<NoSignalReason>,
}

impl SignalEvaluation {
    pub fn no_signal(reason: NoSignalReason) -> Self {
        Self {
            side: None,
            crossover: None,
            score: None,
            long_gates: None,
            short_gates: None,
            reason: Some(reason),
        }
    }

    pub fn fired(&self) -> bool {
        self.side.is_some()
    }
}

/// Scores a snapshot and decides long, short, or nothing.
///
/// Long is evaluated first and wins any tie.
pub fn evaluate(snapshot: &IndicatorSnapshot, config: &StrategyConfig) -> SignalEvaluation {
    let p = config.params();

    let Some(crossover) = detect_crossover(&snapshot.delta_history) else {
        return SignalEvaluation::no_signal(NoSignalReason::InsufficientDeltaHistory {
            observations: snapshot.delta_history.len(),
        });
    };

    if let Some(indicator) = unfilled_window(snapshot, config) {
        return SignalEvaluation::no_signal(NoSignalReason::WindowNotFilled { indicator });
    }

    let score = composite_scores(snapshot, config);
    let volume_ok = volume_gate(snapshot, p.use_volume_filter);

    let report = |side: Side, side_score: f64| GateReport {
        base: base_condition(side, crossover, snapshot, config),
        trend: trend_gate(side, snapshot, p.use_trend_filter),
        volume: volume_ok,
        strength: strength_gate(side_score, score.required),
    };
    let long_gates = report(Side::Long, score.score_long);
    let short_gates = report(Side::Short, score.score_short);

    let side = if long_gates.passed() {
        Some(Side::Long)
    } else if short_gates.passed() {
        Some(Side::Short)
    } else {
        None
    };

    SignalEvaluation {
        side,
        crossover: Some(crossover),
        score: Some(score),
        long_gates: Some(long_gates),
        short_gates: Some(short_gates),
        reason: side.is_none().then_some(NoSignalReason::GatesNotPassed),
    }
}

/// First indicator the scorer reads whose latest value is still undefined.
fn unfilled_window(snapshot: &IndicatorSnapshot, config: &StrategyConfig) -> Option<&'static str> {
    if snapshot.macd_delta.is_nan() {
        return Some("macd");
    }
    if snapshot.bb_width.is_nan() {
        return Some("bollinger_width");
    }
    if snapshot.rsi.is_nan() {
        return Some("rsi");
    }
    if config.params().use_volume_filter && snapshot.volume_average.is_nan() {
        return Some("volume_average");
    }
    None
}
