//! Gate predicates, each independently testable, composed by the scorer in a
//! fixed order: base condition → trend → volume → strength.

use serde::Serialize;

use crate::config::StrategyConfig;
use crate::domain::Side;
use crate::snapshot::IndicatorSnapshot;

/// Direction of the MACD delta's most recent zero crossing, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossover {
    Above,
    Below,
    None,
}

impl Crossover {
    /// Whether this crossover opens a position on `side`.
    pub fn favors(&self, side: Side) -> bool {
        matches!(
            (self, side),
            (Crossover::Above, Side::Long) | (Crossover::Below, Side::Short)
        )
    }
}

/// Compares the last two delta observations.
///
/// Crossed above: previous <= 0 and current > 0. Crossed below: previous >= 0
/// and current < 0. Returns `None` with fewer than two observations.
pub fn detect_crossover(delta_history: &[f64]) -> Option<Crossover> {
    let [previous, current] = delta_history.get(delta_history.len().checked_sub(2)?..)? else {
        return None;
    };
    let crossover = if *previous <= 0.0 && *current > 0.0 {
        Crossover::Above
    } else if *previous >= 0.0 && *current < 0.0 {
        Crossover::Below
    } else {
        Crossover::None
    };
    Some(crossover)
}

/// Crossover in the side's direction, delta beyond the minimum magnitude, and
/// Bollinger width beyond the minimum expansion.
pub fn base_condition(
    side: Side,
    crossover: Crossover,
    snapshot: &IndicatorSnapshot,
    config: &StrategyConfig,
) -> bool {
    let p = config.params();
    let delta_ok = match side {
        Side::Long => snapshot.macd_delta > p.macd_delta_min,
        Side::Short => snapshot.macd_delta < -p.macd_delta_min,
    };
    crossover.favors(side) && delta_ok && snapshot.bb_width > p.bb_min_expansion
}

/// Long requires fast EMA above slow EMA, short the inverse. Passes when disabled.
pub fn trend_gate(side: Side, snapshot: &IndicatorSnapshot, enabled: bool) -> bool {
    if !enabled {
        return true;
    }
    match side {
        Side::Long => snapshot.fast_ema > snapshot.slow_ema,
        Side::Short => snapshot.fast_ema < snapshot.slow_ema,
    }
}

/// Current volume above its rolling average. Passes when disabled.
pub fn volume_gate(snapshot: &IndicatorSnapshot, enabled: bool) -> bool {
    !enabled || snapshot.volume > snapshot.volume_average
}

pub fn strength_gate(score: f64, required: f64) -> bool {
    score >= required
}

/// Outcome of every gate for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateReport {
    pub base: bool,
    pub trend: bool,
    pub volume: bool,
    pub strength: bool,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        self.base && self.trend && self.volume && self.strength
    }

    /// Name of the first gate, in evaluation order, that blocked this side.
    pub fn first_blocked(&self) -> Option<&'static str> {
        [
            ("base", self.base),
            ("trend", self.trend),
            ("volume", self.volume),
            ("strength", self.strength),
        ]
        .into_iter()
        .find(|(_, ok)| !ok)
        .map(|(name, _)| name)
    }
}
