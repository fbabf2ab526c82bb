//! Plan builder: turns a fired signal into an immutable [`TradePlan`].

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::domain::{Side, TradePlan};
use crate::error::InputError;
use crate::position_management::{pct_to_price, TrailingStopEngine};
use crate::sizers::{MarginSizer, Sizer};

/// Builds the opening plan for `side` at `entry_price`.
///
/// The stop-loss and initial trailing stop both sit at the static loss cap
/// (peak ROI starts at zero). Take-profit sits at `min_profit_roi`.
pub fn build_trade_plan(
    side: Side,
    entry_price: f64,
    config: &EngineConfig,
    balance: f64,
    created_at: DateTime<Utc>,
) -> Result<TradePlan, InputError> {
    if !(entry_price > 0.0) {
        return Err(InputError::NonPositiveEntryPrice(entry_price));
    }

    let leverage = config.instrument.leverage();
    let size = MarginSizer::new(&config.sizing, &config.instrument).size(balance, entry_price)?;

    let trailing = TrailingStopEngine::new(config.trailing, leverage);
    let stop_loss_price = trailing.static_stop(side, entry_price);
    let trailing_stop_price = trailing.next_stop(side, entry_price, 0.0, None);
    let take_profit_price = pct_to_price(
        side,
        entry_price,
        config.strategy.params().min_profit_roi,
        leverage,
    );

    Ok(TradePlan {
        side,
        entry_price,
        stop_loss_price,
        trailing_stop_price,
        take_profit_price,
        size,
        peak_roi: 0.0,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn long_plan_orders_levels() {
        let plan = build_trade_plan(Side::Long, 2000.0, &EngineConfig::default(), 5000.0, now())
            .unwrap();
        assert!(plan.stop_loss_price < plan.entry_price);
        assert!(plan.entry_price < plan.take_profit_price);
        assert_eq!(plan.trailing_stop_price, plan.stop_loss_price);
        assert_eq!(plan.stop_loss_price, pct_to_price(Side::Long, 2000.0, -9.0, 100));
        assert_eq!(plan.take_profit_price, pct_to_price(Side::Long, 2000.0, 1.0, 100));
        assert_eq!(plan.size, 2);
        assert_eq!(plan.peak_roi, 0.0);
        assert_eq!(plan.created_at, now());
    }

    #[test]
    fn short_plan_inverts_levels() {
        let plan = build_trade_plan(Side::Short, 2000.0, &EngineConfig::default(), 5000.0, now())
            .unwrap();
        assert!(plan.stop_loss_price > plan.entry_price);
        assert!(plan.entry_price > plan.take_profit_price);
        assert_eq!(plan.trailing_stop_price, plan.stop_loss_price);
    }

    #[test]
    fn zero_balance_fails_sizing() {
        let err = build_trade_plan(Side::Long, 2000.0, &EngineConfig::default(), 0.0, now())
            .unwrap_err();
        assert_eq!(err, InputError::NonPositiveBalance(0.0));
    }

    #[test]
    fn non_positive_entry_rejected() {
        let err = build_trade_plan(Side::Short, -1.0, &EngineConfig::default(), 5000.0, now())
            .unwrap_err();
        assert_eq!(err, InputError::NonPositiveEntryPrice(-1.0));
    }
}
