//! Integration tests for a full evaluation cycle.
//!
//! Tests:
//! 1. A fired signal produces a plan priced off the latest close.
//! 2. Invalid input aborts the cycle; insufficient data does not.
//! 3. Cycles are independent: no state leaks between calls.
//! 4. Config loaded from TOML drives the engine.

use chrono::{DateTime, Duration, TimeZone, Utc};
use macd_strength_core::config::EngineConfig;
use macd_strength_core::domain::{Bar, BarSeries, Side};
use macd_strength_core::engine::SignalEngine;
use macd_strength_core::error::{EngineError, InputError};
use macd_strength_core::position_management::pct_to_price;
use macd_strength_core::signal::NoSignalReason;

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
}

fn series_from(closes: &[f64]) -> BarSeries {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar::new(
                base + Duration::minutes(5 * i as i64),
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
                1_000.0,
            )
        })
        .collect();
    BarSeries::new(bars).unwrap()
}

fn bullish_reversal() -> BarSeries {
    let mut closes: Vec<f64> = (0..79).map(|i| 2000.0 - 2.0 * i as f64).collect();
    closes.push(closes[78] + 300.0);
    series_from(&closes)
}

fn bearish_reversal() -> BarSeries {
    let mut closes: Vec<f64> = (0..79).map(|i| 2000.0 + 2.0 * i as f64).collect();
    closes.push(closes[78] - 300.0);
    series_from(&closes)
}

// ──────────────────────────────────────────────
// Fired cycles
// ──────────────────────────────────────────────

#[test]
fn long_cycle_builds_plan_at_latest_close() {
    let engine = SignalEngine::new(EngineConfig::default());
    let bars = bullish_reversal();
    let outcome = engine.run_cycle(&bars, 5_000.0, now()).unwrap();

    let plan = outcome.plan.expect("signal should fire");
    let entry = bars.current().unwrap().close;
    assert_eq!(plan.side, Side::Long);
    assert_eq!(plan.entry_price, entry);
    assert_eq!(plan.stop_loss_price, pct_to_price(Side::Long, entry, -9.0, 100));
    assert_eq!(plan.trailing_stop_price, plan.stop_loss_price);
    assert_eq!(plan.take_profit_price, pct_to_price(Side::Long, entry, 1.0, 100));
    // floor(5000 * 1% * 100 / 2142) = 2
    assert_eq!(plan.size, 2);
    assert_eq!(plan.peak_roi, 0.0);
    assert_eq!(plan.created_at, now());
    assert!(plan.stop_loss_price < plan.entry_price && plan.entry_price < plan.take_profit_price);
}

#[test]
fn short_cycle_inverts_levels() {
    let engine = SignalEngine::new(EngineConfig::default());
    let outcome = engine.run_cycle(&bearish_reversal(), 5_000.0, now()).unwrap();
    let plan = outcome.plan.expect("signal should fire");
    assert_eq!(plan.side, Side::Short);
    assert!(plan.take_profit_price < plan.entry_price && plan.entry_price < plan.stop_loss_price);
}

#[test]
fn outcome_serializes_for_audit() {
    let engine = SignalEngine::new(EngineConfig::default());
    let outcome = engine.run_cycle(&bullish_reversal(), 5_000.0, now()).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["symbol"], "ETHUSDTM");
    assert_eq!(json["evaluation"]["side"], "long");
    assert_eq!(json["plan"]["side"], "long");
    assert!(json["snapshot"]["macd_delta"].as_f64().unwrap() > 0.0);
    assert!(json["snapshot"].get("delta_history").is_none());
    assert_eq!(json["config_fingerprint"], engine.fingerprint());
}

// ──────────────────────────────────────────────
// Error taxonomy
// ──────────────────────────────────────────────

#[test]
fn zero_balance_aborts_fired_cycle() {
    let engine = SignalEngine::new(EngineConfig::default());
    let err = engine.run_cycle(&bullish_reversal(), 0.0, now()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Input(InputError::NonPositiveBalance(b)) if b == 0.0
    ));
}

#[test]
fn zero_balance_is_harmless_when_nothing_fires() {
    let engine = SignalEngine::new(EngineConfig::default());
    let outcome = engine
        .run_cycle(&series_from(&[2000.0, 2001.0, 2002.0]), 0.0, now())
        .unwrap();
    assert!(outcome.plan.is_none());
    assert!(outcome.evaluation.reason.unwrap().is_insufficient_data());
}

#[test]
fn empty_series_reports_no_bars() {
    let engine = SignalEngine::new(EngineConfig::default());
    let outcome = engine
        .run_cycle(&BarSeries::new(vec![]).unwrap(), 5_000.0, now())
        .unwrap();
    assert_eq!(outcome.evaluation.reason, Some(NoSignalReason::NoBars));
}

// ──────────────────────────────────────────────
// Statelessness
// ──────────────────────────────────────────────

#[test]
fn cycles_do_not_share_state() {
    let engine = SignalEngine::new(EngineConfig::default());
    let first = engine.run_cycle(&bullish_reversal(), 5_000.0, now()).unwrap();
    let _other = engine.run_cycle(&bearish_reversal(), 5_000.0, now()).unwrap();
    let again = engine.run_cycle(&bullish_reversal(), 5_000.0, now()).unwrap();
    assert_eq!(first, again);
}

#[test]
fn parallel_cycles_match_sequential() {
    let engine = SignalEngine::new(EngineConfig::default());
    let inputs = [bullish_reversal(), bearish_reversal(), bullish_reversal()];
    let sequential: Vec<_> = inputs
        .iter()
        .map(|b| engine.run_cycle(b, 5_000.0, now()).unwrap())
        .collect();

    let shared = &engine;
    let parallel: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|b| s.spawn(move || shared.run_cycle(b, 5_000.0, now()).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, parallel);
}

// ──────────────────────────────────────────────
// Config-driven behavior
// ──────────────────────────────────────────────

#[test]
fn toml_config_changes_plan() {
    let config = EngineConfig::from_toml_str(
        r#"
        [instrument]
        symbol = "BTCUSDTM"
        leverage = 50
        contract_multiplier = 0.001

        [strategy]
        min_profit_roi = 5.0

        [trailing]
        stop_loss_roi = 20.0

        [sizing]
        risk_percent = 2.0
        "#,
    )
    .unwrap();
    let engine = SignalEngine::new(config);
    let outcome = engine.run_cycle(&bullish_reversal(), 5_000.0, now()).unwrap();
    assert_eq!(outcome.symbol, "BTCUSDTM");
    let plan = outcome.plan.unwrap();
    let entry = plan.entry_price;
    assert_eq!(plan.stop_loss_price, pct_to_price(Side::Long, entry, -20.0, 50));
    assert_eq!(plan.take_profit_price, pct_to_price(Side::Long, entry, 5.0, 50));
    // margin 100, notional 5000, contract value 2.142
    assert_eq!(plan.size, (5_000.0 / (entry * 0.001)).floor() as u64);
}

#[test]
fn fingerprint_tracks_config() {
    let a = SignalEngine::new(EngineConfig::default());
    let b = SignalEngine::new(EngineConfig::from_toml_str("[sizing]\nrisk_percent = 3.0").unwrap());
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint(), SignalEngine::new(EngineConfig::default()).fingerprint());
}
