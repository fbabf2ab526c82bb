//! Engine configuration.
//!
//! Each section is deserialized into a plain `*Params` struct and converted into
//! its validated counterpart through `TryFrom`. The validated types have private
//! fields, so an invalid configuration value cannot be constructed.

use crate::indicators::atr::DEFAULT_ATR_LENGTH;
use crate::indicators::bollinger::{DEFAULT_BB_MULTIPLIER, DEFAULT_BB_WINDOW};
use crate::indicators::rsi::DEFAULT_RSI_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Tolerance for the weights-sum-to-one check.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be >= 1; received {value}")]
    InvalidLength { name: &'static str, value: usize },

    #[error("{name} must be a non-negative number; received {value}")]
    NegativeThreshold { name: &'static str, value: f64 },

    #[error("{name} must be between 0 and 1; received {value}")]
    WeightOutOfRange { name: &'static str, value: f64 },

    #[error("indicator weights must sum to 1; received {0}")]
    WeightSum(f64),

    #[error("trailing-stop {name} must be positive; received {value}")]
    NonPositiveTrailing { name: &'static str, value: f64 },

    #[error("leverage must be >= 1; received {0}")]
    InvalidLeverage(u32),

    #[error("contract multiplier must be positive; received {0}")]
    InvalidMultiplier(f64),

    #[error("risk percent must be in (0, 100]; received {0}")]
    InvalidRiskPercent(f64),

    #[error("{name} must be positive; received {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

// ── Strength tier ────────────────────────────────────────────────────

/// Named composite-score threshold a signal must meet or exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthTier {
    Weak,
    Medium,
    Strong,
}

impl StrengthTier {
    /// Unrecognized names fall back to `Medium`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Weak" => StrengthTier::Weak,
            "Strong" => StrengthTier::Strong,
            _ => StrengthTier::Medium,
        }
    }

    pub fn threshold(&self) -> f64 {
        match self {
            StrengthTier::Weak => 60.0,
            StrengthTier::Medium => 75.0,
            StrengthTier::Strong => 83.0,
        }
    }
}

// ── Strategy ─────────────────────────────────────────────────────────

/// Raw strategy parameters as they appear in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyParams {
    pub fast_length: usize,
    pub slow_length: usize,
    pub signal_length: usize,
    pub macd_delta_min: f64,
    pub bb_min_expansion: f64,
    pub bb_window: usize,
    pub bb_multiplier: f64,
    pub rsi_length: usize,
    pub atr_length: usize,
    /// ROI (on margin) at which the take-profit is placed.
    pub min_profit_roi: f64,
    pub normalization_lookback: usize,
    pub weight_macd: f64,
    pub weight_bb: f64,
    pub weight_rsi: f64,
    pub strength_threshold: String,
    pub use_trend_filter: bool,
    pub use_volume_filter: bool,
    pub volume_ma_length: usize,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            fast_length: 9,
            slow_length: 23,
            signal_length: 5,
            macd_delta_min: 0.01,
            bb_min_expansion: 0.5,
            bb_window: DEFAULT_BB_WINDOW,
            bb_multiplier: DEFAULT_BB_MULTIPLIER,
            rsi_length: DEFAULT_RSI_LENGTH,
            atr_length: DEFAULT_ATR_LENGTH,
            min_profit_roi: 1.0,
            normalization_lookback: 200,
            weight_macd: 0.45,
            weight_bb: 0.35,
            weight_rsi: 0.20,
            strength_threshold: "Medium".to_string(),
            use_trend_filter: true,
            use_volume_filter: false,
            volume_ma_length: 50,
        }
    }
}

/// Composite-score weights; always in [0, 1] and summing to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub macd: f64,
    pub bb: f64,
    pub rsi: f64,
}

/// Validated strategy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrategyParams", into = "StrategyParams")]
pub struct StrategyConfig {
    params: StrategyParams,
    tier: StrengthTier,
}

impl StrategyConfig {
    pub fn new(params: StrategyParams) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("fast_length", params.fast_length),
            ("slow_length", params.slow_length),
            ("signal_length", params.signal_length),
            ("bb_window", params.bb_window),
            ("rsi_length", params.rsi_length),
            ("atr_length", params.atr_length),
            ("normalization_lookback", params.normalization_lookback),
            ("volume_ma_length", params.volume_ma_length),
        ] {
            if value < 1 {
                return Err(ConfigError::InvalidLength { name, value });
            }
        }

        for (name, value) in [
            ("macd_delta_min", params.macd_delta_min),
            ("bb_min_expansion", params.bb_min_expansion),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::NegativeThreshold { name, value });
            }
        }

        for (name, value) in [
            ("bb_multiplier", params.bb_multiplier),
            ("min_profit_roi", params.min_profit_roi),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositiveParameter { name, value });
            }
        }

        for (name, value) in [
            ("weight_macd", params.weight_macd),
            ("weight_bb", params.weight_bb),
            ("weight_rsi", params.weight_rsi),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WeightOutOfRange { name, value });
            }
        }

        let total = params.weight_macd + params.weight_bb + params.weight_rsi;
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(total));
        }

        let tier = StrengthTier::from_name(&params.strength_threshold);
        Ok(Self { params, tier })
    }

    pub fn params(&self) -> &StrategyParams {
        &self.params
    }

    pub fn weights(&self) -> Weights {
        Weights {
            macd: self.params.weight_macd,
            bb: self.params.weight_bb,
            rsi: self.params.weight_rsi,
        }
    }

    pub fn strength_tier(&self) -> StrengthTier {
        self.tier
    }

    /// Bars needed before every indicator window has filled.
    pub fn min_bars(&self) -> usize {
        let p = &self.params;
        let mut required = p.bb_window.max(p.rsi_length + 1).max(p.atr_length).max(2);
        if p.use_volume_filter {
            required = required.max(p.volume_ma_length);
        }
        required
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            params: StrategyParams::default(),
            tier: StrengthTier::Medium,
        }
    }
}

impl TryFrom<StrategyParams> for StrategyConfig {
    type Error = ConfigError;

    fn try_from(params: StrategyParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<StrategyConfig> for StrategyParams {
    fn from(config: StrategyConfig) -> Self {
        config.params
    }
}

// ── Trailing stop ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrailingStopParams {
    /// Peak ROI at which the stop starts trailing.
    pub start_roi: f64,
    /// Constant ROI gap kept between the peak and the trailing stop.
    pub step_roi: f64,
    /// Static loss cap (as a positive ROI) until trailing engages.
    pub stop_loss_roi: f64,
}

impl Default for TrailingStopParams {
    fn default() -> Self {
        Self {
            start_roi: 10.0,
            step_roi: 8.0,
            stop_loss_roi: 9.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrailingStopParams", into = "TrailingStopParams")]
pub struct TrailingStopConfig {
    start_roi: f64,
    step_roi: f64,
    stop_loss_roi: f64,
}

impl TrailingStopConfig {
    pub fn new(start_roi: f64, step_roi: f64, stop_loss_roi: f64) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("start_roi", start_roi),
            ("step_roi", step_roi),
            ("stop_loss_roi", stop_loss_roi),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositiveTrailing { name, value });
            }
        }
        Ok(Self {
            start_roi,
            step_roi,
            stop_loss_roi,
        })
    }

    pub fn start_roi(&self) -> f64 {
        self.start_roi
    }

    pub fn step_roi(&self) -> f64 {
        self.step_roi
    }

    pub fn stop_loss_roi(&self) -> f64 {
        self.stop_loss_roi
    }
}

impl Default for TrailingStopConfig {
    fn default() -> Self {
        let p = TrailingStopParams::default();
        Self {
            start_roi: p.start_roi,
            step_roi: p.step_roi,
            stop_loss_roi: p.stop_loss_roi,
        }
    }
}

impl TryFrom<TrailingStopParams> for TrailingStopConfig {
    type Error = ConfigError;

    fn try_from(p: TrailingStopParams) -> Result<Self, Self::Error> {
        Self::new(p.start_roi, p.step_roi, p.stop_loss_roi)
    }
}

impl From<TrailingStopConfig> for TrailingStopParams {
    fn from(c: TrailingStopConfig) -> Self {
        Self {
            start_roi: c.start_roi,
            step_roi: c.step_roi,
            stop_loss_roi: c.stop_loss_roi,
        }
    }
}

// ── Instrument ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstrumentParams {
    pub symbol: String,
    pub leverage: u32,
    /// Quote units per contract per point of price.
    pub contract_multiplier: f64,
}

impl Default for InstrumentParams {
    fn default() -> Self {
        Self {
            symbol: "ETHUSDTM".to_string(),
            leverage: 100,
            contract_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstrumentParams", into = "InstrumentParams")]
pub struct InstrumentConfig {
    params: InstrumentParams,
}

impl InstrumentConfig {
    pub fn new(params: InstrumentParams) -> Result<Self, ConfigError> {
        if params.leverage < 1 {
            return Err(ConfigError::InvalidLeverage(params.leverage));
        }
        if !(params.contract_multiplier > 0.0 && params.contract_multiplier.is_finite()) {
            return Err(ConfigError::InvalidMultiplier(params.contract_multiplier));
        }
        Ok(Self { params })
    }

    pub fn symbol(&self) -> &str {
        &self.params.symbol
    }

    pub fn leverage(&self) -> u32 {
        self.params.leverage
    }

    pub fn contract_multiplier(&self) -> f64 {
        self.params.contract_multiplier
    }
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            params: InstrumentParams::default(),
        }
    }
}

impl TryFrom<InstrumentParams> for InstrumentConfig {
    type Error = ConfigError;

    fn try_from(params: InstrumentParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<InstrumentConfig> for InstrumentParams {
    fn from(config: InstrumentConfig) -> Self {
        config.params
    }
}

// ── Sizing ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingParams {
    /// Percent of account balance committed as margin per trade.
    pub risk_percent: f64,
}

impl Default for SizingParams {
    fn default() -> Self {
        Self { risk_percent: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SizingParams", into = "SizingParams")]
pub struct SizingConfig {
    risk_percent: f64,
}

impl SizingConfig {
    pub fn new(risk_percent: f64) -> Result<Self, ConfigError> {
        if !(risk_percent > 0.0 && risk_percent <= 100.0) {
            return Err(ConfigError::InvalidRiskPercent(risk_percent));
        }
        Ok(Self { risk_percent })
    }

    pub fn risk_percent(&self) -> f64 {
        self.risk_percent
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            risk_percent: SizingParams::default().risk_percent,
        }
    }
}

impl TryFrom<SizingParams> for SizingConfig {
    type Error = ConfigError;

    fn try_from(p: SizingParams) -> Result<Self, Self::Error> {
        Self::new(p.risk_percent)
    }
}

impl From<SizingConfig> for SizingParams {
    fn from(c: SizingConfig) -> Self {
        Self {
            risk_percent: c.risk_percent,
        }
    }
}

// ── Engine ───────────────────────────────────────────────────────────

/// Everything one evaluation cycle needs. Loaded once, validated at load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub instrument: InstrumentConfig,
    pub strategy: StrategyConfig,
    pub trailing: TrailingStopConfig,
    pub sizing: SizingConfig,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Deterministic identity of the full parameter set, logged with each cycle.
    pub fn fingerprint(&self) -> String {
        // Struct fields serialize in declaration order, so the JSON is canonical.
        let json = serde_json::to_string(self).expect("EngineConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
