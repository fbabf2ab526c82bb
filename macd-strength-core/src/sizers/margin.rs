//! Margin-risk sizer
//!
//! Commits a fixed percentage of the account balance as margin, levered into
//! notional and divided by the value of one contract.

use crate::config::{InstrumentConfig, SizingConfig};
use crate::error::InputError;
use crate::sizers::Sizer;

/// Contracts to open for a given balance and entry.
///
/// # Formula
/// ```text
/// margin   = balance * risk_percent / 100
/// notional = margin * leverage
/// size     = max(1, floor(notional / (entry_price * contract_multiplier)))
/// ```
///
/// # Example
/// - Balance: 5000, risk 1%: margin 50
/// - Leverage 100x: notional 5000
/// - Entry 2000, multiplier 1: 2.5 contracts, floored to 2
pub fn contract_size(
    balance: f64,
    entry_price: f64,
    risk_percent: f64,
    leverage: u32,
    contract_multiplier: f64,
) -> Result<u64, InputError> {
    if !(balance > 0.0) {
        return Err(InputError::NonPositiveBalance(balance));
    }
    if !(entry_price > 0.0) {
        return Err(InputError::NonPositiveEntryPrice(entry_price));
    }

    let margin = balance * (risk_percent / 100.0);
    let notional = margin * leverage as f64;
    let contracts = (notional / (entry_price * contract_multiplier)).floor();

    // Saturating float-to-int cast; anything below one contract rounds up to one.
    Ok((contracts as u64).max(1))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarginSizer {
    risk_percent: f64,
    leverage: u32,
    contract_multiplier: f64,
}

impl MarginSizer {
    pub fn new(sizing: &SizingConfig, instrument: &InstrumentConfig) -> Self {
        Self {
            risk_percent: sizing.risk_percent(),
            leverage: instrument.leverage(),
            contract_multiplier: instrument.contract_multiplier(),
        }
    }
}

impl Sizer for MarginSizer {
    fn size(&self, balance: f64, entry_price: f64) -> Result<u64, InputError> {
        contract_size(
            balance,
            entry_price,
            self.risk_percent,
            self.leverage,
            self.contract_multiplier,
        )
    }

    fn name(&self) -> &str {
        "margin_risk"
    }
}
