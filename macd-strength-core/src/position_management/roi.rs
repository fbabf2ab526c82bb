//! ROI (on margin) ↔ price conversion.
//!
//! ROI is the leveraged return on posted margin, so a 1% price move at 100x is
//! 100% ROI. Positive ROI raises the price for longs and lowers it for shorts.

use crate::domain::Side;
use crate::error::InputError;

/// Price level at which a position opened at `entry_price` shows `roi_percent`.
pub fn pct_to_price(side: Side, entry_price: f64, roi_percent: f64, leverage: u32) -> f64 {
    let price_delta_ratio = (roi_percent / leverage as f64) / 100.0;
    match side {
        Side::Long => entry_price * (1.0 + price_delta_ratio),
        Side::Short => entry_price * (1.0 - price_delta_ratio),
    }
}

/// ROI shown at `current_price` by a position opened at `entry_price`.
pub fn price_to_roi(
    side: Side,
    entry_price: f64,
    current_price: f64,
    leverage: u32,
) -> Result<f64, InputError> {
    if !(entry_price > 0.0) {
        return Err(InputError::NonPositiveEntryPrice(entry_price));
    }
    let price_change = (current_price - entry_price) / entry_price * 100.0;
    let raw_roi = price_change * leverage as f64;
    Ok(match side {
        Side::Long => raw_roi,
        Side::Short => -raw_roi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_to_price_long_and_short() {
        // 100x: 10% ROI is a 0.1% price move.
        assert!((pct_to_price(Side::Long, 2000.0, 10.0, 100) - 2002.0).abs() < 1e-9);
        assert!((pct_to_price(Side::Short, 2000.0, 10.0, 100) - 1998.0).abs() < 1e-9);
        assert!((pct_to_price(Side::Long, 2000.0, -9.0, 100) - 1998.2).abs() < 1e-9);
    }

    #[test]
    fn price_to_roi_inverts() {
        let roi = price_to_roi(Side::Long, 2000.0, 2002.0, 100).unwrap();
        assert!((roi - 10.0).abs() < 1e-9);
        let roi = price_to_roi(Side::Short, 2000.0, 2002.0, 100).unwrap();
        assert!((roi + 10.0).abs() < 1e-9);
    }

    #[test]
    fn price_to_roi_rejects_non_positive_entry() {
        assert_eq!(
            price_to_roi(Side::Long, 0.0, 10.0, 100),
            Err(InputError::NonPositiveEntryPrice(0.0))
        );
        assert!(price_to_roi(Side::Short, -5.0, 10.0, 100).is_err());
        assert!(price_to_roi(Side::Short, f64::NAN, 10.0, 100).is_err());
    }
}
