//! Position Sizers: determine contract quantity
//!
//! Sizers translate an account balance and a risk budget into a whole number
//! of contracts. They are signal-agnostic: side never changes the size.

pub mod margin;

pub use margin::{contract_size, MarginSizer};

use crate::error::InputError;

/// Position sizing logic
///
/// # Returns
/// Whole contracts to open, never fewer than one.
pub trait Sizer: Send + Sync {
    fn size(&self, balance: f64, entry_price: f64) -> Result<u64, InputError>;

    /// Sizer name for logging
    fn name(&self) -> &str;
}
