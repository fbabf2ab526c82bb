//! Domain types: bars, sides, and the trade plan.

pub mod bar;
pub mod plan;
pub mod side;

pub use bar::{Bar, BarError, BarSeries};
pub use plan::TradePlan;
pub use side::Side;
