/// Position management: ROI conversion, trailing stops and the ratchet invariant
///
/// **Key Design Principles:**
/// 1. All thresholds are ROI on margin, converted to prices through the leverage
/// 2. **Ratchet invariant**: stops may tighten, never loosen
/// 3. Peak ROI is owned by the caller and only ever rises
///
/// **Module Structure:**
/// - `roi`: ROI ↔ price conversion
/// - `ratchet`: Ratchet enforcement
/// - `trailing`: Stop level from peak ROI
/// - `tracker`: Per-price updates and exit classification for an open plan
pub mod ratchet;
pub mod roi;
pub mod tracker;
pub mod trailing;

pub use ratchet::ratchet;
pub use roi::{pct_to_price, price_to_roi};
pub use tracker::{exit_trigger, ExitTrigger, PositionTracker};
pub use trailing::TrailingStopEngine;
