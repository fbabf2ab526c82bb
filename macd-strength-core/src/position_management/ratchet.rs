/// Ratchet invariant enforcement
///
/// **Core Rule:** Stops may tighten, never loosen.
///
/// - Long positions: stop can only rise (max of previous and proposed)
/// - Short positions: stop can only fall (min of previous and proposed)
/// - With no previous stop, the proposed level is taken as-is
use crate::domain::Side;

/// Apply the ratchet to a proposed stop level.
///
/// # Example
/// ```
/// use macd_strength_core::domain::Side;
/// use macd_strength_core::position_management::ratchet;
///
/// // Tightening: $95 → $100 (allowed)
/// assert_eq!(ratchet(Side::Long, 100.0, Some(95.0)), 100.0);
///
/// // Loosening: $100 → $90 (blocked, stays at $100)
/// assert_eq!(ratchet(Side::Long, 90.0, Some(100.0)), 100.0);
/// ```
pub fn ratchet(side: Side, proposed: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(previous) => side.tighter(proposed, previous),
        None => proposed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratchet_long_tightening_allowed() {
        assert_eq!(ratchet(Side::Long, 100.0, Some(95.0)), 100.0);
    }

    #[test]
    fn test_ratchet_long_loosening_blocked() {
        assert_eq!(ratchet(Side::Long, 90.0, Some(100.0)), 100.0);
    }

    #[test]
    fn test_ratchet_short_tightening_allowed() {
        assert_eq!(ratchet(Side::Short, 100.0, Some(105.0)), 100.0);
    }

    #[test]
    fn test_ratchet_short_loosening_blocked() {
        assert_eq!(ratchet(Side::Short, 110.0, Some(100.0)), 100.0);
    }

    #[test]
    fn test_ratchet_initialization() {
        assert_eq!(ratchet(Side::Long, 95.0, None), 95.0);
        assert_eq!(ratchet(Side::Short, 105.0, None), 105.0);
    }

    #[test]
    fn test_ratchet_sequence_never_loosens() {
        let proposals = [95.0, 97.0, 96.0, 99.0, 90.0, 101.0];
        let mut current = None;
        let mut levels = vec![];
        for p in proposals {
            let level = ratchet(Side::Long, p, current);
            current = Some(level);
            levels.push(level);
        }
        assert_eq!(levels, vec![95.0, 97.0, 97.0, 99.0, 99.0, 101.0]);
    }
}
