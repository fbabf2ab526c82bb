//! Bollinger Bands (moving average +/- k standard deviations) and band width.
//!
//! Uses population stddev (divide by N).
//! Width = (upper - lower) / close * 100, i.e. band span as a percent of price.
//! Lookback: window - 1.

pub const DEFAULT_BB_WINDOW: usize = 20;
pub const DEFAULT_BB_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub width: Vec<f64>,
}

pub fn bollinger(closes: &[f64], window: usize, k: f64) -> BollingerBands {
    let n = closes.len();
    let mut bands = BollingerBands {
        middle: vec![f64::NAN; n],
        upper: vec![f64::NAN; n],
        lower: vec![f64::NAN; n],
        width: vec![f64::NAN; n],
    };

    if window == 0 || n < window {
        return bands;
    }

    for i in (window - 1)..n {
        let slice = &closes[i + 1 - window..=i];
        if slice.iter().any(|c| c.is_nan()) {
            continue;
        }

        let mean = slice.iter().sum::<f64>() / window as f64;
        let variance = slice
            .iter()
            .map(|c| {
                let diff = c - mean;
                diff * diff
            })
            .sum::<f64>()
            / window as f64;
        let dev = k * variance.sqrt();

        bands.middle[i] = mean;
        bands.upper[i] = mean + dev;
        bands.lower[i] = mean - dev;
        if closes[i] != 0.0 {
            bands.width[i] = (bands.upper[i] - bands.lower[i]) / closes[i] * 100.0;
        }
    }

    bands
}

pub fn bollinger_width(closes: &[f64], window: usize, k: f64) -> Vec<f64> {
    bollinger(closes, window, k).width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let bands = bollinger(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0);
        assert!(bands.middle[0].is_nan());
        assert!(bands.middle[1].is_nan());
        assert_approx(bands.middle[2], 11.0, DEFAULT_EPSILON);
        assert_approx(bands.middle[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let bands = bollinger(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0);
        for i in 2..5 {
            let half_width = bands.upper[i] - bands.middle[i];
            assert_approx(bands.middle[i] - bands.lower[i], half_width, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_width_uses_population_stddev() {
        // mean 11, population variance 2/3, width = 2*2*sqrt(2/3) / 12 * 100
        let width = bollinger_width(&[10.0, 11.0, 12.0], 3, 2.0);
        let expected = 4.0 * (2.0_f64 / 3.0).sqrt() / 12.0 * 100.0;
        assert_approx(width[2], expected, 1e-9);
    }

    #[test]
    fn bollinger_width_flat_is_zero() {
        let width = bollinger_width(&[50.0; 25], 20, 2.0);
        assert!(width[18].is_nan());
        assert_approx(width[19], 0.0, DEFAULT_EPSILON);
        assert_approx(width[24], 0.0, DEFAULT_EPSILON);
    }
}
