//! Simple rolling mean, used for the volume average and as the ATR smoother.

/// Mean of the trailing `length` values; undefined until the window fills or
/// when the window contains an undefined value.
pub fn rolling_mean(values: &[f64], length: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if length == 0 || n < length {
        return result;
    }

    for i in (length - 1)..n {
        let window = &values[i + 1 - length..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().sum::<f64>() / length as f64;
    }

    result
}

pub fn volume_average(volumes: &[f64], length: usize) -> Vec<f64> {
    rolling_mean(volumes, length)
}
