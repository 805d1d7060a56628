/// Round to the nearest integer with ties going toward positive infinity,
/// so -2.5 becomes -2 and 2.5 becomes 3. NaN stays NaN.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Largest value; any NaN makes the result NaN. Empty input is NaN.
pub fn max_value(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .reduce(|acc, v| {
            if acc.is_nan() || v.is_nan() {
                f64::NAN
            } else {
                acc.max(v)
            }
        })
        .unwrap_or(f64::NAN)
}

/// Smallest value; any NaN makes the result NaN. Empty input is NaN.
pub fn min_value(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .reduce(|acc, v| {
            if acc.is_nan() || v.is_nan() {
                f64::NAN
            } else {
                acc.min(v)
            }
        })
        .unwrap_or(f64::NAN)
}

/// Arithmetic mean. Empty input is NaN.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
