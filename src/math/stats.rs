//! Summary statistics used by the derived metrics.

/// Arithmetic mean. Returns `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Coefficient of determination `1 - SS_res / SS_tot`.
///
/// Defined as exactly `1.0` when all observations are identical (`SS_tot == 0`).
/// That case is detected on the raw values: a rounded mean of e.g. `0.1`s
/// leaves a spurious nonzero `SS_tot`.
pub fn r_squared(observed: &[f64], predicted: &[f64]) -> f64 {
    let Some(&first) = observed.first() else {
        return 1.0;
    };
    if observed.iter().all(|&y| y == first) {
        return 1.0;
    }
    let y_bar = mean(observed);
    let ss_tot: f64 = observed.iter().map(|y| (y - y_bar).powi(2)).sum();
    let ss_res: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

/// Replace NaN/Inf with `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
