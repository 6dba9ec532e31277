/// Rounds to two decimal places, the precision used for every aggregate.
///
/// Goes through the exact decimal expansion of `value`, so `72.285` (stored
/// as 72.28499...) rounds down instead of being pushed up by `x * 100`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Computes `Σ(value·weight) / Σ(weight)`. Returns `None` when the weights sum
/// to zero, so callers never see NaN or infinity.
pub fn weighted_mean(numerator: f64, weight_sum: f64) -> Option<f64> {
    if weight_sum == 0.0 {
        return None;
    }
    let mean = numerator / weight_sum;
    mean.is_finite().then_some(mean)
}
