//! Temperature-scaled softmax over sampled values.
//!
//! p_i = exp((s_i - max) / tau) / sum_j exp((s_j - max) / tau)
//!
//! Subtracting the max keeps every exponent <= 0, so nothing overflows.
//! Terms that underflow are floored at the smallest positive normal f64
//! before normalising, which keeps every probability strictly positive.

use routewise_core::config::engine_config::validate_temperature;
use routewise_core::errors::RouterResult;

/// Convert scores into a probability distribution at temperature `tau`.
///
/// `tau <= 0` (or non-finite) is rejected with `InvalidConfig` before any
/// work is done. An empty input yields an empty distribution.
pub fn softmax(values: &[f64], temperature: f64) -> RouterResult<Vec<f64>> {
    validate_temperature(temperature)?;
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = values
        .iter()
        .map(|v| ((v - max) / temperature).exp().max(f64::MIN_POSITIVE))
        .collect();
    let total: f64 = weights.iter().sum();

    Ok(weights.into_iter().map(|w| w / total).collect())
}
