//! Weighted-statistics primitives.
//!
//! These back the format strategies and must stay reproducible against
//! the values used to train downstream models: plain sequential
//! accumulation, no reordering of the summation.

use crate::error::{Error, Result};

/// Checks parallel value/weight arrays and returns the total weight.
fn validate(values: &[f64], weights: &[f64]) -> Result<f64> {
    if values.len() != weights.len() {
        return Err(Error::ValueWeightMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(Error::ZeroTotalWeight);
    }
    Ok(total)
}

/// Returns the weighted mean `Σ(w·v) / Σw`.
///
/// # Errors
/// Fails on mismatched or empty inputs and on non-positive total weight.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Result<f64> {
    let total = validate(values, weights)?;
    let weighted_sum: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    Ok(weighted_sum / total)
}

/// Returns the weighted standard deviation of `values`.
///
/// Weighted mean `m = Σ(w·v)/Σw`, variance `Σ(w·(v−m)²)/Σw`, result
/// `sqrt(variance)`.
///
/// # Errors
/// Fails on mismatched or empty inputs and on non-positive total weight.
pub fn weighted_std(values: &[f64], weights: &[f64]) -> Result<f64> {
    let total = validate(values, weights)?;
    let mean = values.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>() / total;
    let variance = values
        .iter()
        .zip(weights)
        .map(|(v, w)| w * (v - mean) * (v - mean))
        .sum::<f64>()
        / total;
    Ok(variance.sqrt())
}

/// Returns the value at which cumulative weight first reaches
/// `quantile · Σw`.
///
/// Values are co-sorted ascending with their weights (inputs need not be
/// pre-sorted); the estimator is nearest-rank with round-up, no
/// interpolation between points. `quantile` 0 selects the minimum and 1
/// the maximum.
///
/// # Errors
/// Fails on mismatched or empty inputs, non-positive total weight, and a
/// quantile outside [0, 1].
pub fn weighted_quantile(values: &[f64], weights: &[f64], quantile: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&quantile) {
        return Err(Error::InvalidQuantile(quantile));
    }
    let total = validate(values, weights)?;

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    // Compare in absolute cumulative weight rather than normalized
    // fractions so quantile = 1 lands exactly on the maximum.
    let target = quantile * total;
    let mut cumulative = 0.0;
    let mut result = values[order[order.len() - 1]];
    for &idx in &order {
        cumulative += weights[idx];
        if cumulative >= target {
            result = values[idx];
            break;
        }
    }
    Ok(result)
}
