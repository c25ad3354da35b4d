//! Charge-weighted time quantile strategy.

use pulsefeat_core::config::validate_time_quantiles;
use pulsefeat_core::{Error, PulseSeries, Result, SparseFeature};

/// Cushion against floating-point round-off when the cumulative charge
/// fraction lands exactly on a configured level.
const LEVEL_EPSILON: f64 = 1e-6;

/// Emits the total sensor charge (slot 0) followed by one arrival time
/// per configured quantile level. Output width is Q+1.
///
/// For the level at position `i`, slot `i + 1` holds the time of the
/// first pulse whose cumulative charge fraction reaches `level - 1e-6`.
/// The cumulative sum runs over pulses in their given order, not in time
/// order; that is deliberate feature semantics, not a missing sort.
///
/// # Errors
/// Fails when the levels are malformed or the total charge is not
/// positive.
pub fn charge_weighted_time_quantiles(
    series: &PulseSeries,
    levels: &[f64],
) -> Result<SparseFeature> {
    validate_time_quantiles(levels)?;

    let total_charge = series.total_charge();
    if total_charge <= 0.0 {
        return Err(Error::ZeroTotalWeight);
    }

    let fractions: Vec<f64> = {
        let mut cumulative = 0.0;
        series
            .charges()
            .iter()
            .map(|&charge| {
                cumulative += charge;
                cumulative / total_charge
            })
            .collect()
    };

    let mut feature = SparseFeature::with_capacity(levels.len() + 1);
    feature.push(total_charge, 0);

    for (slot, &level) in levels.iter().enumerate() {
        let threshold = level - LEVEL_EPSILON;
        let position = fractions
            .iter()
            .position(|&fraction| fraction >= threshold)
            .ok_or(Error::QuantileNotReached(level))?;
        feature.push(series.times()[position], slot + 1);
    }

    Ok(feature)
}
