//! Clipped pulse-summary strategy.

use pulsefeat_core::stats::{weighted_mean, weighted_quantile, weighted_std};
use pulsefeat_core::{Error, PulseSeries, Result, SparseFeature};

/// Earliest relative time kept by the clip window.
pub const CLIP_WINDOW_MIN: f64 = -5000.0;
/// Latest relative time kept by the clip window.
pub const CLIP_WINDOW_MAX: f64 = 14000.0;

/// Output width of the summary.
pub const SUMMARY_WIDTH: usize = 9;

const WIDE_INTERVAL: f64 = 500.0;
const NARROW_INTERVAL: f64 = 100.0;

/// Reduces a pulse series to nine fixed summary slots, computed after
/// clipping to the sensor's expected response window.
///
/// Pulses with times outside `[-5000, 14000]` (inclusive bounds) are
/// dropped first. On the surviving pulses the slots are:
///
/// 0. total charge
/// 1. charge within 500 time units of the first kept pulse (strict `<`)
/// 2. charge within 100 time units of the first kept pulse (strict `<`)
/// 3. time of the first kept pulse
/// 4. charge-weighted time quantile at 0.2
/// 5. charge-weighted time quantile at 0.5
/// 6. time of the last kept pulse
/// 7. charge-weighted mean time
/// 8. charge-weighted standard deviation of time
///
/// All nine slots are always emitted, even when zero.
///
/// # Errors
/// Fails when clipping removes every pulse, or when the surviving
/// charges sum to zero (the weighted statistics are then undefined).
pub fn pulse_summary_clipped(series: &PulseSeries) -> Result<SparseFeature> {
    let mut charges = Vec::with_capacity(series.len());
    let mut times = Vec::with_capacity(series.len());
    for (&charge, &time) in series.charges().iter().zip(series.times()) {
        if (CLIP_WINDOW_MIN..=CLIP_WINDOW_MAX).contains(&time) {
            charges.push(charge);
            times.push(time);
        }
    }
    if times.is_empty() {
        return Err(Error::AllPulsesClipped {
            lo: CLIP_WINDOW_MIN,
            hi: CLIP_WINDOW_MAX,
        });
    }

    let total_charge: f64 = charges.iter().sum();
    let first_time = times[0];
    let last_time = times[times.len() - 1];

    let mut charge_within_wide = 0.0;
    let mut charge_within_narrow = 0.0;
    for (&charge, &time) in charges.iter().zip(&times) {
        if time - first_time < WIDE_INTERVAL {
            charge_within_wide += charge;
        }
        if time - first_time < NARROW_INTERVAL {
            charge_within_narrow += charge;
        }
    }

    let quantile20_time = weighted_quantile(&times, &charges, 0.2)?;
    let median_time = weighted_quantile(&times, &charges, 0.5)?;
    let mean_time = weighted_mean(&times, &charges)?;
    let std_time = weighted_std(&times, &charges)?;

    let slots = [
        total_charge,
        charge_within_wide,
        charge_within_narrow,
        first_time,
        quantile20_time,
        median_time,
        last_time,
        mean_time,
        std_time,
    ];
    let mut feature = SparseFeature::with_capacity(SUMMARY_WIDTH);
    for (slot, value) in slots.into_iter().enumerate() {
        feature.push(value, slot);
    }
    Ok(feature)
}
