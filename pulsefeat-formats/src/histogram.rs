//! Charge histogram strategies.

use pulsefeat_core::config::validate_bin_edges;
use pulsefeat_core::{PulseSeries, Result, SparseFeature, TimeOffsets};

/// Accumulates charge into the time bins defined by `edges`.
///
/// Standard histogram semantics: every bin is half-open `[e_i, e_i+1)`
/// except the last, which also includes its right edge. Pulses outside
/// the edge range are dropped.
fn weighted_histogram(times: &[f64], charges: &[f64], edges: &[f64]) -> Vec<f64> {
    let mut bins = vec![0.0; edges.len() - 1];
    let lo = edges[0];
    let hi = edges[edges.len() - 1];
    for (&time, &charge) in times.iter().zip(charges) {
        if time < lo || time > hi {
            continue;
        }
        let bin = if time >= hi {
            bins.len() - 1
        } else {
            edges.partition_point(|&edge| edge <= time) - 1
        };
        bins[bin] += charge;
    }
    bins
}

/// Histograms charge over the configured time bins.
///
/// Emits a `(charge, bin)` pair only for bins whose accumulated charge
/// is non-zero, in ascending bin order. Output width is the bin count B
/// (B+1 edges).
///
/// # Errors
/// Fails when `edges` are malformed.
#[allow(clippy::float_cmp)]
pub fn charge_bins(series: &PulseSeries, edges: &[f64]) -> Result<SparseFeature> {
    validate_bin_edges(edges)?;

    let hist = weighted_histogram(series.times(), series.charges(), edges);
    let mut feature = SparseFeature::with_capacity(hist.len());
    for (bin, &charge) in hist.iter().enumerate() {
        if charge != 0.0 {
            feature.push(charge, bin);
        }
    }
    Ok(feature)
}

/// Histograms charge over the configured time bins, prefixed with the
/// absolute first-pulse time (slot 0) and the total time offset (slot 1).
///
/// The two leading slots are always emitted, even when zero; histogram
/// bins follow with their indices shifted by two. Output width is B+2.
///
/// # Errors
/// Fails when `edges` are malformed.
#[allow(clippy::float_cmp)]
pub fn charge_bins_and_times(
    series: &PulseSeries,
    offsets: TimeOffsets,
    edges: &[f64],
) -> Result<SparseFeature> {
    validate_bin_edges(edges)?;

    let total_offset = offsets.total();
    let mut feature = SparseFeature::with_capacity(edges.len() + 1);
    feature.push(series.first_time() + total_offset, 0);
    feature.push(total_offset, 1);

    let hist = weighted_histogram(series.times(), series.charges(), edges);
    for (bin, &charge) in hist.iter().enumerate() {
        if charge != 0.0 {
            feature.push(charge, bin + 2);
        }
    }
    Ok(feature)
}
