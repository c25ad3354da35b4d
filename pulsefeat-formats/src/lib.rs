//! pulsefeat-formats: Pulse-to-sparse-feature encoding strategies.
//!
//! This crate provides the five interchangeable format strategies:
//! - **charge_bins** - charge histogram over configured time bins
//! - **charge_bins_and_times** - histogram prefixed with first-pulse
//!   time and total offset
//! - **autoencoder** - pass-through to an external learned encoder
//! - **charge_weighted_time_quantiles** - total charge plus per-level
//!   quantile times
//! - **pulse_summary_clipped** - fixed nine-slot clipped summary
//!
//! All strategies share one contract: pulses in, a sparse
//! (values, indices) pair out. [`FormatPipeline`] selects and validates
//! one strategy at configuration time and dispatches it per sensor.
//!
#![warn(missing_docs)]

pub mod autoencoder;
pub mod histogram;
pub mod processing;
pub mod quantiles;
pub mod summary;

pub use autoencoder::EncoderRegistry;
pub use histogram::{charge_bins, charge_bins_and_times};
pub use processing::FormatPipeline;
pub use quantiles::charge_weighted_time_quantiles;
pub use summary::{pulse_summary_clipped, CLIP_WINDOW_MAX, CLIP_WINDOW_MIN, SUMMARY_WIDTH};

// Re-export core types for convenience
pub use pulsefeat_core::{
    EncoderSettings, Error, FormatConfig, FormatKind, PulseEncoder, PulseSeries, Result,
    SparseFeature, TimeOffsets,
};
