//! pulsefeat-core: Core types and weighted-statistics primitives for
//! pulse feature extraction.
//!
//! This crate provides the foundational abstractions shared by the
//! format strategies in `pulsefeat-formats`: the validated pulse
//! container, the sparse feature output pair, format configuration, the
//! external-encoder contract, and the weighted statistics everything is
//! built from.
//!

pub mod config;
pub mod encoder;
pub mod error;
pub mod pulse;
pub mod sparse;
pub mod stats;

pub use config::{FormatConfig, FormatKind};
pub use encoder::{EncoderSettings, PulseEncoder};
pub use error::{Error, Result};
pub use pulse::{PulseSeries, TimeOffsets};
pub use sparse::SparseFeature;
pub use stats::{weighted_mean, weighted_quantile, weighted_std};
