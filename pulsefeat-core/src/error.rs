//! Error types for pulsefeat-core.

use thiserror::Error;

/// Result type alias for pulsefeat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for pulse feature extraction.
///
/// Precondition violations (empty series, zero total weight, a fully
/// clipped series) are reported as typed errors rather than propagated
/// as NaN, so a corrupted feature tensor cannot slip through unnoticed.
#[derive(Error, Debug)]
pub enum Error {
    /// Charge and time arrays differ in length.
    #[error("charge/time length mismatch: {charges} charges vs {times} times")]
    ChargeTimeMismatch { charges: usize, times: usize },

    /// Value and weight arrays differ in length.
    #[error("value/weight length mismatch: {values} values vs {weights} weights")]
    ValueWeightMismatch { values: usize, weights: usize },

    /// A pulse series with no pulses was passed where one is required.
    #[error("empty pulse series")]
    EmptyPulseSeries,

    /// A weighted statistic was asked for over empty input arrays.
    #[error("weighted statistic over empty input")]
    EmptyInput,

    /// Total weight is not positive, the weighted statistic is undefined.
    #[error("total weight is zero")]
    ZeroTotalWeight,

    /// Quantile level outside [0, 1].
    #[error("quantile {0} outside [0, 1]")]
    InvalidQuantile(f64),

    /// No pulse reached the cumulative charge fraction for a quantile.
    #[error("no pulse reaches the cumulative charge fraction for quantile {0}")]
    QuantileNotReached(f64),

    /// Clipping removed every pulse in the series.
    #[error("all pulses outside clip window [{lo}, {hi}]")]
    AllPulsesClipped { lo: f64, hi: f64 },

    /// A sparse index points outside the dense output width.
    #[error("sparse index {index} exceeds output width {width}")]
    IndexOutOfRange { index: usize, width: usize },

    /// A required configuration field is missing for the selected format.
    #[error("missing configuration field `{field}` for format `{format}`")]
    MissingConfig {
        field: &'static str,
        format: &'static str,
    },

    /// Histogram bin edges are malformed.
    #[error("invalid bin edges: {0}")]
    InvalidBinEdges(String),

    /// Configured time quantile levels are malformed.
    #[error("invalid time quantiles: {0}")]
    InvalidTimeQuantiles(String),

    /// No encoder registered under the configured name.
    #[error("unknown encoder `{0}`")]
    UnknownEncoder(String),

    /// The external encoder failed.
    #[error("encoder `{name}` failed: {message}")]
    Encoder { name: String, message: String },
}

impl Error {
    /// Builds an [`Error::Encoder`] from an adapter failure.
    pub fn encoder(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encoder {
            name: name.into(),
            message: message.into(),
        }
    }
}
