//! External learned-encoder adapter contract.

use crate::error::Result;
use crate::sparse::SparseFeature;

/// Opaque settings blob handed to an encoder unchanged.
///
/// The core never interprets these; their schema belongs to the encoder
/// implementation.
pub type EncoderSettings = serde_json::Value;

/// Contract into an external learned pulse encoder.
///
/// The core composes the time offset and passes pulse data through; it
/// never reaches into the encoder's model state. Implementations own
/// whatever weights or sessions they need and must be callable from
/// parallel per-sensor workers.
pub trait PulseEncoder: Send + Sync {
    /// Encoder name, matched against the configured encoder name.
    fn name(&self) -> &str;

    /// Width of the dense feature vector this encoder produces.
    ///
    /// This is the one output width not statically known from the format
    /// configuration alone.
    fn width(&self) -> usize;

    /// Encodes one sensor's pulses into a sparse feature pair.
    ///
    /// `time_offset` is the combined local plus global offset for the
    /// sensor.
    ///
    /// # Errors
    /// Adapter failures surface as [`crate::Error::Encoder`] and are
    /// propagated unchanged by the calling strategy.
    fn encode(
        &self,
        times: &[f64],
        charges: &[f64],
        bin_edges: &[f64],
        settings: &EncoderSettings,
        time_offset: f64,
    ) -> Result<SparseFeature>;
}
