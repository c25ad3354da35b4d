//! External-encoder registry and pass-through strategy.

use std::collections::HashMap;
use std::sync::Arc;

use pulsefeat_core::encoder::{EncoderSettings, PulseEncoder};
use pulsefeat_core::{Error, PulseSeries, Result, SparseFeature, TimeOffsets};

/// Name-keyed registry of external encoder adapters.
///
/// A pipeline configured for the autoencoder format resolves its encoder
/// here once at construction, so an unrecognized name is a configuration
/// error rather than a per-sensor failure.
#[derive(Default)]
pub struct EncoderRegistry {
    encoders: HashMap<String, Arc<dyn PulseEncoder>>,
}

impl EncoderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an encoder under its own name, replacing any previous
    /// entry with that name.
    pub fn register(&mut self, encoder: Arc<dyn PulseEncoder>) {
        self.encoders.insert(encoder.name().to_owned(), encoder);
    }

    /// Resolves a configured encoder name.
    ///
    /// # Errors
    /// Returns [`Error::UnknownEncoder`] when nothing is registered
    /// under `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn PulseEncoder>> {
        self.encoders
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownEncoder(name.to_owned()))
    }

    /// Returns the registered encoder names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str)
    }

    /// Returns the number of registered encoders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

/// Encodes a sensor's pulses through an external learned encoder.
///
/// Pure pass-through plus offset composition: the encoder receives the
/// relative times, the charges, the configured bin edges, its settings,
/// and the combined local plus global offset. Its sparse output is
/// returned untouched, and its failures propagate unchanged.
///
/// # Errors
/// Whatever the encoder returns, typically [`Error::Encoder`].
pub fn autoencoder(
    series: &PulseSeries,
    offsets: TimeOffsets,
    edges: &[f64],
    settings: &EncoderSettings,
    encoder: &dyn PulseEncoder,
) -> Result<SparseFeature> {
    encoder.encode(
        series.times(),
        series.charges(),
        edges,
        settings,
        offsets.total(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use serde_json::json;

    /// Test double that records what it was called with by echoing the
    /// inputs into its output slots.
    struct EchoEncoder;

    impl PulseEncoder for EchoEncoder {
        fn name(&self) -> &str {
            "echo"
        }

        fn width(&self) -> usize {
            3
        }

        fn encode(
            &self,
            times: &[f64],
            charges: &[f64],
            _bin_edges: &[f64],
            settings: &EncoderSettings,
            time_offset: f64,
        ) -> Result<SparseFeature> {
            let scale = settings["scale"].as_f64().unwrap_or(1.0);
            let mut feature = SparseFeature::new();
            feature.push(times[0] * scale, 0);
            feature.push(charges.iter().sum::<f64>(), 1);
            feature.push(time_offset, 2);
            Ok(feature)
        }
    }

    struct FailingEncoder;

    impl PulseEncoder for FailingEncoder {
        fn name(&self) -> &str {
            "failing"
        }

        fn width(&self) -> usize {
            0
        }

        fn encode(
            &self,
            _times: &[f64],
            _charges: &[f64],
            _bin_edges: &[f64],
            _settings: &EncoderSettings,
            _time_offset: f64,
        ) -> Result<SparseFeature> {
            Err(Error::encoder("failing", "malformed settings"))
        }
    }

    #[test]
    fn test_pass_through_and_offset_composition() {
        let series = PulseSeries::new(vec![1.0, 2.0], vec![10.0, 20.0]).unwrap();
        let settings = json!({"scale": 2.0});
        let feature = autoencoder(
            &series,
            TimeOffsets::new(9000.0, 500.0),
            &[0.0, 100.0],
            &settings,
            &EchoEncoder,
        )
        .unwrap();

        assert_eq!(feature.values, vec![20.0, 3.0, 9500.0]);
        assert_eq!(feature.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_registry_resolution() {
        let mut registry = EncoderRegistry::new();
        assert!(registry.is_empty());
        registry.register(Arc::new(EchoEncoder));
        assert_eq!(registry.len(), 1);

        let encoder = registry.resolve("echo").unwrap();
        assert_eq!(encoder.width(), 3);

        let result = registry.resolve("missing");
        assert!(matches!(result, Err(Error::UnknownEncoder(name)) if name == "missing"));
    }

    #[test]
    fn test_encoder_failure_propagates() {
        let series = PulseSeries::new(vec![1.0], vec![10.0]).unwrap();
        let result = autoencoder(
            &series,
            TimeOffsets::default(),
            &[0.0, 100.0],
            &json!({}),
            &FailingEncoder,
        );
        assert!(matches!(
            result,
            Err(Error::Encoder { name, .. }) if name == "failing"
        ));
    }
}
