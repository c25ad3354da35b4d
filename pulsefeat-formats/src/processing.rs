//! Strategy selection and per-sensor dispatch.

use std::sync::Arc;

use rayon::prelude::*;

use pulsefeat_core::encoder::PulseEncoder;
use pulsefeat_core::{
    Error, FormatConfig, FormatKind, PulseSeries, Result, SparseFeature, TimeOffsets,
};

use crate::autoencoder::{autoencoder, EncoderRegistry};
use crate::histogram::{charge_bins, charge_bins_and_times};
use crate::quantiles::charge_weighted_time_quantiles;
use crate::summary::{pulse_summary_clipped, SUMMARY_WIDTH};

/// A validated strategy selection, built once per configuration and
/// invoked per sensor.
///
/// Construction runs the configuration checks for the selected format
/// and, for the autoencoder, resolves the configured encoder name, so
/// configuration mistakes surface immediately instead of on the first
/// sensor. The pipeline itself is stateless per call; sensors may be
/// encoded from parallel workers without synchronization.
pub struct FormatPipeline {
    kind: FormatKind,
    config: FormatConfig,
    encoder: Option<Arc<dyn PulseEncoder>>,
}

impl FormatPipeline {
    /// Builds a pipeline for any format except the autoencoder.
    ///
    /// # Errors
    /// Fails when the configuration is missing or malformed for `kind`,
    /// or when `kind` is [`FormatKind::Autoencoder`] (which needs
    /// [`Self::with_registry`]).
    pub fn new(kind: FormatKind, config: FormatConfig) -> Result<Self> {
        if kind == FormatKind::Autoencoder {
            return Err(Error::MissingConfig {
                field: "encoder_registry",
                format: kind.name(),
            });
        }
        config.validate_for(kind)?;
        Ok(Self {
            kind,
            config,
            encoder: None,
        })
    }

    /// Builds a pipeline, resolving the configured encoder name against
    /// `registry` when `kind` is the autoencoder.
    ///
    /// # Errors
    /// Fails when the configuration is missing or malformed for `kind`,
    /// or when no encoder is registered under the configured name.
    pub fn with_registry(
        kind: FormatKind,
        config: FormatConfig,
        registry: &EncoderRegistry,
    ) -> Result<Self> {
        config.validate_for(kind)?;
        let encoder = if kind == FormatKind::Autoencoder {
            Some(registry.resolve(config.encoder_name_for(kind)?)?)
        } else {
            None
        };
        Ok(Self {
            kind,
            config,
            encoder,
        })
    }

    /// Selected format.
    #[must_use]
    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    /// Shared configuration.
    #[must_use]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Width of the dense feature vector this pipeline produces.
    ///
    /// For the autoencoder this is the encoder's own declared width; for
    /// every other format it follows from the configuration.
    #[must_use]
    pub fn output_width(&self) -> usize {
        match self.kind {
            FormatKind::ChargeBins => self.bin_count(),
            FormatKind::ChargeBinsAndTimes => self.bin_count() + 2,
            FormatKind::Autoencoder => {
                self.encoder.as_ref().map_or(0, |encoder| encoder.width())
            }
            FormatKind::ChargeWeightedTimeQuantiles => self.quantile_count() + 1,
            FormatKind::PulseSummaryClipped => SUMMARY_WIDTH,
        }
    }

    /// Encodes one sensor's pulses into a sparse feature pair.
    ///
    /// # Errors
    /// Propagates the selected strategy's precondition and encoder
    /// errors.
    pub fn encode(&self, series: &PulseSeries, offsets: TimeOffsets) -> Result<SparseFeature> {
        match self.kind {
            FormatKind::ChargeBins => {
                charge_bins(series, self.config.time_bins_for(self.kind)?)
            }
            FormatKind::ChargeBinsAndTimes => {
                charge_bins_and_times(series, offsets, self.config.time_bins_for(self.kind)?)
            }
            FormatKind::Autoencoder => {
                let encoder = self.encoder.as_deref().ok_or(Error::MissingConfig {
                    field: "encoder_registry",
                    format: self.kind.name(),
                })?;
                autoencoder(
                    series,
                    offsets,
                    self.config.time_bins_for(self.kind)?,
                    self.config.encoder_settings_for(self.kind)?,
                    encoder,
                )
            }
            FormatKind::ChargeWeightedTimeQuantiles => {
                charge_weighted_time_quantiles(series, self.config.time_quantiles_for(self.kind)?)
            }
            FormatKind::PulseSummaryClipped => pulse_summary_clipped(series),
        }
    }

    /// Encodes many sensors in parallel, preserving input order.
    ///
    /// Sensors are independent and the pipeline shares no mutable state,
    /// so each one is processed on its own rayon worker.
    ///
    /// # Errors
    /// Returns the first per-sensor error encountered.
    pub fn encode_batch(
        &self,
        sensors: &[(PulseSeries, TimeOffsets)],
    ) -> Result<Vec<SparseFeature>> {
        sensors
            .par_iter()
            .map(|(series, offsets)| self.encode(series, *offsets))
            .collect()
    }

    fn bin_count(&self) -> usize {
        self.config
            .time_bins
            .as_ref()
            .map_or(0, |edges| edges.len() - 1)
    }

    fn quantile_count(&self) -> usize {
        self.config.time_quantiles.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use pulsefeat_core::encoder::EncoderSettings;
    use serde_json::json;

    fn sensor(charges: &[f64], times: &[f64]) -> PulseSeries {
        PulseSeries::new(charges.to_vec(), times.to_vec()).unwrap()
    }

    struct ConstantEncoder;

    impl PulseEncoder for ConstantEncoder {
        fn name(&self) -> &str {
            "constant"
        }

        fn width(&self) -> usize {
            4
        }

        fn encode(
            &self,
            _times: &[f64],
            _charges: &[f64],
            _bin_edges: &[f64],
            _settings: &EncoderSettings,
            time_offset: f64,
        ) -> Result<SparseFeature> {
            let mut feature = SparseFeature::new();
            feature.push(time_offset, 0);
            Ok(feature)
        }
    }

    #[test]
    fn test_dispatch_charge_bins() {
        let pipeline = FormatPipeline::new(
            FormatKind::ChargeBins,
            FormatConfig::new().with_time_bins(vec![0.0, 10.0, 20.0, 30.0]),
        )
        .unwrap();

        assert_eq!(pipeline.output_width(), 3);
        let feature = pipeline
            .encode(&sensor(&[2.0, 3.0], &[5.0, 25.0]), TimeOffsets::default())
            .unwrap();
        assert_eq!(feature.values, vec![2.0, 3.0]);
        assert_eq!(feature.indices, vec![0, 2]);
    }

    #[test]
    fn test_dispatch_charge_bins_and_times() {
        let pipeline = FormatPipeline::new(
            FormatKind::ChargeBinsAndTimes,
            FormatConfig::new().with_time_bins(vec![0.0, 10.0, 20.0, 30.0]),
        )
        .unwrap();

        assert_eq!(pipeline.output_width(), 5);
        let feature = pipeline
            .encode(
                &sensor(&[2.0], &[5.0]),
                TimeOffsets::new(100.0, 50.0),
            )
            .unwrap();
        assert_eq!(feature.values, vec![155.0, 150.0, 2.0]);
        assert_eq!(feature.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_dispatch_quantiles() {
        let pipeline = FormatPipeline::new(
            FormatKind::ChargeWeightedTimeQuantiles,
            FormatConfig::new().with_time_quantiles(vec![0.5, 1.0]),
        )
        .unwrap();

        assert_eq!(pipeline.output_width(), 3);
        let feature = pipeline
            .encode(
                &sensor(&[1.0, 1.0, 1.0, 1.0], &[0.0, 10.0, 20.0, 30.0]),
                TimeOffsets::default(),
            )
            .unwrap();
        assert_eq!(feature.values, vec![4.0, 10.0, 30.0]);
    }

    #[test]
    fn test_dispatch_summary() {
        let pipeline =
            FormatPipeline::new(FormatKind::PulseSummaryClipped, FormatConfig::new()).unwrap();
        assert_eq!(pipeline.output_width(), 9);

        let feature = pipeline
            .encode(
                &sensor(&[5.0, 3.0, 2.0], &[-6000.0, 0.0, 50.0]),
                TimeOffsets::default(),
            )
            .unwrap();
        assert_eq!(feature.values[0], 5.0);
        assert_eq!(feature.values[6], 50.0);
    }

    #[test]
    fn test_dispatch_autoencoder() {
        let mut registry = EncoderRegistry::new();
        registry.register(Arc::new(ConstantEncoder));

        let config = FormatConfig::new()
            .with_time_bins(vec![0.0, 100.0])
            .with_encoder_name("constant")
            .with_encoder_settings(json!({}));
        let pipeline =
            FormatPipeline::with_registry(FormatKind::Autoencoder, config, &registry).unwrap();

        assert_eq!(pipeline.output_width(), 4);
        let feature = pipeline
            .encode(&sensor(&[1.0], &[10.0]), TimeOffsets::new(30.0, 12.0))
            .unwrap();
        assert_eq!(feature.values, vec![42.0]);
    }

    #[test]
    fn test_autoencoder_without_registry_rejected() {
        let config = FormatConfig::new()
            .with_time_bins(vec![0.0, 100.0])
            .with_encoder_name("constant")
            .with_encoder_settings(json!({}));
        let result = FormatPipeline::new(FormatKind::Autoencoder, config);
        assert!(matches!(
            result,
            Err(Error::MissingConfig {
                field: "encoder_registry",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_encoder_rejected_at_construction() {
        let registry = EncoderRegistry::new();
        let config = FormatConfig::new()
            .with_time_bins(vec![0.0, 100.0])
            .with_encoder_name("missing")
            .with_encoder_settings(json!({}));
        let result = FormatPipeline::with_registry(FormatKind::Autoencoder, config, &registry);
        assert!(matches!(result, Err(Error::UnknownEncoder(_))));
    }

    #[test]
    fn test_missing_config_rejected_at_construction() {
        let result = FormatPipeline::new(FormatKind::ChargeBins, FormatConfig::new());
        assert!(matches!(
            result,
            Err(Error::MissingConfig {
                field: "time_bins",
                ..
            })
        ));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let pipeline =
            FormatPipeline::new(FormatKind::PulseSummaryClipped, FormatConfig::new()).unwrap();
        let series = sensor(&[1.0, 2.5, 0.5], &[-100.0, 3.0, 912.0]);

        let first = pipeline.encode(&series, TimeOffsets::default()).unwrap();
        let second = pipeline.encode(&series, TimeOffsets::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let pipeline = FormatPipeline::new(
            FormatKind::ChargeBins,
            FormatConfig::new().with_time_bins(vec![0.0, 10.0, 20.0, 30.0]),
        )
        .unwrap();

        let sensors: Vec<(PulseSeries, TimeOffsets)> = (0..32)
            .map(|i| {
                let t = f64::from(i);
                (
                    sensor(&[1.0 + t, 2.0], &[t.min(29.0), 25.0]),
                    TimeOffsets::new(t, -t),
                )
            })
            .collect();

        let batch = pipeline.encode_batch(&sensors).unwrap();
        for (result, (series, offsets)) in batch.iter().zip(&sensors) {
            assert_eq!(*result, pipeline.encode(series, *offsets).unwrap());
        }
    }

    #[test]
    fn test_batch_propagates_error() {
        let pipeline =
            FormatPipeline::new(FormatKind::PulseSummaryClipped, FormatConfig::new()).unwrap();
        let sensors = vec![
            (sensor(&[1.0], &[0.0]), TimeOffsets::default()),
            (sensor(&[1.0], &[-9000.0]), TimeOffsets::default()),
        ];
        let result = pipeline.encode_batch(&sensors);
        assert!(matches!(result, Err(Error::AllPulsesClipped { .. })));
    }
}
