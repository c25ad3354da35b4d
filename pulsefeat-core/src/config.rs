//! Format selection and configuration.

use serde::{Deserialize, Serialize};

use crate::encoder::EncoderSettings;
use crate::error::{Error, Result};

/// The closed set of pulse encoding strategies.
///
/// Strategies share one call contract but differ entirely in body;
/// selection happens once at configuration time via [`Self::from_name`]
/// and the set stays inspectable through [`Self::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    /// Charge histogram over configured time bins.
    ChargeBins,
    /// Charge histogram prefixed with first-pulse time and total offset.
    ChargeBinsAndTimes,
    /// Pass-through to an external learned encoder.
    Autoencoder,
    /// Total charge plus charge-weighted time quantiles.
    ChargeWeightedTimeQuantiles,
    /// Fixed nine-slot summary of the clipped pulse series.
    PulseSummaryClipped,
}

impl FormatKind {
    /// All strategies, in a stable order.
    pub const ALL: [FormatKind; 5] = [
        FormatKind::ChargeBins,
        FormatKind::ChargeBinsAndTimes,
        FormatKind::Autoencoder,
        FormatKind::ChargeWeightedTimeQuantiles,
        FormatKind::PulseSummaryClipped,
    ];

    /// Stable configuration name of this strategy.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChargeBins => "charge_bins",
            Self::ChargeBinsAndTimes => "charge_bins_and_times",
            Self::Autoencoder => "autoencoder",
            Self::ChargeWeightedTimeQuantiles => "charge_weighted_time_quantiles",
            Self::PulseSummaryClipped => "pulse_summary_clipped",
        }
    }

    /// Looks up a strategy by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Settings bag shared by all format strategies.
///
/// Only the fields consumed by the selected strategy need to be
/// populated; unused fields are ignored, not validated. Validation runs
/// once, when a pipeline is built, so missing-field bugs surface at
/// construction instead of on the first sensor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Ascending histogram bin edges (B+1 edges define B bins).
    pub time_bins: Option<Vec<f64>>,
    /// Ascending quantile levels in (0, 1].
    pub time_quantiles: Option<Vec<f64>>,
    /// Name of the registered external encoder.
    pub encoder_name: Option<String>,
    /// Opaque settings forwarded to the external encoder.
    pub encoder_settings: Option<EncoderSettings>,
}

impl FormatConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the histogram bin edges.
    #[must_use]
    pub fn with_time_bins(mut self, edges: Vec<f64>) -> Self {
        self.time_bins = Some(edges);
        self
    }

    /// Sets the quantile levels.
    #[must_use]
    pub fn with_time_quantiles(mut self, levels: Vec<f64>) -> Self {
        self.time_quantiles = Some(levels);
        self
    }

    /// Sets the external encoder name.
    #[must_use]
    pub fn with_encoder_name(mut self, name: impl Into<String>) -> Self {
        self.encoder_name = Some(name.into());
        self
    }

    /// Sets the opaque external encoder settings.
    #[must_use]
    pub fn with_encoder_settings(mut self, settings: EncoderSettings) -> Self {
        self.encoder_settings = Some(settings);
        self
    }

    /// Validates the fields consumed by `kind`.
    ///
    /// # Errors
    /// Returns [`Error::MissingConfig`] for an absent required field and
    /// the field-specific error for a malformed one.
    pub fn validate_for(&self, kind: FormatKind) -> Result<()> {
        match kind {
            FormatKind::ChargeBins | FormatKind::ChargeBinsAndTimes => {
                validate_bin_edges(self.time_bins_for(kind)?)
            }
            FormatKind::Autoencoder => {
                validate_bin_edges(self.time_bins_for(kind)?)?;
                self.encoder_name_for(kind)?;
                self.encoder_settings_for(kind)?;
                Ok(())
            }
            FormatKind::ChargeWeightedTimeQuantiles => {
                validate_time_quantiles(self.time_quantiles_for(kind)?)
            }
            FormatKind::PulseSummaryClipped => Ok(()),
        }
    }

    /// Returns the bin edges, or the missing-field error for `kind`.
    ///
    /// # Errors
    /// Returns [`Error::MissingConfig`] when `time_bins` is absent.
    pub fn time_bins_for(&self, kind: FormatKind) -> Result<&[f64]> {
        self.time_bins.as_deref().ok_or(Error::MissingConfig {
            field: "time_bins",
            format: kind.name(),
        })
    }

    /// Returns the quantile levels, or the missing-field error for `kind`.
    ///
    /// # Errors
    /// Returns [`Error::MissingConfig`] when `time_quantiles` is absent.
    pub fn time_quantiles_for(&self, kind: FormatKind) -> Result<&[f64]> {
        self.time_quantiles.as_deref().ok_or(Error::MissingConfig {
            field: "time_quantiles",
            format: kind.name(),
        })
    }

    /// Returns the encoder name, or the missing-field error for `kind`.
    ///
    /// # Errors
    /// Returns [`Error::MissingConfig`] when `encoder_name` is absent.
    pub fn encoder_name_for(&self, kind: FormatKind) -> Result<&str> {
        self.encoder_name.as_deref().ok_or(Error::MissingConfig {
            field: "encoder_name",
            format: kind.name(),
        })
    }

    /// Returns the encoder settings, or the missing-field error for `kind`.
    ///
    /// # Errors
    /// Returns [`Error::MissingConfig`] when `encoder_settings` is absent.
    pub fn encoder_settings_for(&self, kind: FormatKind) -> Result<&EncoderSettings> {
        self.encoder_settings.as_ref().ok_or(Error::MissingConfig {
            field: "encoder_settings",
            format: kind.name(),
        })
    }
}

/// Checks that histogram edges define at least one strictly ascending bin.
///
/// # Errors
/// Returns [`Error::InvalidBinEdges`] otherwise.
pub fn validate_bin_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(Error::InvalidBinEdges(format!(
            "need at least 2 edges, got {}",
            edges.len()
        )));
    }
    if edges.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(Error::InvalidBinEdges(
            "edges must be strictly ascending".into(),
        ));
    }
    Ok(())
}

/// Checks that quantile levels are ascending and within (0, 1].
///
/// # Errors
/// Returns [`Error::InvalidTimeQuantiles`] otherwise.
pub fn validate_time_quantiles(levels: &[f64]) -> Result<()> {
    if levels.is_empty() {
        return Err(Error::InvalidTimeQuantiles(
            "no quantile levels configured".into(),
        ));
    }
    for &level in levels {
        if !(level > 0.0 && level <= 1.0) {
            return Err(Error::InvalidTimeQuantiles(format!(
                "level {level} outside (0, 1]"
            )));
        }
    }
    if levels.windows(2).any(|pair| pair[1] < pair[0]) {
        return Err(Error::InvalidTimeQuantiles(
            "levels must be ascending".into(),
        ));
    }
    Ok(())
}
