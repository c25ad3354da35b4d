//! Pulse series and time-offset types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One sensor's pulses for one event, stored as parallel charge and
/// time vectors.
///
/// Construction enforces equal, non-zero lengths; an empty series is a
/// precondition violation, not a valid zero-feature case. Times are
/// relative arrival times. Callers are expected to supply them in
/// ascending order, but this is not enforced: the quantile strategy
/// deliberately consumes pulses in their given order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseSeries {
    charges: Vec<f64>,
    times: Vec<f64>,
}

impl PulseSeries {
    /// Creates a pulse series from parallel charge and time vectors.
    ///
    /// # Errors
    /// Returns [`Error::ChargeTimeMismatch`] when the vectors differ in
    /// length and [`Error::EmptyPulseSeries`] when both are empty.
    pub fn new(charges: Vec<f64>, times: Vec<f64>) -> Result<Self> {
        if charges.len() != times.len() {
            return Err(Error::ChargeTimeMismatch {
                charges: charges.len(),
                times: times.len(),
            });
        }
        if charges.is_empty() {
            return Err(Error::EmptyPulseSeries);
        }
        Ok(Self { charges, times })
    }

    /// Returns the pulse charges.
    #[inline]
    #[must_use]
    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    /// Returns the relative pulse arrival times.
    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the number of pulses.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.charges.len()
    }

    /// Always false: construction rejects empty series.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Returns the total charge over all pulses.
    #[must_use]
    pub fn total_charge(&self) -> f64 {
        self.charges.iter().sum()
    }

    /// Returns the arrival time of the first pulse.
    #[inline]
    #[must_use]
    pub fn first_time(&self) -> f64 {
        self.times[0]
    }

    /// Returns the arrival time of the last pulse.
    #[inline]
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}

/// Additive time corrections applied before relative times become
/// absolute.
///
/// The global offset is shared by every sensor in an event; the local
/// offset is per sensor. Some format strategies report these as
/// features, others ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeOffsets {
    /// Offset shared across all sensors in the event.
    pub global: f64,
    /// Per-sensor offset.
    pub local: f64,
}

impl TimeOffsets {
    /// Creates a new offset pair.
    #[inline]
    #[must_use]
    pub fn new(global: f64, local: f64) -> Self {
        Self { global, local }
    }

    /// Returns the combined offset.
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.global + self.local
    }
}
