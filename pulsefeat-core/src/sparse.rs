//! Sparse feature output type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A sparse encoding of a fixed-width dense feature vector.
///
/// `values` and `indices` are parallel vectors; positions not listed are
/// implicitly zero. Each format strategy defines the dense width its
/// indices refer to and which slots are always emitted regardless of
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseFeature {
    /// Values of the emitted bins.
    pub values: Vec<f64>,
    /// Bin indices the values belong to.
    pub indices: Vec<usize>,
}

impl SparseFeature {
    /// Creates an empty sparse feature.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sparse feature with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            indices: Vec::with_capacity(capacity),
        }
    }

    /// Appends one (value, index) pair.
    pub fn push(&mut self, value: f64, index: usize) {
        self.values.push(value);
        self.indices.push(index);
    }

    /// Returns the number of emitted bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no bins were emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over (value, index) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.values.iter().copied().zip(self.indices.iter().copied())
    }

    /// Expands into a dense vector of the given width.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] when an emitted index does not
    /// fit in `width`.
    pub fn to_dense(&self, width: usize) -> Result<Vec<f64>> {
        let mut dense = vec![0.0; width];
        for (value, index) in self.iter() {
            let slot = dense
                .get_mut(index)
                .ok_or(Error::IndexOutOfRange { index, width })?;
            *slot = value;
        }
        Ok(dense)
    }
}
