//! Golden samples and the immutable dataset they are loaded into.

use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::sync::Arc;
use thiserror::Error;

/// One `(features, expected)` pair recorded when the model was trained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenSample {
    pub features: Vec<f64>,
    pub expected: f64,
}

impl GoldenSample {
    #[must_use]
    pub fn new(features: Vec<f64>, expected: f64) -> Self {
        Self { features, expected }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("feature matrix has {rows} rows but target vector has {targets} entries")]
    LengthMismatch { rows: usize, targets: usize },
}

/// Ordered, read-only collection of golden samples. Clones share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct GoldenDataset {
    name: Arc<str>,
    samples: Arc<[GoldenSample]>,
}

impl GoldenDataset {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, samples: Vec<GoldenSample>) -> Self {
        Self {
            name: name.into(),
            samples: samples.into(),
        }
    }

    /// Pairs `rows[i]` with `targets[i]` in order. Lengths must agree.
    pub fn zip(
        name: impl Into<Arc<str>>,
        rows: Vec<Vec<f64>>,
        targets: Vec<f64>,
    ) -> Result<Self, DatasetError> {
        if rows.len() != targets.len() {
            return Err(DatasetError::LengthMismatch {
                rows: rows.len(),
                targets: targets.len(),
            });
        }

        let samples = rows
            .into_iter()
            .zip(targets)
            .map(|(features, expected)| GoldenSample { features, expected })
            .collect::<Vec<_>>();
        Ok(Self::new(name, samples))
    }

    /// Name of the fixture this dataset was loaded from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GoldenSample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GoldenSample> {
        self.samples.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[GoldenSample] {
        &self.samples
    }

    /// Width of the first row, or `None` for an empty dataset.
    #[must_use]
    pub fn feature_width(&self) -> Option<usize> {
        self.samples.first().map(|sample| sample.features.len())
    }

    /// Whether every row has the same width as the first one.
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        match self.feature_width() {
            Some(width) => self.samples.iter().all(|s| s.features.len() == width),
            None => true,
        }
    }
}

impl Index<usize> for GoldenDataset {
    type Output = GoldenSample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a GoldenDataset {
    type Item = &'a GoldenSample;
    type IntoIter = std::slice::Iter<'a, GoldenSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
