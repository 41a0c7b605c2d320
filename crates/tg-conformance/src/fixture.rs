//! Golden fixture format and the loader that turns a named resource into a
//! [`GoldenDataset`].
//!
//! A fixture is a JSON object with exactly two keys, recorded when the model
//! was trained:
//!
//! ```json
//! { "X": [[0.1, 2.0], [1.5, -3.0]], "y_pred": [4.2, 0.7] }
//! ```
//!
//! Row `i` of `X` is paired with `y_pred[i]`; the index is the case id.

use crate::resource::{ResolveError, ResourceResolver};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io;
use tg_core::{DatasetError, GoldenDataset};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFixture {
    #[serde(rename = "X")]
    pub x: Vec<Vec<f64>>,
    pub y_pred: Vec<f64>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fixture resource not found: {name}")]
    ResourceNotFound { name: String },
    #[error("fixture {name} violates the golden format: {detail}")]
    Format { name: String, detail: String },
    #[error("failed to read fixture {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    #[must_use]
    pub fn fixture_name(&self) -> &str {
        match self {
            Self::ResourceNotFound { name } | Self::Format { name, .. } | Self::Io { name, .. } => {
                name
            }
        }
    }
}

impl From<ResolveError> for LoadError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::NotFound { name } => Self::ResourceNotFound { name },
            ResolveError::InvalidEncoding { name, detail } => Self::Format { name, detail },
            ResolveError::Io { name, source } => Self::Io { name, source },
        }
    }
}

/// A parsed fixture together with the digest of the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFixture {
    pub dataset: GoldenDataset,
    pub digest: String,
}

#[derive(Debug, Clone)]
pub struct FixtureLoader<R> {
    resolver: R,
}

impl<R: ResourceResolver> FixtureLoader<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolves `name` and parses it into an ordered dataset.
    ///
    /// Every call reads the resource again; nothing is cached.
    pub fn load(&self, name: &str) -> Result<GoldenDataset, LoadError> {
        self.load_with_digest(name).map(|loaded| loaded.dataset)
    }

    pub fn load_with_digest(&self, name: &str) -> Result<LoadedFixture, LoadError> {
        let text = self.resolver.resolve(name)?;
        let digest = fixture_digest(&text);
        let dataset = parse_fixture(name, &text)?;
        tracing::info!(
            fixture = name,
            samples = dataset.len(),
            feature_width = dataset.feature_width(),
            digest = %digest,
            "loaded golden fixture"
        );
        if !dataset.is_rectangular() {
            tracing::warn!(fixture = name, "fixture rows differ in width");
        }
        Ok(LoadedFixture { dataset, digest })
    }
}

/// Parses and validates fixture text already read from `name`.
pub fn parse_fixture(name: &str, text: &str) -> Result<GoldenDataset, LoadError> {
    let raw = serde_json::from_str::<RawFixture>(text).map_err(|err| LoadError::Format {
        name: name.to_owned(),
        detail: err.to_string(),
    })?;
    GoldenDataset::zip(name, raw.x, raw.y_pred).map_err(|err| match err {
        DatasetError::LengthMismatch { .. } => LoadError::Format {
            name: name.to_owned(),
            detail: err.to_string(),
        },
    })
}

/// SHA-256 of the fixture text, lowercase hex.
#[must_use]
pub fn fixture_digest(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
