//! Wiring from ensemble variant names to predictor implementations.
//!
//! The harness never enumerates variants itself; a test driver registers the
//! routines it links against and looks them up by name.

use crate::predictor::{Predictor, SharedPredictor};
use std::sync::Arc;
use thiserror::Error;

/// Variant name for generated random-forest routines.
pub const RANDOM_FOREST: &str = "random_forest";

/// Variant name for generated xgboost routines.
pub const XGBOOST: &str = "xgboost";

/// Conventional fixture resource recorded for a variant at training time.
#[must_use]
pub fn fixture_name_for(variant: &str) -> String {
    format!("{variant}.json")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("predictor variant `{name}` is already registered")]
    DuplicateVariant { name: String },
    #[error("no predictor registered for variant `{name}` (available: {})", available.join(", "))]
    UnknownVariant {
        name: String,
        available: Vec<String>,
    },
}

/// Name-keyed set of predictors, iterated in registration order.
#[derive(Default)]
pub struct PredictorRegistry {
    entries: Vec<(String, SharedPredictor)>,
}

impl PredictorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register<P>(&mut self, name: &str, predictor: P) -> Result<(), RegistryError>
    where
        P: Predictor + Send + Sync + 'static,
    {
        self.register_shared(name, Arc::new(predictor))
    }

    pub fn register_shared(
        &mut self,
        name: &str,
        predictor: SharedPredictor,
    ) -> Result<(), RegistryError> {
        if self.contains(name) {
            return Err(RegistryError::DuplicateVariant {
                name: name.to_owned(),
            });
        }
        tracing::debug!(variant = name, "registered predictor");
        self.entries.push((name.to_owned(), predictor));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<SharedPredictor, RegistryError> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, predictor)| Arc::clone(predictor))
            .ok_or_else(|| RegistryError::UnknownVariant {
                name: name.to_owned(),
                available: self.variants().map(str::to_owned).collect(),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry, _)| entry == name)
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedPredictor)> {
        self.entries
            .iter()
            .map(|(name, predictor)| (name.as_str(), predictor))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PredictorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictorRegistry")
            .field("variants", &self.variants().collect::<Vec<_>>())
            .finish()
    }
}
