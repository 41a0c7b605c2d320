#![forbid(unsafe_code)]

//! Core model of the treegold harness: golden samples recorded when a tree
//! ensemble was trained, and the [`Predictor`] capability through which the
//! generated inference routines are checked against them.

pub mod dataset;
pub mod predictor;
pub mod registry;

pub use dataset::{DatasetError, GoldenDataset, GoldenSample};
pub use predictor::{Predictor, PredictorFn, SharedPredictor, from_fn};
pub use registry::{PredictorRegistry, RANDOM_FOREST, RegistryError, XGBOOST, fixture_name_for};

/// Largest absolute difference between a generated routine's output and the
/// recorded prediction for which a golden sample still passes.
pub const GOLDEN_TOLERANCE: f64 = 0.01;

/// Whether `actual` reproduces `expected` within [`GOLDEN_TOLERANCE`].
///
/// NaN on either side never matches.
#[must_use]
pub fn within_tolerance(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= GOLDEN_TOLERANCE
}
