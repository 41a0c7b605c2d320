//! The single capability every generated ensemble routine is consumed through.

use std::sync::Arc;

/// A generated inference routine: one feature vector in, one scalar out.
///
/// Implementations must be deterministic for a fixed input and free of
/// observable side effects. The harness evaluates the same dataset against a
/// predictor many times and, in parallel runs, from several threads at once
/// (which additionally requires `Sync`).
pub trait Predictor {
    fn predict(&self, features: &[f64]) -> f64;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, features: &[f64]) -> f64 {
        (**self).predict(features)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, features: &[f64]) -> f64 {
        (**self).predict(features)
    }
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, features: &[f64]) -> f64 {
        (**self).predict(features)
    }
}

/// Adapts a plain closure into a [`Predictor`].
///
/// ```
/// use tg_core::{Predictor, from_fn};
///
/// let sum = from_fn(|features: &[f64]| features.iter().sum::<f64>());
/// assert_eq!(sum.predict(&[1.0, 2.0]), 3.0);
/// ```
#[derive(Clone, Copy)]
pub struct PredictorFn<F>(F);

pub fn from_fn<F>(func: F) -> PredictorFn<F>
where
    F: Fn(&[f64]) -> f64,
{
    PredictorFn(func)
}

impl<F> Predictor for PredictorFn<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn predict(&self, features: &[f64]) -> f64 {
        (self.0)(features)
    }
}

impl<F> std::fmt::Debug for PredictorFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictorFn").finish_non_exhaustive()
    }
}

/// Shared, thread-safe predictor handle as stored by the registry.
pub type SharedPredictor = Arc<dyn Predictor + Send + Sync>;
