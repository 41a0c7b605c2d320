use crate::call::{NumFeaturesFn, PredictFn, invoke_predict, query_num_features};
use crate::error::FfiError;
use std::fmt;
use std::num::NonZeroUsize;
use tg_core::Predictor;

/// A generated native routine bound as a [`Predictor`].
#[derive(Clone)]
pub struct NativePredictor {
    name: String,
    predict_fn: PredictFn,
    num_features: NonZeroUsize,
}

impl NativePredictor {
    /// Binds `predict_fn`, asking `num_features_fn` once for the input width.
    ///
    /// # Safety
    ///
    /// Both routines must honor the crate-level safety contract for as long
    /// as the returned predictor or any clone of it is alive.
    ///
    /// Binding from safe code does not compile:
    ///
    /// ```compile_fail,E0133
    /// use tg_ffi::NativePredictor;
    ///
    /// unsafe extern "C" fn predict(_data: *const f64) -> f64 {
    ///     0.0
    /// }
    /// unsafe extern "C" fn num_features() -> i32 {
    ///     1
    /// }
    ///
    /// let _ = NativePredictor::new("constant", predict, num_features);
    /// ```
    #[allow(unsafe_code)]
    pub unsafe fn new(
        name: impl Into<String>,
        predict_fn: PredictFn,
        num_features_fn: NumFeaturesFn,
    ) -> Result<Self, FfiError> {
        let name = name.into();
        let count = query_num_features(num_features_fn);
        let num_features = usize::try_from(count)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| FfiError::InvalidFeatureCount {
                name: name.clone(),
                count,
            })?;
        tracing::debug!(
            routine = %name,
            num_features = num_features.get(),
            "bound native predictor"
        );
        Ok(Self {
            name,
            predict_fn,
            num_features,
        })
    }

    /// Binds a routine whose generator did not export `get_num_features`.
    ///
    /// # Safety
    ///
    /// `predict_fn` must honor the crate-level safety contract and read at
    /// most `num_features` doubles.
    #[allow(unsafe_code)]
    #[must_use]
    pub unsafe fn with_feature_count(
        name: impl Into<String>,
        predict_fn: PredictFn,
        num_features: NonZeroUsize,
    ) -> Self {
        Self {
            name: name.into(),
            predict_fn,
            num_features,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.num_features.get()
    }

    pub fn try_predict(&self, features: &[f64]) -> Result<f64, FfiError> {
        if features.len() != self.num_features.get() {
            return Err(FfiError::FeatureCountMismatch {
                name: self.name.clone(),
                expected: self.num_features.get(),
                actual: features.len(),
            });
        }
        Ok(invoke_predict(self.predict_fn, features))
    }
}

impl Predictor for NativePredictor {
    /// # Panics
    ///
    /// When `features` does not have the routine's width.
    fn predict(&self, features: &[f64]) -> f64 {
        match self.try_predict(features) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Debug for NativePredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativePredictor")
            .field("name", &self.name)
            .field("num_features", &self.num_features)
            .finish_non_exhaustive()
    }
}
