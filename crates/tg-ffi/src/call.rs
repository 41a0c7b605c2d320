//! The FFI boundary. Every `unsafe` block of the crate lives here, and each
//! one is reached only after the feature count has been checked.

#![allow(unsafe_code)]

/// `double predict(double* data)`
pub type PredictFn = unsafe extern "C" fn(data: *const f64) -> f64;

/// `int get_num_features(void)`
pub type NumFeaturesFn = unsafe extern "C" fn() -> i32;

pub(crate) fn query_num_features(num_features_fn: NumFeaturesFn) -> i32 {
    // SAFETY: the routine takes no arguments and touches no caller memory.
    unsafe { num_features_fn() }
}

/// Calls `predict_fn` on `features`, which the caller has already checked
/// holds exactly the routine's feature count.
pub(crate) fn invoke_predict(predict_fn: PredictFn, features: &[f64]) -> f64 {
    // SAFETY: `features` is a live, initialized slice of the length the
    // routine reads, and the contract forbids writes through or retention
    // of the pointer.
    unsafe { predict_fn(features.as_ptr()) }
}
