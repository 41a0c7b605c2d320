use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FfiError {
    #[error("native routine {name} reports {count} features; expected at least one")]
    InvalidFeatureCount { name: String, count: i32 },
    #[error("native routine {name} takes {expected} features, got {actual}")]
    FeatureCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}
