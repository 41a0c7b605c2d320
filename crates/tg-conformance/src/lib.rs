#![forbid(unsafe_code)]

//! Golden regression suites for generated tree-ensemble predictors.
//!
//! Setup loads one named fixture into an immutable [`tg_core::GoldenDataset`];
//! the suite then yields one independently reported case per sample, each
//! comparing a bound [`tg_core::Predictor`] against the recorded prediction.
//!
//! ```
//! use tg_conformance::{EmbeddedResolver, FixtureLoader, run_named_suite};
//! use tg_core::from_fn;
//!
//! let loader = FixtureLoader::new(EmbeddedResolver::new().with_resource(
//!     "pair.json",
//!     r#"{"X": [[1.0, 2.0], [3.0, 4.0]], "y_pred": [5.0, 7.0]}"#,
//! ));
//! let predictor = from_fn(|x: &[f64]| 4.0 * x[1] - 3.0 * x[0]);
//! let report = run_named_suite(&loader, "pair.json", &predictor).expect("fixture loads");
//! assert_eq!(report.total_cases, 2);
//! assert!(report.all_passed());
//! ```

pub mod config;
pub mod fixture;
pub mod report;
pub mod resource;
pub mod runner;

pub use config::{HarnessConfig, RunnerConfig};
pub use fixture::{
    FixtureLoader, LoadError, LoadedFixture, RawFixture, fixture_digest, parse_fixture,
};
pub use report::{emit_report_json, emit_report_markdown};
pub use resource::{DirectoryResolver, EmbeddedResolver, ResolveError, ResourceResolver};
pub use runner::{
    CaseOutcome, CaseReport, GoldenCase, GoldenCases, GoldenSuite, PredictionMismatch,
    SUITE_REPORT_SCHEMA_VERSION, SetupFailure, SuiteReport, VariantRun, assert_suite_passed,
    prepare_suite, run_named_suite, run_registered_suites,
};
