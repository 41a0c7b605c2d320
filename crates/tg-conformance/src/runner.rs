//! Per-sample golden suites.
//!
//! A [`GoldenSuite`] owns one loaded dataset and hands out one [`GoldenCase`]
//! per sample, lazily and in index order. Each case runs on its own: a
//! mismatch or a panicking predictor fails that case and nothing else.

use crate::config::RunnerConfig;
use crate::fixture::{FixtureLoader, LoadError};
use crate::resource::ResourceResolver;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::iter::{Enumerate, FusedIterator};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tg_core::{
    GOLDEN_TOLERANCE, GoldenDataset, GoldenSample, Predictor, PredictorRegistry, fixture_name_for,
    within_tolerance,
};
use thiserror::Error;

pub const SUITE_REPORT_SCHEMA_VERSION: &str = "treegold.golden-suite-report.v1";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Error)]
#[error(
    "sample {index}: predicted {actual}, expected {expected} (|diff| {abs_diff} > tolerance {tolerance})"
)]
pub struct PredictionMismatch {
    pub index: usize,
    pub expected: f64,
    pub actual: f64,
    pub abs_diff: f64,
    pub tolerance: f64,
}

/// The suite could not be set up; no case was generated.
#[derive(Debug, Error)]
#[error("golden suite setup failed for fixture {fixture}: {source}")]
pub struct SetupFailure {
    pub fixture: String,
    #[source]
    pub source: LoadError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseOutcome {
    Pass,
    Mismatch,
    Panicked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub id: String,
    pub index: usize,
    pub expected: f64,
    pub actual: Option<f64>,
    pub abs_diff: Option<f64>,
    pub tolerance: f64,
    pub outcome: CaseOutcome,
    pub detail: Option<String>,
}

impl CaseReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == CaseOutcome::Pass
    }

    /// The mismatch this case recorded, if the predictor returned a value
    /// outside tolerance.
    #[must_use]
    pub fn mismatch(&self) -> Option<PredictionMismatch> {
        match (self.outcome, self.actual, self.abs_diff) {
            (CaseOutcome::Mismatch, Some(actual), Some(abs_diff)) => Some(PredictionMismatch {
                index: self.index,
                expected: self.expected,
                actual,
                abs_diff,
                tolerance: self.tolerance,
            }),
            _ => None,
        }
    }
}

/// One golden sample bound to its stable id (the stringified index).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldenCase<'a> {
    index: usize,
    sample: &'a GoldenSample,
}

impl<'a> GoldenCase<'a> {
    #[must_use]
    pub fn id(&self) -> String {
        self.index.to_string()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn features(&self) -> &'a [f64] {
        &self.sample.features
    }

    #[must_use]
    pub fn expected(&self) -> f64 {
        self.sample.expected
    }

    /// Invokes the predictor once and compares against the recorded value.
    pub fn run<P: Predictor + ?Sized>(&self, predictor: &P) -> CaseReport {
        let expected = self.expected();
        let features = self.features();
        let outcome = catch_unwind(AssertUnwindSafe(|| predictor.predict(features)));

        let report = match outcome {
            Ok(actual) => {
                let abs_diff = (actual - expected).abs();
                let matched = within_tolerance(actual, expected);
                let detail = (!matched).then(|| {
                    PredictionMismatch {
                        index: self.index,
                        expected,
                        actual,
                        abs_diff,
                        tolerance: GOLDEN_TOLERANCE,
                    }
                    .to_string()
                });
                CaseReport {
                    id: self.id(),
                    index: self.index,
                    expected,
                    actual: Some(actual),
                    abs_diff: Some(abs_diff),
                    tolerance: GOLDEN_TOLERANCE,
                    outcome: if matched {
                        CaseOutcome::Pass
                    } else {
                        CaseOutcome::Mismatch
                    },
                    detail,
                }
            }
            Err(payload) => CaseReport {
                id: self.id(),
                index: self.index,
                expected,
                actual: None,
                abs_diff: None,
                tolerance: GOLDEN_TOLERANCE,
                outcome: CaseOutcome::Panicked,
                detail: Some(format!(
                    "predictor panicked: {}",
                    panic_payload_to_string(payload.as_ref())
                )),
            },
        };

        match report.outcome {
            CaseOutcome::Pass => tracing::debug!(case = %report.id, "golden case passed"),
            CaseOutcome::Mismatch | CaseOutcome::Panicked => tracing::warn!(
                case = %report.id,
                outcome = ?report.outcome,
                detail = report.detail.as_deref().unwrap_or_default(),
                "golden case failed"
            ),
        }
        report
    }
}

/// Lazy, finite sequence of cases over a dataset, in index order.
#[derive(Debug, Clone)]
pub struct GoldenCases<'a> {
    inner: Enumerate<std::slice::Iter<'a, GoldenSample>>,
}

impl<'a> Iterator for GoldenCases<'a> {
    type Item = GoldenCase<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, sample)| GoldenCase { index, sample })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for GoldenCases<'_> {}

impl FusedIterator for GoldenCases<'_> {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub schema_version: String,
    pub fixture: String,
    pub fixture_digest: Option<String>,
    pub tolerance: f64,
    pub total_cases: usize,
    pub passed_cases: usize,
    pub failed_cases: usize,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    #[must_use]
    pub fn from_cases(
        fixture: impl Into<String>,
        fixture_digest: Option<String>,
        cases: Vec<CaseReport>,
    ) -> Self {
        let passed_cases = cases.iter().filter(|case| case.passed()).count();
        Self {
            schema_version: SUITE_REPORT_SCHEMA_VERSION.to_owned(),
            fixture: fixture.into(),
            fixture_digest,
            tolerance: GOLDEN_TOLERANCE,
            total_cases: cases.len(),
            passed_cases,
            failed_cases: cases.len().saturating_sub(passed_cases),
            cases,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_cases == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|case| !case.passed())
    }

    #[must_use]
    pub fn failed_case_ids(&self) -> Vec<String> {
        self.failures().map(|case| case.id.clone()).collect()
    }

    #[must_use]
    pub fn case(&self, id: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|case| case.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoldenSuite {
    dataset: GoldenDataset,
    digest: Option<String>,
}

impl GoldenSuite {
    #[must_use]
    pub fn new(dataset: GoldenDataset) -> Self {
        Self {
            dataset,
            digest: None,
        }
    }

    #[must_use]
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    #[must_use]
    pub fn dataset(&self) -> &GoldenDataset {
        &self.dataset
    }

    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// A fresh pass over the cases; calling it again restarts from index 0.
    #[must_use]
    pub fn cases(&self) -> GoldenCases<'_> {
        GoldenCases {
            inner: self.dataset.iter().enumerate(),
        }
    }

    pub fn run<P: Predictor + ?Sized>(&self, predictor: &P) -> SuiteReport {
        let cases = self.cases().map(|case| case.run(predictor)).collect();
        self.finish(cases)
    }

    /// Runs the cases on `config.workers` scoped threads over contiguous index
    /// ranges. The report is in index order and equal to [`Self::run`]'s.
    pub fn run_parallel<P>(&self, predictor: &P, config: &RunnerConfig) -> SuiteReport
    where
        P: Predictor + Sync + ?Sized,
    {
        let samples = self.dataset.as_slice();
        let workers = config.workers.get().min(samples.len()).max(1);
        let chunk_len = samples.len().div_ceil(workers).max(1);

        let cases = std::thread::scope(|scope| {
            let handles = samples
                .chunks(chunk_len)
                .enumerate()
                .map(|(chunk_idx, chunk)| {
                    let offset = chunk_idx * chunk_len;
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .enumerate()
                            .map(|(i, sample)| {
                                GoldenCase {
                                    index: offset + i,
                                    sample,
                                }
                                .run(predictor)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect::<Vec<_>>();

            let mut cases = Vec::with_capacity(samples.len());
            for handle in handles {
                match handle.join() {
                    Ok(chunk_reports) => cases.extend(chunk_reports),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
            cases
        });

        self.finish(cases)
    }

    fn finish(&self, cases: Vec<CaseReport>) -> SuiteReport {
        let report = SuiteReport::from_cases(self.dataset.name(), self.digest.clone(), cases);
        tracing::info!(
            fixture = %report.fixture,
            total = report.total_cases,
            passed = report.passed_cases,
            failed = report.failed_cases,
            "golden suite finished"
        );
        report
    }
}

/// Setup step: loads `fixture` once and wraps it in a suite.
pub fn prepare_suite<R: ResourceResolver>(
    loader: &FixtureLoader<R>,
    fixture: &str,
) -> Result<GoldenSuite, SetupFailure> {
    match loader.load_with_digest(fixture) {
        Ok(loaded) => Ok(GoldenSuite::new(loaded.dataset).with_digest(loaded.digest)),
        Err(source) => {
            tracing::error!(fixture, error = %source, "golden suite setup failed");
            Err(SetupFailure {
                fixture: fixture.to_owned(),
                source,
            })
        }
    }
}

pub fn run_named_suite<R, P>(
    loader: &FixtureLoader<R>,
    fixture: &str,
    predictor: &P,
) -> Result<SuiteReport, SetupFailure>
where
    R: ResourceResolver,
    P: Predictor + ?Sized,
{
    prepare_suite(loader, fixture).map(|suite| suite.run(predictor))
}

#[derive(Debug)]
pub struct VariantRun {
    pub variant: String,
    pub fixture: String,
    pub result: Result<SuiteReport, SetupFailure>,
}

impl VariantRun {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.as_ref().is_ok_and(SuiteReport::all_passed)
    }
}

/// Runs every registered variant against its conventional fixture
/// (`<variant>.json`). One variant's setup failure does not stop the others.
pub fn run_registered_suites<R: ResourceResolver>(
    loader: &FixtureLoader<R>,
    registry: &PredictorRegistry,
) -> Vec<VariantRun> {
    registry
        .iter()
        .map(|(variant, predictor)| {
            let fixture = fixture_name_for(variant);
            let result = run_named_suite(loader, &fixture, predictor.as_ref());
            VariantRun {
                variant: variant.to_owned(),
                fixture,
                result,
            }
        })
        .collect()
}

/// Panics with every failing case id when `report` has failures.
///
/// # Panics
///
/// When at least one case did not pass.
pub fn assert_suite_passed(report: &SuiteReport) {
    if report.all_passed() {
        return;
    }
    let details = report
        .failures()
        .map(|case| {
            format!(
                "  [{}] {}",
                case.id,
                case.detail.as_deref().unwrap_or("failed")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "golden suite {} failed {}/{} cases:\n{details}",
        report.fixture, report.failed_cases, report.total_cases
    );
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return (*msg).to_owned();
    }
    "non-string panic payload".to_owned()
}
