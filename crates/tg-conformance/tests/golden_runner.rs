#![forbid(unsafe_code)]

mod support;

use tg_conformance::{
    CaseOutcome, EmbeddedResolver, FixtureLoader, LoadError, RunnerConfig, assert_suite_passed,
    prepare_suite, run_named_suite,
};
use tg_core::{GOLDEN_TOLERANCE, from_fn};

fn pair_loader() -> FixtureLoader<EmbeddedResolver> {
    FixtureLoader::new(EmbeddedResolver::new().with_resource(
        "pair.json",
        r#"{"X": [[1.0, 2.0], [3.0, 4.0]], "y_pred": [5.0, 7.0]}"#,
    ))
}

#[test]
fn exact_predictor_passes_every_case() {
    let predictor = from_fn(|x: &[f64]| 4.0 * x[1] - 3.0 * x[0]);
    let report = run_named_suite(&pair_loader(), "pair.json", &predictor).expect("setup");
    assert_eq!(report.total_cases, 2);
    assert_eq!(report.passed_cases, 2);
    assert_eq!(
        report.cases.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["0", "1"]
    );
    assert_suite_passed(&report);
}

#[test]
fn drift_inside_tolerance_passes() {
    let predictor = from_fn(|x: &[f64]| if x[0] < 2.0 { 5.009 } else { 6.995 });
    let report = run_named_suite(&pair_loader(), "pair.json", &predictor).expect("setup");
    assert!(report.all_passed());
}

#[test]
fn out_of_tolerance_fails_only_that_case() {
    let predictor = from_fn(|x: &[f64]| if x[0] < 2.0 { 5.0 } else { 7.5 });
    let report = run_named_suite(&pair_loader(), "pair.json", &predictor).expect("setup");

    assert_eq!(report.failed_case_ids(), vec!["1".to_owned()]);
    assert!(report.case("0").expect("case 0").passed());

    let mismatch = report
        .case("1")
        .and_then(|case| case.mismatch())
        .expect("case 1 mismatch");
    assert_eq!(mismatch.index, 1);
    assert_eq!(mismatch.expected, 7.0);
    assert_eq!(mismatch.actual, 7.5);
    assert_eq!(mismatch.abs_diff, 0.5);
    assert_eq!(mismatch.tolerance, GOLDEN_TOLERANCE);
}

#[test]
#[should_panic(expected = "[1]")]
fn assert_suite_passed_names_failing_case() {
    let predictor = from_fn(|x: &[f64]| if x[0] < 2.0 { 5.0 } else { 0.0 });
    let report = run_named_suite(&pair_loader(), "pair.json", &predictor).expect("setup");
    assert_suite_passed(&report);
}

#[test]
fn panicking_predictor_is_isolated_per_case() {
    let predictor = from_fn(|x: &[f64]| {
        assert!(x[0] < 2.0, "routine rejected row");
        5.0
    });
    let report = run_named_suite(&pair_loader(), "pair.json", &predictor).expect("setup");

    let first = report.case("0").expect("case 0");
    assert!(first.passed());
    let second = report.case("1").expect("case 1");
    assert_eq!(second.outcome, CaseOutcome::Panicked);
    assert_eq!(second.actual, None);
    assert!(
        second
            .detail
            .as_deref()
            .is_some_and(|detail| detail.contains("routine rejected row"))
    );
}

#[test]
fn missing_fixture_fails_setup_without_cases() {
    let predictor = from_fn(|_: &[f64]| -> f64 { unreachable!("no case may run") });
    let failure =
        run_named_suite(&pair_loader(), "random_forest.json", &predictor).expect_err("absent");
    assert_eq!(failure.fixture, "random_forest.json");
    assert!(matches!(failure.source, LoadError::ResourceNotFound { .. }));
}

#[test]
fn malformed_fixture_fails_setup_with_format_error() {
    let loader = FixtureLoader::new(
        EmbeddedResolver::new().with_resource("bad.json", r#"{"X": [[1.0]], "y_pred": []}"#),
    );
    let failure = prepare_suite(&loader, "bad.json").expect_err("length mismatch");
    assert!(matches!(failure.source, LoadError::Format { .. }));
    assert!(failure.to_string().contains("bad.json"));
}

#[test]
fn empty_fixture_produces_zero_cases() {
    let suite = prepare_suite(&support::bundled_config().loader(), "empty.json").expect("setup");
    assert!(suite.is_empty());
    assert_eq!(suite.cases().count(), 0);

    let report = suite.run(&from_fn(|_: &[f64]| 0.0));
    assert_eq!(report.total_cases, 0);
    assert!(report.all_passed());
}

#[test]
fn case_enumeration_restarts_from_the_first_sample() {
    let suite = prepare_suite(&support::bundled_config().loader(), "random_forest.json")
        .expect("setup");
    let first: Vec<_> = suite.cases().take(3).map(|case| case.index()).collect();
    let full: Vec<_> = suite.cases().map(|case| case.index()).collect();
    assert_eq!(first, vec![0, 1, 2]);
    assert_eq!(full, (0..suite.len()).collect::<Vec<_>>());
    assert_eq!(suite.cases().len(), suite.len());
}

#[test]
fn parallel_run_matches_sequential_run() {
    let suite =
        prepare_suite(&support::bundled_config().loader(), "xgboost.json").expect("setup");
    let predictor = support::ToyXgboost;
    let sequential = suite.run(&predictor);
    for workers in [1, 2, 3, 64] {
        let parallel = suite.run_parallel(&predictor, &RunnerConfig::with_workers(workers));
        assert_eq!(parallel, sequential, "workers={workers}");
    }
}

#[test]
fn suite_report_carries_fixture_digest() {
    let cfg = support::bundled_config();
    let suite = prepare_suite(&cfg.loader(), "smoke_pair.json").expect("setup");
    let report = suite.run(&from_fn(|x: &[f64]| 4.0 * x[1] - 3.0 * x[0]));
    let text = std::fs::read_to_string(cfg.fixture_root.join("smoke_pair.json")).expect("read");
    assert_eq!(
        report.fixture_digest.as_deref(),
        Some(tg_conformance::fixture_digest(&text).as_str())
    );
    assert_eq!(report.fixture, "smoke_pair.json");
}
