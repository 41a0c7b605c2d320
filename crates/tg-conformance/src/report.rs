use crate::runner::SuiteReport;

pub fn emit_report_json(report: &SuiteReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Summary table followed by one row per failing case. Passing cases are
/// only counted, never listed.
#[must_use]
pub fn emit_report_markdown(report: &SuiteReport) -> String {
    let mut out = String::new();
    out.push_str("# Golden Suite Report\n\n");
    out.push_str("| Metric | Value |\n");
    out.push_str("|---|---|\n");
    out.push_str(&format!("| Schema | `{}` |\n", report.schema_version));
    out.push_str(&format!("| Fixture | `{}` |\n", report.fixture));
    if let Some(digest) = &report.fixture_digest {
        out.push_str(&format!("| Fixture SHA-256 | `{digest}` |\n"));
    }
    out.push_str(&format!("| Tolerance | {} |\n", report.tolerance));
    out.push_str(&format!("| Total Cases | {} |\n", report.total_cases));
    out.push_str(&format!("| Passed Cases | {} |\n", report.passed_cases));
    out.push_str(&format!("| Failed Cases | {} |\n\n", report.failed_cases));

    if report.all_passed() {
        out.push_str("All cases reproduce the recorded predictions.\n");
        return out;
    }

    out.push_str("| Case | Outcome | Expected | Actual | Abs Diff |\n");
    out.push_str("|---|---|---|---|---|\n");
    for case in report.failures() {
        out.push_str(&format!(
            "| {} | {:?} | {} | {} | {} |\n",
            case.id,
            case.outcome,
            case.expected,
            case.actual.map_or_else(|| "-".to_owned(), |v| v.to_string()),
            case.abs_diff.map_or_else(|| "-".to_owned(), |v| v.to_string()),
        ));
    }

    out
}
