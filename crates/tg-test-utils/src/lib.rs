#![forbid(unsafe_code)]

//! Shared helpers for treegold test suites: a structured per-test log record,
//! content digests for fixtures, and property-test sizing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_LOG_SCHEMA_VERSION: &str = "treegold.test-log.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestScope {
    Unit,
    Property,
    Golden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestLogEnv {
    pub os: String,
    pub arch: String,
    pub crate_version: String,
    pub timestamp_unix_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestLogV1 {
    pub schema_version: String,
    pub test_id: String,
    pub fixture_id: String,
    pub seed: Option<u64>,
    pub scope: TestScope,
    pub env: TestLogEnv,
    pub result: TestResult,
    pub case_count: usize,
    pub failed_case_ids: Vec<String>,
    pub duration_ms: u64,
    pub details: Option<String>,
}

impl TestLogV1 {
    #[must_use]
    pub fn new(
        test_id: impl Into<String>,
        fixture_id: impl Into<String>,
        scope: TestScope,
        result: TestResult,
    ) -> Self {
        Self {
            schema_version: TEST_LOG_SCHEMA_VERSION.to_owned(),
            test_id: test_id.into(),
            fixture_id: fixture_id.into(),
            seed: capture_proptest_seed(),
            scope,
            env: capture_env(),
            result,
            case_count: 0,
            failed_case_ids: Vec::new(),
            duration_ms: 0,
            details: None,
        }
    }

    /// Records the outcome of a golden run: the result flips to `Fail` as soon
    /// as one case id is reported as failing.
    #[must_use]
    pub fn with_cases(mut self, case_count: usize, failed_case_ids: Vec<String>) -> Self {
        if !failed_case_ids.is_empty() {
            self.result = TestResult::Fail;
        }
        self.case_count = case_count;
        self.failed_case_ids = failed_case_ids;
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn write_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| format!("log dir create failed: {err}"))?;
        }
        let payload = serde_json::to_string_pretty(self)
            .map_err(|err| format!("log serialize failed: {err}"))?;
        fs::write(path, payload).map_err(|err| format!("log write failed: {err}"))
    }
}

#[must_use]
pub fn capture_env() -> TestLogEnv {
    TestLogEnv {
        os: std::env::consts::OS.to_owned(),
        arch: std::env::consts::ARCH.to_owned(),
        crate_version: env!("CARGO_PKG_VERSION").to_owned(),
        timestamp_unix_ms: now_unix_ms_u64(),
    }
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[must_use]
pub fn property_test_case_count() -> u32 {
    if let Ok(raw) = std::env::var("TG_PROPTEST_CASES")
        && let Ok(parsed) = raw.parse::<u32>()
        && parsed > 0
    {
        return parsed;
    }

    if std::env::var_os("CI").is_some() {
        1024
    } else {
        256
    }
}

#[must_use]
pub fn capture_proptest_seed() -> Option<u64> {
    if let Ok(raw) = std::env::var("TG_PROPTEST_SEED")
        && let Ok(seed) = raw.parse::<u64>()
    {
        return Some(seed);
    }

    if let Ok(raw) = std::env::var("PROPTEST_RNG_SEED")
        && let Ok(seed) = raw.parse::<u64>()
    {
        return Some(seed);
    }

    None
}

#[must_use]
pub fn test_id(module_path: &str, test_name: &str) -> String {
    format!("{module_path}::{test_name}")
}

fn now_unix_ms_u64() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{
        TEST_LOG_SCHEMA_VERSION, TestLogV1, TestResult, TestScope, property_test_case_count,
        sha256_hex, test_id,
    };
    use tempfile::tempdir;

    #[test]
    fn sha256_of_empty_input_is_known_constant() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn property_case_count_has_default_floor() {
        assert!(property_test_case_count() >= 1);
    }

    #[test]
    fn failed_case_ids_flip_result_to_fail() {
        let log = TestLogV1::new("suite::golden", "fixture", TestScope::Golden, TestResult::Pass)
            .with_cases(3, vec!["1".to_owned()]);
        assert_eq!(log.result, TestResult::Fail);
        assert_eq!(log.case_count, 3);

        let clean = TestLogV1::new("suite::golden", "fixture", TestScope::Golden, TestResult::Pass)
            .with_cases(3, Vec::new());
        assert_eq!(clean.result, TestResult::Pass);
    }

    #[test]
    fn log_round_trips_through_disk() {
        let dir = tempdir().expect("tempdir should build");
        let path = dir.path().join("logs").join("case.json");
        let log = TestLogV1::new(
            test_id(module_path!(), "log_round_trips_through_disk"),
            "fixture-id",
            TestScope::Unit,
            TestResult::Pass,
        )
        .with_details("ok");
        log.write_to(&path).expect("log should write");

        let raw = std::fs::read_to_string(&path).expect("log should read back");
        let decoded: TestLogV1 = serde_json::from_str(&raw).expect("log should parse");
        assert_eq!(decoded.schema_version, TEST_LOG_SCHEMA_VERSION);
        assert_eq!(decoded.details.as_deref(), Some("ok"));
    }
}
