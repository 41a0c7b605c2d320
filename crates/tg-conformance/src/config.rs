use crate::fixture::FixtureLoader;
use crate::resource::DirectoryResolver;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub fixture_root: PathBuf,
}

impl HarnessConfig {
    /// Fixtures bundled with this crate, under `fixtures/`.
    #[must_use]
    pub fn default_paths() -> Self {
        Self {
            fixture_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures"),
        }
    }

    #[must_use]
    pub fn with_fixture_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.fixture_root = root.into();
        self
    }

    #[must_use]
    pub fn loader(&self) -> FixtureLoader<DirectoryResolver> {
        FixtureLoader::new(DirectoryResolver::new(&self.fixture_root))
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::default_paths()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub workers: NonZeroUsize,
}

impl RunnerConfig {
    #[must_use]
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HarnessConfig, RunnerConfig};

    #[test]
    fn default_fixture_root_is_crate_local() {
        let cfg = HarnessConfig::default_paths();
        assert!(cfg.fixture_root.ends_with("fixtures"));
        assert!(cfg.fixture_root.exists(), "bundled fixtures should exist");
    }

    #[test]
    fn fixture_root_override() {
        let cfg = HarnessConfig::default().with_fixture_root("/tmp/elsewhere");
        assert_eq!(cfg.fixture_root, std::path::PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn zero_workers_clamps_to_one() {
        assert_eq!(RunnerConfig::with_workers(0).workers.get(), 1);
        assert_eq!(RunnerConfig::with_workers(4).workers.get(), 4);
        assert!(RunnerConfig::default().workers.get() >= 1);
    }
}
