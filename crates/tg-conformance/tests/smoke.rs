use tg_conformance::HarnessConfig;
use tg_core::{RANDOM_FOREST, XGBOOST, fixture_name_for};

#[test]
fn bundled_fixtures_exist_for_every_variant() {
    let cfg = HarnessConfig::default_paths();
    for variant in [RANDOM_FOREST, XGBOOST] {
        let path = cfg.fixture_root.join(fixture_name_for(variant));
        assert!(path.is_file(), "{} should exist", path.display());
    }
}
