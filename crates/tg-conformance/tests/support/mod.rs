//! Hand-written stand-ins for the generated inference routines whose outputs
//! were recorded in `fixtures/random_forest.json` and `fixtures/xgboost.json`.

#![allow(dead_code)]

use std::path::PathBuf;
use tg_conformance::HarnessConfig;
use tg_core::{Predictor, PredictorRegistry, RANDOM_FOREST, XGBOOST};

/// Three regression trees averaged; splits go left on `<=`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToyRandomForest;

impl Predictor for ToyRandomForest {
    fn predict(&self, x: &[f64]) -> f64 {
        let t1 = if x[0] <= 0.5 {
            if x[1] <= -0.25 { 12.5 } else { 18.75 }
        } else if x[2] <= 1.0 {
            31.0
        } else {
            44.25
        };
        let t2 = if x[1] <= 0.0 {
            if x[3] <= 2.0 { 10.0 } else { 15.5 }
        } else if x[0] <= -1.0 {
            22.0
        } else {
            28.5
        };
        let t3 = if x[2] <= 0.75 {
            14.0
        } else if x[3] <= 0.5 {
            26.0
        } else {
            37.5
        };
        (t1 + t2 + t3) / 3.0
    }
}

/// Boosted sum over a 0.5 base score; splits go left on `<`, column 3 is a
/// category id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToyXgboost;

impl Predictor for ToyXgboost {
    fn predict(&self, x: &[f64]) -> f64 {
        let category = x[3] as i64;
        let t1 = if x[0] < 0.3 {
            if x[1] < -0.5 { -40.0 } else { -12.5 }
        } else if matches!(category, 1 | 3 | 5) {
            25.0
        } else {
            55.0
        };
        let t2 = if x[2] < 0.0 {
            if x[0] < -1.2 { -18.0 } else { -6.5 }
        } else {
            9.25
        };
        let t3 = if matches!(category, 0 | 2) {
            -3.5
        } else if x[1] < 1.1 {
            4.75
        } else {
            13.0
        };
        0.5 + t1 + t2 + t3
    }
}

pub fn bundled_config() -> HarnessConfig {
    HarnessConfig::default_paths()
}

pub fn malformed_root() -> PathBuf {
    bundled_config().fixture_root.join("malformed")
}

pub fn toy_registry() -> PredictorRegistry {
    let mut registry = PredictorRegistry::new();
    registry
        .register(RANDOM_FOREST, ToyRandomForest)
        .expect("fresh registry");
    registry.register(XGBOOST, ToyXgboost).expect("fresh registry");
    registry
}
