//! Shared test utilities for recipe_seed tests.
//!
//! This module provides common test infrastructure including:
//! - A harness bundling an in-memory store with a seeder
//! - JSON assertion helpers
//! - Shape checks over raw BSON documents

#![allow(dead_code)]

use recipe_seed::dataset::Dataset;
use recipe_seed::seed::{SeedPlan, SeedReport, Seeder};
use recipe_seed::store::MemoryStore;
use serde_json::Value;

/// Test harness that pairs a seeder with a handle on its store.
pub struct TestHarness {
    pub store: MemoryStore,
    pub seeder: Seeder<MemoryStore>,
}

impl TestHarness {
    /// Empty database named `app`.
    pub fn new() -> Self {
        Self::with_database("app")
    }

    pub fn with_database(name: &str) -> Self {
        let store = MemoryStore::new(name);
        Self {
            seeder: Seeder::new(store.clone()),
            store,
        }
    }

    /// Run the default plan for `dataset`.
    pub async fn seed(&self, dataset: Dataset) -> SeedReport {
        self.seeder
            .run(&SeedPlan::new(dataset))
            .await
            .expect("seed run failed")
    }
}

/// Assert that a JSON value contains specific fields with expected values.
pub fn assert_json_contains(actual: &Value, expected: &Value) {
    match (actual, expected) {
        (Value::Object(actual_map), Value::Object(expected_map)) => {
            for (key, expected_value) in expected_map {
                let actual_value = actual_map
                    .get(key)
                    .unwrap_or_else(|| panic!("Expected key '{}' not found in actual JSON", key));
                assert_json_contains(actual_value, expected_value);
            }
        }
        (Value::Array(actual_arr), Value::Array(expected_arr)) => {
            assert_eq!(actual_arr.len(), expected_arr.len(), "Array lengths differ");
            for (actual_item, expected_item) in actual_arr.iter().zip(expected_arr.iter()) {
                assert_json_contains(actual_item, expected_item);
            }
        }
        _ => {
            assert_eq!(
                actual, expected,
                "JSON values differ: expected {:?}, got {:?}",
                expected, actual
            );
        }
    }
}
