//! Configuration schema definitions.
//!
//! This module defines the structure of the configuration file using serde.
//! All configuration sections are defined here with appropriate defaults.

use super::error::{ConfigError, ConfigResult};
use crate::dataset::Dataset;
use crate::seed::{SeedPlan, RECIPES_COLLECTION, SESSIONS_COLLECTION};
use crate::store::MongoStoreOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database connection
    pub database: DatabaseConfig,
    /// What gets seeded
    pub seed: SeedConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.uri.trim().is_empty() {
            return Err(ConfigError::invalid("database.uri", "must not be empty"));
        }
        if self.database.name.trim().is_empty() {
            return Err(ConfigError::invalid("database.name", "must not be empty"));
        }
        if self.seed.collections.is_empty() {
            return Err(ConfigError::invalid(
                "seed.collections",
                "at least one collection must be declared",
            ));
        }
        if !self
            .seed
            .collections
            .iter()
            .any(|c| c == &self.seed.target_collection)
        {
            return Err(ConfigError::invalid(
                "seed.target_collection",
                format!(
                    "'{}' is not listed in seed.collections",
                    self.seed.target_collection
                ),
            ));
        }
        Ok(())
    }

    /// Build the seed plan described by the `[seed]` section.
    pub fn seed_plan(&self) -> SeedPlan {
        SeedPlan::new(self.seed.dataset)
            .with_collections(self.seed.collections.iter().cloned())
            .with_target(self.seed.target_collection.clone())
    }

    pub fn store_options(&self) -> MongoStoreOptions {
        MongoStoreOptions {
            uri: self.database.uri.clone(),
            database: self.database.name.clone(),
            app_name: self.database.app_name.clone(),
            connect_timeout: self.database.connect_timeout(),
        }
    }
}

/// Database connection section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string
    pub uri: String,
    /// Database to seed
    pub name: String,
    /// Application name reported to the server
    pub app_name: Option<String>,
    /// Connect and server selection timeout in milliseconds
    pub connect_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "app".to_string(),
            app_name: Some("recipe_seed".to_string()),
            connect_timeout_ms: 5000,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Seed section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Dataset to insert: "steps" or "catalog"
    pub dataset: Dataset,
    /// Collections declared before inserting
    pub collections: Vec<String>,
    /// Collection that receives the records
    pub target_collection: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            dataset: Dataset::Steps,
            collections: vec![
                SESSIONS_COLLECTION.to_string(),
                RECIPES_COLLECTION.to_string(),
            ],
            target_collection: RECIPES_COLLECTION.to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Log format: "json", "pretty", "compact"
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format
    Json,
    /// Pretty format with colors
    Pretty,
    /// Compact format
    #[default]
    Compact,
}
