//! Configuration module for recipe_seed.
//!
//! This module provides TOML-based configuration with environment variable overrides.
//!
//! # Configuration Resolution
//!
//! Configuration is loaded from the following locations (in order of priority):
//!
//! 1. `RECIPE_SEED_CONFIG` environment variable (explicit path)
//! 2. `./recipe_seed.toml` (current directory)
//! 3. The platform config directory (`~/.config/recipe_seed/` on Linux)
//! 4. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! The pattern is: `RECIPE_SEED_<SECTION>_<KEY>`
//!
//! Examples:
//! - `RECIPE_SEED_DATABASE_URI=mongodb://mongo:27017`
//! - `RECIPE_SEED_DATABASE_NAME=app`
//! - `RECIPE_SEED_SEED_DATASET=catalog`
//! - `RECIPE_SEED_LOG_LEVEL=debug`
//!
//! `MONGO_URL` is also read as a fallback for the connection string.
//!
//! # Example
//!
//! ```rust,no_run
//! use recipe_seed::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load()?;
//! let config = loader.config();
//!
//! println!("Seeding {} at {}", config.database.name, config.database.uri);
//! # Ok::<(), recipe_seed::config::ConfigError>(())
//! ```

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    get_default_config_dir, get_default_config_path, resolve_config_path, ConfigLoader,
};
pub use schema::{Config, DatabaseConfig, LogFormat, LoggingConfig, SeedConfig};
