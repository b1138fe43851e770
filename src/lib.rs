//! Recipe Seed Library
//!
//! Seeds the application's document database: declares the `sessions` and
//! `recipes` collections and inserts a literal recipe dataset.
//!
//! # Modules
//!
//! - `config`: Configuration management with TOML support
//! - `dataset`: The literal seed datasets
//! - `recipe`: Recipe record shapes and shape validation
//! - `store`: Document store abstraction (MongoDB and in-memory)
//! - `seed`: The seed loader and its reports
//! - `error`: Unified error handling
//! - `logging`: Tracing subscriber setup

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod recipe;
pub mod seed;
pub mod store;

pub use config::{Config, ConfigError, ConfigLoader, ConfigResult};
pub use dataset::Dataset;
pub use error::{AppError, AppResult};
pub use recipe::{CatalogRecipe, RecipeRecord, RecipeShape, ShapeViolation, Step, StepRecipe};
pub use seed::{
    SeedError, SeedPlan, SeedReport, SeedResult, Seeder, VerifyReport, RECIPES_COLLECTION,
    SESSIONS_COLLECTION,
};
pub use store::{
    CollectionStatus, DocumentStore, MemoryStore, MongoStore, MongoStoreOptions, StoreError,
    StoreResult,
};
