use crate::config::ConfigError;
use crate::seed::SeedError;
use crate::store::StoreError;
use thiserror::Error;

/// Convenience result for the binary's top-level operations.
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type.
///
/// Wraps the per-layer errors so `main` can propagate any of them with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Seed failed: {0}")]
    Seed(#[from] SeedError),

    #[error("Verification failed for database '{database}': {details}")]
    VerificationFailed { database: String, details: String },

    #[error("Failed to install log subscriber: {0}")]
    Logging(String),

    #[error("An I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A serialization/deserialization error occurred: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::VerificationFailed { .. } => 3,
            _ => 1,
        }
    }
}
