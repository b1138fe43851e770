//! Store-specific error types.
//!
//! Kept separate from seed and application errors so each layer only
//! reports what it can observe.

use thiserror::Error;

/// Errors that can occur while talking to a document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be reached or rejected the handshake.
    #[error("Failed to connect to '{uri}': {source}")]
    Connection {
        uri: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// A command or CRUD operation failed on the server.
    #[error("Database operation '{operation}' on '{collection}' failed: {source}")]
    Operation {
        operation: &'static str,
        collection: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// Failure injected into the in-memory store.
    #[error("Injected failure during '{0}'")]
    Injected(&'static str),
}

impl StoreError {
    /// Wrap a driver error raised by `operation` on `collection`.
    pub fn operation(
        operation: &'static str,
        collection: impl Into<String>,
        source: mongodb::error::Error,
    ) -> Self {
        Self::Operation {
            operation,
            collection: collection.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
