//! Document store abstraction.
//!
//! The seed loader talks to the database only through the
//! [`DocumentStore`] trait, so the same plan can run against MongoDB or
//! against the in-memory store used by tests and dry runs.

pub mod error;
pub mod memory;
pub mod mongo;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::{MongoStore, MongoStoreOptions};
pub use traits::*;
