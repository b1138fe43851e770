//! Core trait for document store access.

use super::error::StoreResult;
use async_trait::async_trait;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// Outcome of declaring a collection.
///
/// Declaring a collection that already exists is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    Created,
    AlreadyExists,
}

impl CollectionStatus {
    pub fn is_created(self) -> bool {
        matches!(self, Self::Created)
    }
}

/// Operations the seed loader needs from a document database.
///
/// Implementations follow MongoDB semantics: inserting into an undeclared
/// collection creates it, and an unknown collection counts as empty.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Name of the database this store is bound to.
    fn database_name(&self) -> &str;

    /// Create `name` if it does not exist yet.
    async fn create_collection(&self, name: &str) -> StoreResult<CollectionStatus>;

    /// Names of all collections in the database, sorted.
    async fn collection_names(&self) -> StoreResult<Vec<String>>;

    /// Insert `documents` in order. Returns the number inserted.
    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> StoreResult<usize>;

    async fn count_documents(&self, collection: &str) -> StoreResult<u64>;

    /// Every document of `collection` in natural order.
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Document>>;

    async fn has_collection(&self, name: &str) -> StoreResult<bool> {
        Ok(self.collection_names().await?.iter().any(|c| c == name))
    }
}
