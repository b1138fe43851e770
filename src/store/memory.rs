//! In-memory document store.
//!
//! Provides a `MemoryStore` that behaves like a MongoDB database for the
//! operations the seed loader uses, without a running server. Used by the
//! test suite and by `seed --dry-run`.

use super::error::{StoreError, StoreResult};
use super::traits::{CollectionStatus, DocumentStore};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    collections: BTreeMap<String, Vec<Document>>,
    /// Fail the next `insert_many` call.
    fail_next_insert: bool,
    /// Fail every `create_collection` call.
    fail_create: bool,
    create_calls: usize,
}

/// In-memory document store.
///
/// Clones share the same underlying state, so a test can keep a handle
/// while the seeder owns another.
///
/// # Example
/// ```
/// use recipe_seed::store::{CollectionStatus, DocumentStore, MemoryStore};
///
/// # tokio_test::block_on(async {
/// let store = MemoryStore::new("app");
/// assert_eq!(store.create_collection("recipes").await.unwrap(), CollectionStatus::Created);
/// assert_eq!(store.create_collection("recipes").await.unwrap(), CollectionStatus::AlreadyExists);
/// assert_eq!(store.count_documents("recipes").await.unwrap(), 0);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    database: String,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            state: Arc::new(Mutex::new(MemoryState::default())),
        }
    }

    /// Make the next `insert_many` call fail without writing anything.
    pub fn fail_next_insert(&self) {
        self.state.lock().fail_next_insert = true;
    }

    /// Make every `create_collection` call fail, as an unreachable server would.
    pub fn set_fail_create(&self, fail: bool) {
        self.state.lock().fail_create = fail;
    }

    /// Number of `create_collection` calls seen so far, including no-ops.
    pub fn create_calls(&self) -> usize {
        self.state.lock().create_calls
    }

    /// Snapshot of one collection's documents.
    pub fn snapshot(&self, collection: &str) -> Vec<Document> {
        self.state
            .lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn create_collection(&self, name: &str) -> StoreResult<CollectionStatus> {
        let mut state = self.state.lock();
        state.create_calls += 1;
        if state.fail_create {
            return Err(StoreError::Injected("create_collection"));
        }
        if state.collections.contains_key(name) {
            return Ok(CollectionStatus::AlreadyExists);
        }
        state.collections.insert(name.to_string(), Vec::new());
        Ok(CollectionStatus::Created)
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.state.lock().collections.keys().cloned().collect())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> StoreResult<usize> {
        let mut state = self.state.lock();
        if state.fail_next_insert {
            state.fail_next_insert = false;
            return Err(StoreError::Injected("insert_many"));
        }

        let inserted = documents.len();
        let target = state.collections.entry(collection.to_string()).or_default();
        for mut doc in documents {
            if !doc.contains_key("_id") {
                doc.insert("_id", ObjectId::new());
            }
            target.push(doc);
        }
        Ok(inserted)
    }

    async fn count_documents(&self, collection: &str) -> StoreResult<u64> {
        Ok(self
            .state
            .lock()
            .collections
            .get(collection)
            .map_or(0, |docs| docs.len() as u64))
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(self.snapshot(collection))
    }
}
