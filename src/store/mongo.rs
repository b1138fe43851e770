//! MongoDB-backed document store.

use super::error::{StoreError, StoreResult};
use super::traits::{CollectionStatus, DocumentStore};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;
use tracing::{debug, info};

/// Server error code for "collection already exists".
const NAMESPACE_EXISTS: i32 = 48;

/// Connection parameters for [`MongoStore::connect`].
#[derive(Debug, Clone)]
pub struct MongoStoreOptions {
    pub uri: String,
    pub database: String,
    pub app_name: Option<String>,
    pub connect_timeout: Duration,
}

impl Default for MongoStoreOptions {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "app".to_string(),
            app_name: Some("recipe_seed".to_string()),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Document store backed by a MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect and ping the server.
    ///
    /// The database itself is created lazily by the server on first write.
    pub async fn connect(options: &MongoStoreOptions) -> StoreResult<Self> {
        let connection_err = |source| StoreError::Connection {
            uri: options.uri.clone(),
            source,
        };

        let mut client_options = ClientOptions::parse(&options.uri)
            .await
            .map_err(connection_err)?;
        client_options.app_name = options.app_name.clone();
        client_options.connect_timeout = Some(options.connect_timeout);
        client_options.server_selection_timeout = Some(options.connect_timeout);

        let client = Client::with_options(client_options).map_err(connection_err)?;
        let db = client.database(&options.database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_err)?;

        info!(database = %options.database, "Connected to MongoDB");
        Ok(Self { client, db })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn create_collection(&self, name: &str) -> StoreResult<CollectionStatus> {
        match self.db.create_collection(name).await {
            Ok(()) => Ok(CollectionStatus::Created),
            Err(e) if is_namespace_exists(&e) => {
                debug!(collection = name, "Collection already exists");
                Ok(CollectionStatus::AlreadyExists)
            }
            Err(e) => Err(StoreError::operation("create_collection", name, e)),
        }
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        let mut names = self
            .db
            .list_collection_names()
            .await
            .map_err(|e| StoreError::operation("list_collection_names", self.db.name(), e))?;
        names.sort();
        Ok(names)
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> StoreResult<usize> {
        // The driver rejects an empty batch.
        if documents.is_empty() {
            return Ok(0);
        }
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_many(documents)
            .await
            .map_err(|e| StoreError::operation("insert_many", collection, e))?;
        Ok(result.inserted_ids.len())
    }

    async fn count_documents(&self, collection: &str) -> StoreResult<u64> {
        self.db
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .await
            .map_err(|e| StoreError::operation("count_documents", collection, e))
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let op_err = |e| StoreError::operation("find", collection, e);
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! {})
            .await
            .map_err(op_err)?;
        cursor.try_collect().await.map_err(op_err)
    }
}

fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
    matches!(*err.kind, ErrorKind::Command(ref cmd) if cmd.code == NAMESPACE_EXISTS)
}
