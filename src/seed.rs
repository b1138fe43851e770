//! Seed loader.
//!
//! Declares the collections of a [`SeedPlan`] and inserts the literal
//! records of its dataset, in that order, through any [`DocumentStore`].
//!
//! # Flow
//!
//! ```text
//! SeedPlan ──> Seeder::run ──> create_collection (each, tolerant)
//!                          ──> validate + encode records
//!                          ──> insert_many(target)
//!                          ──> SeedReport
//! ```
//!
//! Failures are not retried. Re-running appends the same records again;
//! nothing in the records identifies them, so duplicates are not detected.

use crate::dataset::Dataset;
use crate::recipe::ShapeViolation;
use crate::store::{CollectionStatus, DocumentStore, StoreError};
use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

pub const SESSIONS_COLLECTION: &str = "sessions";
pub const RECIPES_COLLECTION: &str = "recipes";

/// Errors that abort a seed or verify run.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Record {index} ('{label}') is invalid: {source}")]
    InvalidRecord {
        index: usize,
        label: String,
        #[source]
        source: ShapeViolation,
    },

    #[error("Failed to encode record: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error("Target collection '{0}' is not declared by the plan")]
    TargetNotDeclared(String),
}

pub type SeedResult<T> = Result<T, SeedError>;

/// What to declare and what to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPlan {
    pub dataset: Dataset,
    /// Collections to declare, in order. Repeats are allowed and are no-ops.
    pub collections: Vec<String>,
    /// Collection that receives the dataset's records.
    pub target_collection: String,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}

impl SeedPlan {
    /// Declare `sessions` and `recipes`, insert `dataset` into `recipes`.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            collections: vec![
                SESSIONS_COLLECTION.to_string(),
                RECIPES_COLLECTION.to_string(),
            ],
            target_collection: RECIPES_COLLECTION.to_string(),
        }
    }

    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = collections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_collection = target.into();
        self
    }

    pub fn validate(&self) -> SeedResult<()> {
        if self.collections.iter().any(|c| c == &self.target_collection) {
            Ok(())
        } else {
            Err(SeedError::TargetNotDeclared(self.target_collection.clone()))
        }
    }
}

/// Outcome of declaring one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOutcome {
    pub name: String,
    pub status: CollectionStatus,
}

/// Summary of a completed seed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReport {
    pub run_id: Uuid,
    pub database: String,
    pub dataset: Dataset,
    pub collections: Vec<CollectionOutcome>,
    pub target_collection: String,
    pub inserted: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SeedReport {
    /// Number of declarations that actually created a collection.
    pub fn created(&self) -> usize {
        self.collections
            .iter()
            .filter(|c| c.status.is_created())
            .count()
    }
}

/// State of one declared collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCheck {
    pub name: String,
    pub exists: bool,
    pub count: u64,
}

/// A stored document that does not match the dataset's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeFailure {
    pub index: usize,
    pub reason: String,
}

/// Result of checking a database against a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub database: String,
    pub dataset: Dataset,
    pub collections: Vec<CollectionCheck>,
    pub target_collection: String,
    /// Records one run of the dataset inserts.
    pub expected_records: usize,
    pub shape_failures: Vec<ShapeFailure>,
}

impl VerifyReport {
    pub fn target_count(&self) -> u64 {
        self.collections
            .iter()
            .find(|c| c.name == self.target_collection)
            .map_or(0, |c| c.count)
    }

    /// Every collection exists, only the target holds documents, the target
    /// holds at least one run's worth of records, and every record matches
    /// the shape.
    pub fn is_ok(&self) -> bool {
        self.problems().is_empty()
    }

    /// One line per failed check.
    pub fn problems(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .collections
            .iter()
            .filter(|c| !c.exists)
            .map(|c| format!("collection '{}' is missing", c.name))
            .collect();

        problems.extend(
            self.collections
                .iter()
                .filter(|c| c.name != self.target_collection && c.count > 0)
                .map(|c| format!("'{}' holds {} document(s), expected none", c.name, c.count)),
        );

        let count = self.target_count();
        if count < self.expected_records as u64 {
            problems.push(format!(
                "'{}' holds {} record(s), expected at least {}",
                self.target_collection, count, self.expected_records
            ));
        }
        problems.extend(
            self.shape_failures
                .iter()
                .map(|f| format!("record {} of '{}': {}", f.index, self.target_collection, f.reason)),
        );
        problems
    }
}

/// Runs seed plans against a document store.
#[derive(Debug, Clone)]
pub struct Seeder<S> {
    store: S,
}

impl<S: DocumentStore> Seeder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Declare the plan's collections and insert its dataset.
    pub async fn run(&self, plan: &SeedPlan) -> SeedResult<SeedReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "seed",
            %run_id,
            database = self.store.database_name(),
            dataset = %plan.dataset
        );
        self.run_inner(run_id, plan).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid, plan: &SeedPlan) -> SeedResult<SeedReport> {
        plan.validate()?;
        let started_at = Utc::now();
        info!("Seeding database");

        let mut collections = Vec::with_capacity(plan.collections.len());
        for name in &plan.collections {
            let status = self.store.create_collection(name).await?;
            match status {
                CollectionStatus::Created => info!(collection = %name, "Created collection"),
                CollectionStatus::AlreadyExists => {
                    warn!(collection = %name, "Collection already exists, skipping")
                }
            }
            collections.push(CollectionOutcome {
                name: name.clone(),
                status,
            });
        }

        let records = plan.dataset.records();
        let mut documents = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|source| SeedError::InvalidRecord {
                    index,
                    label: record.label().to_string(),
                    source,
                })?;
            debug!(index, recipe = record.label(), "Prepared record");
            documents.push(record.to_document()?);
        }

        let inserted = self
            .store
            .insert_many(&plan.target_collection, documents)
            .await?;
        info!(
            collection = %plan.target_collection,
            inserted,
            "Inserted recipe records"
        );

        Ok(SeedReport {
            run_id,
            database: self.store.database_name().to_string(),
            dataset: plan.dataset,
            collections,
            target_collection: plan.target_collection.clone(),
            inserted,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Check collection existence, counts and record shapes.
    pub async fn verify(&self, plan: &SeedPlan) -> SeedResult<VerifyReport> {
        plan.validate()?;
        let existing = self.store.collection_names().await?;

        let mut collections: Vec<CollectionCheck> = Vec::new();
        for name in &plan.collections {
            if collections.iter().any(|c| &c.name == name) {
                continue;
            }
            collections.push(CollectionCheck {
                name: name.clone(),
                exists: existing.contains(name),
                count: self.store.count_documents(name).await?,
            });
        }

        let shape = plan.dataset.shape();
        let shape_failures = self
            .store
            .find_all(&plan.target_collection)
            .await?
            .iter()
            .enumerate()
            .filter_map(|(index, doc)| {
                shape.check_document(doc).err().map(|e| ShapeFailure {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<Vec<_>>();

        if !shape_failures.is_empty() {
            warn!(
                failures = shape_failures.len(),
                collection = %plan.target_collection,
                "Stored records do not match the dataset shape"
            );
        }

        Ok(VerifyReport {
            database: self.store.database_name().to_string(),
            dataset: plan.dataset,
            collections,
            target_collection: plan.target_collection.clone(),
            expected_records: plan.dataset.records().len(),
            shape_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_plan() {
        let plan = SeedPlan::default();
        assert_eq!(plan.dataset, Dataset::Steps);
        assert_eq!(plan.collections, vec!["sessions", "recipes"]);
        assert_eq!(plan.target_collection, "recipes");
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_undeclared_target_rejected() {
        let plan = SeedPlan::default().with_collections(["sessions"]);
        assert!(matches!(
            plan.validate(),
            Err(SeedError::TargetNotDeclared(ref t)) if t == "recipes"
        ));
    }

    #[tokio::test]
    async fn test_run_reports_created_collections() {
        let seeder = Seeder::new(MemoryStore::new("app"));
        let report = seeder.run(&SeedPlan::default()).await.unwrap();
        assert_eq!(report.database, "app");
        assert_eq!(report.created(), 2);
        assert_eq!(report.inserted, 1);
        assert!(report.finished_at >= report.started_at);
    }

    #[tokio::test]
    async fn test_verify_on_empty_store_fails() {
        let seeder = Seeder::new(MemoryStore::new("app"));
        let report = seeder.verify(&SeedPlan::default()).await.unwrap();
        assert!(!report.is_ok());
        assert!(report.collections.iter().all(|c| !c.exists));
        assert_eq!(
            report.problems(),
            vec![
                "collection 'sessions' is missing",
                "collection 'recipes' is missing",
                "'recipes' holds 0 record(s), expected at least 1",
            ]
        );
    }

    #[tokio::test]
    async fn test_verify_deduplicates_declarations() {
        let seeder = Seeder::new(MemoryStore::new("app"));
        let plan = SeedPlan::default().with_collections(["sessions", "recipes", "recipes"]);
        seeder.run(&plan).await.unwrap();
        let report = seeder.verify(&plan).await.unwrap();
        assert_eq!(report.collections.len(), 2);
        assert!(report.is_ok());
    }

    #[tokio::test]
    async fn test_verify_flags_populated_sessions() {
        let store = MemoryStore::new("app");
        let seeder = Seeder::new(store.clone());
        seeder.run(&SeedPlan::default()).await.unwrap();
        store
            .insert_many(SESSIONS_COLLECTION, vec![bson::doc! { "user": "someone" }])
            .await
            .unwrap();

        let report = seeder.verify(&SeedPlan::default()).await.unwrap();
        assert!(!report.is_ok());
        assert_eq!(
            report.problems(),
            vec!["'sessions' holds 1 document(s), expected none"]
        );
    }
}
