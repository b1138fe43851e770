//! Seed runs against a live MongoDB.
//!
//! Requires a reachable server. Run with:
//! `MONGO_URL=mongodb://localhost:27017 cargo test --features mongo-tests`

#![cfg(feature = "mongo-tests")]

use recipe_seed::dataset::Dataset;
use recipe_seed::seed::{SeedPlan, Seeder, RECIPES_COLLECTION, SESSIONS_COLLECTION};
use recipe_seed::store::{CollectionStatus, DocumentStore, MongoStore, MongoStoreOptions};
use serial_test::serial;
use uuid::Uuid;

/// Connect to a throwaway database so runs never touch `app`.
async fn scratch_store() -> MongoStore {
    let options = MongoStoreOptions {
        uri: std::env::var("MONGO_URL").unwrap_or_else(|_| "mongodb://localhost:27017".into()),
        database: format!("recipe_seed_test_{}", Uuid::new_v4().simple()),
        ..Default::default()
    };
    MongoStore::connect(&options).await.expect("MongoDB not reachable")
}

async fn drop_database(store: &MongoStore) {
    store
        .client()
        .database(store.database_name())
        .drop()
        .await
        .expect("failed to drop scratch database");
}

#[tokio::test]
#[serial]
async fn seed_catalog_then_verify() {
    let store = scratch_store().await;
    let seeder = Seeder::new(store.clone());
    let plan = SeedPlan::new(Dataset::Catalog);

    let report = seeder.run(&plan).await.unwrap();
    assert_eq!(report.inserted, 3);
    assert_eq!(store.count_documents(SESSIONS_COLLECTION).await.unwrap(), 0);

    let verify = seeder.verify(&plan).await.unwrap();
    assert!(verify.is_ok(), "{:?}", verify.problems());

    drop_database(&store).await;
}

#[tokio::test]
#[serial]
async fn existing_collection_is_not_an_error() {
    let store = scratch_store().await;
    assert_eq!(
        store.create_collection(RECIPES_COLLECTION).await.unwrap(),
        CollectionStatus::Created
    );
    assert_eq!(
        store.create_collection(RECIPES_COLLECTION).await.unwrap(),
        CollectionStatus::AlreadyExists
    );

    drop_database(&store).await;
}

#[tokio::test]
#[serial]
async fn rerun_duplicates_records() {
    let store = scratch_store().await;
    let seeder = Seeder::new(store.clone());
    let plan = SeedPlan::default();

    seeder.run(&plan).await.unwrap();
    seeder.run(&plan).await.unwrap();
    assert_eq!(store.count_documents(RECIPES_COLLECTION).await.unwrap(), 2);

    drop_database(&store).await;
}
