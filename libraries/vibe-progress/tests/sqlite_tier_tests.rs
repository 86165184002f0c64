//! Reconciler over the real SQLite local tier

mod common;

use common::{item, owner, MemoryTier, StepClock};
use std::sync::Arc;
use tempfile::TempDir;
use vibe_core::{ConnectivityFlag, LocalProgressTier, LocalWrite, RecordOutcome, RemoteWrite};
use vibe_progress::{ProgressConfig, Reconciler};
use vibe_storage::{create_pool, run_migrations, LocalProgressStore};

async fn sqlite_store() -> (LocalProgressStore, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("local.db").display());

    let pool = create_pool(&db_url).await.expect("Failed to create pool");
    run_migrations(&pool).await.expect("Failed to run migrations");

    (LocalProgressStore::new(pool), temp_dir)
}

#[tokio::test]
async fn test_offline_session_survives_in_sqlite() {
    let (store, _dir) = sqlite_store().await;
    let remote = MemoryTier::new();
    let flag = ConnectivityFlag::offline();

    let reconciler = Reconciler::new(
        Arc::new(store.clone()),
        remote.clone(),
        Arc::new(flag.clone()),
        ProgressConfig::default(),
    )
    .with_clock(StepClock::starting_at(10_000));

    let outcome = reconciler
        .record_progress(&owner(), &item("b4"), 0, 120.0, 3600.0)
        .await;
    assert!(matches!(
        outcome,
        RecordOutcome::Recorded {
            local: LocalWrite::Stored,
            remote: RemoteWrite::Offline,
            ..
        }
    ));
    assert_eq!(remote.puts(), 0);

    let stored = store.get_all(&owner()).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].position, 120.0);

    let resume = reconciler.find_resume_point(&owner(), &item("b4")).await.unwrap();
    assert_eq!(resume.position, 120.0);
    assert_eq!(resume.updated_at, 10_000);
}

#[tokio::test]
async fn test_reconnected_write_reaches_remote_and_merges() {
    let (store, _dir) = sqlite_store().await;
    let remote = MemoryTier::new();
    let flag = ConnectivityFlag::offline();

    let reconciler = Reconciler::new(
        Arc::new(store),
        remote.clone(),
        Arc::new(flag.clone()),
        ProgressConfig::default(),
    )
    .with_clock(StepClock::starting_at(10_000));

    reconciler
        .record_progress(&owner(), &item("b1"), 0, 60.0, 600.0)
        .await;
    flag.set_online(true);
    reconciler
        .record_progress(&owner(), &item("b1"), 1, 30.0, 900.0)
        .await;

    assert_eq!(remote.stored("b1").unwrap().part_index, 1);

    let merged = reconciler.get_merged_progress(&owner()).await;
    let b1 = merged.get(&item("b1")).unwrap();
    assert_eq!(b1.part_index, 1);
    assert_eq!(b1.updated_at, 11_000);
}
