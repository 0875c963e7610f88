//! Unit tests for database initialization
//!
//! The storage database is created on first run and reopened afterwards
//! with its contents intact.

use bbs_common::db::init::init_database;
use bbs_common::storage::SqliteStore;
use bbs_common::KeyValueStore;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("bbs.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("bbs.db");

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_storage_table_created() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("bbs.db")).await.unwrap();

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'storage'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("bbs.db");

    {
        let pool = init_database(&db_path).await.unwrap();
        let store = SqliteStore::new(pool.clone());
        store.set("favorites", r#"["3"]"#).await.unwrap();
        pool.close().await;
    }

    let store = SqliteStore::new(init_database(&db_path).await.unwrap());
    assert_eq!(
        store.get("favorites").await.unwrap().as_deref(),
        Some(r#"["3"]"#)
    );
}

#[tokio::test]
async fn test_every_connection_gets_pragmas() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("bbs.db")).await.unwrap();

    // Hold several at once so the pool has to open fresh connections
    let mut connections = Vec::new();
    for _ in 0..3 {
        connections.push(pool.acquire().await.unwrap());
    }

    for conn in connections.iter_mut() {
        let timeout: i64 = sqlx::query_scalar("PRAGMA busy_timeout")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(timeout, 5000);

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(mode, "wal");
    }
}
