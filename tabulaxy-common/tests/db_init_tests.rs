//! Tests for schema creation, reference seeding and word batches
//!
//! Covers:
//! - Automatic database creation with the fixed schema
//! - Idempotent schema creation and reference seeding
//! - All-or-nothing word batches
//! - Session usage uniqueness

use sqlx::SqlitePool;
use tabulaxy_common::db::{
    bulk_insert_words, count_words, count_words_by_category, get_schema_version, init_database,
    open_database, record_session_word, seed_and_insert_words, seed_reference_data,
    set_schema_version, word_id_for_target, create_schema, TARGET_SCHEMA_VERSION,
};
use tabulaxy_common::{Category, Difficulty, Error, GameMode, ModeFlags, WordEntry};
use tempfile::TempDir;
use uuid::Uuid;

async fn setup_test_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("tabulaxy.db")).await.unwrap();
    (dir, pool)
}

fn entry(target: &str, category: Category, flags: ModeFlags) -> WordEntry {
    WordEntry {
        target: target.to_string(),
        forbidden: vec!["Bir".into(), "İki".into(), "Üç".into(), "Dört".into(), "Beş".into()],
        category,
        difficulty: Difficulty::Medium,
        mode_flags: flags,
    }
}

async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("tabulaxy.db");
    assert!(!db_path.exists());

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_all_tables_and_indices_exist() {
    let (_dir, pool) = setup_test_db().await;

    for table in [
        "categories",
        "difficulties",
        "words",
        "session_words",
        "user_progress",
        "purchases",
        "settings",
    ] {
        let exists: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(exists, 1, "missing table {}", table);
    }

    for index in [
        "idx_words_mode_cat_diff",
        "idx_words_category",
        "idx_words_difficulty",
        "idx_session_words_session",
    ] {
        let exists: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?",
        )
        .bind(index)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(exists, 1, "missing index {}", index);
    }
}

#[tokio::test]
async fn test_reference_data_seeded() {
    let (_dir, pool) = setup_test_db().await;

    assert_eq!(count_rows(&pool, "categories").await, 6);
    assert_eq!(count_rows(&pool, "difficulties").await, 4);
    assert_eq!(count_rows(&pool, "user_progress").await, 1);
    assert_eq!(count_rows(&pool, "settings").await, 4);

    let mixed: (String, String, String) =
        sqlx::query_as("SELECT name, name_tr, color FROM categories WHERE id = 6")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(mixed, ("Mixed".to_string(), "Karışık".to_string(), "#F39C12".to_string()));

    let weight: f64 = sqlx::query_scalar("SELECT weight FROM difficulties WHERE id = 4")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!((weight - 0.4).abs() < f64::EPSILON);

    let sound: String = sqlx::query_scalar("SELECT value FROM settings WHERE key = 'sound_enabled'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sound, "true");
}

#[tokio::test]
async fn test_schema_creation_is_idempotent() {
    let (_dir, pool) = setup_test_db().await;

    create_schema(&pool).await.unwrap();
    seed_reference_data(&pool).await.unwrap();
    create_schema(&pool).await.unwrap();
    seed_reference_data(&pool).await.unwrap();

    assert_eq!(count_rows(&pool, "categories").await, 6);
    assert_eq!(count_rows(&pool, "difficulties").await, 4);
    assert_eq!(count_rows(&pool, "user_progress").await, 1);
    assert_eq!(count_rows(&pool, "settings").await, 4);
}

#[tokio::test]
async fn test_reopening_existing_database_keeps_words() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("tabulaxy.db");

    let pool = init_database(&db_path).await.unwrap();
    bulk_insert_words(&pool, &[entry("ELMA", Category::DailyLife, ModeFlags::ALL)])
        .await
        .unwrap();
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    assert_eq!(count_words(&pool, None).await.unwrap(), 1);
    assert_eq!(count_rows(&pool, "categories").await, 6);
}

#[tokio::test]
async fn test_seeding_does_not_overwrite_changed_settings() {
    let (_dir, pool) = setup_test_db().await;

    sqlx::query("UPDATE settings SET value = 'true' WHERE key = 'ads_removed'")
        .execute(&pool)
        .await
        .unwrap();
    seed_reference_data(&pool).await.unwrap();

    let value: String = sqlx::query_scalar("SELECT value FROM settings WHERE key = 'ads_removed'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(value, "true");
}

#[tokio::test]
async fn test_bulk_insert_stores_forbidden_as_json() {
    let (_dir, pool) = setup_test_db().await;

    let inserted = bulk_insert_words(
        &pool,
        &[
            entry("ELMA", Category::DailyLife, ModeFlags::ALL),
            entry("ROBOT", Category::Technology, ModeFlags::from_modes([GameMode::Classic, GameMode::Journey])),
        ],
    )
    .await
    .unwrap();
    assert_eq!(inserted, 2);

    let (forbidden, flags): (String, i64) =
        sqlx::query_as("SELECT forbidden, mode_flags FROM words WHERE target = 'ROBOT'")
            .fetch_one(&pool)
            .await
            .unwrap();
    let forbidden: Vec<String> = serde_json::from_str(&forbidden).unwrap();
    assert_eq!(forbidden.len(), 5);
    assert_eq!(forbidden[1], "İki");
    assert_eq!(flags, 9);
}

#[tokio::test]
async fn test_bulk_insert_collision_commits_nothing() {
    let (_dir, pool) = setup_test_db().await;

    bulk_insert_words(&pool, &[entry("A", Category::Science, ModeFlags::ALL)])
        .await
        .unwrap();

    let batch = vec![
        entry("B", Category::Science, ModeFlags::ALL),
        entry("C", Category::Science, ModeFlags::ALL),
        entry("A", Category::Science, ModeFlags::ALL),
        entry("D", Category::Science, ModeFlags::ALL),
    ];

    let err = bulk_insert_words(&pool, &batch).await.unwrap_err();
    assert!(matches!(err, Error::BulkInsert(ref msg) if msg.contains("'A'")), "got {:?}", err);

    assert_eq!(count_words(&pool, None).await.unwrap(), 1);
    assert_eq!(word_id_for_target(&pool, "B").await.unwrap(), None);
}

#[tokio::test]
async fn test_bulk_insert_collision_within_batch_commits_nothing() {
    let (_dir, pool) = setup_test_db().await;

    let batch = vec![
        entry("X", Category::Culture, ModeFlags::ALL),
        entry("X", Category::Culture, ModeFlags::ALL),
    ];

    assert!(bulk_insert_words(&pool, &batch).await.is_err());
    assert_eq!(count_words(&pool, None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_and_insert_share_one_transaction() {
    let dir = TempDir::new().unwrap();
    let pool = open_database(&dir.path().join("tabulaxy.db")).await.unwrap();

    let batch = vec![
        entry("X", Category::Culture, ModeFlags::ALL),
        entry("X", Category::Culture, ModeFlags::ALL),
    ];
    assert!(matches!(
        seed_and_insert_words(&pool, &batch).await,
        Err(Error::BulkInsert(_))
    ));

    let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(categories, 0);
    assert_eq!(count_words(&pool, None).await.unwrap(), 0);

    let inserted = seed_and_insert_words(&pool, &batch[..1]).await.unwrap();
    assert_eq!(inserted, 1);
    let settings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(settings, 4);
}

#[tokio::test]
async fn test_count_words_by_mode_and_category() {
    let (_dir, pool) = setup_test_db().await;

    let silent = ModeFlags::from_modes([GameMode::Silent, GameMode::Journey]);
    bulk_insert_words(
        &pool,
        &[
            entry("A", Category::Science, ModeFlags::from(GameMode::Classic)),
            entry("B", Category::Mixed, silent),
            entry("C", Category::Mixed, silent),
        ],
    )
    .await
    .unwrap();

    assert_eq!(count_words(&pool, Some(GameMode::Classic)).await.unwrap(), 1);
    assert_eq!(count_words(&pool, Some(GameMode::Silent)).await.unwrap(), 2);
    assert_eq!(count_words(&pool, Some(GameMode::Journey)).await.unwrap(), 2);
    assert_eq!(count_words(&pool, Some(GameMode::Marathon)).await.unwrap(), 0);

    let by_category = count_words_by_category(&pool).await.unwrap();
    assert_eq!(by_category, vec![(2, 1), (6, 2)]);
}

#[tokio::test]
async fn test_session_word_recorded_once() {
    let (_dir, pool) = setup_test_db().await;

    bulk_insert_words(&pool, &[entry("ELMA", Category::DailyLife, ModeFlags::ALL)])
        .await
        .unwrap();
    let word_id = word_id_for_target(&pool, "ELMA").await.unwrap().unwrap();
    let session = Uuid::new_v4();

    assert!(record_session_word(&pool, &session, word_id).await.unwrap());
    assert!(!record_session_word(&pool, &session, word_id).await.unwrap());
    assert!(record_session_word(&pool, &Uuid::new_v4(), word_id).await.unwrap());

    assert_eq!(count_rows(&pool, "session_words").await, 2);
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let (_dir, pool) = setup_test_db().await;

    let result = sqlx::query(
        "INSERT INTO words (target, forbidden, category_id, difficulty_id) VALUES ('X', '[]', 42, 1)",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "unknown category id should violate the foreign key");
}

#[tokio::test]
async fn test_schema_version_round_trip() {
    let (_dir, pool) = setup_test_db().await;

    assert_eq!(get_schema_version(&pool).await.unwrap(), 0);
    set_schema_version(&pool, TARGET_SCHEMA_VERSION).await.unwrap();
    assert_eq!(get_schema_version(&pool).await.unwrap(), 3);
}
