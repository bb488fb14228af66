//! Database initialization
//!
//! Creates the fixed schema shared with the game client:
//! `categories`, `difficulties`, `words`, `session_words`, `user_progress`,
//! `purchases` and `settings`, plus the word lookup indices.
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so running the schema
//! builder against an existing database is a no-op.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

/// `PRAGMA user_version` the game client expects from a pre-built database.
///
/// The client's own migrations stop at v3; a database stamped with this
/// value skips them entirely.
pub const TARGET_SCHEMA_VERSION: i32 = 3;

/// Open (or create) the database, build the schema and seed reference data
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let pool = open_database(db_path).await?;
    crate::db::seed::seed_reference_data(&pool).await?;
    Ok(pool)
}

/// Open (or create) the database and build the schema, without seeding
pub async fn open_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    // Single writer: one connection keeps the bulk transaction and the
    // pragmas on the same handle.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indices (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_categories_table(pool).await?;
    create_difficulties_table(pool).await?;
    create_words_table(pool).await?;
    create_session_words_table(pool).await?;
    create_user_progress_table(pool).await?;
    create_purchases_table(pool).await?;
    create_settings_table(pool).await?;
    create_indices(pool).await?;

    debug!("Schema ready");
    Ok(())
}

async fn execute_ddl(pool: &SqlitePool, object: &str, sql: &str) -> Result<()> {
    sqlx::query(sql)
        .execute(pool)
        .await
        .map_err(|e| Error::Schema(format!("{}: {}", object, e)))?;
    Ok(())
}

pub async fn create_categories_table(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            name_tr TEXT NOT NULL,
            icon TEXT,
            color TEXT
        )
        "#,
    )
    .await
}

pub async fn create_difficulties_table(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        "difficulties",
        r#"
        CREATE TABLE IF NOT EXISTS difficulties (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            name_tr TEXT NOT NULL,
            weight REAL DEFAULT 1.0
        )
        "#,
    )
    .await
}

/// Create the words table
///
/// `forbidden` holds a JSON array of strings. `target` is globally unique.
pub async fn create_words_table(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        "words",
        r#"
        CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            target TEXT NOT NULL UNIQUE,
            forbidden TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            difficulty_id INTEGER NOT NULL,
            mode_flags INTEGER DEFAULT 15,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (category_id) REFERENCES categories(id),
            FOREIGN KEY (difficulty_id) REFERENCES difficulties(id)
        )
        "#,
    )
    .await
}

pub async fn create_session_words_table(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        "session_words",
        r#"
        CREATE TABLE IF NOT EXISTS session_words (
            session_id TEXT NOT NULL,
            word_id INTEGER NOT NULL,
            used_at TEXT DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (session_id, word_id),
            FOREIGN KEY (word_id) REFERENCES words(id)
        )
        "#,
    )
    .await
}

pub async fn create_user_progress_table(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        "user_progress",
        r#"
        CREATE TABLE IF NOT EXISTS user_progress (
            id INTEGER PRIMARY KEY DEFAULT 1,
            total_games INTEGER DEFAULT 0,
            correct_words INTEGER DEFAULT 0,
            tabu_words INTEGER DEFAULT 0,
            pass_words INTEGER DEFAULT 0,
            favorite_category_id INTEGER,
            last_played TEXT,
            FOREIGN KEY (favorite_category_id) REFERENCES categories(id)
        )
        "#,
    )
    .await
}

pub async fn create_purchases_table(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        "purchases",
        r#"
        CREATE TABLE IF NOT EXISTS purchases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id TEXT NOT NULL UNIQUE,
            purchased_at TEXT DEFAULT CURRENT_TIMESTAMP,
            is_active INTEGER DEFAULT 1
        )
        "#,
    )
    .await
}

pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    execute_ddl(
        pool,
        "settings",
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .await
}

async fn create_indices(pool: &SqlitePool) -> Result<()> {
    const INDICES: [(&str, &str); 4] = [
        (
            "idx_words_mode_cat_diff",
            "CREATE INDEX IF NOT EXISTS idx_words_mode_cat_diff ON words(mode_flags, category_id, difficulty_id)",
        ),
        (
            "idx_words_category",
            "CREATE INDEX IF NOT EXISTS idx_words_category ON words(category_id)",
        ),
        (
            "idx_words_difficulty",
            "CREATE INDEX IF NOT EXISTS idx_words_difficulty ON words(difficulty_id)",
        ),
        (
            "idx_session_words_session",
            "CREATE INDEX IF NOT EXISTS idx_session_words_session ON session_words(session_id)",
        ),
    ];

    for (name, sql) in INDICES {
        execute_ddl(pool, name, sql).await?;
    }
    Ok(())
}

/// Read `PRAGMA user_version`
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let version: i32 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

/// Stamp `PRAGMA user_version`
pub async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    // PRAGMA arguments cannot be bound
    let pragma_sql = format!("PRAGMA user_version = {}", version);
    sqlx::query(&pragma_sql)
        .execute(pool)
        .await
        .map_err(|e| Error::Schema(format!("user_version: {}", e)))?;

    info!("Schema version set to {}", version);
    Ok(())
}
