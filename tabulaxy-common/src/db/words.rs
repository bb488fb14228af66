//! Word storage
//!
//! Words are only ever added in batches. A batch is one transaction: if
//! any row fails (most often a `target` UNIQUE collision) the transaction
//! is dropped without commit and none of the batch becomes visible.

use crate::db::seed::seed_into;
use crate::models::WordEntry;
use crate::modes::GameMode;
use crate::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

/// Insert a batch of words atomically, returning the number inserted
pub async fn bulk_insert_words(pool: &SqlitePool, entries: &[WordEntry]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let inserted = insert_words_into(&mut *tx, entries).await?;

    tx.commit()
        .await
        .map_err(|e| Error::BulkInsert(format!("commit: {}", e)))?;

    info!("Inserted {} words", inserted);
    Ok(inserted)
}

/// Seed reference data and insert a batch in a single transaction
///
/// A failing row rolls back the seed rows too, so a rejected batch leaves
/// the database exactly as it was.
pub async fn seed_and_insert_words(pool: &SqlitePool, entries: &[WordEntry]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    seed_into(&mut *tx).await?;
    let inserted = insert_words_into(&mut *tx, entries).await?;

    tx.commit()
        .await
        .map_err(|e| Error::BulkInsert(format!("commit: {}", e)))?;

    info!("Seeded reference data and inserted {} words", inserted);
    Ok(inserted)
}

/// Insert rows on `conn` without committing
pub async fn insert_words_into(conn: &mut SqliteConnection, entries: &[WordEntry]) -> Result<u64> {
    for entry in entries {
        let forbidden = entry.forbidden_json()?;

        sqlx::query(
            r#"
            INSERT INTO words (target, forbidden, category_id, difficulty_id, mode_flags)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.target)
        .bind(forbidden)
        .bind(entry.category.id())
        .bind(entry.difficulty.id())
        .bind(i64::from(entry.mode_flags.bits()))
        .execute(&mut *conn)
        .await
        .map_err(|e| Error::BulkInsert(format!("'{}': {}", entry.target, e)))?;
    }

    Ok(entries.len() as u64)
}

/// Count words, optionally restricted to those eligible for `mode`
pub async fn count_words(pool: &SqlitePool, mode: Option<GameMode>) -> Result<i64> {
    let count: i64 = match mode {
        Some(mode) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM words WHERE (mode_flags & ?) != 0")
                .bind(i64::from(mode.bit()))
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM words")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(count)
}

/// Word count per category id, ordered by id
pub async fn count_words_by_category(pool: &SqlitePool) -> Result<Vec<(i64, i64)>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT category_id, COUNT(*) FROM words GROUP BY category_id ORDER BY category_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Look up a word's row id by target
pub async fn word_id_for_target(pool: &SqlitePool, target: &str) -> Result<Option<i64>> {
    let id: Option<i64> = sqlx::query_scalar("SELECT id FROM words WHERE target = ?")
        .bind(target)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

/// Record that a session used a word
///
/// Returns `false` when the (session, word) pair was already recorded.
pub async fn record_session_word(pool: &SqlitePool, session_id: &Uuid, word_id: i64) -> Result<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO session_words (session_id, word_id) VALUES (?, ?)")
        .bind(session_id.to_string())
        .bind(word_id)
        .execute(pool)
        .await?;

    let inserted = result.rows_affected() == 1;
    debug!(session_id = %session_id, word_id, inserted, "Session word usage");
    Ok(inserted)
}
