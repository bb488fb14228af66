//! Reference data seeding
//!
//! Reference rows are keyed by primary id and inserted with
//! `INSERT OR IGNORE`, so seeding an already seeded database neither fails
//! nor duplicates rows, and never overwrites values the game has changed.

use crate::catalog::{Category, Difficulty};
use crate::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

/// Settings the game client reads on first launch
pub const DEFAULT_SETTINGS: [(&str, &str); 4] = [
    ("ads_removed", "false"),
    ("premium_words", "false"),
    ("sound_enabled", "true"),
    ("vibration_enabled", "true"),
];

/// Insert categories, difficulties, the progress row and default settings
pub async fn seed_reference_data(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    seed_into(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}

/// Seed on `conn`, typically inside a caller's open transaction
pub async fn seed_into(conn: &mut SqliteConnection) -> Result<()> {

    for category in Category::ALL {
        sqlx::query(
            "INSERT OR IGNORE INTO categories (id, name, name_tr, icon, color) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(category.id())
        .bind(category.name())
        .bind(category.name_tr())
        .bind(category.icon())
        .bind(category.color())
        .execute(&mut *conn)
        .await
        .map_err(|e| Error::Schema(format!("seed category {}: {}", category.id(), e)))?;
    }

    for difficulty in Difficulty::ALL {
        sqlx::query(
            "INSERT OR IGNORE INTO difficulties (id, name, name_tr, weight) VALUES (?, ?, ?, ?)",
        )
        .bind(difficulty.id())
        .bind(difficulty.name())
        .bind(difficulty.name_tr())
        .bind(difficulty.weight())
        .execute(&mut *conn)
        .await
        .map_err(|e| Error::Schema(format!("seed difficulty {}: {}", difficulty.id(), e)))?;
    }

    sqlx::query("INSERT OR IGNORE INTO user_progress (id) VALUES (1)")
        .execute(&mut *conn)
        .await
        .map_err(|e| Error::Schema(format!("seed user_progress: {}", e)))?;

    for (key, value) in DEFAULT_SETTINGS {
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&mut *conn)
            .await
            .map_err(|e| Error::Schema(format!("seed setting {}: {}", key, e)))?;
    }

    debug!(
        categories = Category::ALL.len(),
        difficulties = Difficulty::ALL.len(),
        settings = DEFAULT_SETTINGS.len(),
        "Reference data seeded"
    );
    Ok(())
}
