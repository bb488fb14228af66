//! tabulaxy-dbgen - pre-built word database generator
//!
//! Builds the SQLite database shipped with the game: fixed schema,
//! reference data, and an evenly distributed synthetic word set for the
//! classic, silent and marathon modes. Reference data and words go in as
//! one transaction, and the schema version is stamped only after that
//! transaction commits, so a failed run never looks like a finished
//! database to the game client and leaves a kept database unchanged.

pub mod generator;
pub mod import;

use std::path::PathBuf;
use tabulaxy_common::db::{
    count_words, count_words_by_category, open_database, seed_and_insert_words,
    set_schema_version, TARGET_SCHEMA_VERSION,
};
use tabulaxy_common::{GameMode, Result};
use tracing::info;

/// Build identification for the startup log line
///
/// A `-dirty` commit marks a database generated from uncommitted tables.
pub fn build_banner() -> String {
    format!(
        "v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}

/// Options for one generator run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub db_path: PathBuf,
    pub words_per_mode: usize,
    /// Keep an existing database file instead of starting from scratch
    pub keep_existing: bool,
    /// JSON corpus file to load alongside the synthetic words
    pub import_corpus: Option<PathBuf>,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Entries written by this run
    pub inserted: u64,
    /// Of which came from the imported corpus file
    pub imported: usize,
    /// Words in the database after the run
    pub total_words: i64,
    pub per_mode: Vec<(GameMode, i64)>,
    /// (category id, count)
    pub per_category: Vec<(i64, i64)>,
}

/// Generate and load the word database
pub async fn run(options: &RunOptions) -> Result<GenerationReport> {
    let mut entries = generator::generate_corpus(options.words_per_mode)?;
    let imported = match &options.import_corpus {
        Some(path) => import::append_corpus_file(&mut entries, path)?,
        None => 0,
    };

    if !options.keep_existing && options.db_path.exists() {
        std::fs::remove_file(&options.db_path)?;
        info!("Removed existing database {}", options.db_path.display());
    }

    let pool = open_database(&options.db_path).await?;

    info!("Inserting {} words...", entries.len());
    let inserted = seed_and_insert_words(&pool, &entries).await?;

    set_schema_version(&pool, TARGET_SCHEMA_VERSION).await?;

    let total_words = count_words(&pool, None).await?;
    let mut per_mode = Vec::with_capacity(GameMode::ALL.len());
    for mode in GameMode::ALL {
        per_mode.push((mode, count_words(&pool, Some(mode)).await?));
    }
    let per_category = count_words_by_category(&pool).await?;

    pool.close().await;

    Ok(GenerationReport {
        inserted,
        imported,
        total_words,
        per_mode,
        per_category,
    })
}
