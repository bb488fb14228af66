//! tabulaxy-dbgen - Main entry point
//!
//! Writes the pre-built SQLite word database consumed by the game client.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tabulaxy_common::config::load_toml_config;
use tabulaxy_dbgen::{build_banner, run, RunOptions};
use tracing::{error, info};

/// Command-line arguments for tabulaxy-dbgen
#[derive(Parser, Debug)]
#[command(name = "tabulaxy-dbgen")]
#[command(about = "Generate the pre-built Tabulaxy word database")]
#[command(version)]
struct Args {
    /// Output SQLite database path
    #[arg(short, long, env = "TABULAXY_DATABASE")]
    database: Option<PathBuf>,

    /// Synthetic words generated for each mode
    #[arg(short = 'n', long, env = "TABULAXY_WORDS_PER_MODE")]
    words_per_mode: Option<usize>,

    /// Keep an existing database instead of deleting it first
    #[arg(long)]
    keep_existing: bool,

    /// Also load this JSON corpus file into the database
    #[arg(long)]
    import_corpus: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, env = "TABULAXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Tracing is not up yet; config problems surface through anyhow
    let config = load_toml_config(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .init();

    info!("Starting tabulaxy-dbgen {}", build_banner());

    let options = RunOptions {
        db_path: config.resolve_database_path(args.database.as_deref()),
        words_per_mode: args.words_per_mode.unwrap_or(config.generator.words_per_mode),
        keep_existing: args.keep_existing,
        import_corpus: args.import_corpus,
    };
    info!("Database: {}", options.db_path.display());

    let report = match run(&options).await {
        Ok(report) => report,
        Err(e) => {
            error!("Generation failed, no words were committed: {}", e);
            return Err(e).context("Database generation failed");
        }
    };

    info!("Database generated successfully!");
    info!(
        "Inserted {} words ({} from corpus file)",
        report.inserted, report.imported
    );
    for (mode, count) in &report.per_mode {
        info!("  {:<8} {}", mode.name(), count);
    }
    for (category_id, count) in &report.per_category {
        info!("  category {} {}", category_id, count);
    }
    info!("Total Words in DB: {}", report.total_words);

    Ok(())
}
