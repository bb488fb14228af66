//! tabulaxy-wordgen - Main entry point
//!
//! Interactive enrichment of the JSON word corpus from the Gemini API.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tabulaxy_common::config::load_toml_config;
use tabulaxy_common::corpus_file::CorpusFile;
use tabulaxy_wordgen::menu::{run_menu, Console, CtrlC};
use tabulaxy_wordgen::{build_banner, GeminiOracle, Pipeline, PipelineSettings};
use tracing::info;

/// Command-line arguments for tabulaxy-wordgen
#[derive(Parser, Debug)]
#[command(name = "tabulaxy-wordgen")]
#[command(about = "Grow the Tabulaxy word corpus with generated cards")]
#[command(version)]
struct Args {
    /// JSON corpus file to enrich
    #[arg(short, long, env = "TABULAXY_CORPUS")]
    corpus: Option<PathBuf>,

    /// Gemini API key (prompted for when absent)
    #[arg(long, env = "TABULAXY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "TABULAXY_MODEL")]
    model: Option<String>,

    /// TOML configuration file
    #[arg(long, env = "TABULAXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_toml_config(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .init();

    info!("Starting tabulaxy-wordgen {}", build_banner());

    if let Some(model) = args.model {
        config.oracle.model = model;
    }

    let store = CorpusFile::new(config.resolve_corpus_path(args.corpus.as_deref()));
    info!("Corpus: {}", store.path().display());

    let mut console = Console::stdio();
    console.say("🤖 Tabulaxy Word Generator")?;
    console.say("--------------------------")?;

    let api_key = match args
        .api_key
        .or_else(|| config.oracle.api_key.clone())
        .filter(|k| !k.trim().is_empty())
    {
        Some(key) => key,
        None => console
            .prompt("Please enter your Gemini API Key: ")
            .await?
            .unwrap_or_default(),
    };
    if api_key.trim().is_empty() {
        bail!("API Key required!");
    }

    let oracle = GeminiOracle::from_config(api_key, &config.oracle).context("Failed to create Gemini client")?;
    info!("Model: {}", oracle.model());

    let pipeline = Pipeline::new(oracle, store, PipelineSettings::from(&config.oracle));
    let mut corpus = pipeline.load_corpus().await.context("Failed to load corpus")?;

    run_menu(&pipeline, &mut corpus, &mut console, &CtrlC)
        .await
        .context("Corpus enrichment failed")?;

    Ok(())
}
