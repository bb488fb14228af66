//! Batch pipeline: request, validate, merge, persist
//!
//! One batch walks the phases in order:
//!
//! 1. **Requesting**: render the prompt and await the oracle
//! 2. **Validating**: locate and parse the JSON array
//! 3. **Merging**: normalize candidates into the corpus
//! 4. **Persisting**: atomically replace the corpus file
//!
//! The cancellation token is checked before requesting and before
//! merging, and races the in-flight request and the auto-loop pauses.
//! Persisting always runs to completion once merging has started.

use crate::corpus::{Corpus, MergeReport};
use crate::extract::parse_candidates;
use crate::oracle::WordOracle;
use crate::prompt::GenerationRequest;
use std::time::Duration;
use tabulaxy_common::config::OracleConfig;
use tabulaxy_common::corpus_file::CorpusFile;
use tabulaxy_common::{Category, Difficulty, Error, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Upper bound for an operator-chosen batch size
pub const MAX_BATCH_COUNT: usize = 50;

/// Tunables for batches and the auto-loop
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Words requested per auto-loop batch
    pub batch_size: usize,
    pub known_sample_size: usize,
    pub success_pause: Duration,
    pub failure_pause: Duration,
}

impl From<&OracleConfig> for PipelineSettings {
    fn from(config: &OracleConfig) -> Self {
        Self {
            batch_size: config.batch_size.clamp(1, MAX_BATCH_COUNT),
            known_sample_size: config.known_sample_size,
            success_pause: Duration::from_secs(config.success_pause_secs),
            failure_pause: Duration::from_secs(config.failure_pause_secs),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&OracleConfig::default())
    }
}

/// Outcome of one completed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub category: Category,
    pub difficulty: Difficulty,
    pub requested: usize,
    pub report: MergeReport,
    /// False when nothing was added and the file was left alone
    pub persisted: bool,
}

/// Totals for one auto-loop run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoLoopSummary {
    pub batches: usize,
    pub failed_batches: usize,
    pub added: usize,
}

/// Every (category, difficulty) pair, category-major
pub fn grid() -> Vec<(Category, Difficulty)> {
    Category::ALL
        .into_iter()
        .flat_map(|c| Difficulty::ALL.into_iter().map(move |d| (c, d)))
        .collect()
}

pub struct Pipeline<O: WordOracle> {
    oracle: O,
    store: CorpusFile,
    settings: PipelineSettings,
}

impl<O: WordOracle> Pipeline<O> {
    pub fn new(oracle: O, store: CorpusFile, settings: PipelineSettings) -> Self {
        Self {
            oracle,
            store,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn store(&self) -> &CorpusFile {
        &self.store
    }

    /// Load the corpus this pipeline persists to
    pub async fn load_corpus(&self) -> Result<Corpus> {
        let store = self.store.clone();
        let entries = tokio::task::spawn_blocking(move || store.load())
            .await
            .map_err(|e| Error::Corpus(format!("Load task join error: {}", e)))??;
        Ok(Corpus::from_entries(entries))
    }

    /// Write the whole corpus off the async worker threads
    ///
    /// Awaited to completion once started; the replace itself is atomic.
    async fn persist(&self, corpus: &Corpus) -> Result<()> {
        let store = self.store.clone();
        let entries = corpus.entries().to_vec();
        tokio::task::spawn_blocking(move || store.persist(&entries))
            .await
            .map_err(|e| Error::Corpus(format!("Persist task join error: {}", e)))?
    }

    /// Run one batch for an explicit cell
    ///
    /// Returns `InterruptRequested` if `cancel` fires before merging;
    /// in that case the corpus and the file are untouched.
    pub async fn run_batch(
        &self,
        corpus: &mut Corpus,
        category: Category,
        difficulty: Difficulty,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<BatchOutcome> {
        if count == 0 || count > MAX_BATCH_COUNT {
            return Err(Error::Config(format!(
                "Batch count must be between 1 and {}, got {}",
                MAX_BATCH_COUNT, count
            )));
        }
        if cancel.is_cancelled() {
            return Err(Error::InterruptRequested);
        }

        let request = GenerationRequest::new(
            category,
            difficulty,
            count,
            corpus.known_sample(self.settings.known_sample_size),
        );
        let prompt = request.render();

        let text = tokio::select! {
            biased;
            result = self.oracle.generate(&prompt) => result?,
            _ = cancel.cancelled() => {
                info!("Request abandoned on interrupt");
                return Err(Error::InterruptRequested);
            }
        };

        let candidates = parse_candidates(&text)?;

        if cancel.is_cancelled() {
            return Err(Error::InterruptRequested);
        }

        let report = corpus.merge(candidates);

        let persisted = if report.added.is_empty() {
            false
        } else {
            self.persist(corpus).await?;
            true
        };

        Ok(BatchOutcome {
            category,
            difficulty,
            requested: count,
            report,
            persisted,
        })
    }

    /// Cycle over the whole grid until `cancel` fires
    ///
    /// Recoverable batch failures are logged and followed by the failure
    /// pause; any other error ends the loop and is returned.
    pub async fn run_auto_loop(
        &self,
        corpus: &mut Corpus,
        cancel: &CancellationToken,
    ) -> Result<AutoLoopSummary> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("auto_loop", %run_id, oracle = self.oracle.name());
        self.cycle_grid(corpus, cancel).instrument(span).await
    }

    async fn cycle_grid(
        &self,
        corpus: &mut Corpus,
        cancel: &CancellationToken,
    ) -> Result<AutoLoopSummary> {
        let mut summary = AutoLoopSummary::default();

        for (category, difficulty) in grid().into_iter().cycle() {
            if cancel.is_cancelled() {
                break;
            }

            info!(
                "Processing category {} ({}), difficulty {} ({})",
                category.id(),
                category,
                difficulty.id(),
                difficulty
            );

            let pause = match self
                .run_batch(corpus, category, difficulty, self.settings.batch_size, cancel)
                .await
            {
                Ok(outcome) => {
                    summary.batches += 1;
                    summary.added += outcome.report.added_count();
                    info!(
                        "✅ Added {} words. Total: {}",
                        outcome.report.added_count(),
                        corpus.len()
                    );
                    self.settings.success_pause
                }
                Err(Error::InterruptRequested) => break,
                Err(e) if e.is_recoverable() => {
                    summary.batches += 1;
                    summary.failed_batches += 1;
                    warn!("⚠️ Generation failed for this batch: {}", e);
                    self.settings.failure_pause
                }
                Err(e) => return Err(e),
            };

            tokio::select! {
                _ = tokio::time::sleep(pause) => {}
                _ = cancel.cancelled() => break,
            }
        }

        info!(
            batches = summary.batches,
            failed = summary.failed_batches,
            added = summary.added,
            "Auto-generation stopped"
        );
        Ok(summary)
    }
}
