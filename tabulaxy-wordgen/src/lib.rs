//! tabulaxy-wordgen - incremental corpus enrichment
//!
//! Grows the JSON word corpus one batch at a time from a text oracle.
//! Each batch is requested, parsed out of free-form text, normalized and
//! deduplicated against the known targets, then written back with a
//! rotating backup. Batches run either one at a time from the menu or in
//! an unattended loop over every (category, difficulty) cell.

pub mod candidate;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod menu;
pub mod oracle;
pub mod pipeline;
pub mod prompt;

pub use corpus::{Corpus, MergeReport};
pub use error::OracleError;
pub use oracle::{GeminiOracle, WordOracle};
pub use pipeline::{AutoLoopSummary, BatchOutcome, Pipeline, PipelineSettings};

/// Build identification for the startup log line
///
/// Version, commit, build time and profile as stamped by `build.rs`.
pub fn build_banner() -> String {
    format!(
        "v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}
