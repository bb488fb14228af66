//! Common error types for Tabulaxy

use thiserror::Error;

/// Common result type for Tabulaxy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Tabulaxy corpus tools
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// DDL or reference data failure while building the schema (fatal)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Word batch transaction failed; nothing from the batch was committed (fatal)
    #[error("Bulk insert failed: {0}")]
    BulkInsert(String),

    /// Oracle call failed or its response could not be parsed (recoverable)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Candidate entry excluded from a merge
    #[error("Validation skipped: {0}")]
    ValidationSkipped(String),

    /// Operator cancelled the running operation
    #[error("Interrupt requested")]
    InterruptRequested,

    /// Unrecognized game mode name
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    /// Corpus file exists but could not be loaded or replaced
    #[error("Corpus file error: {0}")]
    Corpus(String),
}

impl Error {
    /// Whether the pipeline may continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::RequestFailed(_) | Error::ValidationSkipped(_)
        )
    }
}
