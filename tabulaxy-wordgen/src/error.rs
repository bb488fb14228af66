//! Oracle client errors

use thiserror::Error;

/// Failure of a single oracle call
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API key required")]
    MissingApiKey,
}

impl From<OracleError> for tabulaxy_common::Error {
    fn from(err: OracleError) -> Self {
        tabulaxy_common::Error::RequestFailed(err.to_string())
    }
}
