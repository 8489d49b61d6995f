//! Error types for the smoke run.
//!
//! # Design
//! A run has one failure class that matters to the operator: the round-trip
//! did not complete. `TransportError` carries the URL that failed plus the
//! underlying cause from whichever HTTP client the host plugged in. Status
//! codes are never errors here; a 500 is printed like a 200.

use std::error::Error as StdError;

/// Boxed cause produced by a `Transport` implementation.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A request could not be completed: refused connection, DNS failure, or a
/// reply that was not valid HTTP.
#[derive(Debug, thiserror::Error)]
#[error("POST {url} failed: {source}")]
pub struct TransportError {
    pub url: String,
    #[source]
    pub source: BoxError,
}

impl TransportError {
    pub fn new(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The query payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Writing the report to the output sink failed.
    #[error("writing report failed: {0}")]
    Output(#[from] std::io::Error),
}
