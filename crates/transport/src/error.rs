//! Transport error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures fetching data over the network or from local storage.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} returned status {actual}, expected {expected}")]
    UnexpectedStatus {
        url: String,
        expected: u16,
        actual: u16,
    },

    #[error("response from {url} has no {header} header")]
    MissingHeader { url: String, header: &'static str },
}

impl TransportError {
    /// Whether the failure is a missing local file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;
