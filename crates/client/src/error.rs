//! Client error types.

use disco_transport::TransportError;
use thiserror::Error;

/// Errors surfaced by data resolution.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Core(#[from] disco_core::Error),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A failure raised by caller code through [`crate::escalation::fail`].
    #[error("{0}")]
    Disco(String),
}

impl ClientError {
    /// The address did not fit the scheme the operation requires.
    pub fn is_address(&self) -> bool {
        matches!(self, Self::Core(disco_core::Error::Address(_)))
    }

    /// A directory index or redirect location was malformed.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Core(disco_core::Error::Format(_)))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
