//! Logging-and-raise helpers for code running inside a job.
//!
//! A failure is logged under a category tag, then either a fresh
//! [`ClientError::Disco`] is raised or the error already in flight is passed
//! on unchanged. Nothing here swallows an error.

use crate::error::{ClientError, Result};
use std::fmt;

/// Log category of a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// General failure.
    Message,
    /// Failure reading a job's input data.
    Data,
}

impl Category {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Message => "MSG",
            Self::Data => "DAT",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Log `message` and return a fresh error carrying it.
pub fn fail(message: impl Into<String>) -> ClientError {
    let message = message.into();
    tracing::error!(category = %Category::Message, "{message}");
    ClientError::Disco(message)
}

/// Log `message` for a data-access failure on `job_input` and return a fresh
/// error carrying it.
pub fn data_fail(message: impl Into<String>, job_input: &str) -> ClientError {
    let message = message.into();
    tracing::error!(category = %Category::Data, job_input, "{message}");
    ClientError::Disco(message)
}

/// Log an in-flight error and re-raise it.
pub trait Escalate<T> {
    /// Log under [`Category::Message`] and pass the error on.
    fn escalate(self, message: &str) -> Result<T>;

    /// Log under [`Category::Data`] with the failing input and pass the
    /// error on.
    fn escalate_data(self, message: &str, job_input: &str) -> Result<T>;
}

impl<T, E: Into<ClientError>> Escalate<T> for std::result::Result<T, E> {
    fn escalate(self, message: &str) -> Result<T> {
        self.map_err(|err| {
            let err = err.into();
            tracing::error!(category = %Category::Message, error = %err, "{message}");
            err
        })
    }

    fn escalate_data(self, message: &str, job_input: &str) -> Result<T> {
        self.map_err(|err| {
            let err = err.into();
            tracing::error!(
                category = %Category::Data,
                job_input,
                error = %err,
                "{message}"
            );
            err
        })
    }
}
