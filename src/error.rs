use std::path::PathBuf;

use thiserror::Error;

/// Synchronous rejection of a job submission, raised before any job state exists
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("audio file not found: {0:?}")]
    MissingFile(PathBuf),

    #[error("unsupported audio extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("notification address is empty")]
    MissingRecipient,

    #[error("notification address is not valid: {0:?}")]
    InvalidRecipient(String),

    #[error("job queue is full, try again later")]
    QueueFull,

    #[error("job queue is closed")]
    QueueClosed,
}

impl SubmitError {
    /// Short machine-readable code for each rejection
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingFile(_) => "missing_file",
            Self::UnsupportedExtension(_) => "unsupported_extension",
            Self::MissingRecipient => "missing_recipient",
            Self::InvalidRecipient(_) => "invalid_recipient",
            Self::QueueFull => "queue_full",
            Self::QueueClosed => "queue_closed",
        }
    }
}
