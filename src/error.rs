use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the coherence pipeline
#[derive(Debug, Error)]
pub enum CoherenceError {
    /// Transcript file missing, unreadable or not a list of `[speaker, tokens]` records
    #[error("Failed to deserialize transcript {path:?}: {message}")]
    Deserialization { path: PathBuf, message: String },

    /// Turn merging was given no records
    #[error("Cannot merge an empty record sequence")]
    EmptyInput,

    /// Pipeline options that cannot produce a score
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed embedding table
    #[error("Embedding table error: {0}")]
    Embedding(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoherenceError {
    pub(crate) fn deserialization(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Deserialization {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoherenceError>;
