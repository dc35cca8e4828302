//! Error types for the log store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or loading the log collection.
#[derive(Debug, Error)]
pub enum LogError {
    /// Rewriting the backing document failed. The collection on disk is
    /// whatever it was before the attempt; the entry was not stored.
    #[error("failed to persist log collection to {}: {source}", path.display())]
    Persistence {
        /// Path of the backing document.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred while creating or probing the backing document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, LogError>;
