//! Storage error types

use serverlist_formats::nbt::NbtError;
use serverlist_formats::servers::ServerListError;
use std::path::PathBuf;
use thiserror::Error;

/// Storage error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The list could not be encoded
    #[error("failed to encode server list: {0}")]
    Encode(#[from] ServerListError),

    /// The encoded list could not be compressed
    #[error("failed to compress server list: {0}")]
    Compression(#[source] NbtError),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create an I/O error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
