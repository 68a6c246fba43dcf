//! Server list error types

use crate::nbt::{NbtError, Tag};
use thiserror::Error;

/// Server list error type
#[derive(Debug, Error)]
pub enum ServerListError {
    /// The bytes are not a valid tagged tree
    #[error("malformed server list: {0}")]
    Nbt(#[from] NbtError),

    /// The tree is valid but does not follow the server list schema
    #[error(
        "schema mismatch at {location}: expected {expected}, found {}",
        .found.map_or("nothing", Tag::name)
    )]
    SchemaMismatch {
        /// Path of the offending value, e.g. `servers[2].ip`
        location: String,
        /// Tag the schema requires
        expected: Tag,
        /// Tag present in the tree, `None` when a required field is missing
        found: Option<Tag>,
    },
}

/// Result type for server list operations
pub type ServerListResult<T> = Result<T, ServerListError>;

impl ServerListError {
    /// Create a schema mismatch error
    pub fn schema_mismatch(location: impl Into<String>, expected: Tag, found: Option<Tag>) -> Self {
        Self::SchemaMismatch {
            location: location.into(),
            expected,
            found,
        }
    }

    /// Check if the tree decoded but violated the schema
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }

    /// Check if the bytes did not follow the binary grammar
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Self::Nbt(error) => error.is_malformed_input(),
            Self::SchemaMismatch { .. } => false,
        }
    }
}
