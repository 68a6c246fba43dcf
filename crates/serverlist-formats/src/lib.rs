//! Tagged binary tree codec and server bookmark list model
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_possible_wrap)] // Intentional for binary operations
#![allow(clippy::cast_sign_loss)] // Length prefixes are range checked first
#![allow(clippy::doc_markdown)] // Tag names don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::float_cmp)] // Binary format requirements
#![allow(clippy::needless_pass_by_value)] // Entries are moved into lists
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! This crate provides symmetric (parser and builder) implementations for the
//! tagged binary tree format used by the game's data files, plus the typed
//! model of the multiplayer server list stored in `servers.dat`.
//!
//! # Modules
//!
//! - **nbt**: Lossless tree codec with optional gzip/zlib envelope
//! - **servers**: Server list schema and keyed upsert/remove operations
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Bounded Decoding**: Untrusted input can't trigger huge allocations or
//!   unbounded recursion
//! - **Round-Trip Guarantee**: parse(build(data)) == data

#![warn(missing_docs)]

/// Tagged binary tree codec
///
/// See the [`nbt`] module for the wire grammar and limits.
pub mod nbt;
/// Server bookmark list model and merge operations
pub mod servers;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

use nbt::{NamedNode, NbtError};

/// Common format trait for everything stored as a tagged tree
pub trait NbtFormat: Sized {
    /// Error returned by parsing and building
    type Error: std::error::Error + From<NbtError>;

    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self, Self::Error>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>, Self::Error>;

    /// Check whether rebuilding parsed data reproduces it byte for byte
    ///
    /// Compressed input never does, since building doesn't compress.
    fn verify_round_trip(data: &[u8]) -> Result<bool, Self::Error> {
        let rebuilt = Self::parse(data)?.build()?;
        Ok(data == rebuilt.as_slice())
    }
}

impl NbtFormat for NamedNode {
    type Error = NbtError;

    fn parse(data: &[u8]) -> Result<Self, Self::Error> {
        nbt::decode(data)
    }

    fn build(&self) -> Result<Vec<u8>, Self::Error> {
        nbt::encode(self)
    }
}
