//! Server bookmark file storage
//!
//! This crate applies the keyed operations of
//! [`serverlist_formats::servers`] to a `servers.dat` file on disk:
//!
//! - **Persistence**: pluggable byte storage with an atomic filesystem
//!   implementation and an in-memory one
//! - **Locks**: per-path mutexes serializing writers inside one process
//! - **Editor**: read-modify-write of a single server list file
//!
//! # Example
//!
//! ```no_run
//! use serverlist_store::{ServerListConfig, ServerListEditor};
//! use serverlist_formats::servers::ServerEntry;
//!
//! # fn example() -> Result<(), serverlist_store::StoreError> {
//! let config = ServerListConfig::new("/home/player/.minecraft");
//! let editor = ServerListEditor::new(config);
//!
//! editor.upsert(ServerEntry::new("Club", "179.61.190.50:25565"))?;
//! for entry in editor.list()?.iter() {
//!     println!("{} {}", entry.name, entry.address);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![allow(clippy::must_use_candidate)]

// Configuration
pub mod config;

// Byte storage backends
pub mod persistence;

// In-process write serialization
pub mod locks;

// Read-modify-write over one file
mod editor;

mod error;

pub use config::ServerListConfig;
pub use editor::ServerListEditor;
pub use error::{Result, StoreError};
pub use locks::PathLocks;
pub use persistence::{FsPersistence, MemoryPersistence, Persistence};
