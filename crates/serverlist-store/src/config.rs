//! Configuration for the server list store

use serde::{Deserialize, Serialize};
use serverlist_formats::nbt::Compression;
use std::path::{Path, PathBuf};

/// Default server list file name inside the game directory
pub const DEFAULT_FILE_NAME: &str = "servers.dat";

/// Configuration for a server list file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerListConfig {
    /// Game directory holding the file
    pub game_dir: PathBuf,

    /// File name inside `game_dir`
    pub file_name: String,

    /// Envelope applied when writing; reads detect it
    pub compression: Compression,

    /// Take the editor's per-path lock around each read-modify-write
    ///
    /// Every editor starts with its own lock table, so two editors only
    /// exclude each other when they share one through
    /// [`ServerListEditor::with_locks`](crate::ServerListEditor::with_locks).
    pub lock_in_process: bool,
}

impl Default for ServerListConfig {
    fn default() -> Self {
        Self {
            game_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            compression: Compression::None,
            lock_in_process: true,
        }
    }
}

impl ServerListConfig {
    /// Create a new configuration for the specified game directory
    pub fn new<P: AsRef<Path>>(game_dir: P) -> Self {
        Self {
            game_dir: game_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Set the game directory
    #[must_use]
    pub fn with_game_dir<P: AsRef<Path>>(mut self, game_dir: P) -> Self {
        self.game_dir = game_dir.as_ref().to_path_buf();
        self
    }

    /// Set the file name
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the envelope used when writing
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Enable or disable in-process write locking
    #[must_use]
    pub const fn with_lock_in_process(mut self, enable: bool) -> Self {
        self.lock_in_process = enable;
        self
    }

    /// Full path of the server list file
    pub fn file_path(&self) -> PathBuf {
        self.game_dir.join(&self.file_name)
    }
}
