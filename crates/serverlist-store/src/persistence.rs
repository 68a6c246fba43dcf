//! Byte storage backends
//!
//! The editor only needs "read these bytes if they exist" and "replace
//! these bytes". [`FsPersistence`] does that on disk with an atomic
//! rename, [`MemoryPersistence`] keeps everything in a map.

use crate::error::{Result, StoreError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage of whole files by path
pub trait Persistence: Send + Sync {
    /// Read a file; a missing file is `Ok(None)`
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace a file's contents
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// Filesystem storage with atomic replacement
///
/// Writes go to `<file>.tmp`, are synced, then renamed over the target, so
/// readers see either the old or the new contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPersistence;

impl FsPersistence {
    /// Create filesystem storage
    pub const fn new() -> Self {
        Self
    }

    fn write_temp(path: &Path, data: &[u8]) -> Result<()> {
        let mut file = File::create(path).map_err(|e| StoreError::io(path, e))?;
        file.write_all(data).map_err(|e| StoreError::io(path, e))?;
        file.flush().map_err(|e| StoreError::io(path, e))?;
        file.sync_all().map_err(|e| StoreError::io(path, e))?;
        Ok(())
    }
}

impl Persistence for FsPersistence {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(data) => {
                debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let temp_path = temp_path(path);
        let result = Self::write_temp(&temp_path, data)
            .and_then(|()| fs::rename(&temp_path, path).map_err(|e| StoreError::io(path, e)));

        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("Failed to remove {}: {}", temp_path.display(), cleanup);
                }
            }
            return Err(e);
        }

        debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

/// `servers.dat` -> `servers.dat.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryPersistence {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    pub fn insert(&self, path: impl Into<PathBuf>, data: Vec<u8>) {
        self.files.lock().insert(path.into(), data);
    }

    /// Current contents of a file
    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().get(path).cloned()
    }
}

impl Persistence for MemoryPersistence {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        Ok(self.get(path))
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.insert(path, data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().expect("tempdir");
        let read = FsPersistence::new()
            .read(&dir.path().join("servers.dat"))
            .expect("read");
        assert!(read.is_none());
    }

    #[test]
    fn test_write_creates_parent_and_replaces() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested/game/servers.dat");
        let store = FsPersistence::new();

        store.write(&path, b"first").expect("first write");
        store.write(&path, b"second").expect("second write");

        assert_eq!(store.read(&path).expect("read"), Some(b"second".to_vec()));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_failed_rename_cleans_up() {
        let dir = TempDir::new().expect("tempdir");
        // a directory in the target's place makes the rename fail
        let path = dir.path().join("servers.dat");
        fs::create_dir(&path).expect("blocker");
        fs::write(path.join("keep"), b"x").expect("non-empty blocker");

        let err = FsPersistence::new().write(&path, b"data").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let err = FsPersistence::new().read(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/a/servers.dat")),
            PathBuf::from("/a/servers.dat.tmp")
        );
    }

    #[test]
    fn test_memory_persistence() {
        let store = MemoryPersistence::new();
        let path = Path::new("mem/servers.dat");
        assert_eq!(store.read(path).expect("read"), None);
        store.write(path, b"abc").expect("write");
        assert_eq!(store.read(path).expect("read"), Some(b"abc".to_vec()));
    }
}
