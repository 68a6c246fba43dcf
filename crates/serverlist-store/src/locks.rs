//! Per-path write locks
//!
//! Two editors pointing at the same file inside one process share a mutex
//! through a [`PathLocks`] handle, so their read-modify-write cycles never
//! interleave. The handle is cheap to clone; clones share the same table.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared table of per-path mutexes
#[derive(Debug, Clone, Default)]
pub struct PathLocks {
    locks: Arc<DashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutex guarding `path`, created on first use
    pub fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.get(path) {
            return Arc::clone(lock.value());
        }
        Arc::clone(
            self.locks
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }

    /// Number of paths seen so far
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no path has been locked yet
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_same_path_same_mutex() {
        let locks = PathLocks::new();
        let a = locks.lock_for(Path::new("/x/servers.dat"));
        let b = locks.clone().lock_for(Path::new("/x/servers.dat"));
        let c = locks.lock_for(Path::new("/y/servers.dat"));

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(locks.len(), 2);
    }

    #[test]
    fn test_lock_is_exclusive() {
        let locks = PathLocks::new();
        let lock = locks.lock_for(Path::new("servers.dat"));
        let guard = lock.lock();

        let other = locks.clone();
        let contended = thread::spawn(move || {
            let lock = other.lock_for(Path::new("servers.dat"));
            lock.try_lock().is_none()
        })
        .join()
        .expect("thread");
        assert!(contended);
        drop(guard);
        assert!(lock.try_lock().is_some());
    }
}
