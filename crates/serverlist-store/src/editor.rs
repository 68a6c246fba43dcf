//! Read-modify-write of one server list file

use crate::config::ServerListConfig;
use crate::error::{Result, StoreError};
use crate::locks::PathLocks;
use crate::persistence::{FsPersistence, Persistence};
use serverlist_formats::NbtFormat;
use serverlist_formats::nbt::{Compression, compress};
use serverlist_formats::servers::{self, ServerEntry, ServerList};
use std::path::PathBuf;
use tracing::{debug, info};

/// Editor for the server list file named by a [`ServerListConfig`]
///
/// Reads are tolerant: a missing or unreadable file is an empty list.
/// Writes replace the whole file.
///
/// [`upsert`](Self::upsert) and [`remove`](Self::remove) hold the path's
/// lock from [`PathLocks`] across the read and the write, so editors
/// sharing a lock table never lose each other's updates. Nothing stops
/// another process, such as a running game client, from rewriting the
/// file in between; callers needing that guarantee must coordinate
/// themselves.
#[derive(Debug)]
pub struct ServerListEditor<P: Persistence = FsPersistence> {
    config: ServerListConfig,
    persistence: P,
    locks: PathLocks,
}

impl ServerListEditor<FsPersistence> {
    /// Create an editor over the filesystem
    pub fn new(config: ServerListConfig) -> Self {
        Self::with_persistence(config, FsPersistence::new())
    }
}

impl<P: Persistence> ServerListEditor<P> {
    /// Create an editor over a custom backend
    ///
    /// The editor gets a private [`PathLocks`] table; use
    /// [`with_locks`](Self::with_locks) to exclude other editors.
    pub fn with_persistence(config: ServerListConfig, persistence: P) -> Self {
        Self {
            config,
            persistence,
            locks: PathLocks::new(),
        }
    }

    /// Share a lock table with other editors
    ///
    /// Editors holding clones of the same table serialize their updates to
    /// a given path when `lock_in_process` is enabled.
    #[must_use]
    pub fn with_locks(mut self, locks: PathLocks) -> Self {
        self.locks = locks;
        self
    }

    /// Editor configuration
    pub const fn config(&self) -> &ServerListConfig {
        &self.config
    }

    /// Storage backend
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Path of the edited file
    pub fn path(&self) -> PathBuf {
        self.config.file_path()
    }

    /// Raw file contents, `None` if the file doesn't exist
    pub fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.persistence.read(&self.path())
    }

    /// Current list
    ///
    /// Decode and schema problems yield an empty list; only I/O failures
    /// other than a missing file are errors.
    pub fn read(&self) -> Result<ServerList> {
        let data = self.read_bytes()?;
        Ok(servers::load(data.as_deref()))
    }

    /// Current list; alias of [`read`](Self::read)
    pub fn list(&self) -> Result<ServerList> {
        self.read()
    }

    /// Encode and store a list, replacing the file
    pub fn write(&self, list: &ServerList) -> Result<()> {
        let encoded = list.build()?;
        let data = match self.config.compression {
            Compression::None => encoded,
            mode => compress(&encoded, mode).map_err(StoreError::Compression)?,
        };
        let path = self.path();
        self.persistence.write(&path, &data)?;
        debug!(
            "Stored {} servers in {} ({})",
            list.len(),
            path.display(),
            self.config.compression
        );
        Ok(())
    }

    /// Insert or update a server by address and store the result
    pub fn upsert(&self, entry: ServerEntry) -> Result<ServerList> {
        let address = entry.address.clone();
        let (list, _) = self.modify(|list| (servers::upsert(list, entry), true))?;
        info!("Saved server {} ({} total)", address, list.len());
        Ok(list)
    }

    /// Remove a server by address
    ///
    /// Returns whether an entry was removed. The file is left untouched
    /// when nothing matched.
    pub fn remove(&self, address: &str) -> Result<bool> {
        let (_, removed) = self.modify(|list| servers::remove(list, address))?;
        if removed {
            info!("Removed server {}", address);
        } else {
            debug!("No server with address {}", address);
        }
        Ok(removed)
    }

    /// Run one read-modify-write cycle under the path lock
    ///
    /// `change` returns the new list and whether it must be written.
    fn modify<F>(&self, change: F) -> Result<(ServerList, bool)>
    where
        F: FnOnce(ServerList) -> (ServerList, bool),
    {
        let lock = self
            .config
            .lock_in_process
            .then(|| self.locks.lock_for(&self.path()));
        let _guard = lock.as_ref().map(|lock| lock.lock());

        let (list, changed) = change(self.read()?);
        if changed {
            self.write(&list)?;
        }
        Ok((list, changed))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use pretty_assertions::assert_eq;
    use serverlist_formats::nbt::decode;
    use std::path::Path;

    fn memory_editor() -> ServerListEditor<MemoryPersistence> {
        ServerListEditor::with_persistence(ServerListConfig::new("mem"), MemoryPersistence::new())
    }

    #[test]
    fn test_missing_file_lists_empty() {
        let editor = memory_editor();
        assert!(editor.list().expect("list").is_empty());
        assert!(editor.read_bytes().expect("bytes").is_none());
    }

    #[test]
    fn test_upsert_then_update() {
        let editor = memory_editor();
        editor
            .upsert(ServerEntry::new("Club", "179.61.190.50:25565"))
            .expect("first upsert");
        let list = editor
            .upsert(ServerEntry::new("Club2", "179.61.190.50:25565"))
            .expect("second upsert");

        assert_eq!(list.len(), 1);
        assert_eq!(editor.list().expect("list"), list);
        assert_eq!(list.entries()[0].name, "Club2");
    }

    #[test]
    fn test_remove_missing_does_not_write() {
        let editor = memory_editor();
        assert!(!editor.remove("nowhere").expect("remove"));
        assert!(editor.persistence().get(Path::new("mem/servers.dat")).is_none());
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_upsert() {
        let editor = memory_editor();
        editor
            .persistence()
            .insert("mem/servers.dat", b"garbage".to_vec());

        assert!(editor.list().expect("list").is_empty());
        editor
            .upsert(ServerEntry::new("Fresh", "fresh.example.net"))
            .expect("upsert");
        assert_eq!(editor.list().expect("list").len(), 1);
    }

    #[test]
    fn test_compressed_write() {
        let editor = ServerListEditor::with_persistence(
            ServerListConfig::new("mem").with_compression(Compression::Gzip),
            MemoryPersistence::new(),
        );
        editor
            .upsert(ServerEntry::new("Zipped", "z.example.net"))
            .expect("upsert");

        let raw = editor.read_bytes().expect("read").expect("file");
        assert_eq!(Compression::detect(&raw), Compression::Gzip);
        assert!(decode(&raw).is_ok());
        assert_eq!(editor.list().expect("list").len(), 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Edit {
            Upsert(ServerEntry),
            Remove(String),
        }

        fn address() -> impl Strategy<Value = String> {
            "[a-c]\\.example\\.net(:2556[0-9])?"
        }

        fn edit() -> impl Strategy<Value = Edit> {
            prop_oneof![
                (
                    "[A-Za-z ]{1,12}",
                    address(),
                    proptest::option::of(any::<bool>())
                )
                    .prop_map(|(name, address, flag)| {
                        let mut entry = ServerEntry::new(name, address);
                        entry.accept_resource_pack = flag;
                        Edit::Upsert(entry)
                    }),
                address().prop_map(Edit::Remove),
            ]
        }

        proptest! {
            /// Stored state always equals the pure merge result
            #[test]
            fn editor_matches_merge_functions(
                edits in prop::collection::vec(edit(), 0..24),
                gzip in any::<bool>(),
            ) {
                let compression = if gzip { Compression::Gzip } else { Compression::None };
                let editor = ServerListEditor::with_persistence(
                    ServerListConfig::new("mem").with_compression(compression),
                    MemoryPersistence::new(),
                );
                let mut expected = ServerList::new();

                for edit in edits {
                    match edit {
                        Edit::Upsert(entry) => {
                            expected = servers::upsert(expected, entry.clone());
                            let stored = editor.upsert(entry).expect("upsert");
                            prop_assert_eq!(&stored, &expected);
                        }
                        Edit::Remove(address) => {
                            let (next, removed) = servers::remove(expected, &address);
                            expected = next;
                            prop_assert_eq!(editor.remove(&address).expect("remove"), removed);
                        }
                    }
                    prop_assert_eq!(&editor.list().expect("list"), &expected);
                }
            }
        }
    }
}
