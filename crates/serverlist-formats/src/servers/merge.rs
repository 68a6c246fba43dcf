//! Keyed updates over a server list
//!
//! Entries are keyed by their exact address string. None of these
//! functions fail: a missing key on removal and a new key on upsert are
//! ordinary outcomes.

use super::entry::ServerEntry;
use super::list::ServerList;
use crate::NbtFormat;
use tracing::{debug, warn};

/// Insert or update an entry by address
///
/// On a match only the name, and the resource pack flag when `entry`
/// carries one, are replaced; the icon, unknown fields and every other
/// entry stay as they were. Without a match the entry is appended.
pub fn upsert(mut list: ServerList, entry: ServerEntry) -> ServerList {
    match list.position(&entry.address) {
        Some(index) => {
            debug!("Updating server {} at position {}", entry.address, index);
            let existing = &mut list.entries_mut()[index];
            existing.name = entry.name;
            if entry.accept_resource_pack.is_some() {
                existing.accept_resource_pack = entry.accept_resource_pack;
            }
        }
        None => {
            debug!("Appending server {} ({})", entry.name, entry.address);
            list.entries_mut().push(entry);
        }
    }
    list
}

/// Remove every entry with this address
///
/// Returns the new list and whether anything was removed.
pub fn remove(mut list: ServerList, address: &str) -> (ServerList, bool) {
    let before = list.len();
    list.entries_mut().retain(|entry| entry.address != address);
    let removed = list.len() != before;
    if removed {
        debug!("Removed {} entries for {}", before - list.len(), address);
    }
    (list, removed)
}

/// Load a list, starting fresh when the bytes are absent or unreadable
///
/// Decode and schema errors are logged and replaced by an empty list so a
/// damaged file never blocks adding a server.
pub fn load(data: Option<&[u8]>) -> ServerList {
    let Some(data) = data else {
        debug!("No existing server list, starting empty");
        return ServerList::new();
    };

    match ServerList::parse(data) {
        Ok(list) => list,
        Err(e) => {
            warn!("Discarding unreadable server list ({} bytes): {}", data.len(), e);
            ServerList::new()
        }
    }
}
