//! Server bookmark list (`servers.dat`)
//!
//! The game keeps its multiplayer bookmarks in a tagged tree: an unnamed
//! root compound with one `servers` list of entry compounds. This module
//! maps that tree to [`ServerList`] and back, and provides the keyed
//! operations used to edit it.
//!
//! # Example
//!
//! ```
//! use serverlist_formats::NbtFormat;
//! use serverlist_formats::servers::{ServerEntry, ServerList, load, upsert};
//!
//! let list = upsert(load(None), ServerEntry::new("Club", "179.61.190.50:25565"));
//! let bytes = list.build().expect("build");
//!
//! let reread = load(Some(&bytes));
//! assert_eq!(reread.find("179.61.190.50:25565").map(|e| e.name.as_str()), Some("Club"));
//! ```

mod entry;
mod error;
mod list;
mod merge;

pub use entry::{FIELD_ACCEPT_TEXTURES, FIELD_ADDRESS, FIELD_ICON, FIELD_NAME, ServerEntry};
pub use error::{ServerListError, ServerListResult};
pub use list::{SERVERS_KEY, ServerList};
pub use merge::{load, remove, upsert};
