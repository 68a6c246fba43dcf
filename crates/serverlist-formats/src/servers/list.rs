//! Ordered server bookmark list and its tree schema
//!
//! ```text
//! "" (Compound)
//! └── servers (List of Compound, End when empty)
//!     └── { name: String, ip: String, icon?: String, acceptTextures?: Byte, ... }
//! ```

use super::entry::ServerEntry;
use super::error::{ServerListError, ServerListResult};
use crate::NbtFormat;
use crate::nbt::{Compound, NamedNode, Node, NodeList, Tag, decode, encode};

/// Root member holding the entries
pub const SERVERS_KEY: &str = "servers";

/// Ordered list of server bookmarks
///
/// Order is what the player sees in the server browser and is never
/// changed by this type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerList {
    entries: Vec<ServerEntry>,
}

impl ServerList {
    /// Create an empty list
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Wrap existing entries
    pub fn from_entries(entries: Vec<ServerEntry>) -> Self {
        Self { entries }
    }

    /// Entries in display order
    pub fn entries(&self) -> &[ServerEntry] {
        &self.entries
    }

    /// Take the entries out of the list
    pub fn into_entries(self) -> Vec<ServerEntry> {
        self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in display order
    pub fn iter(&self) -> std::slice::Iter<'_, ServerEntry> {
        self.entries.iter()
    }

    /// Position of the first entry with this exact address
    pub fn position(&self, address: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.address == address)
    }

    /// First entry with this exact address
    pub fn find(&self, address: &str) -> Option<&ServerEntry> {
        self.entries.iter().find(|entry| entry.address == address)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<ServerEntry> {
        &mut self.entries
    }

    /// Read the list from a decoded tree
    ///
    /// A root without a `servers` member is an empty list. Any schema
    /// violation fails the whole load; no partial list is returned.
    pub fn from_tree(root: NamedNode) -> ServerListResult<Self> {
        let mut compound = match root.node {
            Node::Compound(compound) => compound,
            other => {
                return Err(ServerListError::schema_mismatch(
                    "root",
                    Tag::Compound,
                    Some(other.tag()),
                ));
            }
        };

        let Some(servers) = compound.remove(SERVERS_KEY) else {
            return Ok(Self::new());
        };

        let list = match servers {
            Node::List(list) => list,
            other => {
                return Err(ServerListError::schema_mismatch(
                    SERVERS_KEY,
                    Tag::List,
                    Some(other.tag()),
                ));
            }
        };

        if list.is_empty() {
            return Ok(Self::new());
        }
        if list.element_tag() != Tag::Compound {
            return Err(ServerListError::schema_mismatch(
                format!("{SERVERS_KEY}[]"),
                Tag::Compound,
                Some(list.element_tag()),
            ));
        }

        let entries = list
            .into_items()
            .into_iter()
            .enumerate()
            .map(|(index, node)| match node {
                Node::Compound(entry) => ServerEntry::from_compound(index, entry),
                other => Err(ServerListError::schema_mismatch(
                    format!("{SERVERS_KEY}[{index}]"),
                    Tag::Compound,
                    Some(other.tag()),
                )),
            })
            .collect::<ServerListResult<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Build the tree: an unnamed compound with exactly one `servers` member
    pub fn to_tree(&self) -> NamedNode {
        let servers = NodeList::from_compounds(self.entries.iter().map(ServerEntry::to_compound));
        let mut root = Compound::new();
        root.insert(SERVERS_KEY, servers);
        NamedNode::unnamed(root)
    }
}

impl NbtFormat for ServerList {
    type Error = ServerListError;

    fn parse(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_tree(decode(data)?)
    }

    fn build(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(encode(&self.to_tree())?)
    }
}

impl<'a> IntoIterator for &'a ServerList {
    type Item = &'a ServerEntry;
    type IntoIter = std::slice::Iter<'a, ServerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ServerEntry> for ServerList {
    fn from_iter<I: IntoIterator<Item = ServerEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::test_round_trip;
    use pretty_assertions::assert_eq;

    fn sample() -> ServerList {
        ServerList::from_entries(vec![
            ServerEntry::new("Alpha", "alpha.example.net"),
            ServerEntry::new("Beta", "beta.example.net:25570").with_accept_resource_pack(true),
            ServerEntry::new("Gamma", "10.0.0.7").with_icon("iVBORw0KGgo="),
        ])
    }

    #[test]
    fn test_to_tree_layout() {
        let tree = sample().to_tree();
        assert_eq!(tree.name, "");

        let root = tree.node.as_compound().expect("compound root");
        assert_eq!(root.len(), 1);

        let servers = root.get(SERVERS_KEY).and_then(Node::as_list).expect("servers list");
        assert_eq!(servers.element_tag(), Tag::Compound);
        assert_eq!(servers.len(), 3);
    }

    #[test]
    fn test_list_round_trip() {
        test_round_trip(&sample()).expect("round trip");
        test_round_trip(&ServerList::new()).expect("empty round trip");
    }

    #[test]
    fn test_missing_servers_is_empty() {
        let root = NamedNode::unnamed(Compound::new());
        assert_eq!(ServerList::from_tree(root).expect("empty"), ServerList::new());
    }

    #[test]
    fn test_empty_end_list_is_empty() {
        let mut root = Compound::new();
        root.insert(SERVERS_KEY, NodeList::empty());
        let list = ServerList::from_tree(NamedNode::unnamed(root)).expect("empty");
        assert!(list.is_empty());
    }

    #[test]
    fn test_empty_list_bytes() {
        let bytes = ServerList::new().build().expect("build");
        let mut expected = vec![0x0A, 0x00, 0x00, 0x09, 0x00, 0x07];
        expected.extend_from_slice(b"servers");
        expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_root_must_be_compound() {
        let err = ServerList::from_tree(NamedNode::new("", "text")).unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn test_servers_must_be_list() {
        let mut root = Compound::new();
        root.insert(SERVERS_KEY, 5i32);
        let err = ServerList::from_tree(NamedNode::unnamed(root)).unwrap_err();
        assert!(matches!(
            err,
            ServerListError::SchemaMismatch {
                expected: Tag::List,
                found: Some(Tag::Int),
                ..
            }
        ));
    }

    #[test]
    fn test_list_of_strings_rejected() {
        let mut root = Compound::new();
        root.insert(
            SERVERS_KEY,
            NodeList::from_nodes(Tag::String, vec!["a".into()]).expect("list"),
        );
        let err = ServerList::from_tree(NamedNode::unnamed(root)).unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn test_one_bad_entry_fails_whole_load() {
        let mut good = Compound::new();
        good.insert("name", "ok");
        good.insert("ip", "ok.example.net");
        let mut bad = Compound::new();
        bad.insert("name", 7i32);
        bad.insert("ip", "bad.example.net");

        let mut root = Compound::new();
        root.insert(SERVERS_KEY, NodeList::from_compounds([good, bad]));

        let err = ServerList::from_tree(NamedNode::unnamed(root)).unwrap_err();
        assert!(matches!(
            err,
            ServerListError::SchemaMismatch { ref location, .. } if location == "servers[1].name"
        ));
    }

    #[test]
    fn test_lookup_by_address() {
        let list = sample();
        assert_eq!(list.position("10.0.0.7"), Some(2));
        assert_eq!(list.position("10.0.0.7:25565"), None);
        assert_eq!(list.find("alpha.example.net").map(|e| e.name.as_str()), Some("Alpha"));
    }
}
