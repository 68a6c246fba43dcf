//! A single server bookmark

use super::error::{ServerListError, ServerListResult};
use crate::nbt::{Compound, Node, Tag};

/// Display name field (String, required)
pub const FIELD_NAME: &str = "name";
/// Address field (String, required, identity key)
pub const FIELD_ADDRESS: &str = "ip";
/// Base64 PNG server icon (String, optional)
pub const FIELD_ICON: &str = "icon";
/// Resource pack acceptance (Byte, optional; absent means "prompt")
pub const FIELD_ACCEPT_TEXTURES: &str = "acceptTextures";

/// Server bookmark
///
/// `address` identifies the entry and is compared as an exact string: no
/// case folding, no default-port handling.
///
/// An entry read from a file remembers the compound it came from, and
/// [`to_compound`](Self::to_compound) patches that compound instead of
/// rebuilding it. An unchanged entry is therefore written back with its
/// original member order and values. Equality compares the fields only.
#[derive(Debug, Clone, Default)]
pub struct ServerEntry {
    /// Name shown in the server browser
    pub name: String,
    /// Host with optional `:port` suffix
    pub address: String,
    /// Whether server resource packs are accepted; `None` leaves the client prompting
    pub accept_resource_pack: Option<bool>,
    /// Cached server icon as base64 PNG
    pub icon: Option<String>,
    /// Members the schema does not name, kept verbatim
    pub extra: Compound,
    /// Compound this entry was decoded from, empty for new entries
    source: Compound,
}

impl PartialEq for ServerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.address == other.address
            && self.accept_resource_pack == other.accept_resource_pack
            && self.icon == other.icon
            && self.extra == other.extra
    }
}

impl ServerEntry {
    /// Create an entry with only the required fields
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    /// Set the resource pack flag
    #[must_use]
    pub fn with_accept_resource_pack(mut self, accept: bool) -> Self {
        self.accept_resource_pack = Some(accept);
        self
    }

    /// Set the icon
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Read an entry from the compound at position `index` of the list
    pub fn from_compound(index: usize, compound: Compound) -> ServerListResult<Self> {
        let mut name = None;
        let mut address = None;
        let mut entry = Self {
            source: compound.clone(),
            ..Self::default()
        };

        for (key, node) in compound {
            match key.as_str() {
                FIELD_NAME => name = Some(expect_string(index, FIELD_NAME, node)?),
                FIELD_ADDRESS => address = Some(expect_string(index, FIELD_ADDRESS, node)?),
                FIELD_ICON => entry.icon = Some(expect_string(index, FIELD_ICON, node)?),
                FIELD_ACCEPT_TEXTURES => match node {
                    Node::Byte(flag) => entry.accept_resource_pack = Some(flag != 0),
                    other => {
                        return Err(ServerListError::schema_mismatch(
                            location(index, FIELD_ACCEPT_TEXTURES),
                            Tag::Byte,
                            Some(other.tag()),
                        ));
                    }
                },
                _ => {
                    entry.extra.insert(key, node);
                }
            }
        }

        entry.name = name.ok_or_else(|| {
            ServerListError::schema_mismatch(location(index, FIELD_NAME), Tag::String, None)
        })?;
        entry.address = address.ok_or_else(|| {
            ServerListError::schema_mismatch(location(index, FIELD_ADDRESS), Tag::String, None)
        })?;
        Ok(entry)
    }

    /// Write the entry as a compound
    ///
    /// A decoded entry keeps its member order: changed fields are replaced
    /// in place, cleared ones removed, new ones appended. A new entry is
    /// written as `name`, `ip`, `icon`, `acceptTextures`, then `extra`.
    pub fn to_compound(&self) -> Compound {
        let mut compound = self.source.clone();
        compound.insert(FIELD_NAME, self.name.as_str());
        compound.insert(FIELD_ADDRESS, self.address.as_str());

        match &self.icon {
            Some(icon) => {
                compound.insert(FIELD_ICON, icon.as_str());
            }
            None => {
                compound.remove(FIELD_ICON);
            }
        }

        match self.accept_resource_pack {
            // keep the stored byte when it already means the same thing
            Some(accept) => {
                let stored = compound
                    .get(FIELD_ACCEPT_TEXTURES)
                    .and_then(Node::as_byte)
                    .map(|flag| flag != 0);
                if stored != Some(accept) {
                    compound.insert(FIELD_ACCEPT_TEXTURES, accept);
                }
            }
            None => {
                compound.remove(FIELD_ACCEPT_TEXTURES);
            }
        }

        let dropped: Vec<String> = self
            .source
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !is_known_field(key) && !self.extra.contains_key(key))
            .map(ToString::to_string)
            .collect();
        for key in &dropped {
            compound.remove(key);
        }
        for (key, node) in self.extra.iter() {
            compound.insert(key, node.clone());
        }
        compound
    }
}

fn is_known_field(key: &str) -> bool {
    matches!(
        key,
        FIELD_NAME | FIELD_ADDRESS | FIELD_ICON | FIELD_ACCEPT_TEXTURES
    )
}

fn location(index: usize, field: &str) -> String {
    format!("servers[{index}].{field}")
}

fn expect_string(index: usize, field: &str, node: Node) -> ServerListResult<String> {
    match node {
        Node::String(value) => Ok(value),
        other => Err(ServerListError::schema_mismatch(
            location(index, field),
            Tag::String,
            Some(other.tag()),
        )),
    }
}
