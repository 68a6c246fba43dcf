//! In-memory tagged tree

use super::error::{NbtError, NbtResult};
use super::tag::Tag;

/// A tagged value
///
/// One variant per tag except [`Tag::End`], which never carries a value.
///
/// Floats compare by bit pattern, so NaN payloads equal themselves and
/// `0.0` differs from `-0.0`, matching what the wire preserves.
#[derive(Debug, Clone)]
pub enum Node {
    /// Signed 8-bit integer
    Byte(i8),
    /// Signed 16-bit integer
    Short(i16),
    /// Signed 32-bit integer
    Int(i32),
    /// Signed 64-bit integer
    Long(i64),
    /// Single precision float
    Float(f32),
    /// Double precision float
    Double(f64),
    /// Raw signed bytes
    ByteArray(Vec<i8>),
    /// Text
    String(String),
    /// Homogeneous unnamed children
    List(NodeList),
    /// Named children
    Compound(Compound),
    /// Signed 32-bit integers
    IntArray(Vec<i32>),
    /// Signed 64-bit integers
    LongArray(Vec<i64>),
}

impl Node {
    /// Tag of this value
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Byte(_) => Tag::Byte,
            Self::Short(_) => Tag::Short,
            Self::Int(_) => Tag::Int,
            Self::Long(_) => Tag::Long,
            Self::Float(_) => Tag::Float,
            Self::Double(_) => Tag::Double,
            Self::ByteArray(_) => Tag::ByteArray,
            Self::String(_) => Tag::String,
            Self::List(_) => Tag::List,
            Self::Compound(_) => Tag::Compound,
            Self::IntArray(_) => Tag::IntArray,
            Self::LongArray(_) => Tag::LongArray,
        }
    }

    /// String payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Byte payload, if this is a byte
    pub const fn as_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(value) => Some(*value),
            _ => None,
        }
    }

    /// List payload, if this is a list
    pub const fn as_list(&self) -> Option<&NodeList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Compound payload, if this is a compound
    pub const fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Mutable compound payload, if this is a compound
    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::ByteArray(a), Self::ByteArray(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Compound(a), Self::Compound(b)) => a == b,
            (Self::IntArray(a), Self::IntArray(b)) => a == b,
            (Self::LongArray(a), Self::LongArray(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i8> for Node {
    fn from(value: i8) -> Self {
        Self::Byte(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Byte(i8::from(value))
    }
}

impl From<i16> for Node {
    fn from(value: i16) -> Self {
        Self::Short(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<NodeList> for Node {
    fn from(value: NodeList) -> Self {
        Self::List(value)
    }
}

impl From<Compound> for Node {
    fn from(value: Compound) -> Self {
        Self::Compound(value)
    }
}

/// List of unnamed values sharing one declared tag
///
/// The declared tag is fixed once the list holds an element. Lists that
/// declare [`Tag::End`] are always empty.
///
/// Equality ignores the declared tag of empty lists: they are all written
/// with End on the wire.
#[derive(Debug, Clone)]
pub struct NodeList {
    element: Tag,
    items: Vec<Node>,
}

impl NodeList {
    /// Create an empty list declaring `element`
    pub const fn new(element: Tag) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    /// Create an empty list declaring End, as written for lists with no items
    pub const fn empty() -> Self {
        Self::new(Tag::End)
    }

    /// Build a list, checking every item against `element`
    pub fn from_nodes(element: Tag, items: Vec<Node>) -> NbtResult<Self> {
        if let Some(stray) = items.iter().find(|item| item.tag() != element) {
            return Err(NbtError::MixedList {
                expected: element,
                found: stray.tag(),
            });
        }
        Ok(Self { element, items })
    }

    /// Build a list of compounds
    pub fn from_compounds(items: impl IntoIterator<Item = Compound>) -> Self {
        Self {
            element: Tag::Compound,
            items: items.into_iter().map(Node::Compound).collect(),
        }
    }

    /// Append an item
    ///
    /// An empty End-list adopts the tag of its first item.
    pub fn push(&mut self, node: Node) -> NbtResult<()> {
        if self.element == Tag::End && self.items.is_empty() {
            self.element = node.tag();
        }
        if node.tag() != self.element {
            return Err(NbtError::MixedList {
                expected: self.element,
                found: node.tag(),
            });
        }
        self.items.push(node);
        Ok(())
    }

    /// Declared element tag
    pub const fn element_tag(&self) -> Tag {
        self.element
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    /// Iterate over the items in order
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    /// Take the items out of the list
    pub fn into_items(self) -> Vec<Node> {
        self.items
    }
}

impl PartialEq for NodeList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Ordered set of named values
///
/// Member order is kept exactly as inserted or decoded. Names are unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    members: Vec<(String, Node)>,
}

impl Compound {
    /// Create an empty compound
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Member value by name
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, node)| node)
    }

    /// Mutable member value by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.members
            .iter_mut()
            .find(|(member, _)| member == name)
            .map(|(_, node)| node)
    }

    /// Whether a member with this name exists
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a member
    ///
    /// An existing member keeps its position and the old value is returned.
    /// New members are appended.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        let name = name.into();
        let node = node.into();
        if let Some(slot) = self.get_mut(&name) {
            return Some(std::mem::replace(slot, node));
        }
        self.members.push((name, node));
        None
    }

    /// Remove a member, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        let index = self.members.iter().position(|(member, _)| member == name)?;
        Some(self.members.remove(index).1)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the compound has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.members.iter().map(|(name, node)| (name.as_str(), node))
    }
}

impl IntoIterator for Compound {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Self::new();
        for (name, node) in iter {
            compound.insert(name, node);
        }
        compound
    }
}

/// Root of a tagged tree: a name and a value
#[derive(Debug, Clone, PartialEq)]
pub struct NamedNode {
    /// Root name, usually empty
    pub name: String,
    /// Root value
    pub node: Node,
}

impl NamedNode {
    /// Create a named root
    pub fn new(name: impl Into<String>, node: impl Into<Node>) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
        }
    }

    /// Create an unnamed compound root
    pub fn unnamed(compound: Compound) -> Self {
        Self::new(String::new(), compound)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_rejects_mixed_items() {
        let mut list = NodeList::new(Tag::Int);
        list.push(Node::Int(1)).expect("same tag");
        let err = list.push(Node::String("x".into())).unwrap_err();
        assert!(matches!(
            err,
            NbtError::MixedList {
                expected: Tag::Int,
                found: Tag::String
            }
        ));
        assert_eq!(list.len(), 1);

        let err = NodeList::from_nodes(Tag::Byte, vec![Node::Byte(1), Node::Short(2)]).unwrap_err();
        assert!(matches!(err, NbtError::MixedList { .. }));
    }

    #[test]
    fn test_end_list_adopts_first_item() {
        let mut list = NodeList::empty();
        assert_eq!(list.element_tag(), Tag::End);
        list.push(Node::from("a")).expect("first item");
        assert_eq!(list.element_tag(), Tag::String);
        assert!(list.push(Node::Byte(0)).is_err());
    }

    #[test]
    fn test_end_list_cannot_hold_items() {
        let err = NodeList::from_nodes(Tag::End, vec![Node::Byte(0)]).unwrap_err();
        assert!(matches!(
            err,
            NbtError::MixedList {
                expected: Tag::End,
                ..
            }
        ));
    }

    #[test]
    fn test_compound_insert_keeps_position() {
        let mut compound = Compound::new();
        compound.insert("a", 1i32);
        compound.insert("b", 2i32);
        compound.insert("c", 3i32);

        let old = compound.insert("b", "replaced");
        assert_eq!(old, Some(Node::Int(2)));

        let names: Vec<&str> = compound.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(compound.get("b").and_then(Node::as_str), Some("replaced"));
    }

    #[test]
    fn test_compound_remove_keeps_order() {
        let mut compound: Compound = [("x", 1i8), ("y", 2i8), ("z", 3i8)].into_iter().collect();
        assert_eq!(compound.remove("y"), Some(Node::Byte(2)));
        assert_eq!(compound.remove("missing"), None);

        let names: Vec<&str> = compound.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["x", "z"]);
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_eq!(Node::Float(f32::NAN), Node::Float(f32::NAN));
        assert_eq!(Node::Double(f64::NAN), Node::Double(f64::NAN));
        assert_ne!(Node::Double(0.0), Node::Double(-0.0));
        assert_ne!(Node::Float(1.0), Node::Double(1.0));
    }

    #[test]
    fn test_bool_maps_to_byte() {
        assert_eq!(Node::from(true), Node::Byte(1));
        assert_eq!(Node::from(false), Node::Byte(0));
    }
}
