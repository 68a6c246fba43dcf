//! Tagged tree decoder
//!
//! Every length prefix is checked against the bytes that remain before
//! anything is allocated, so a hostile length cannot trigger a large
//! allocation or a read past the end of the buffer.

use super::compression::decompress;
use super::error::{NbtError, NbtResult};
use super::mutf8;
use super::node::{Compound, NamedNode, Node, NodeList};
use super::tag::Tag;
use binrw::BinReaderExt;
use std::io::Cursor;
use tracing::trace;

/// Maximum nesting of lists and compounds
///
/// Decoding recurses once per level; 64 levels stay well inside a 2 MiB
/// thread stack in unoptimized builds. Bookmark files nest three deep.
pub const MAX_DEPTH: usize = 64;

/// Decode a tagged tree, removing a gzip or zlib envelope if present
///
/// Bytes after the complete root are ignored.
pub fn decode(data: &[u8]) -> NbtResult<NamedNode> {
    let plain = decompress(data)?;
    let mut reader = TreeReader::new(&plain);
    let root = reader.read_root()?;

    let trailing = reader.remaining();
    if trailing > 0 {
        trace!("Ignoring {} trailing bytes after root tag", trailing);
    }
    Ok(root)
}

struct TreeReader<'a> {
    data: &'a [u8],
    cursor: Cursor<&'a [u8]>,
}

impl<'a> TreeReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            cursor: Cursor::new(data),
        }
    }

    fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position())
    }

    fn ensure(&self, needed: usize) -> NbtResult<()> {
        let available = self.remaining();
        if needed > available {
            return Err(NbtError::Truncated {
                needed,
                available,
                offset: self.position(),
            });
        }
        Ok(())
    }

    fn take(&mut self, len: usize) -> NbtResult<&'a [u8]> {
        self.ensure(len)?;
        let start = self.position();
        let data: &'a [u8] = self.data;
        self.cursor.set_position((start + len) as u64);
        Ok(&data[start..start + len])
    }

    fn read_tag(&mut self) -> NbtResult<Tag> {
        let offset = self.position();
        self.ensure(1)?;
        let byte: u8 = self.cursor.read_be()?;
        Tag::from_byte(byte).ok_or(NbtError::UnknownTag { tag: byte, offset })
    }

    fn read_string(&mut self) -> NbtResult<String> {
        self.ensure(2)?;
        let len: u16 = self.cursor.read_be()?;
        let offset = self.position();
        let bytes = self.take(usize::from(len))?;
        mutf8::decode(bytes).ok_or(NbtError::InvalidString { offset })
    }

    /// Read an i32 count and check that `count * unit` bytes remain
    fn read_count(&mut self, unit: usize) -> NbtResult<usize> {
        let offset = self.position();
        self.ensure(4)?;
        let length: i32 = self.cursor.read_be()?;
        let count = usize::try_from(length).map_err(|_| NbtError::NegativeLength { length, offset })?;
        self.ensure(count.saturating_mul(unit))?;
        Ok(count)
    }

    fn read_root(&mut self) -> NbtResult<NamedNode> {
        let tag = self.read_tag()?;
        if tag == Tag::End {
            return Err(NbtError::EndRoot);
        }
        let name = self.read_string()?;
        let node = self.read_payload(tag, 0)?;
        Ok(NamedNode { name, node })
    }

    fn read_payload(&mut self, tag: Tag, depth: usize) -> NbtResult<Node> {
        let node = match tag {
            // Callers consume End themselves
            Tag::End => return Err(NbtError::EndRoot),
            Tag::Byte => {
                self.ensure(1)?;
                Node::Byte(self.cursor.read_be()?)
            }
            Tag::Short => {
                self.ensure(2)?;
                Node::Short(self.cursor.read_be()?)
            }
            Tag::Int => {
                self.ensure(4)?;
                Node::Int(self.cursor.read_be()?)
            }
            Tag::Long => {
                self.ensure(8)?;
                Node::Long(self.cursor.read_be()?)
            }
            Tag::Float => {
                self.ensure(4)?;
                Node::Float(self.cursor.read_be()?)
            }
            Tag::Double => {
                self.ensure(8)?;
                Node::Double(self.cursor.read_be()?)
            }
            Tag::ByteArray => {
                let count = self.read_count(1)?;
                let bytes = self.take(count)?;
                Node::ByteArray(bytes.iter().map(|&b| b as i8).collect())
            }
            Tag::String => Node::String(self.read_string()?),
            Tag::IntArray => {
                let count = self.read_count(4)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.cursor.read_be::<i32>()?);
                }
                Node::IntArray(values)
            }
            Tag::LongArray => {
                let count = self.read_count(8)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.cursor.read_be::<i64>()?);
                }
                Node::LongArray(values)
            }
            Tag::List => Node::List(self.read_list(depth + 1)?),
            Tag::Compound => Node::Compound(self.read_compound(depth + 1)?),
        };
        Ok(node)
    }

    fn read_list(&mut self, depth: usize) -> NbtResult<NodeList> {
        if depth > MAX_DEPTH {
            return Err(NbtError::DepthLimitExceeded { limit: MAX_DEPTH });
        }

        let offset = self.position();
        let element = self.read_tag()?;
        let count = self.read_count(min_payload_size(element))?;
        if element == Tag::End {
            if count > 0 {
                return Err(NbtError::NonEmptyEndList {
                    count: count as i32,
                    offset,
                });
            }
            return Ok(NodeList::empty());
        }

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.read_payload(element, depth)?);
        }
        NodeList::from_nodes(element, items)
    }

    fn read_compound(&mut self, depth: usize) -> NbtResult<Compound> {
        if depth > MAX_DEPTH {
            return Err(NbtError::DepthLimitExceeded { limit: MAX_DEPTH });
        }

        let offset = self.position();
        let mut compound = Compound::new();
        loop {
            if self.remaining() == 0 {
                return Err(NbtError::UnterminatedCompound { offset });
            }
            let tag = self.read_tag()?;
            if tag == Tag::End {
                break;
            }
            let name = self.read_string()?;
            let node = self.read_payload(tag, depth)?;
            compound.insert(name, node);
        }
        Ok(compound)
    }
}

/// Smallest possible encoded payload for one list element
const fn min_payload_size(tag: Tag) -> usize {
    match tag {
        Tag::End => 0,
        Tag::Byte | Tag::Compound => 1,
        Tag::Short | Tag::String => 2,
        Tag::Int | Tag::Float | Tag::ByteArray | Tag::IntArray | Tag::LongArray => 4,
        Tag::List => 5,
        Tag::Long | Tag::Double => 8,
    }
}
