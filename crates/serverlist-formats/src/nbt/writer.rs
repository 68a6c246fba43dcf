//! Tagged tree encoder
//!
//! Produces the canonical uncompressed form: tag, name, payload for every
//! compound member, big-endian numbers, End after the last member.

use super::error::{NbtError, NbtResult};
use super::mutf8;
use super::node::{Compound, NamedNode, Node, NodeList};
use super::tag::Tag;
use binrw::BinWriterExt;
use std::io::{Cursor, Write};

/// Encode a tagged tree without any compression envelope
pub fn encode(root: &NamedNode) -> NbtResult<Vec<u8>> {
    let mut writer = TreeWriter::default();
    writer.write_tag(root.node.tag())?;
    writer.write_string(&root.name)?;
    writer.write_payload(&root.node)?;
    Ok(writer.finish())
}

#[derive(Default)]
struct TreeWriter {
    cursor: Cursor<Vec<u8>>,
}

impl TreeWriter {
    fn finish(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    fn write_tag(&mut self, tag: Tag) -> NbtResult<()> {
        self.cursor.write_be(&tag.as_byte())?;
        Ok(())
    }

    fn write_string(&mut self, text: &str) -> NbtResult<()> {
        let encoded = mutf8::encode(text);
        let len = u16::try_from(encoded.len()).map_err(|_| NbtError::StringTooLong {
            length: encoded.len(),
        })?;
        self.cursor.write_be(&len)?;
        self.cursor
            .write_all(&encoded)
            .map_err(binrw::Error::Io)?;
        Ok(())
    }

    fn write_count(&mut self, len: usize) -> NbtResult<()> {
        let count = i32::try_from(len).map_err(|_| NbtError::SequenceTooLong { length: len })?;
        self.cursor.write_be(&count)?;
        Ok(())
    }

    fn write_payload(&mut self, node: &Node) -> NbtResult<()> {
        match node {
            Node::Byte(value) => self.cursor.write_be(value)?,
            Node::Short(value) => self.cursor.write_be(value)?,
            Node::Int(value) => self.cursor.write_be(value)?,
            Node::Long(value) => self.cursor.write_be(value)?,
            Node::Float(value) => self.cursor.write_be(value)?,
            Node::Double(value) => self.cursor.write_be(value)?,
            Node::ByteArray(values) => {
                self.write_count(values.len())?;
                self.cursor.write_be(values)?;
            }
            Node::String(text) => self.write_string(text)?,
            Node::List(list) => self.write_list(list)?,
            Node::Compound(compound) => self.write_compound(compound)?,
            Node::IntArray(values) => {
                self.write_count(values.len())?;
                self.cursor.write_be(values)?;
            }
            Node::LongArray(values) => {
                self.write_count(values.len())?;
                self.cursor.write_be(values)?;
            }
        }
        Ok(())
    }

    fn write_list(&mut self, list: &NodeList) -> NbtResult<()> {
        // Empty lists are written with End as element type
        let element = if list.is_empty() {
            Tag::End
        } else {
            list.element_tag()
        };
        self.write_tag(element)?;
        self.write_count(list.len())?;
        for item in list {
            if item.tag() != element {
                return Err(NbtError::MixedList {
                    expected: element,
                    found: item.tag(),
                });
            }
            self.write_payload(item)?;
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> NbtResult<()> {
        for (name, node) in compound.iter() {
            self.write_tag(node.tag())?;
            self.write_string(name)?;
            self.write_payload(node)?;
        }
        self.write_tag(Tag::End)
    }
}
