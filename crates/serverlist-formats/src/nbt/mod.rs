//! Tagged binary tree (NBT) codec
//!
//! The format stores a single named root value. Every value carries a one
//! byte tag; compounds hold named members terminated by an End tag, lists
//! hold unnamed payloads that all share one declared tag.
//!
//! # Format Overview
//!
//! ```text
//! named tag := tag:u8 name:string payload      (absent for End)
//! string    := len:u16 bytes[len]              (Java modified UTF-8)
//! list      := element:u8 count:i32 payload[count]
//! compound  := named tag* End
//! arrays    := count:i32 value[count]          (byte, int, long)
//! ```
//!
//! All multi-byte numbers are big-endian. A whole buffer may be wrapped in
//! gzip or zlib; [`decode`] removes the envelope transparently, [`encode`]
//! never adds one (see [`compress`]).
//!
//! # Example
//!
//! ```
//! use serverlist_formats::nbt::{Compound, NamedNode, decode, encode};
//!
//! let mut root = Compound::new();
//! root.insert("name", "Lobby");
//! root.insert("acceptTextures", true);
//!
//! let tree = NamedNode::unnamed(root);
//! let bytes = encode(&tree).expect("encode");
//! assert_eq!(decode(&bytes).expect("decode"), tree);
//! ```

mod compression;
mod display;
mod error;
pub mod mutf8;
mod node;
mod reader;
mod tag;
mod writer;

pub use compression::{Compression, GZIP_MAGIC, MAX_DECOMPRESSED_SIZE, compress, decompress};
pub use error::{NbtError, NbtResult};
pub use node::{Compound, NamedNode, Node, NodeList};
pub use reader::{MAX_DEPTH, decode};
pub use tag::Tag;
pub use writer::encode;
