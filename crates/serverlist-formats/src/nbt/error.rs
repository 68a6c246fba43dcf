//! Error types for tagged tree encoding and decoding

use super::tag::Tag;
use thiserror::Error;

/// Tagged tree codec error type
#[derive(Debug, Error)]
pub enum NbtError {
    /// Tag id outside the known set
    #[error("unknown tag id 0x{tag:02X} at offset {offset}")]
    UnknownTag {
        /// Raw tag byte
        tag: u8,
        /// Offset of the tag byte in the decompressed buffer
        offset: usize,
    },

    /// Declared payload does not fit in the remaining buffer
    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required by the payload
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
        /// Offset where the payload starts
        offset: usize,
    },

    /// Negative length prefix on an array or list
    #[error("negative length {length} at offset {offset}")]
    NegativeLength {
        /// Declared length
        length: i32,
        /// Offset of the length prefix
        offset: usize,
    },

    /// Buffer ended before the compound's End tag
    #[error("compound starting at offset {offset} is not terminated")]
    UnterminatedCompound {
        /// Offset of the compound payload
        offset: usize,
    },

    /// List declares End as element type but carries items
    #[error("list of End tags with {count} elements at offset {offset}")]
    NonEmptyEndList {
        /// Declared element count
        count: i32,
        /// Offset of the list payload
        offset: usize,
    },

    /// Root tag must carry a value
    #[error("root tag is End")]
    EndRoot,

    /// Nesting deeper than the decoder allows
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded {
        /// Maximum nesting depth
        limit: usize,
    },

    /// String bytes are not valid modified UTF-8
    #[error("invalid modified UTF-8 string at offset {offset}")]
    InvalidString {
        /// Offset of the string bytes
        offset: usize,
    },

    /// List element does not match the declared element tag
    #[error("list element has tag {found}, list declares {expected}")]
    MixedList {
        /// Declared element tag
        expected: Tag,
        /// Tag of the offending element
        found: Tag,
    },

    /// String too long for its u16 length prefix
    #[error("string of {length} encoded bytes exceeds the 65535 byte limit")]
    StringTooLong {
        /// Encoded length in bytes
        length: usize,
    },

    /// Array or list too long for its i32 length prefix
    #[error("sequence of {length} elements exceeds the i32 length prefix")]
    SequenceTooLong {
        /// Element count
        length: usize,
    },

    /// Decompressed payload larger than the decoder accepts
    #[error("decompressed size exceeds limit of {limit} bytes")]
    DecompressedTooLarge {
        /// Limit in bytes
        limit: usize,
    },

    /// Compression envelope could not be decoded
    #[error("decompression failed: {0}")]
    Decompression(std::io::Error),

    /// Compression of the encoded tree failed
    #[error("compression failed: {0}")]
    Compression(std::io::Error),

    /// Binary primitive read or write failed
    #[error("binary format error: {0}")]
    BinRw(binrw::Error),
}

/// Result type for tagged tree operations
pub type NbtResult<T> = Result<T, NbtError>;

impl NbtError {
    /// Check if this error means the input does not follow the binary grammar
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownTag { .. }
                | Self::Truncated { .. }
                | Self::NegativeLength { .. }
                | Self::UnterminatedCompound { .. }
                | Self::NonEmptyEndList { .. }
                | Self::EndRoot
                | Self::DepthLimitExceeded { .. }
                | Self::InvalidString { .. }
                | Self::DecompressedTooLarge { .. }
                | Self::Decompression(_)
                | Self::BinRw(_)
        )
    }
}

impl From<binrw::Error> for NbtError {
    fn from(error: binrw::Error) -> Self {
        Self::BinRw(error)
    }
}
