//! Optional compression envelope around an encoded tree

use super::error::{NbtError, NbtResult};
use flate2::read::{GzDecoder, GzEncoder, ZlibDecoder, ZlibEncoder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Maximum allowed decompression size (64 MiB)
///
/// Bookmark files are a few kilobytes; the limit stops compression bombs
/// from exhausting memory.
pub const MAX_DECOMPRESSED_SIZE: usize = 64 * 1024 * 1024;

/// Gzip member header magic
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Compression envelope applied to an encoded tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Raw encoded tree
    #[default]
    None,
    /// Single gzip member
    Gzip,
    /// Zlib stream
    Zlib,
}

impl Compression {
    /// Detect the envelope from the leading bytes
    pub fn detect(data: &[u8]) -> Self {
        match data {
            [0x1F, 0x8B, ..] => Self::Gzip,
            // CMF 0x78 with a valid FCHECK for the four standard levels
            [0x78, 0x01 | 0x5E | 0x9C | 0xDA, ..] => Self::Zlib,
            _ => Self::None,
        }
    }

    /// Lowercase name as used in configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Zlib => "zlib",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "raw" => Ok(Self::None),
            "gzip" | "gz" => Ok(Self::Gzip),
            "zlib" => Ok(Self::Zlib),
            other => Err(format!("unknown compression '{other}' (expected none, gzip or zlib)")),
        }
    }
}

/// Wrap encoded bytes in the given envelope
pub fn compress(data: &[u8], mode: Compression) -> NbtResult<Vec<u8>> {
    let mut compressed = Vec::new();
    match mode {
        Compression::None => return Ok(data.to_vec()),
        Compression::Gzip => {
            GzEncoder::new(data, flate2::Compression::default())
                .read_to_end(&mut compressed)
                .map_err(NbtError::Compression)?;
        }
        Compression::Zlib => {
            ZlibEncoder::new(data, flate2::Compression::default())
                .read_to_end(&mut compressed)
                .map_err(NbtError::Compression)?;
        }
    }
    Ok(compressed)
}

/// Strip the envelope if one is present
///
/// Buffers without a recognised magic header are returned unchanged.
pub fn decompress(data: &[u8]) -> NbtResult<Cow<'_, [u8]>> {
    match Compression::detect(data) {
        Compression::None => Ok(Cow::Borrowed(data)),
        Compression::Gzip => read_limited(GzDecoder::new(data)).map(Cow::Owned),
        Compression::Zlib => read_limited(ZlibDecoder::new(data)).map(Cow::Owned),
    }
}

fn read_limited<R: Read>(mut decoder: R) -> NbtResult<Vec<u8>> {
    let mut decompressed = Vec::new();

    // Read in chunks to enforce size limit
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = decoder
            .read(&mut buffer)
            .map_err(NbtError::Decompression)?;
        if bytes_read == 0 {
            break;
        }

        if decompressed.len() + bytes_read > MAX_DECOMPRESSED_SIZE {
            return Err(NbtError::DecompressedTooLarge {
                limit: MAX_DECOMPRESSED_SIZE,
            });
        }

        decompressed.extend_from_slice(&buffer[..bytes_read]);
    }

    Ok(decompressed)
}
