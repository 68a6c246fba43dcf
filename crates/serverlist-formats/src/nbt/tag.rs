//! Tag identifiers

use std::fmt;

/// Tag type identifier as stored on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Compound terminator and element type of empty lists
    End = 0,
    /// Signed 8-bit integer
    Byte = 1,
    /// Signed 16-bit integer
    Short = 2,
    /// Signed 32-bit integer
    Int = 3,
    /// Signed 64-bit integer
    Long = 4,
    /// IEEE-754 single precision float
    Float = 5,
    /// IEEE-754 double precision float
    Double = 6,
    /// Length-prefixed signed bytes
    ByteArray = 7,
    /// Length-prefixed modified UTF-8 string
    String = 8,
    /// Homogeneous list of unnamed payloads
    List = 9,
    /// Named members terminated by End
    Compound = 10,
    /// Length-prefixed signed 32-bit integers
    IntArray = 11,
    /// Length-prefixed signed 64-bit integers
    LongArray = 12,
}

impl Tag {
    /// Map a wire byte to a tag
    pub fn from_byte(byte: u8) -> Option<Self> {
        let tag = match byte {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            _ => return None,
        };
        Some(tag)
    }

    /// Wire byte for this tag
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_Int_Array",
            Self::LongArray => "TAG_Long_Array",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
