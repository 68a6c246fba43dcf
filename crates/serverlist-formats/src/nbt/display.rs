//! SNBT-style text rendering for diagnostics

use super::node::{Compound, NamedNode, Node, NodeList};
use std::fmt::{self, Write};

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write_key(f, &self.name)?;
            f.write_str(": ")?;
        }
        write!(f, "{}", self.node)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(value) => write!(f, "{value}b"),
            Self::Short(value) => write!(f, "{value}s"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}L"),
            Self::Float(value) => write!(f, "{value}f"),
            Self::Double(value) => write!(f, "{value}d"),
            Self::ByteArray(values) => write_array(f, "B", values.iter().map(|v| format!("{v}b"))),
            Self::String(text) => write_quoted(f, text),
            Self::List(list) => write!(f, "{list}"),
            Self::Compound(compound) => write!(f, "{compound}"),
            Self::IntArray(values) => write_array(f, "I", values.iter().map(ToString::to_string)),
            Self::LongArray(values) => write_array(f, "L", values.iter().map(|v| format!("{v}L"))),
        }
    }
}

impl fmt::Display for NodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write!(f, "{item}")?;
        }
        f.write_char(']')
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (name, node)) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_key(f, name)?;
            f.write_char(':')?;
            write!(f, "{node}")?;
        }
        f.write_char('}')
    }
}

fn write_array(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    values: impl Iterator<Item = String>,
) -> fmt::Result {
    write!(f, "[{prefix};")?;
    for (i, value) in values.enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        f.write_str(&value)?;
    }
    f.write_char(']')
}

fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'));
    if bare {
        f.write_str(key)
    } else {
        write_quoted(f, key)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}
