//! Java modified UTF-8
//!
//! Differs from standard UTF-8 in two places: NUL is written as `C0 80` and
//! characters outside the basic multilingual plane are written as a
//! surrogate pair, each half as its own 3-byte sequence. Strings without
//! either case are byte-identical in both encodings.

use std::borrow::Cow;

/// Encode a string as modified UTF-8
pub fn encode(text: &str) -> Cow<'_, [u8]> {
    let plain = text.chars().all(|c| c != '\0' && (c as u32) <= 0xFFFF);
    if plain {
        return Cow::Borrowed(text.as_bytes());
    }

    let mut out = Vec::with_capacity(text.len() + 8);
    let mut units = [0u16; 2];
    for c in text.chars() {
        if c == '\0' {
            out.extend_from_slice(&[0xC0, 0x80]);
            continue;
        }
        for unit in c.encode_utf16(&mut units).iter().copied() {
            push_unit(&mut out, unit);
        }
    }
    Cow::Owned(out)
}

fn push_unit(out: &mut Vec<u8>, unit: u16) {
    match unit {
        0x0001..=0x007F => out.push(unit as u8),
        0x0000 | 0x0080..=0x07FF => {
            out.push(0xC0 | (unit >> 6) as u8);
            out.push(0x80 | (unit & 0x3F) as u8);
        }
        _ => {
            out.push(0xE0 | (unit >> 12) as u8);
            out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
            out.push(0x80 | (unit & 0x3F) as u8);
        }
    }
}

/// Decode modified UTF-8, returning `None` for invalid input
///
/// Plain UTF-8 is accepted as well, including 4-byte sequences written by
/// encoders that do not follow the Java convention.
pub fn decode(bytes: &[u8]) -> Option<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_string());
    }

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = u16::from(bytes[i]);
        if b0 & 0x80 == 0 {
            units.push(b0);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 {
            let b1 = continuation(bytes, i + 1)?;
            units.push(((b0 & 0x1F) << 6) | b1);
            i += 2;
        } else if b0 & 0xF0 == 0xE0 {
            let b1 = continuation(bytes, i + 1)?;
            let b2 = continuation(bytes, i + 2)?;
            units.push(((b0 & 0x0F) << 12) | (b1 << 6) | b2);
            i += 3;
        } else {
            return None;
        }
    }
    String::from_utf16(&units).ok()
}

fn continuation(bytes: &[u8], index: usize) -> Option<u16> {
    let byte = *bytes.get(index)?;
    (byte & 0xC0 == 0x80).then_some(u16::from(byte & 0x3F))
}
