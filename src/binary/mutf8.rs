//! Modified UTF-8, the string encoding used for names and string payloads.
//!
//! Differs from standard UTF-8 in two ways: U+0000 is written as the two-byte
//! sequence `C0 80`, and characters outside the BMP are written as a UTF-16
//! surrogate pair with each surrogate encoded as its own three-byte sequence.

use std::borrow::Cow;

use crate::error::TagError;

/// Encodes `s` as modified UTF-8. Borrows when the bytes match standard UTF-8.
pub fn encode(s: &str) -> Cow<'_, [u8]> {
    if is_plain(s) {
        return Cow::Borrowed(s.as_bytes());
    }
    let mut out = Vec::with_capacity(encoded_len(s));
    for unit in s.encode_utf16() {
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
    Cow::Owned(out)
}

/// Number of bytes [`encode`] would produce.
pub fn encoded_len(s: &str) -> usize {
    if is_plain(s) {
        return s.len();
    }
    s.encode_utf16()
        .map(|unit| match unit {
            0x0001..=0x007F => 1,
            0x0000 | 0x0080..=0x07FF => 2,
            _ => 3,
        })
        .sum()
}

/// Decodes modified UTF-8 bytes.
pub fn decode(bytes: &[u8]) -> Result<String, TagError> {
    // Four-byte sequences never occur in modified UTF-8; anything else that is
    // valid standard UTF-8 decodes identically.
    if !bytes.iter().any(|&b| b >= 0xF0) {
        if let Ok(s) = std::str::from_utf8(bytes) {
            return Ok(s.to_owned());
        }
    }

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let a = bytes[i];
        if a & 0x80 == 0 {
            units.push(u16::from(a));
            i += 1;
        } else if a & 0xE0 == 0xC0 {
            let b = continuation(bytes, i, 1)?;
            units.push((u16::from(a & 0x1F) << 6) | u16::from(b));
            i += 2;
        } else if a & 0xF0 == 0xE0 {
            let b = continuation(bytes, i, 1)?;
            let c = continuation(bytes, i, 2)?;
            units.push((u16::from(a & 0x0F) << 12) | (u16::from(b) << 6) | u16::from(c));
            i += 3;
        } else {
            return Err(TagError::InvalidString(format!(
                "unexpected byte 0x{a:02X} at offset {i}"
            )));
        }
    }

    String::from_utf16(&units).map_err(|e| TagError::InvalidString(e.to_string()))
}

/// Returns the low six bits of the continuation byte at `start + offset`.
fn continuation(bytes: &[u8], start: usize, offset: usize) -> Result<u8, TagError> {
    match bytes.get(start + offset) {
        Some(&b) if b & 0xC0 == 0x80 => Ok(b & 0x3F),
        Some(&b) => Err(TagError::InvalidString(format!(
            "expected continuation byte at offset {}, got 0x{b:02X}",
            start + offset
        ))),
        None => Err(TagError::InvalidString(format!(
            "truncated sequence at offset {start}"
        ))),
    }
}

/// Standard UTF-8 and modified UTF-8 agree when there is no NUL and no
/// supplementary character.
fn is_plain(s: &str) -> bool {
    s.chars().all(|c| c != '\0' && u32::from(c) < 0x1_0000)
}
