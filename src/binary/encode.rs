//! Binary encoding: `Tag` → bytes.

use bytes::{BufMut, BytesMut};

use super::{mutf8, Depth, DEFAULT_MAX_DEPTH};
use crate::error::{Result, TagError};
use crate::types::{Compound, List, Payload, Tag, TagKind};

/// Encodes `tag` into the buffer with the default nesting limit.
///
/// When `named` is set the kind id and name are written first; list elements
/// are written with `named == false`.
pub fn encode_tag(buf: &mut BytesMut, tag: &Tag, named: bool) -> Result<()> {
    encode_tag_limited(buf, tag, named, DEFAULT_MAX_DEPTH)
}

/// Like [`encode_tag`], rejecting trees nested deeper than `max_depth` containers.
pub fn encode_tag_limited(
    buf: &mut BytesMut,
    tag: &Tag,
    named: bool,
    max_depth: usize,
) -> Result<()> {
    encode_at(buf, tag, named, Depth::root(max_depth))
}

fn encode_at(buf: &mut BytesMut, tag: &Tag, named: bool, depth: Depth) -> Result<()> {
    if named {
        buf.put_u8(tag.kind().id());
        if tag.is_end() {
            return Ok(());
        }
        let name = tag.name().ok_or_else(|| {
            TagError::name(format!("{} written as a named tag without a name", tag.kind()))
        })?;
        encode_string(buf, name)?;
    }
    encode_payload(buf, tag.payload(), depth)
}

fn encode_payload(buf: &mut BytesMut, payload: &Payload, depth: Depth) -> Result<()> {
    match payload {
        Payload::End => {}
        Payload::Byte(v) => buf.put_i8(*v),
        Payload::Short(v) => buf.put_i16(*v),
        Payload::Int(v) => buf.put_i32(*v),
        Payload::Long(v) => buf.put_i64(*v),
        Payload::Float(v) => buf.put_f32(*v),
        Payload::Double(v) => buf.put_f64(*v),
        Payload::ByteArray(bytes) => encode_byte_array(buf, bytes)?,
        Payload::String(s) => encode_string(buf, s)?,
        Payload::List(list) => encode_list(buf, list, depth.descend()?)?,
        Payload::Compound(compound) => encode_compound(buf, compound, depth.descend()?)?,
        Payload::IntArray(ints) => encode_int_array(buf, ints)?,
    }
    Ok(())
}

/// Writes a u16 length prefix followed by the modified-UTF-8 bytes.
pub fn encode_string(buf: &mut BytesMut, value: &str) -> Result<()> {
    let bytes = mutf8::encode(value);
    let len = u16::try_from(bytes.len()).map_err(|_| TagError::StringTooLong(bytes.len()))?;
    buf.put_u16(len);
    buf.put_slice(&bytes);
    Ok(())
}

pub fn encode_byte_array(buf: &mut BytesMut, value: &[u8]) -> Result<()> {
    encode_count(buf, value.len())?;
    buf.put_slice(value);
    Ok(())
}

pub fn encode_int_array(buf: &mut BytesMut, value: &[i32]) -> Result<()> {
    encode_count(buf, value.len())?;
    for &v in value {
        buf.put_i32(v);
    }
    Ok(())
}

fn encode_list(buf: &mut BytesMut, list: &List, depth: Depth) -> Result<()> {
    buf.put_u8(list.element_kind().id());
    encode_count(buf, list.len())?;
    for element in list {
        encode_at(buf, element, false, depth)?;
    }
    Ok(())
}

fn encode_compound(buf: &mut BytesMut, compound: &Compound, depth: Depth) -> Result<()> {
    for member in compound.iter() {
        encode_at(buf, member, true, depth)?;
    }
    buf.put_u8(TagKind::End.id());
    Ok(())
}

/// Writes an i32 element count.
fn encode_count(buf: &mut BytesMut, len: usize) -> Result<()> {
    let count = i32::try_from(len).map_err(|_| TagError::InvalidLength(len as i64))?;
    buf.put_i32(count);
    Ok(())
}
