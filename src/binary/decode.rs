//! Binary decoding: byte stream → `Tag`, plus forward-only navigation.

use std::io::{self, Read};

use super::{mutf8, Depth, DEFAULT_MAX_DEPTH};
use crate::error::{Result, TagError};
use crate::types::{Compound, List, Payload, Tag, TagKind};

/// How the next tag appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Kind id and name precede the payload (compound members, roots).
    Named,
    /// Bare payload of a known kind (list elements).
    Unnamed(TagKind),
}

/// Reads tags from a forward-only byte stream.
///
/// The reader never backtracks. After any error the stream position is
/// unspecified and the reader should be dropped.
pub struct TagReader<R> {
    reader: R,
    max_depth: usize,
}

impl<R: Read> TagReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum number of nested lists and compounds accepted.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads one kind id byte.
    pub fn read_kind(&mut self) -> Result<TagKind> {
        let [id] = self.read_array()?;
        TagKind::from_id(id)
    }

    /// Reads a complete tag.
    pub fn read_tag(&mut self, mode: ReadMode) -> Result<Tag> {
        self.read_at(mode, Depth::root(self.max_depth))
    }

    /// Reads a complete named tag. Shorthand for `read_tag(ReadMode::Named)`.
    pub fn read_named(&mut self) -> Result<Tag> {
        self.read_tag(ReadMode::Named)
    }

    /// Reads the kind and name of the next named tag, leaving its payload unread.
    ///
    /// `End` has no name, so it yields `(TagKind::End, None)`.
    pub fn read_header(&mut self) -> Result<(TagKind, Option<String>)> {
        let kind = self.read_kind()?;
        if kind == TagKind::End {
            return Ok((kind, None));
        }
        Ok((kind, Some(self.read_string()?)))
    }

    /// Reads the element kind and count that open a list payload.
    ///
    /// `End` elements occupy no bytes, so an `End` list must be empty.
    pub fn read_list_header(&mut self) -> Result<(TagKind, usize)> {
        let kind = self.read_kind()?;
        let count = self.read_count()?;
        if kind == TagKind::End && count > 0 {
            return Err(TagError::InvalidLength(count as i64));
        }
        Ok((kind, count))
    }

    /// Reads a bare payload of the given kind.
    pub fn read_payload(&mut self, kind: TagKind) -> Result<Payload> {
        self.read_payload_at(kind, Depth::root(self.max_depth))
    }

    /// Advances past `count` complete tags without building them.
    ///
    /// Only counts and length prefixes are read; everything else is discarded.
    /// Skipping a named `End` consumes its id byte and counts as one tag.
    pub fn skip(&mut self, count: usize, mode: ReadMode) -> Result<()> {
        tracing::trace!(count, ?mode, "skipping tags");
        let depth = Depth::root(self.max_depth);
        for _ in 0..count {
            self.skip_one(mode, depth)?;
        }
        Ok(())
    }

    /// Skips `offset` named siblings, then returns the first following sibling
    /// of kind `wanted` (or simply the next sibling when `wanted` is `None`).
    ///
    /// Non-matching siblings are skipped, not built. Reaching the `End` that
    /// closes the enclosing compound returns that `End` tag.
    pub fn read_next(&mut self, offset: usize, wanted: Option<TagKind>) -> Result<Tag> {
        self.skip(offset, ReadMode::Named)?;
        let depth = Depth::root(self.max_depth);
        loop {
            let kind = self.read_kind()?;
            if kind == TagKind::End || wanted.is_none_or(|w| w == kind) {
                return self.read_named_body(kind, depth);
            }
            tracing::trace!(%kind, "skipping non-matching sibling");
            self.skip_string()?;
            self.skip_payload(kind, depth)?;
        }
    }

    /// Skips `offset` list elements of `kind`, then reads the next one.
    pub fn read_next_element(&mut self, offset: usize, kind: TagKind) -> Result<Tag> {
        self.skip(offset, ReadMode::Unnamed(kind))?;
        self.read_tag(ReadMode::Unnamed(kind))
    }

    // -- Tag reading --

    fn read_at(&mut self, mode: ReadMode, depth: Depth) -> Result<Tag> {
        match mode {
            ReadMode::Named => {
                let kind = self.read_kind()?;
                self.read_named_body(kind, depth)
            }
            ReadMode::Unnamed(kind) => Ok(Tag::unnamed(self.read_payload_at(kind, depth)?)),
        }
    }

    /// Reads the name and payload of a named tag whose kind id was consumed.
    fn read_named_body(&mut self, kind: TagKind, depth: Depth) -> Result<Tag> {
        if kind == TagKind::End {
            return Ok(Tag::end());
        }
        let name = self.read_string()?;
        let payload = self.read_payload_at(kind, depth)?;
        Tag::named(name, payload)
    }

    fn read_payload_at(&mut self, kind: TagKind, depth: Depth) -> Result<Payload> {
        let payload = match kind {
            TagKind::End => Payload::End,
            TagKind::Byte => Payload::Byte(i8::from_be_bytes(self.read_array()?)),
            TagKind::Short => Payload::Short(i16::from_be_bytes(self.read_array()?)),
            TagKind::Int => Payload::Int(i32::from_be_bytes(self.read_array()?)),
            TagKind::Long => Payload::Long(i64::from_be_bytes(self.read_array()?)),
            TagKind::Float => Payload::Float(f32::from_be_bytes(self.read_array()?)),
            TagKind::Double => Payload::Double(f64::from_be_bytes(self.read_array()?)),
            TagKind::ByteArray => {
                let len = self.read_count()?;
                Payload::ByteArray(self.read_bytes(len as u64)?)
            }
            TagKind::String => Payload::String(self.read_string()?),
            TagKind::List => Payload::List(self.read_list(depth.descend()?)?),
            TagKind::Compound => Payload::Compound(self.read_compound(depth.descend()?)?),
            TagKind::IntArray => {
                let len = self.read_count()?;
                let data = self.read_bytes(len as u64 * 4)?;
                Payload::IntArray(
                    data.chunks_exact(4)
                        .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                        .collect(),
                )
            }
        };
        Ok(payload)
    }

    fn read_list(&mut self, depth: Depth) -> Result<List> {
        let (element_kind, count) = self.read_list_header()?;
        // Cap the up-front reservation; the count comes from untrusted input.
        let mut elements = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            elements.push(self.read_at(ReadMode::Unnamed(element_kind), depth)?);
        }
        Ok(List::from_decoded(element_kind, elements))
    }

    fn read_compound(&mut self, depth: Depth) -> Result<Compound> {
        let mut compound = Compound::new();
        loop {
            let member = self.read_at(ReadMode::Named, depth)?;
            if member.is_end() {
                break;
            }
            if let Some(previous) = compound.insert(member)? {
                tracing::trace!(
                    name = previous.name().unwrap_or_default(),
                    "duplicate compound member overwritten"
                );
            }
        }
        Ok(compound)
    }

    // -- Skipping --

    /// Skips one tag and returns its kind.
    fn skip_one(&mut self, mode: ReadMode, depth: Depth) -> Result<TagKind> {
        let kind = match mode {
            ReadMode::Named => {
                let kind = self.read_kind()?;
                if kind == TagKind::End {
                    return Ok(kind);
                }
                self.skip_string()?;
                kind
            }
            ReadMode::Unnamed(kind) => kind,
        };
        self.skip_payload(kind, depth)?;
        Ok(kind)
    }

    fn skip_payload(&mut self, kind: TagKind, depth: Depth) -> Result<()> {
        match kind {
            TagKind::End => {}
            TagKind::Byte
            | TagKind::Short
            | TagKind::Int
            | TagKind::Long
            | TagKind::Float
            | TagKind::Double => {
                let width = kind.scalar_width().unwrap_or_default();
                self.discard(width as u64)?;
            }
            TagKind::ByteArray => {
                let len = self.read_count()?;
                self.discard(len as u64)?;
            }
            TagKind::String => self.skip_string()?,
            TagKind::IntArray => {
                let len = self.read_count()?;
                self.discard(len as u64 * 4)?;
            }
            TagKind::List => {
                let depth = depth.descend()?;
                let (element_kind, count) = self.read_list_header()?;
                match element_kind.scalar_width() {
                    Some(width) => self.discard(count as u64 * width as u64)?,
                    None => {
                        for _ in 0..count {
                            self.skip_payload(element_kind, depth)?;
                        }
                    }
                }
            }
            TagKind::Compound => {
                let depth = depth.descend()?;
                while self.skip_one(ReadMode::Named, depth)? != TagKind::End {}
            }
        }
        Ok(())
    }

    fn skip_string(&mut self) -> Result<()> {
        let len = u16::from_be_bytes(self.read_array()?);
        self.discard(u64::from(len))
    }

    // -- Primitive reads --

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.reader.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads a signed 32-bit element count, rejecting negative values.
    fn read_count(&mut self) -> Result<usize> {
        let count = i32::from_be_bytes(self.read_array()?);
        usize::try_from(count).map_err(|_| TagError::InvalidLength(i64::from(count)))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = u16::from_be_bytes(self.read_array()?);
        let data = self.read_bytes(u64::from(len))?;
        mutf8::decode(&data)
    }

    /// Reads exactly `len` bytes, growing the buffer as data arrives.
    fn read_bytes(&mut self, len: u64) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let read = (&mut self.reader).take(len).read_to_end(&mut data)?;
        if (read as u64) < len {
            return Err(unexpected_eof(len, read as u64));
        }
        Ok(data)
    }

    /// Drops exactly `len` bytes from the stream.
    fn discard(&mut self, len: u64) -> Result<()> {
        let skipped = io::copy(&mut (&mut self.reader).take(len), &mut io::sink())?;
        if skipped < len {
            return Err(unexpected_eof(len, skipped));
        }
        Ok(())
    }
}

fn unexpected_eof(needed: u64, got: u64) -> TagError {
    TagError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("need {needed} bytes but only {got} remaining"),
    ))
}
