//! Writes encoded tags to a byte sink.

use std::io::Write;

use bytes::BytesMut;

use super::encode::encode_tag_limited;
use super::DEFAULT_MAX_DEPTH;
use crate::error::Result;
use crate::types::Tag;

/// Initial scratch buffer capacity.
const INITIAL_CAPACITY: usize = 4096;

/// Writes tags to a `Write` sink.
///
/// Each tag is encoded completely into a scratch buffer before any byte
/// reaches the sink, so a tag that fails to encode leaves the sink untouched.
pub struct TagWriter<W> {
    writer: W,
    buf: BytesMut,
    max_depth: usize,
}

impl<W: Write> TagWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum number of nested lists and compounds accepted.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Writes a named tag (kind id, name, payload).
    pub fn write_tag(&mut self, tag: &Tag) -> Result<()> {
        self.write_tag_with(tag, true)
    }

    /// Writes a tag, with or without its kind id and name.
    pub fn write_tag_with(&mut self, tag: &Tag, named: bool) -> Result<()> {
        self.buf.clear();
        encode_tag_limited(&mut self.buf, tag, named, self.max_depth)?;
        self.writer.write_all(&self.buf)?;
        tracing::trace!(kind = %tag.kind(), bytes = self.buf.len(), "wrote tag");
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagError;
    use crate::types::Compound;

    #[test]
    fn write_named_tag() {
        let mut output = Vec::new();
        let mut writer = TagWriter::new(&mut output);
        writer.write_tag(&Tag::named("x", 1i8).unwrap()).unwrap();
        writer.write_tag(&Tag::named("y", 2i8).unwrap()).unwrap();
        assert_eq!(
            output,
            vec![0x01, 0x00, 0x01, b'x', 0x01, 0x01, 0x00, 0x01, b'y', 0x02]
        );
    }

    #[test]
    fn write_unnamed_tag() {
        let mut output = Vec::new();
        TagWriter::new(&mut output)
            .write_tag_with(&Tag::unnamed(0x0102i16), false)
            .unwrap();
        assert_eq!(output, vec![0x01, 0x02]);
    }

    #[test]
    fn failed_encode_writes_nothing() {
        let mut root = Compound::new();
        root.insert(Tag::named("ok", 1i8).unwrap()).unwrap();
        root.insert(Tag::named("bad", "a".repeat(70_000)).unwrap()).unwrap();
        let root = Tag::named("", root).unwrap();

        let mut output = Vec::new();
        let mut writer = TagWriter::new(&mut output);
        let err = writer.write_tag(&root).unwrap_err();
        assert!(matches!(err, TagError::StringTooLong(70_000)));
        assert!(output.is_empty());
    }

    #[test]
    fn writer_depth_limit() {
        let inner = Tag::named("i", Compound::new()).unwrap();
        let root = Tag::named("", Compound::from_tags([inner]).unwrap()).unwrap();
        let mut output = Vec::new();
        let mut writer = TagWriter::new(&mut output).max_depth(1);
        assert!(matches!(
            writer.write_tag(&root),
            Err(TagError::NestingTooDeep(1))
        ));
        assert!(output.is_empty());
    }
}
