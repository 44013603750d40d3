//! Human-readable rendering of tag trees.
//!
//! The layout is line oriented, with four spaces of indentation per level and
//! `\n` line endings on every platform:
//!
//! ```text
//! TAG_Compound("hello world"): 1 entries
//! {
//!     TAG_String("name"): Bananrama
//! }
//! ```

use std::fmt;
use std::io;

use crate::error::Result;
use crate::types::{Payload, Tag};

const INDENT: &str = "    ";

/// Array values per rendered line.
const ARRAY_ROW: usize = 16;

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_tag(f, self, 0)
    }
}

fn indent(out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    Ok(())
}

fn render_tag(out: &mut impl fmt::Write, tag: &Tag, depth: usize) -> fmt::Result {
    out.write_str(tag.kind().name())?;
    if let Some(name) = tag.name() {
        write!(out, "(\"{name}\")")?;
    }
    match tag.payload() {
        Payload::End => Ok(()),
        Payload::Byte(v) => write!(out, ": {v}"),
        Payload::Short(v) => write!(out, ": {v}"),
        Payload::Int(v) => write!(out, ": {v}"),
        Payload::Long(v) => write!(out, ": {v}"),
        Payload::Float(v) => write!(out, ": {v:?}"),
        Payload::Double(v) => write!(out, ": {v:?}"),
        Payload::String(s) => write!(out, ": {s}"),
        Payload::ByteArray(bytes) => {
            write!(out, ": [{} bytes]", bytes.len())?;
            render_array(out, bytes.iter().map(|&b| b as i8), depth)
        }
        Payload::IntArray(ints) => {
            write!(out, ": [{} integers]", ints.len())?;
            render_array(out, ints.iter(), depth)
        }
        Payload::List(list) => {
            write!(
                out,
                ": {} entries of type {}",
                list.len(),
                list.element_kind()
            )?;
            render_children(out, list.iter(), depth)
        }
        Payload::Compound(compound) => {
            write!(out, ": {} entries", compound.len())?;
            render_children(out, compound.iter(), depth)
        }
    }
}

fn render_children<'a>(
    out: &mut impl fmt::Write,
    children: impl Iterator<Item = &'a Tag>,
    depth: usize,
) -> fmt::Result {
    out.write_char('\n')?;
    indent(out, depth)?;
    out.write_str("{\n")?;
    for child in children {
        indent(out, depth + 1)?;
        render_tag(out, child, depth + 1)?;
        out.write_char('\n')?;
    }
    indent(out, depth)?;
    out.write_char('}')
}

fn render_array<T: fmt::Display>(
    out: &mut impl fmt::Write,
    values: impl Iterator<Item = T>,
    depth: usize,
) -> fmt::Result {
    out.write_char('\n')?;
    indent(out, depth)?;
    out.write_char('{')?;
    for (i, v) in values.enumerate() {
        if i % ARRAY_ROW == 0 {
            out.write_char('\n')?;
            indent(out, depth + 1)?;
        } else {
            out.write_str(", ")?;
        }
        write!(out, "{v}")?;
    }
    out.write_char('\n')?;
    indent(out, depth)?;
    out.write_char('}')
}

/// Writes tag renderings to a text sink, one tag per block.
pub struct TextWriter<W> {
    writer: W,
}

impl<W: io::Write> TextWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the rendering of `tag` followed by a newline.
    pub fn write_tag(&mut self, tag: &Tag) -> Result<()> {
        writeln!(self.writer, "{tag}")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
