//! Whole-stream compression beneath the tag codec.
//!
//! The wrapper is chosen once when a stream is opened. Readers and writers
//! above it only ever see uncompressed bytes.

pub mod reader;
pub mod writer;

pub use reader::Decompressor;
pub use writer::Compressor;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bytes::BytesMut;

use crate::binary::{TagReader, encode_tag};
use crate::error::Result;
use crate::types::Tag;

/// gzip member header magic.
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Compression container wrapped around an NBT stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Raw NBT bytes.
    #[default]
    None,
    /// gzip, as used for standalone `.nbt` files.
    Gzip,
    /// zlib, as used for region chunk payloads.
    Zlib,
}

impl Compression {
    /// Guesses the container from the first bytes of a stream.
    pub fn detect(prefix: &[u8]) -> Self {
        match prefix {
            [a, b, ..] if [*a, *b] == GZIP_MAGIC => Self::Gzip,
            // CMF 0x78 (deflate, 32K window) with a valid FCHECK.
            [0x78, flg, ..] if (0x7800u16 | u16::from(*flg)) % 31 == 0 => Self::Zlib,
            _ => Self::None,
        }
    }
}

/// Compression effort used when writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionLevel {
    Fast,
    #[default]
    Default,
    Best,
}

impl From<CompressionLevel> for flate2::Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::Fast => flate2::Compression::fast(),
            CompressionLevel::Default => flate2::Compression::default(),
            CompressionLevel::Best => flate2::Compression::best(),
        }
    }
}

/// Reads the root tag of an NBT file, detecting gzip/zlib compression.
pub fn read_file(path: impl AsRef<Path>) -> Result<Tag> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = TagReader::detect(BufReader::new(file))?;
    reader.read_named().inspect_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "failed to read NBT file");
    })
}

/// Writes `tag` as the root of a new NBT file, replacing any existing file.
///
/// The tag is encoded before the file is opened, so an encoding error leaves
/// an existing file untouched.
pub fn write_file(path: impl AsRef<Path>, tag: &Tag, compression: Compression) -> Result<()> {
    let path = path.as_ref();
    let mut buf = BytesMut::new();
    encode_tag(&mut buf, tag, true)?;

    let file = File::create(path)?;
    let mut compressor = Compressor::new(
        BufWriter::new(file),
        compression,
        CompressionLevel::Default,
    );
    compressor.write_all(&buf)?;
    let mut sink = compressor.finish()?;
    sink.flush()?;
    tracing::debug!(path = %path.display(), ?compression, "wrote NBT file");
    Ok(())
}
