//! Compressing write side of the transport.

use std::io::{self, Write};

use flate2::write::{GzEncoder, ZlibEncoder};

use super::{Compression, CompressionLevel};
use crate::binary::TagWriter;
use crate::error::Result;

/// A `Write` adapter that compresses everything written through it.
///
/// Call [`Compressor::finish`] to write the trailer. A compressor that is
/// dropped instead still attempts to finish the stream, but any error is lost.
pub enum Compressor<W: Write> {
    Plain(W),
    Gzip(GzEncoder<W>),
    Zlib(ZlibEncoder<W>),
}

impl<W: Write> Compressor<W> {
    pub fn new(writer: W, compression: Compression, level: CompressionLevel) -> Self {
        match compression {
            Compression::None => Self::Plain(writer),
            Compression::Gzip => Self::Gzip(GzEncoder::new(writer, level.into())),
            Compression::Zlib => Self::Zlib(ZlibEncoder::new(writer, level.into())),
        }
    }

    pub fn compression(&self) -> Compression {
        match self {
            Self::Plain(_) => Compression::None,
            Self::Gzip(_) => Compression::Gzip,
            Self::Zlib(_) => Compression::Zlib,
        }
    }

    /// Flushes pending output, writes the compression trailer and returns the sink.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Plain(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Self::Gzip(e) => e.finish(),
            Self::Zlib(e) => e.finish(),
        }
    }
}

impl<W: Write> Write for Compressor<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(e) => e.write(buf),
            Self::Zlib(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(e) => e.flush(),
            Self::Zlib(e) => e.flush(),
        }
    }
}

impl<W: Write> TagWriter<Compressor<W>> {
    /// Opens a tag writer over `writer`, compressing with `compression`.
    pub fn with_compression(writer: W, compression: Compression, level: CompressionLevel) -> Self {
        tracing::debug!(?compression, ?level, "opening NBT writer");
        TagWriter::new(Compressor::new(writer, compression, level))
    }

    /// Finishes the compressed stream and returns the underlying sink.
    pub fn finish(self) -> Result<W> {
        let compressor = self.into_inner()?;
        let compression = compressor.compression();
        let sink = compressor.finish()?;
        tracing::debug!(?compression, "finished NBT writer");
        Ok(sink)
    }
}
