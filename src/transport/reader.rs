//! Decompressing read side of the transport.

use std::io::{self, BufRead, Read};

use flate2::read::{GzDecoder, ZlibDecoder};

use super::Compression;
use crate::binary::TagReader;
use crate::error::Result;

/// A `Read` adapter that undoes the stream's compression, if any.
pub enum Decompressor<R: Read> {
    Plain(R),
    Gzip(GzDecoder<R>),
    Zlib(ZlibDecoder<R>),
}

impl<R: Read> Decompressor<R> {
    pub fn new(reader: R, compression: Compression) -> Self {
        match compression {
            Compression::None => Self::Plain(reader),
            Compression::Gzip => Self::Gzip(GzDecoder::new(reader)),
            Compression::Zlib => Self::Zlib(ZlibDecoder::new(reader)),
        }
    }

    pub fn compression(&self) -> Compression {
        match self {
            Self::Plain(_) => Compression::None,
            Self::Gzip(_) => Compression::Gzip,
            Self::Zlib(_) => Compression::Zlib,
        }
    }

    /// Returns the compressed source. Bytes buffered by the decoder are lost.
    pub fn into_inner(self) -> R {
        match self {
            Self::Plain(r) => r,
            Self::Gzip(d) => d.into_inner(),
            Self::Zlib(d) => d.into_inner(),
        }
    }
}

impl<R: Read> Read for Decompressor<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
            Self::Zlib(d) => d.read(buf),
        }
    }
}

impl<R: Read> TagReader<Decompressor<R>> {
    /// Opens a tag reader over `reader`, decompressing with `compression`.
    pub fn with_compression(reader: R, compression: Compression) -> Self {
        tracing::debug!(?compression, "opening NBT reader");
        TagReader::new(Decompressor::new(reader, compression))
    }
}

impl<R: BufRead> TagReader<Decompressor<R>> {
    /// Opens a tag reader, choosing the decompressor from the stream's first bytes.
    pub fn detect(mut reader: R) -> Result<Self> {
        let compression = Compression::detect(reader.fill_buf()?);
        Ok(Self::with_compression(reader, compression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{CompressionLevel, Compressor};
    use std::io::Write;

    fn compress(data: &[u8], compression: Compression) -> Vec<u8> {
        let mut c = Compressor::new(Vec::new(), compression, CompressionLevel::Default);
        c.write_all(data).unwrap();
        c.finish().unwrap()
    }

    #[test]
    fn plain_passes_bytes_through() {
        let mut d = Decompressor::new(&[1u8, 2, 3][..], Compression::None);
        let mut out = Vec::new();
        d.read_to_end(&mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(d.compression(), Compression::None);
    }

    #[test]
    fn gzip_and_zlib_round_trip() {
        let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
        for compression in [Compression::Gzip, Compression::Zlib] {
            let packed = compress(&data, compression);
            assert_ne!(packed, data);
            let mut out = Vec::new();
            Decompressor::new(&packed[..], compression)
                .read_to_end(&mut out)
                .unwrap();
            assert_eq!(out, data, "{compression:?}");
        }
    }

    #[test]
    fn detect_picks_gzip() {
        let packed = compress(&[0x00], Compression::Gzip);
        let reader = TagReader::detect(&packed[..]).unwrap();
        assert_eq!(reader.get_ref().compression(), Compression::Gzip);
    }

    #[test]
    fn corrupt_gzip_is_io_error() {
        let mut packed = compress(&[0x0A, 0x00, 0x00, 0x00], Compression::Gzip);
        let len = packed.len();
        packed.truncate(len / 2);
        let err = TagReader::with_compression(&packed[..], Compression::Gzip)
            .read_named()
            .unwrap_err();
        assert!(err.is_io());
    }
}
