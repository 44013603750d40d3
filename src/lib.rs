//! nbtr — A pure-Rust Named Binary Tag (NBT) codec.
//!
//! NBT is a hierarchical binary format built from twelve tag kinds. Scalars,
//! arrays and strings form the leaves; lists (homogeneous, unnamed elements)
//! and compounds (named members, `End`-terminated) nest them into trees.
//!
//! # Architecture
//!
//! - **`types`** — Tag kinds and the tag value model (`Tag`, `Payload`, `List`, `Compound`)
//! - **`binary`** — Wire encoding/decoding, including skip-based stream navigation
//! - **`transport`** — Optional gzip/zlib compression beneath the codec
//! - **`render`** — Human-readable text rendering
//!
//! # Example
//!
//! ```
//! use nbtr::{Compound, Tag};
//!
//! let mut root = Compound::new();
//! root.insert(Tag::named("name", "Bananrama")?)?;
//! let tag = Tag::named("hello world", root)?;
//!
//! let bytes = nbtr::encode(&tag)?;
//! assert_eq!(nbtr::decode(&bytes)?, tag);
//! # Ok::<(), nbtr::TagError>(())
//! ```

pub mod binary;
pub mod error;
pub mod render;
pub mod transport;
pub mod types;

use bytes::{Bytes, BytesMut};

pub use binary::{ReadMode, TagReader, TagWriter};
pub use error::{Result, TagError};
pub use render::TextWriter;
pub use transport::{Compression, CompressionLevel, read_file, write_file};
pub use types::{Compound, List, Payload, Tag, TagKind};

/// Encodes `tag` as a named root tag.
pub fn encode(tag: &Tag) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    binary::encode_tag(&mut buf, tag, true)?;
    Ok(buf.freeze())
}

/// Decodes one named root tag from uncompressed bytes.
///
/// Trailing bytes after the root tag are ignored.
pub fn decode(bytes: &[u8]) -> Result<Tag> {
    TagReader::new(bytes).read_named()
}
