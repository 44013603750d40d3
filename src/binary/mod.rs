//! Binary NBT encoding and decoding.
//!
//! All multi-byte numbers are big-endian. A named tag is written as
//! `[kind id][u16 name length][name][payload]`; list elements carry only
//! their payload.

pub mod decode;
pub mod encode;
pub mod mutf8;
pub mod writer;

pub use decode::{ReadMode, TagReader};
pub use encode::encode_tag;
pub use writer::TagWriter;

use crate::error::TagError;

/// Default maximum number of nested lists and compounds.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Container nesting level during a recursive walk.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Depth {
    level: usize,
    max: usize,
}

impl Depth {
    pub(crate) fn root(max: usize) -> Self {
        Self { level: 0, max }
    }

    /// Enters one more list or compound.
    pub(crate) fn descend(self) -> Result<Self, TagError> {
        if self.level >= self.max {
            return Err(TagError::NestingTooDeep(self.max));
        }
        Ok(Self {
            level: self.level + 1,
            max: self.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::types::{Compound, List, Payload, Tag, TagKind};

    fn named(name: &str, payload: impl Into<Payload>) -> Tag {
        Tag::named(name, payload).unwrap()
    }

    fn compound(members: impl IntoIterator<Item = Tag>) -> Compound {
        Compound::from_tags(members).unwrap()
    }

    fn encode_named(tag: &Tag) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_tag(&mut buf, tag, true).unwrap();
        buf.to_vec()
    }

    fn decode_named(bytes: &[u8]) -> Tag {
        TagReader::new(bytes).read_named().unwrap()
    }

    /// The byte pattern `(n*n*255 + n*7) % 100` for the first `len` values of n.
    fn byte_pattern(len: usize) -> Vec<u8> {
        (0..len).map(|n| ((n * n * 255 + n * 7) % 100) as u8).collect()
    }

    fn bigtest() -> Tag {
        let ham = compound([named("name", "Hampus"), named("value", 0.75f32)]);
        let egg = compound([named("name", "Eggbert"), named("value", 0.5f32)]);
        let nested = compound([named("ham", ham), named("egg", egg)]);

        let longs = List::from_payloads(TagKind::Long, [11i64, 12, 13, 14, 15]).unwrap();
        let compounds = List::from_payloads(
            TagKind::Compound,
            (0..2).map(|i| {
                compound([
                    named("name", format!("Compound tag #{i}")),
                    named("created-on", 1_264_099_775_885i64),
                ])
            }),
        )
        .unwrap();

        let root = compound([
            named("shortTest", 32767i16),
            named("longTest", 9_223_372_036_854_775_807i64),
            named("floatTest", 0.49823147f32),
            named("stringTest", "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!"),
            named("intTest", 2_147_483_647i32),
            named("nested compound test", nested),
            named("listTest (long)", longs),
            named("byteTest", 127i8),
            named("listTest (compound)", compounds),
            named("byteArrayTest", byte_pattern(1000)),
            named("intArrayTest", vec![i32::MIN, -1, 0, 1, i32::MAX]),
            named("doubleTest", 0.4931287132182315f64),
            named("emptyList", List::empty(TagKind::End)),
            named("emptyCompound", Compound::new()),
            named("nul\0name", "\u{1F600}"),
        ]);
        named("Level", root)
    }

    #[test]
    fn scenario_single_string_member() {
        let root = named("hello world", compound([named("name", "Bananrama")]));
        let decoded = decode_named(&encode_named(&root));

        assert_eq!(decoded.name(), Some("hello world"));
        let members = decoded.as_compound().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members.get("name"), Some(&named("name", "Bananrama")));
    }

    #[test]
    fn scenario_long_list_keeps_order() {
        let longs = List::from_payloads(TagKind::Long, [11i64, 12, 13, 14, 15]).unwrap();
        let root = named("", compound([named("listTest (long)", longs)]));
        let decoded = decode_named(&encode_named(&root));

        let list = decoded
            .as_compound()
            .and_then(|c| c.get("listTest (long)"))
            .and_then(Tag::as_list)
            .unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list.element_kind(), TagKind::Long);
        let values: Vec<i64> = list.iter().filter_map(Tag::as_long).collect();
        assert_eq!(values, vec![11, 12, 13, 14, 15]);
        assert!(list.iter().all(|t| t.name().is_none()));
    }

    #[test]
    fn scenario_thousand_byte_array() {
        let root = named("", compound([named("byteArrayTest", byte_pattern(1000))]));
        let decoded = decode_named(&encode_named(&root));

        let bytes = decoded
            .as_compound()
            .and_then(|c| c.get("byteArrayTest"))
            .and_then(Tag::as_byte_array)
            .unwrap();
        assert_eq!(bytes.len(), 1000);
        assert_eq!(&bytes[..5], &[0, 62, 34, 16, 8]);
    }

    #[test]
    fn scenario_skip_then_read_matches_offset_read() {
        let first = named("first", compound([named("a", 1i32)]));
        let second = named("second", compound([named("b", "two"), named("c", vec![3u8])]));
        let mut bytes = encode_named(&first);
        bytes.extend(encode_named(&second));

        let mut skipping = TagReader::new(&bytes[..]);
        skipping.skip(1, ReadMode::Named).unwrap();
        let skipped_then_read = skipping.read_named().unwrap();

        let offset_read = TagReader::new(&bytes[..]).read_next(1, None).unwrap();
        let kind_read = TagReader::new(&bytes[..])
            .read_next(1, Some(TagKind::Compound))
            .unwrap();

        assert_eq!(skipped_then_read, second);
        assert_eq!(offset_read, skipped_then_read);
        assert_eq!(kind_read, skipped_then_read);
    }

    #[test]
    fn skip_then_read_list_elements() {
        let elements = List::from_payloads(
            TagKind::Compound,
            [
                compound([named("x", 1i8)]),
                compound([named("x", 2i8), named("y", List::empty(TagKind::Int))]),
                compound([named("x", 3i8)]),
            ],
        )
        .unwrap();
        let mut buf = BytesMut::new();
        encode_tag(&mut buf, &Tag::unnamed(elements.clone()), false).unwrap();

        let mut reader = TagReader::new(&buf[..]);
        let (kind, count) = reader.read_list_header().unwrap();
        assert_eq!((kind, count), (TagKind::Compound, 3));
        reader.skip(2, ReadMode::Unnamed(kind)).unwrap();
        let third = reader.read_tag(ReadMode::Unnamed(kind)).unwrap();
        assert_eq!(&third, elements.get(2).unwrap());

        let mut reader = TagReader::new(&buf[..]);
        reader.read_list_header().unwrap();
        assert_eq!(&reader.read_next_element(1, kind).unwrap(), elements.get(1).unwrap());
    }

    #[test]
    fn bigtest_round_trips_structurally() {
        let tag = bigtest();
        assert_eq!(decode_named(&encode_named(&tag)), tag);
    }

    #[test]
    fn bigtest_round_trips_byte_exact() {
        let bytes = encode_named(&bigtest());
        let again = encode_named(&decode_named(&bytes));
        assert_eq!(again, bytes);
    }

    #[test]
    fn decode_preserves_member_order() {
        let tag = bigtest();
        let decoded = decode_named(&encode_named(&tag));
        let expected: Vec<&str> = tag.as_compound().unwrap().names().collect();
        let actual: Vec<&str> = decoded.as_compound().unwrap().names().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn read_next_locates_member_by_kind() {
        let bytes = encode_named(&bigtest());
        let mut reader = TagReader::new(&bytes[..]);
        assert_eq!(reader.read_header().unwrap().0, TagKind::Compound);

        // First double in the root, skipping everything before it unbuilt.
        let double = reader.read_next(0, Some(TagKind::Double)).unwrap();
        assert_eq!(double.name(), Some("doubleTest"));

        // Next list after that.
        let list = reader.read_next(0, Some(TagKind::List)).unwrap();
        assert_eq!(list.name(), Some("emptyList"));

        // No IntArray remains before the root's End.
        assert!(reader.read_next(0, Some(TagKind::IntArray)).unwrap().is_end());
    }

    #[test]
    fn skipping_whole_document_consumes_everything() {
        let bytes = encode_named(&bigtest());
        let mut reader = TagReader::new(&bytes[..]);
        reader.skip(1, ReadMode::Named).unwrap();
        assert!(reader.into_inner().is_empty());
    }

    #[test]
    fn duplicate_member_bytes_collapse() {
        let mut bytes = vec![0x0A, 0x00, 0x00];
        bytes.extend(encode_named(&named("dup", "first")));
        bytes.extend(encode_named(&named("other", 1i8)));
        bytes.extend(encode_named(&named("dup", "second")));
        bytes.push(0x00);

        let tag = decode_named(&bytes);
        let members = tag.as_compound().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members.get("dup").and_then(Tag::as_str), Some("second"));

        // Re-encoding is not the original input.
        assert_ne!(encode_named(&tag), bytes);
    }

    #[test]
    fn unknown_kind_inside_compound_aborts() {
        let bytes = [0x0A, 0x00, 0x00, 0x0C, 0x00, 0x00];
        assert!(matches!(
            TagReader::new(&bytes[..]).read_named(),
            Err(TagError::UnknownTagKind(12))
        ));
    }

    #[test]
    fn adversarial_nesting_is_rejected() {
        // A list of lists of lists ... declared far deeper than the default limit.
        let mut bytes = vec![0x09, 0x00, 0x00];
        for _ in 0..(DEFAULT_MAX_DEPTH + 10) {
            bytes.extend_from_slice(&[0x09, 0x00, 0x00, 0x00, 0x01]);
        }
        assert!(matches!(
            TagReader::new(&bytes[..]).read_named(),
            Err(TagError::NestingTooDeep(DEFAULT_MAX_DEPTH))
        ));
        assert!(matches!(
            TagReader::new(&bytes[..]).skip(1, ReadMode::Named),
            Err(TagError::NestingTooDeep(DEFAULT_MAX_DEPTH))
        ));
    }
}
