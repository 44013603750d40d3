//! Tag kind registry: the closed set of kinds and their wire ids.

use std::fmt;

use crate::error::TagError;

/// One of the twelve NBT tag kinds.
///
/// The discriminant is the one-byte id written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
}

impl TagKind {
    /// All kinds in id order.
    pub const ALL: [TagKind; 12] = [
        TagKind::End,
        TagKind::Byte,
        TagKind::Short,
        TagKind::Int,
        TagKind::Long,
        TagKind::Float,
        TagKind::Double,
        TagKind::ByteArray,
        TagKind::String,
        TagKind::List,
        TagKind::Compound,
        TagKind::IntArray,
    ];

    /// Returns the wire id of this kind.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Resolves a wire id, failing with [`TagError::UnknownTagKind`] outside 0..=11.
    pub fn from_id(id: u8) -> Result<Self, TagError> {
        Self::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(TagError::UnknownTagKind(id))
    }

    /// Debug name used by the text rendering.
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_ByteArray",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_IntArray",
        }
    }

    /// Payload width in bytes for fixed-width scalar kinds.
    pub const fn scalar_width(self) -> Option<usize> {
        match self {
            Self::Byte => Some(1),
            Self::Short => Some(2),
            Self::Int | Self::Float => Some(4),
            Self::Long | Self::Double => Some(8),
            _ => None,
        }
    }

    /// Returns `true` for `List` and `Compound`.
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }
}

impl TryFrom<u8> for TagKind {
    type Error = TagError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id)
    }
}

impl From<TagKind> for u8 {
    fn from(kind: TagKind) -> Self {
        kind.id()
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
