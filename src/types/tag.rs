//! The tag value model.

use super::{Compound, List, TagKind};
use crate::error::{Result, TagError};

/// The kind-specific payload of a [`Tag`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Compound terminator. Carries nothing.
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
}

impl Payload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> TagKind {
        match self {
            Self::End => TagKind::End,
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::String(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
            Self::IntArray(_) => TagKind::IntArray,
        }
    }
}

/// One node of an NBT tree: an optional name and a payload.
///
/// Compound members and document roots are named; list elements and the
/// `End` sentinel are not. Tags are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: Option<String>,
    payload: Payload,
}

impl Tag {
    /// Creates a named tag.
    ///
    /// `End` can never carry a name, so passing [`Payload::End`] fails with
    /// [`TagError::NameConstraintViolation`].
    pub fn named(name: impl Into<String>, payload: impl Into<Payload>) -> Result<Self> {
        let payload = payload.into();
        if matches!(payload, Payload::End) {
            return Err(TagError::name("TAG_End cannot be named"));
        }
        Ok(Self {
            name: Some(name.into()),
            payload,
        })
    }

    /// Creates an unnamed tag, as used for list elements.
    pub fn unnamed(payload: impl Into<Payload>) -> Self {
        Self {
            name: None,
            payload: payload.into(),
        }
    }

    /// The compound terminator.
    pub fn end() -> Self {
        Self::unnamed(Payload::End)
    }

    pub fn kind(&self) -> TagKind {
        self.payload.kind()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Splits the tag into its name and payload.
    pub fn into_parts(self) -> (Option<String>, Payload) {
        (self.name, self.payload)
    }

    /// Returns `true` for the `End` sentinel.
    pub fn is_end(&self) -> bool {
        matches!(self.payload, Payload::End)
    }

    /// Returns a copy of this tag under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self> {
        Self::named(name, self.payload.clone())
    }

    /// Returns a copy of this tag with the name stripped, ready for a list.
    pub fn to_unnamed(&self) -> Self {
        Self::unnamed(self.payload.clone())
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self.payload {
            Payload::Byte(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self.payload {
            Payload::Short(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self.payload {
            Payload::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self.payload {
            Payload::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self.payload {
            Payload::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self.payload {
            Payload::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match &self.payload {
            Payload::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match &self.payload {
            Payload::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match &self.payload {
            Payload::IntArray(v) => Some(v),
            _ => None,
        }
    }
}

// -- Convenience conversions --

impl From<i8> for Payload {
    fn from(v: i8) -> Self {
        Self::Byte(v)
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Self::Byte(i8::from(b))
    }
}

impl From<i16> for Payload {
    fn from(v: i16) -> Self {
        Self::Short(v)
    }
}

impl From<i32> for Payload {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Payload {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for Payload {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Payload {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(v: Vec<u8>) -> Self {
        Self::ByteArray(v)
    }
}

impl From<&[u8]> for Payload {
    fn from(v: &[u8]) -> Self {
        Self::ByteArray(v.to_vec())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<List> for Payload {
    fn from(l: List) -> Self {
        Self::List(l)
    }
}

impl From<Compound> for Payload {
    fn from(c: Compound) -> Self {
        Self::Compound(c)
    }
}

impl From<Vec<i32>> for Payload {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v)
    }
}

impl From<&[i32]> for Payload {
    fn from(v: &[i32]) -> Self {
        Self::IntArray(v.to_vec())
    }
}
