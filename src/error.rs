//! Error types for the NBT codec.

use crate::types::TagKind;

/// Errors that can occur while building, reading or writing tags.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown tag kind id: {0}")]
    UnknownTagKind(u8),

    #[error("name constraint violation: {0}")]
    NameConstraintViolation(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: TagKind, found: TagKind },

    #[error("invalid length: {0}")]
    InvalidLength(i64),

    #[error("string too long: {0} encoded bytes (max 65535)")]
    StringTooLong(usize),

    #[error("invalid modified UTF-8: {0}")]
    InvalidString(String),

    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
}

impl TagError {
    /// Shorthand for a [`TagError::NameConstraintViolation`].
    pub fn name(msg: impl Into<String>) -> Self {
        Self::NameConstraintViolation(msg.into())
    }

    /// Returns `true` if the error came from the underlying stream.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TagError>;
