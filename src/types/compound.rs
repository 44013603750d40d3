//! Name-keyed compound maps.

use indexmap::IndexMap;

use super::Tag;
use crate::error::{Result, TagError};

/// A map of member name to named tag.
///
/// Members keep insertion order so encoding is reproducible. Equality ignores
/// order. Re-inserting a name replaces the value in place.
#[derive(Debug, Clone, Default)]
pub struct Compound(IndexMap<String, Tag>);

impl Compound {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Builds a compound from named tags. Later duplicates overwrite earlier ones.
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Result<Self> {
        let mut compound = Self::new();
        for tag in tags {
            compound.insert(tag)?;
        }
        Ok(compound)
    }

    /// Inserts a member keyed by its own name, returning the replaced member.
    ///
    /// Unnamed tags (including `End`) are rejected with
    /// [`TagError::NameConstraintViolation`].
    pub fn insert(&mut self, tag: Tag) -> Result<Option<Tag>> {
        let name = tag
            .name()
            .ok_or_else(|| {
                TagError::name(format!(
                    "unnamed {} given where a compound member was expected",
                    tag.kind()
                ))
            })?
            .to_owned();
        Ok(self.0.insert(name, tag))
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_tags(self) -> impl Iterator<Item = Tag> {
        self.0.into_values()
    }
}

impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
