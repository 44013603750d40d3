//! Homogeneous, unnamed tag lists.

use std::slice;

use super::{Payload, Tag, TagKind};
use crate::error::{Result, TagError};

/// An ordered list of unnamed tags that all share one element kind.
///
/// Built through [`List::new`], which rejects elements of the wrong kind and
/// elements that carry a name. A list of `End` is always empty.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element_kind: TagKind,
    elements: Vec<Tag>,
}

impl List {
    /// Creates a list, validating every element against `element_kind`.
    pub fn new(element_kind: TagKind, elements: Vec<Tag>) -> Result<Self> {
        if element_kind == TagKind::End && !elements.is_empty() {
            return Err(TagError::InvalidLength(elements.len() as i64));
        }
        for element in &elements {
            if element.kind() != element_kind {
                return Err(TagError::TypeMismatch {
                    expected: element_kind,
                    found: element.kind(),
                });
            }
            if let Some(name) = element.name() {
                return Err(TagError::name(format!(
                    "named tag {name:?} given where an unnamed list element was expected"
                )));
            }
        }
        Ok(Self {
            element_kind,
            elements,
        })
    }

    /// Creates a list whose element kind is taken from the first element.
    ///
    /// An empty vector gives an empty `End` list.
    pub fn from_elements(elements: Vec<Tag>) -> Result<Self> {
        let element_kind = elements.first().map_or(TagKind::End, Tag::kind);
        Self::new(element_kind, elements)
    }

    /// Creates an empty list of the given element kind.
    pub fn empty(element_kind: TagKind) -> Self {
        Self {
            element_kind,
            elements: Vec::new(),
        }
    }

    /// Wraps elements read off the wire. The decoder reads exactly the declared
    /// kind for every element and never attaches names.
    pub(crate) fn from_decoded(element_kind: TagKind, elements: Vec<Tag>) -> Self {
        debug_assert!(elements.iter().all(|e| e.kind() == element_kind && e.name().is_none()));
        Self {
            element_kind,
            elements,
        }
    }

    /// Builds a list from bare payloads, wrapping each in an unnamed tag.
    pub fn from_payloads<I, P>(element_kind: TagKind, payloads: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Payload>,
    {
        let elements = payloads.into_iter().map(Tag::unnamed).collect();
        Self::new(element_kind, elements)
    }

    pub fn element_kind(&self) -> TagKind {
        self.element_kind
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[Tag] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Tag> {
        self.elements
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
