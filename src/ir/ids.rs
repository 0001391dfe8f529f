//! Newtype IDs for type-safe identification of annotations and export records.
//!
//! Using newtypes prevents accidentally mixing up different kinds of IDs
//! (e.g., passing an image ID where a category ID is expected).

use std::fmt;

/// Stable identifier of an annotation inside an [`AnnotationStore`].
///
/// Assigned by the store, never persisted. `AnnotationId(0)` marks a record
/// that has not entered a store yet.
///
/// [`AnnotationStore`]: crate::store::AnnotationStore
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationId(pub u64);

impl AnnotationId {
    /// Creates a new AnnotationId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns true once a store has assigned this id.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnotationId({})", self.0)
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a rendered page image in an export.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u64);

impl ImageId {
    /// Creates a new ImageId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({})", self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based category identifier derived from a label's catalog position.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(pub u64);

impl CategoryId {
    /// Creates a new CategoryId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Zero-based class index as used by YOLO label files.
    #[inline]
    pub fn class_index(&self) -> u64 {
        self.0.saturating_sub(1)
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality() {
        assert_eq!(ImageId(1), ImageId(1));
        assert_ne!(ImageId(1), ImageId(2));
    }

    #[test]
    fn test_id_ordering() {
        assert!(ImageId(1) < ImageId(2));
        assert!(CategoryId(10) > CategoryId(5));
    }

    #[test]
    fn test_annotation_id_default_is_unassigned() {
        assert!(!AnnotationId::default().is_assigned());
        assert!(AnnotationId::new(3).is_assigned());
    }

    #[test]
    fn test_class_index_is_zero_based() {
        assert_eq!(CategoryId::new(1).class_index(), 0);
        assert_eq!(CategoryId::new(6).class_index(), 5);
    }
}
