//! Model index for addressing items in hierarchical models.
//!
//! The `ModelIndex` type is the fundamental way to reference items within
//! an `ItemModel`. It contains row, column and parent information to
//! uniquely identify any item, plus the index *space* it addresses: an
//! index obtained from a source model lives in [`IndexSpace::Source`],
//! one obtained from a filter proxy lives in [`IndexSpace::View`], and the
//! two are never interchangeable without going through a conversion on
//! [`crate::model::TreeModelHandle`].

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// A global counter for generating unique internal IDs.
static INTERNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// The index space a [`ModelIndex`] addresses.
///
/// Two spaces exist: the source model's own row numbering, and the view
/// numbering produced by a filter/sort proxy. Carrying the space on every
/// index makes a cross-space lookup detectable instead of silently reading
/// the wrong row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexSpace {
    /// Rows as stored in the source model.
    Source,
    /// Rows as presented by the view (after filtering/sorting).
    View,
}

/// Represents a position within an item model.
///
/// Each index contains:
/// - The space it addresses (source or view)
/// - Row and column within the parent
/// - A reference to the parent index (for hierarchical models)
/// - An internal ID for model-specific identification
///
/// # Index Validity
///
/// Model indices should be used immediately and not stored long-term.
/// After model modifications (insertions, deletions, filter changes),
/// previously obtained indices may become invalid.
#[derive(Clone)]
pub struct ModelIndex {
    /// The space this index addresses.
    space: IndexSpace,
    /// The row within the parent.
    row: usize,
    /// The column within the parent.
    column: usize,
    /// The parent index. `None` indicates a root-level item.
    parent: Option<Box<ModelIndex>>,
    /// An internal ID that models can use for their own purposes.
    /// Taskview models store the row's node ID here, shared between the
    /// row's columns and stable across the source/view spaces.
    internal_id: u64,
    /// Whether this index is valid.
    valid: bool,
}

impl Default for ModelIndex {
    fn default() -> Self {
        Self::invalid()
    }
}

impl ModelIndex {
    /// Creates an invalid (null) model index.
    ///
    /// An invalid index is used to represent:
    /// - The root of the model (as a parent reference)
    /// - A non-existent or out-of-bounds item
    /// - An uninitialized index
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            space: IndexSpace::Source,
            row: 0,
            column: 0,
            parent: None,
            internal_id: 0,
            valid: false,
        }
    }

    /// Creates a new valid model index with a fresh internal ID.
    ///
    /// This is typically called by model implementations rather than
    /// directly; indices built this way do not compare equal to
    /// model-produced indices for the same cell, because the internal IDs
    /// differ.
    #[inline]
    pub fn new(space: IndexSpace, row: usize, column: usize, parent: ModelIndex) -> Self {
        let internal_id = INTERNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::with_internal_id(space, row, column, parent, internal_id)
    }

    /// Creates a new valid model index with a model-supplied internal ID.
    ///
    /// Taskview models store the addressed row's node ID here so that the
    /// two columns of a row, and the source/view renderings of it, share
    /// one identity.
    #[inline]
    pub fn with_internal_id(
        space: IndexSpace,
        row: usize,
        column: usize,
        parent: ModelIndex,
        internal_id: u64,
    ) -> Self {
        Self {
            space,
            row,
            column,
            parent: if parent.is_valid() {
                Some(Box::new(parent))
            } else {
                None
            },
            internal_id,
            valid: true,
        }
    }

    /// Returns `true` if this is a valid index.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the space this index addresses.
    #[inline]
    pub fn space(&self) -> IndexSpace {
        self.space
    }

    /// Returns the row of this index within its parent.
    ///
    /// Returns 0 for invalid indices.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the column of this index within its parent.
    ///
    /// Returns 0 for invalid indices.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the parent index, or an invalid index for root items.
    #[inline]
    pub fn parent(&self) -> ModelIndex {
        match &self.parent {
            Some(parent) => (**parent).clone(),
            None => ModelIndex::invalid(),
        }
    }

    /// Returns `true` if this index has a valid parent.
    #[inline]
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the internal ID associated with this index.
    #[inline]
    pub fn internal_id(&self) -> u64 {
        self.internal_id
    }

    /// Creates a sibling index at the given row and column.
    ///
    /// Keeps the space, parent and internal ID of this index, so the
    /// sibling of a model-produced index still compares equal to the
    /// model's own index for that cell when only the column differs.
    /// Returns an invalid index if this index is invalid.
    ///
    /// Note: this creates the index structure but doesn't validate against
    /// a model. Use model methods for validation.
    #[inline]
    pub fn sibling(&self, row: usize, column: usize) -> ModelIndex {
        if !self.is_valid() {
            return ModelIndex::invalid();
        }
        Self {
            space: self.space,
            row,
            column,
            parent: self.parent.clone(),
            internal_id: self.internal_id,
            valid: true,
        }
    }

    /// Creates a sibling at the same row but different column.
    #[inline]
    pub fn sibling_at_column(&self, column: usize) -> ModelIndex {
        self.sibling(self.row, column)
    }

    /// Returns the depth of this index in the tree hierarchy.
    ///
    /// Root-level items have depth 0. Returns 0 for invalid indices.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while current.is_valid() {
            depth += 1;
            current = current.parent();
        }
        depth
    }

    /// Returns the chain of ancestors from this index up to the root.
    ///
    /// The first element is the immediate parent, the last the top-level
    /// ancestor.
    pub fn ancestors(&self) -> Vec<ModelIndex> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while current.is_valid() {
            ancestors.push(current.clone());
            current = current.parent();
        }
        ancestors
    }
}

impl std::fmt::Debug for ModelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            f.debug_struct("ModelIndex")
                .field("space", &self.space)
                .field("row", &self.row)
                .field("column", &self.column)
                .field("depth", &self.depth())
                .field("internal_id", &self.internal_id)
                .finish()
        } else {
            write!(f, "ModelIndex(invalid)")
        }
    }
}

impl PartialEq for ModelIndex {
    fn eq(&self, other: &Self) -> bool {
        // Two invalid indices are equal.
        if !self.is_valid() && !other.is_valid() {
            return true;
        }
        if self.is_valid() != other.is_valid() {
            return false;
        }
        self.space == other.space
            && self.row == other.row
            && self.column == other.column
            && self.internal_id == other.internal_id
            && self.parent == other.parent
    }
}

impl Eq for ModelIndex {}

impl Hash for ModelIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.valid.hash(state);
        if self.valid {
            self.space.hash(state);
            self.row.hash(state);
            self.column.hash(state);
            self.internal_id.hash(state);
            // Parent is implicitly encoded in internal_id.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index() {
        let index = ModelIndex::invalid();
        assert!(!index.is_valid());
        assert_eq!(index.row(), 0);
        assert_eq!(index.column(), 0);
        assert!(!index.has_parent());
    }

    #[test]
    fn test_valid_index() {
        let index = ModelIndex::new(IndexSpace::Source, 5, 1, ModelIndex::invalid());
        assert!(index.is_valid());
        assert_eq!(index.row(), 5);
        assert_eq!(index.column(), 1);
        assert_eq!(index.space(), IndexSpace::Source);
        assert!(!index.has_parent());
    }

    #[test]
    fn test_hierarchical_index() {
        let parent = ModelIndex::new(IndexSpace::Source, 0, 0, ModelIndex::invalid());
        let child = ModelIndex::new(IndexSpace::Source, 2, 1, parent.clone());

        assert!(child.has_parent());
        assert_eq!(child.parent().row(), 0);
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn test_sibling_keeps_identity() {
        let index =
            ModelIndex::with_internal_id(IndexSpace::View, 1, 0, ModelIndex::invalid(), 42);
        let sibling = index.sibling_at_column(1);

        assert!(sibling.is_valid());
        assert_eq!(sibling.row(), 1);
        assert_eq!(sibling.column(), 1);
        assert_eq!(sibling.space(), IndexSpace::View);
        assert_eq!(sibling.internal_id(), 42);
    }

    #[test]
    fn test_equality_distinguishes_space() {
        let source =
            ModelIndex::with_internal_id(IndexSpace::Source, 1, 0, ModelIndex::invalid(), 7);
        let view = ModelIndex::with_internal_id(IndexSpace::View, 1, 0, ModelIndex::invalid(), 7);

        assert_ne!(source, view);
        assert_eq!(source, source.clone());
        assert_eq!(ModelIndex::invalid(), ModelIndex::invalid());
    }

    #[test]
    fn test_ancestors() {
        let level1 = ModelIndex::new(IndexSpace::Source, 0, 0, ModelIndex::invalid());
        let level2 = ModelIndex::new(IndexSpace::Source, 1, 0, level1.clone());
        let level3 = ModelIndex::new(IndexSpace::Source, 2, 0, level2.clone());

        let ancestors = level3.ancestors();
        assert_eq!(ancestors.len(), 2);
        assert_eq!(ancestors[0], level2);
        assert_eq!(ancestors[1], level1);
    }
}
