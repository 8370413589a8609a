//! Model index for addressing rows in list models.
//!
//! A `ModelIndex` names one row of a flat list model. List adapters fill the
//! internal id with the identity of the item occupying the row, so an index
//! taken before a mutation can be checked against the item now at that row.

/// Represents a position within an `ItemModel`.
///
/// # Index Validity
///
/// Model indices should be used immediately and not stored long-term.
/// After insertions, removals or moves, previously obtained indices may point
/// at a different item.
///
/// # Example
///
/// ```
/// use horizon_objlist::model::ModelIndex;
///
/// let index = ModelIndex::new(3);
/// assert!(index.is_valid());
/// assert_eq!(index.row(), 3);
/// assert!(!ModelIndex::invalid().is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelIndex {
    /// The row within the list.
    row: usize,
    /// A model-specific identifier; list adapters store the item identity.
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
    /// An invalid index represents a non-existent or out-of-bounds row.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            row: 0,
            internal_id: 0,
            valid: false,
        }
    }

    /// Creates a new valid model index without an internal id.
    #[inline]
    pub const fn new(row: usize) -> Self {
        Self::with_internal_id(row, 0)
    }

    /// Creates a new valid model index with a custom internal ID.
    #[inline]
    pub const fn with_internal_id(row: usize, internal_id: u64) -> Self {
        Self {
            row,
            internal_id,
            valid: true,
        }
    }

    /// Returns `true` if this is a valid index.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the row of this index.
    ///
    /// Returns 0 for invalid indices.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the internal ID associated with this index.
    #[inline]
    pub fn internal_id(&self) -> u64 {
        self.internal_id
    }

    /// The row, if this index is valid.
    #[inline]
    pub fn valid_row(&self) -> Option<usize> {
        self.valid.then_some(self.row)
    }

    /// Creates a sibling index at the given row, without an internal id.
    ///
    /// Returns an invalid index if this index is invalid.
    #[inline]
    pub fn sibling_at_row(&self, row: usize) -> ModelIndex {
        if !self.is_valid() {
            return ModelIndex::invalid();
        }
        ModelIndex::new(row)
    }
}

impl std::fmt::Debug for ModelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            f.debug_struct("ModelIndex")
                .field("row", &self.row)
                .field("internal_id", &self.internal_id)
                .finish()
        } else {
            write!(f, "ModelIndex(invalid)")
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
        assert_eq!(index.valid_row(), None);
        assert_eq!(index, ModelIndex::default());
        assert!(!index.sibling_at_row(2).is_valid());
    }

    #[test]
    fn test_internal_id_participates_in_equality() {
        let a = ModelIndex::with_internal_id(1, 10);
        let b = ModelIndex::with_internal_id(1, 11);
        assert_ne!(a, b);
        assert_eq!(a.sibling_at_row(4), ModelIndex::new(4));
        assert_eq!(a.valid_row(), Some(1));
    }
}
