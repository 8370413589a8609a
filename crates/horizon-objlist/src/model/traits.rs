//! The view-facing contract of a list model.
//!
//! Views query models through [`ItemModel`] and stay synchronized through the
//! begin/end notification brackets in [`ModelSignals`].

use horizon_objlist_core::{ItemData, Signal};

use super::index::ModelIndex;
use super::role::ItemRole;

/// The trait list models implement for views.
///
/// # Implementation Requirements
///
/// At minimum, you must implement:
/// - [`row_count`](ItemModel::row_count) - Number of rows
/// - [`data`](ItemModel::data) - Data for a given index and role
/// - [`role_names`](ItemModel::role_names) - The role table
/// - [`signals`](ItemModel::signals) - The notification signals
///
/// Every mutation that changes the number or order of rows must be wrapped
/// in the matching `rows_about_to_be_*` / `rows_*` pair.
pub trait ItemModel: Send + Sync {
    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the data stored under the given role for the item at index.
    ///
    /// Return `ItemData::None` if:
    /// - The index is invalid
    /// - The role is not supported
    /// - There's no data for that role
    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData;

    /// Returns every role the model exposes with its name.
    fn role_names(&self) -> Vec<(ItemRole, &'static str)>;

    /// Returns the signals for this model.
    fn signals(&self) -> &ModelSignals;

    // -------------------------------------------------------------------------
    // Optional methods with default implementations
    // -------------------------------------------------------------------------

    /// Creates a model index for the given row.
    ///
    /// Return `ModelIndex::invalid()` if the row is out of bounds.
    fn index(&self, row: usize) -> ModelIndex {
        if row < self.row_count() {
            ModelIndex::new(row)
        } else {
            ModelIndex::invalid()
        }
    }

    /// Sets the data for the given index and role.
    ///
    /// Returns `true` if the data was successfully set.
    /// The default implementation returns `false` (read-only).
    fn set_data(&self, _index: &ModelIndex, _value: ItemData, _role: ItemRole) -> bool {
        false
    }

    // -------------------------------------------------------------------------
    // Convenience methods
    // -------------------------------------------------------------------------

    /// Looks up a role by name in [`role_names`](ItemModel::role_names).
    fn role_for_name(&self, name: &str) -> Option<ItemRole> {
        self.role_names()
            .into_iter()
            .find(|(_, role_name)| *role_name == name)
            .map(|(role, _)| role)
    }

    /// Returns the display text for an item (convenience for `data(index, Display)`).
    fn display_text(&self, index: &ModelIndex) -> Option<String> {
        self.data(index, ItemRole::Display).into_string()
    }
}

/// Collection of signals emitted by list models for views.
///
/// # Signal Usage
///
/// - **Before modifications**: Emit `rows_about_to_be_*`
/// - **After modifications**: Emit `rows_*`
/// - **Data changes**: Emit `data_changed` for value modifications
pub struct ModelSignals {
    /// Emitted just before rows are inserted.
    /// Args: (first row, last row)
    pub rows_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted.
    /// Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted just before rows are removed.
    /// Args: (first row, last row)
    pub rows_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after rows have been removed.
    /// Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted just before rows are moved.
    /// Args: (source first, source last, destination row)
    ///
    /// The destination is an "insert before" position in the list as it was
    /// before the move.
    pub rows_about_to_be_moved: Signal<(usize, usize, usize)>,

    /// Emitted after rows have been moved.
    /// Args: (source first, source last, destination row)
    pub rows_moved: Signal<(usize, usize, usize)>,

    /// Emitted when data in existing items changes.
    /// Args: (top-left index, bottom-right index, changed roles)
    pub data_changed: Signal<(ModelIndex, ModelIndex, Vec<ItemRole>)>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            rows_about_to_be_moved: Signal::new(),
            rows_moved: Signal::new(),
            data_changed: Signal::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Convenience methods for emitting signals
    // -------------------------------------------------------------------------

    /// Emits signals for row insertion.
    ///
    /// Calls the provided function between the about_to_be_inserted and inserted signals.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted.emit((first, last));
        insert_fn();
        self.rows_inserted.emit((first, last));
    }

    /// Emits signals for row removal.
    ///
    /// Calls the provided function between the about_to_be_removed and removed signals.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_removed.emit((first, last));
        remove_fn();
        self.rows_removed.emit((first, last));
    }

    /// Emits signals for moving the single row `source` before `destination`.
    pub fn emit_rows_moved<F>(&self, source: usize, destination: usize, move_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_moved
            .emit((source, source, destination));
        move_fn();
        self.rows_moved.emit((source, source, destination));
    }

    /// Emits the data_changed signal for a single item.
    pub fn emit_data_changed_single(&self, index: ModelIndex, roles: Vec<ItemRole>) {
        self.data_changed.emit((index, index, roles));
    }
}
