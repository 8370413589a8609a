//! The untyped list contract shared by every list adapter.
//!
//! [`AbstractListModel`] is object safe: items cross it as [`ObjectRef`]
//! handles, so declarative bindings and other generic code can drive any
//! adapter without knowing its item type. Handles of the wrong type are
//! treated as absent.

use horizon_objlist_core::{ItemData, ObjectRef, Signal};

use super::traits::ItemModel;

/// Domain notifications emitted around every list mutation.
///
/// Each signal carries the affected item and its row (or source and
/// destination rows for moves). For a mutation the order is: the
/// `item_about_to_be_*` signals, the view bracket in `ModelSignals`, then the
/// completed `item_*` signals.
pub struct ListSignals {
    /// Args: (item, row it will occupy)
    pub item_about_to_be_inserted: Signal<(ObjectRef, usize)>,
    /// Args: (item, row)
    pub item_inserted: Signal<(ObjectRef, usize)>,
    /// Args: (item, source row, destination row)
    pub item_about_to_be_moved: Signal<(ObjectRef, usize, usize)>,
    /// Args: (item, source row, destination row)
    pub item_moved: Signal<(ObjectRef, usize, usize)>,
    /// Args: (item, row)
    pub item_about_to_be_removed: Signal<(ObjectRef, usize)>,
    /// Args: (item, row it occupied)
    pub item_removed: Signal<(ObjectRef, usize)>,
    /// Emitted with the new count whenever the number of items changes.
    pub count_changed: Signal<usize>,
}

impl Default for ListSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSignals {
    /// Creates a new set of list signals.
    pub fn new() -> Self {
        Self {
            item_about_to_be_inserted: Signal::new(),
            item_inserted: Signal::new(),
            item_about_to_be_moved: Signal::new(),
            item_moved: Signal::new(),
            item_about_to_be_removed: Signal::new(),
            item_removed: Signal::new(),
            count_changed: Signal::new(),
        }
    }
}

/// The full operation set of a list model, over untyped item handles.
///
/// Row arguments that do not address an item make the operation a no-op (or
/// return `None`/`false`). Insertion rows are clamped into `[0, count]`.
pub trait AbstractListModel: ItemModel {
    /// Number of items.
    fn count(&self) -> usize;

    /// Alias of [`count`](AbstractListModel::count).
    fn size(&self) -> usize {
        self.count()
    }

    /// Returns `true` if the model holds no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns `true` if the item is in the model.
    fn contains_object(&self, item: &ObjectRef) -> bool {
        self.index_of_object(item).is_some()
    }

    /// Row of the first occurrence of the item.
    fn index_of_object(&self, item: &ObjectRef) -> Option<usize>;

    /// Row of the item currently indexed under `uid`.
    fn index_of_uid(&self, uid: &str) -> Option<usize> {
        self.get_by_uid(uid)
            .and_then(|item| self.index_of_object(&item))
    }

    /// Insert an item at the end.
    fn append_object(&self, item: ObjectRef);

    /// Insert an item at the beginning.
    fn prepend_object(&self, item: ObjectRef);

    /// Insert an item before `row`.
    fn insert_object(&self, row: usize, item: ObjectRef);

    /// Insert items at the end, in order, inside a single bracket.
    fn append_objects(&self, items: Vec<ObjectRef>);

    /// Insert items at the beginning, in order, inside a single bracket.
    fn prepend_objects(&self, items: Vec<ObjectRef>);

    /// Insert items before `row`, in order, inside a single bracket.
    fn insert_objects(&self, row: usize, items: Vec<ObjectRef>);

    /// Remove the first occurrence of an item.
    fn remove_object(&self, item: &ObjectRef);

    /// Remove the item at `row`.
    fn remove_at(&self, row: usize);

    /// Move the item at `from` so that it ends up at row `to`.
    fn move_item(&self, from: usize, to: usize);

    /// Remove every item.
    fn clear(&self);

    /// The item at `row`.
    fn get_object(&self, row: usize) -> Option<ObjectRef>;

    /// The item whose unique-id property currently equals `uid`.
    fn get_by_uid(&self, uid: &str) -> Option<ObjectRef>;

    /// The first item.
    fn first_object(&self) -> Option<ObjectRef> {
        self.get_object(0)
    }

    /// The last item.
    fn last_object(&self) -> Option<ObjectRef> {
        self.count()
            .checked_sub(1)
            .and_then(|row| self.get_object(row))
    }

    /// Every item as `ItemData::Object`, in row order.
    fn to_var_array(&self) -> Vec<ItemData>;

    /// The domain notifications of this model.
    fn list_signals(&self) -> &ListSignals;
}
