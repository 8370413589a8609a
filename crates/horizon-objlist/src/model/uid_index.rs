//! Secondary index from a designated property's string value to the item.

use std::collections::HashMap;
use std::sync::Arc;

use horizon_objlist_core::ListItem;
use horizon_objlist_core::logging::targets;
use parking_lot::Mutex;

use super::bridge::identity;

struct Entries<T> {
    by_uid: HashMap<String, Arc<T>>,
    by_item: HashMap<usize, String>,
}

/// Unique-id index of a list model.
///
/// At most one item per uid; the most recently indexed item wins a
/// collision. Items whose uid reads as an empty string are not indexed.
pub(crate) struct UidIndex<T> {
    property: &'static str,
    entries: Mutex<Entries<T>>,
}

impl<T: ListItem> UidIndex<T> {
    pub(crate) fn new(property: &'static str) -> Self {
        Self {
            property,
            entries: Mutex::new(Entries {
                by_uid: HashMap::new(),
                by_item: HashMap::new(),
            }),
        }
    }

    /// The property the index is keyed on.
    pub(crate) fn property(&self) -> &'static str {
        self.property
    }

    /// Index `item` under its current uid value, dropping any stale entry
    /// for the same item first.
    pub(crate) fn insert(&self, item: &Arc<T>) {
        let uid = T::meta()
            .read(item, self.property)
            .map(|value| value.to_string_lossy())
            .unwrap_or_default();

        let mut entries = self.entries.lock();
        Self::remove_locked(&mut entries, item);
        if uid.is_empty() {
            return;
        }

        tracing::trace!(target: targets::MODEL, uid = %uid, "uid indexed");
        if let Some(previous) = entries.by_uid.insert(uid.clone(), Arc::clone(item))
            && !Arc::ptr_eq(&previous, item)
        {
            entries.by_item.remove(&identity(&previous));
        }
        entries.by_item.insert(identity(item), uid);
    }

    /// Drop the entry for `item`, if it still owns one.
    pub(crate) fn remove(&self, item: &Arc<T>) {
        Self::remove_locked(&mut self.entries.lock(), item);
    }

    fn remove_locked(entries: &mut Entries<T>, item: &Arc<T>) {
        if let Some(uid) = entries.by_item.remove(&identity(item))
            && entries
                .by_uid
                .get(&uid)
                .is_some_and(|indexed| Arc::ptr_eq(indexed, item))
        {
            entries.by_uid.remove(&uid);
        }
    }

    /// The item currently indexed under `uid`.
    pub(crate) fn get(&self, uid: &str) -> Option<Arc<T>> {
        self.entries.lock().by_uid.get(uid).cloned()
    }

    /// Number of indexed uids.
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().by_uid.len()
    }
}
