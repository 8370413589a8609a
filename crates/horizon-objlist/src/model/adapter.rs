//! The generic list adapter.
//!
//! `ListAdapter<T, P>` keeps an ordered list of `Arc<T>` items, exposes their
//! properties as roles, and turns every mutation into the notification
//! sequence views and observers rely on:
//!
//! 1. `item_about_to_be_*` for each affected item
//! 2. `rows_about_to_be_*`
//! 3. the mutation itself, then the count update (`count_changed` only when
//!    the count differs)
//! 4. `rows_*`
//! 5. `item_*` for each affected item
//!
//! No lock is held while a signal is emitted, so slots may call back into
//! the model.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use horizon_objlist_core::logging::{span_names, targets};
use horizon_objlist_core::{
    ItemData, ListItem, ObjectId, ObjectRef, ObjlistError, PerfSpan, PropertyError, Result,
    SharedTaskQueue, downcast_object,
};
use parking_lot::{Mutex, RwLock};

use super::bridge::{Bridge, identity};
use super::contract::{AbstractListModel, ListSignals};
use super::index::ModelIndex;
use super::ownership::{Exclusive, OwnershipPolicy, Shared};
use super::registry::RoleRegistry;
use super::role::ItemRole;
use super::traits::{ItemModel, ModelSignals};
use super::uid_index::UidIndex;
use crate::config::ModelConfig;

/// A list model whose items it owns through their parent slot.
///
/// Unparented items are adopted on insertion. On removal, an item the model
/// still parents is unparented at once and its reference is dropped on the
/// next [`process_deferred_deletes`](ListAdapter::process_deferred_deletes).
pub type ObjectListModel<T> = ListAdapter<T, Exclusive>;

/// A list model over reference-counted items that may live in several
/// containers at once.
pub type SharedObjectListModel<T> = ListAdapter<T, Shared>;

fn object_ref<T: ListItem>(item: &Arc<T>) -> ObjectRef {
    item.clone()
}

/// A list model over `Arc<T>` items with introspected roles.
///
/// Construct through [`ListAdapter::new`] or [`ListAdapter::with_config`];
/// the model is always handed out as an `Arc` so that item notifications can
/// reach it.
///
/// # Example
///
/// ```
/// use horizon_objlist::prelude::*;
///
/// #[derive(Default, ListItem)]
/// struct Person {
///     base: ObjectBase,
///     #[property(notify = "name_changed")]
///     name: Property<String>,
///     #[signal]
///     name_changed: Signal<String>,
/// }
///
/// let model = ObjectListModel::<Person>::with_config(
///     ModelConfig::new().with_display_role("name"),
/// );
/// let person = model.append_new();
/// model.set_property(0, "name", "Ada".into()).unwrap();
///
/// assert_eq!(model.count(), 1);
/// assert_eq!(person.name.get(), "Ada");
/// assert_eq!(model.display_text(&model.index(0)), Some("Ada".to_string()));
/// ```
pub struct ListAdapter<T: ListItem, P: OwnershipPolicy<T>> {
    id: ObjectId,
    this: Weak<Self>,
    items: RwLock<Vec<Arc<T>>>,
    count: Mutex<usize>,
    registry: RoleRegistry,
    uid_index: Option<UidIndex<T>>,
    bridge: Bridge<T>,
    deferred: SharedTaskQueue,
    signals: ModelSignals,
    list_signals: ListSignals,
    _policy: PhantomData<fn() -> P>,
}

impl<T: ListItem, P: OwnershipPolicy<T>> ListAdapter<T, P> {
    /// Creates an empty model exposing every property of `T`.
    pub fn new() -> Arc<Self> {
        Self::with_config(ModelConfig::default())
    }

    /// Creates an empty model with the given role configuration.
    pub fn with_config(config: ModelConfig) -> Arc<Self> {
        let meta = T::meta();
        let registry = RoleRegistry::build(
            meta,
            &config.exposed_roles,
            config.display_role.as_deref(),
        );

        let uid_index = config.uid_role.as_deref().and_then(|name| {
            match meta.property_by_name(name) {
                Some((_, prop)) => Some(UidIndex::new(prop.name)),
                None => {
                    tracing::warn!(
                        target: targets::ROLES,
                        item = meta.type_name,
                        property = name,
                        "uid property does not exist; uid index disabled"
                    );
                    None
                }
            }
        });

        let id = ObjectId::next();
        tracing::debug!(
            target: targets::MODEL,
            model = %id,
            item = meta.type_name,
            policy = P::NAME,
            roles = registry.len(),
            uid = uid_index.as_ref().map(UidIndex::property),
            "list model created"
        );

        Arc::new_cyclic(|this| Self {
            id,
            this: this.clone(),
            items: RwLock::new(Vec::new()),
            count: Mutex::new(0),
            registry,
            uid_index,
            bridge: Bridge::new(),
            deferred: SharedTaskQueue::new(),
            signals: ModelSignals::new(),
            list_signals: ListSignals::new(),
            _policy: PhantomData,
        })
    }

    /// The model's identity, used as the parent of adopted items.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The role table.
    pub fn role_registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// The view notification signals.
    pub fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    /// The domain notification signals.
    pub fn list_signals(&self) -> &ListSignals {
        &self.list_signals
    }

    /// The property keying the unique-id index, if one is configured.
    pub fn uid_role(&self) -> Option<&'static str> {
        self.uid_index.as_ref().map(UidIndex::property)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Number of items.
    pub fn count(&self) -> usize {
        *self.count.lock()
    }

    /// Alias of [`count`](Self::count).
    pub fn size(&self) -> usize {
        self.count()
    }

    /// Alias of [`count`](Self::count).
    pub fn length(&self) -> usize {
        self.count()
    }

    /// Alias of [`count`](Self::count).
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Returns `true` if the model holds no items.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The item at `row`.
    pub fn at(&self, row: usize) -> Option<Arc<T>> {
        self.items.read().get(row).cloned()
    }

    /// The first item.
    pub fn first(&self) -> Option<Arc<T>> {
        self.items.read().first().cloned()
    }

    /// The last item.
    pub fn last(&self) -> Option<Arc<T>> {
        self.items.read().last().cloned()
    }

    /// Returns `true` if the item is in the model.
    pub fn contains(&self, item: &Arc<T>) -> bool {
        self.index_of(item).is_some()
    }

    /// Row of the first occurrence of the item.
    pub fn index_of(&self, item: &Arc<T>) -> Option<usize> {
        self.items
            .read()
            .iter()
            .position(|held| Arc::ptr_eq(held, item))
    }

    /// The item whose unique-id property currently equals `uid`.
    ///
    /// Always `None` when no uid property is configured.
    pub fn get_by_uid(&self, uid: &str) -> Option<Arc<T>> {
        self.uid_index.as_ref().and_then(|index| index.get(uid))
    }

    /// Row of the item currently indexed under `uid`.
    pub fn index_of_uid(&self, uid: &str) -> Option<usize> {
        self.get_by_uid(uid).and_then(|item| self.index_of(&item))
    }

    /// A snapshot of every item in row order.
    pub fn to_list(&self) -> Vec<Arc<T>> {
        self.items.read().clone()
    }

    /// Iterate over a snapshot of the items.
    pub fn iter(&self) -> std::vec::IntoIter<Arc<T>> {
        self.to_list().into_iter()
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Insert an item at the end.
    pub fn append(&self, item: Arc<T>) {
        self.insert_batch(None, vec![item]);
    }

    /// Insert an item at the beginning.
    pub fn prepend(&self, item: Arc<T>) {
        self.insert_batch(Some(0), vec![item]);
    }

    /// Insert an item before `row`. Rows past the end append.
    pub fn insert(&self, row: usize, item: Arc<T>) {
        self.insert_batch(Some(row), vec![item]);
    }

    /// Insert items at the end, in order, inside a single bracket.
    pub fn append_all<I>(&self, items: I)
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        self.insert_batch(None, items.into_iter().collect());
    }

    /// Insert items at the beginning, in order, inside a single bracket.
    pub fn prepend_all<I>(&self, items: I)
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        self.insert_batch(Some(0), items.into_iter().collect());
    }

    /// Insert items before `row`, in order, inside a single bracket.
    pub fn insert_all<I>(&self, row: usize, items: I)
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        self.insert_batch(Some(row), items.into_iter().collect());
    }

    fn insert_batch(&self, row: Option<usize>, items: Vec<Arc<T>>) {
        if items.is_empty() {
            return;
        }
        let _perf = (items.len() > 1).then(|| PerfSpan::new(span_names::BATCH));

        let len = self.items.read().len();
        let first = row.map_or(len, |row| row.min(len));
        let last = first + items.len() - 1;

        for (offset, item) in items.iter().enumerate() {
            self.list_signals
                .item_about_to_be_inserted
                .emit((object_ref(item), first + offset));
        }

        tracing::trace!(target: targets::MODEL, model = %self.id, first, last, "inserting rows");
        self.signals.emit_rows_inserted(first, last, || {
            {
                let mut held = self.items.write();
                let at = first.min(held.len());
                held.reserve(items.len());
                let tail = held.split_off(at);
                held.extend(items.iter().cloned());
                held.extend(tail);
            }
            for item in &items {
                self.reference(item);
            }
            self.update_count();
        });

        for (offset, item) in items.iter().enumerate() {
            self.list_signals
                .item_inserted
                .emit((object_ref(item), first + offset));
        }
    }

    // -------------------------------------------------------------------------
    // Reordering and removal
    // -------------------------------------------------------------------------

    /// Move the item at `from` so that it ends up at row `to`.
    ///
    /// Equal or out-of-range rows are a no-op. The destination announced in
    /// `rows_about_to_be_moved` is an "insert before" row of the list prior
    /// to the move, so it is `to + 1` when moving forward.
    pub fn move_item(&self, from: usize, to: usize) {
        let len = self.len();
        if from == to || from >= len || to >= len {
            return;
        }
        let Some(item) = self.at(from) else {
            return;
        };
        let destination = if from < to { to + 1 } else { to };

        self.list_signals
            .item_about_to_be_moved
            .emit((object_ref(&item), from, to));

        tracing::trace!(target: targets::MODEL, model = %self.id, from, to, destination, "moving row");
        self.signals.emit_rows_moved(from, destination, || {
            let mut held = self.items.write();
            if from < held.len() && to < held.len() {
                let moved = held.remove(from);
                held.insert(to, moved);
            }
        });

        self.list_signals
            .item_moved
            .emit((object_ref(&item), from, to));
    }

    /// Move the item at `row` one row up.
    pub fn move_up(&self, row: usize) {
        if let Some(to) = row.checked_sub(1) {
            self.move_item(row, to);
        }
    }

    /// Move the item at `row` one row down.
    pub fn move_down(&self, row: usize) {
        if let Some(to) = row.checked_add(1) {
            self.move_item(row, to);
        }
    }

    /// Remove the item at `row`. Out-of-range rows are a no-op.
    pub fn remove_at(&self, row: usize) {
        let Some(item) = self.at(row) else {
            return;
        };

        self.list_signals
            .item_about_to_be_removed
            .emit((object_ref(&item), row));

        tracing::trace!(target: targets::MODEL, model = %self.id, row, "removing row");
        self.signals.emit_rows_removed(row, row, || {
            let removed = {
                let mut held = self.items.write();
                (row < held.len()).then(|| held.remove(row))
            };
            if let Some(removed) = removed {
                self.dereference(removed);
            }
            self.update_count();
        });

        self.list_signals
            .item_removed
            .emit((object_ref(&item), row));
    }

    /// Remove the first occurrence of `item`. Absent items are a no-op.
    pub fn remove(&self, item: &Arc<T>) {
        if let Some(row) = self.index_of(item) {
            self.remove_at(row);
        }
    }

    /// Remove every item inside a single bracket.
    pub fn clear(&self) {
        let items = self.to_list();
        if items.is_empty() {
            return;
        }
        let _perf = PerfSpan::new(span_names::BATCH);

        for (row, item) in items.iter().enumerate() {
            self.list_signals
                .item_about_to_be_removed
                .emit((object_ref(item), row));
        }

        let last = items.len() - 1;
        tracing::trace!(target: targets::MODEL, model = %self.id, last, "clearing rows");
        self.signals.emit_rows_removed(0, last, || {
            let removed = std::mem::take(&mut *self.items.write());
            for item in removed {
                self.dereference(item);
            }
            self.update_count();
        });

        for (row, item) in items.iter().enumerate() {
            self.list_signals
                .item_removed
                .emit((object_ref(item), row));
        }
    }

    // -------------------------------------------------------------------------
    // Deferred destruction
    // -------------------------------------------------------------------------

    /// Returns `true` if removed items are waiting to be released.
    pub fn has_pending_deletes(&self) -> bool {
        self.deferred.has_pending()
    }

    /// Release removed items the model owned.
    ///
    /// Call from the host's idle point. Returns the number of items released.
    pub fn process_deferred_deletes(&self) -> usize {
        let _perf = PerfSpan::new(span_names::DEFERRED);
        let processed = self.deferred.process_all();
        if processed > 0 {
            tracing::debug!(target: targets::MODEL, model = %self.id, processed, "deferred deletes processed");
        }
        processed
    }

    // -------------------------------------------------------------------------
    // Property access by name
    // -------------------------------------------------------------------------

    /// Read a property of the item at `row` by name.
    pub fn property(&self, row: usize, name: &str) -> Result<ItemData> {
        let item = self.item_at(row)?;
        T::meta()
            .read(&item, name)
            .ok_or_else(|| ObjlistError::Property(PropertyError::NotFound { name: name.into() }))
    }

    /// Write a property of the item at `row` by name.
    ///
    /// Returns `Ok(true)` if the value changed. The item's notify signal then
    /// propagates the change to the model.
    pub fn set_property(&self, row: usize, name: &str, value: ItemData) -> Result<bool> {
        let item = self.item_at(row)?;
        Ok(T::meta().write(&item, name, value)?)
    }

    /// Read the value of a role, looked up by role name, at `row`.
    pub fn role_value(&self, row: usize, role_name: &str) -> Result<ItemData> {
        let role = self
            .registry
            .role_for_name(role_name)
            .ok_or_else(|| ObjlistError::UnknownRole(role_name.to_string()))?;
        let item = self.item_at(row)?;
        Ok(self.value_for_role(&item, role))
    }

    fn item_at(&self, row: usize) -> Result<Arc<T>> {
        let held = self.items.read();
        held.get(row).cloned().ok_or(ObjlistError::RowOutOfRange {
            row,
            count: held.len(),
        })
    }

    fn value_for_role(&self, item: &Arc<T>, role: ItemRole) -> ItemData {
        if role == ItemRole::OBJECT {
            return ItemData::Object(object_ref(item));
        }
        self.registry
            .property_name(role)
            .and_then(|name| T::meta().read(item, name))
            .unwrap_or_default()
    }

    fn model_index(&self, row: usize, item: &Arc<T>) -> ModelIndex {
        ModelIndex::with_internal_id(row, identity(item) as u64)
    }

    // -------------------------------------------------------------------------
    // Item lifecycle
    // -------------------------------------------------------------------------

    fn reference(&self, item: &Arc<T>) {
        P::adopt(item, self.id);

        let model = self.this.clone();
        self.bridge.connect(item, &self.registry, move |item, role| {
            if let Some(model) = model.upgrade() {
                model.on_item_changed(item, role);
            }
        });

        if let Some(index) = &self.uid_index {
            index.insert(item);
        }
    }

    fn dereference(&self, item: Arc<T>) {
        self.bridge.disconnect(&item);
        if let Some(index) = &self.uid_index {
            index.remove(&item);
        }
        P::release(item, self.id, &self.deferred);
    }

    fn on_item_changed(&self, item: Arc<T>, role: ItemRole) {
        if let Some(row) = self.index_of(&item) {
            let mut roles = vec![role];
            if self.registry.is_display_backing(role) {
                roles.push(ItemRole::Display);
            }
            tracing::trace!(target: targets::BRIDGE, model = %self.id, row, role = role.value(), "item data changed");
            self.signals
                .emit_data_changed_single(self.model_index(row, &item), roles);
        }

        if let Some(index) = &self.uid_index
            && self.registry.property_name(role) == Some(index.property())
        {
            index.insert(&item);
        }
    }

    fn update_count(&self) {
        let len = self.items.read().len();
        let changed = {
            let mut count = self.count.lock();
            let changed = *count != len;
            *count = len;
            changed
        };
        if changed {
            self.list_signals.count_changed.emit(len);
        }
    }

    fn typed(&self, item: &ObjectRef) -> Option<Arc<T>> {
        let typed = downcast_object::<T>(item);
        if typed.is_none() {
            tracing::debug!(
                target: targets::MODEL,
                model = %self.id,
                expected = T::meta().type_name,
                "ignoring item of another type"
            );
        }
        typed
    }
}

impl<T: ListItem + Default, P: OwnershipPolicy<T>> ListAdapter<T, P> {
    /// Append a default-constructed item and return it.
    ///
    /// With the owning policy the new item is parented to the model.
    pub fn append_new(&self) -> Arc<T> {
        let item = Arc::new(T::default());
        self.append(item.clone());
        item
    }

    /// Insert a default-constructed item before `row` and return it.
    pub fn insert_new(&self, row: usize) -> Arc<T> {
        let item = Arc::new(T::default());
        self.insert(row, item.clone());
        item
    }
}

impl<T: ListItem, P: OwnershipPolicy<T>> Drop for ListAdapter<T, P> {
    fn drop(&mut self) {
        let items = std::mem::take(self.items.get_mut());
        for item in items {
            self.dereference(item);
        }
        self.deferred.process_all();
    }
}

impl<T: ListItem, P: OwnershipPolicy<T>> fmt::Debug for ListAdapter<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListAdapter")
            .field("id", &self.id)
            .field("item", &T::meta().type_name)
            .field("policy", &P::NAME)
            .field("count", &self.count())
            .field("roles", &self.registry.role_names())
            .finish()
    }
}

impl<T: ListItem, P: OwnershipPolicy<T>> ItemModel for ListAdapter<T, P> {
    fn row_count(&self) -> usize {
        self.count()
    }

    fn index(&self, row: usize) -> ModelIndex {
        match self.at(row) {
            Some(item) => self.model_index(row, &item),
            None => ModelIndex::invalid(),
        }
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        index
            .valid_row()
            .and_then(|row| self.at(row))
            .map(|item| self.value_for_role(&item, role))
            .unwrap_or_default()
    }

    fn set_data(&self, index: &ModelIndex, value: ItemData, role: ItemRole) -> bool {
        if role == ItemRole::OBJECT {
            return false;
        }
        let Some(item) = index.valid_row().and_then(|row| self.at(row)) else {
            return false;
        };
        let Some(name) = self.registry.property_name(role) else {
            return false;
        };

        match T::meta().write(&item, name, value) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(target: targets::MODEL, model = %self.id, error = %err, "set_data rejected");
                false
            }
        }
    }

    fn role_names(&self) -> Vec<(ItemRole, &'static str)> {
        self.registry.role_names().to_vec()
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn role_for_name(&self, name: &str) -> Option<ItemRole> {
        self.registry.role_for_name(name)
    }
}

impl<T: ListItem, P: OwnershipPolicy<T>> AbstractListModel for ListAdapter<T, P> {
    fn count(&self) -> usize {
        ListAdapter::count(self)
    }

    fn index_of_object(&self, item: &ObjectRef) -> Option<usize> {
        downcast_object::<T>(item).and_then(|item| self.index_of(&item))
    }

    fn append_object(&self, item: ObjectRef) {
        if let Some(item) = self.typed(&item) {
            self.append(item);
        }
    }

    fn prepend_object(&self, item: ObjectRef) {
        if let Some(item) = self.typed(&item) {
            self.prepend(item);
        }
    }

    fn insert_object(&self, row: usize, item: ObjectRef) {
        if let Some(item) = self.typed(&item) {
            self.insert(row, item);
        }
    }

    fn append_objects(&self, items: Vec<ObjectRef>) {
        let typed: Vec<_> = items.iter().filter_map(|item| self.typed(item)).collect();
        self.append_all(typed);
    }

    fn prepend_objects(&self, items: Vec<ObjectRef>) {
        let typed: Vec<_> = items.iter().filter_map(|item| self.typed(item)).collect();
        self.prepend_all(typed);
    }

    fn insert_objects(&self, row: usize, items: Vec<ObjectRef>) {
        let typed: Vec<_> = items.iter().filter_map(|item| self.typed(item)).collect();
        self.insert_all(row, typed);
    }

    fn remove_object(&self, item: &ObjectRef) {
        if let Some(item) = self.typed(item) {
            self.remove(&item);
        }
    }

    fn remove_at(&self, row: usize) {
        ListAdapter::remove_at(self, row);
    }

    fn move_item(&self, from: usize, to: usize) {
        ListAdapter::move_item(self, from, to);
    }

    fn clear(&self) {
        ListAdapter::clear(self);
    }

    fn get_object(&self, row: usize) -> Option<ObjectRef> {
        self.at(row).map(|item| object_ref(&item))
    }

    fn get_by_uid(&self, uid: &str) -> Option<ObjectRef> {
        ListAdapter::get_by_uid(self, uid).map(|item| object_ref(&item))
    }

    fn to_var_array(&self) -> Vec<ItemData> {
        self.items
            .read()
            .iter()
            .map(|item| ItemData::Object(object_ref(item)))
            .collect()
    }

    fn list_signals(&self) -> &ListSignals {
        &self.list_signals
    }
}
