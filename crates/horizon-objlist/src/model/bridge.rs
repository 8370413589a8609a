//! Change propagation from item notify signals to the model.
//!
//! While an item is referenced by a model, every notify signal the role
//! registry tracks is connected to a handler that knows the item (through a
//! weak handle captured in the connection) and the role the signal reports.
//! Resolving the sender is therefore O(1); the model only has to find the row.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use horizon_objlist_core::logging::targets;
use horizon_objlist_core::{ConnectionId, ListItem};
use parking_lot::Mutex;

use super::registry::RoleRegistry;
use super::role::ItemRole;

/// Identity key of a shared item handle.
#[inline]
pub(crate) fn identity<T: ?Sized>(item: &Arc<T>) -> usize {
    Arc::as_ptr(item) as *const () as usize
}

#[derive(Debug, Clone, Copy)]
struct Link {
    signal_index: usize,
    connection: ConnectionId,
}

/// Per-model bookkeeping of item signal connections.
pub(crate) struct Bridge<T> {
    links: Mutex<HashMap<usize, Vec<Link>>>,
    _item: PhantomData<fn(&T)>,
}

impl<T: ListItem> Bridge<T> {
    pub(crate) fn new() -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            _item: PhantomData,
        }
    }

    /// Connect every tracked notify signal of `item` to `on_change`.
    ///
    /// An item is wired at most once; returns `false` if it already was.
    pub(crate) fn connect<F>(&self, item: &Arc<T>, registry: &RoleRegistry, on_change: F) -> bool
    where
        F: Fn(Arc<T>, ItemRole) + Clone + Send + Sync + 'static,
    {
        let key = identity(item);
        let mut links = self.links.lock();
        if links.contains_key(&key) {
            return false;
        }

        let meta = T::meta();
        let mut item_links = Vec::new();
        for (signal_index, role) in registry.notify_signals() {
            let Some(signal) = meta.signal(signal_index) else {
                continue;
            };
            let weak = Arc::downgrade(item);
            let handler = on_change.clone();
            let connection = (signal.accessor)(item).connect_notify(Arc::new(move || {
                if let Some(item) = weak.upgrade() {
                    handler(item, role);
                }
            }));
            item_links.push(Link {
                signal_index,
                connection,
            });
        }

        tracing::trace!(
            target: targets::BRIDGE,
            item = meta.type_name,
            connections = item_links.len(),
            "item connected"
        );
        links.insert(key, item_links);
        true
    }

    /// Disconnect every connection made for `item`.
    ///
    /// Returns the number of connections removed.
    pub(crate) fn disconnect(&self, item: &Arc<T>) -> usize {
        let Some(item_links) = self.links.lock().remove(&identity(item)) else {
            return 0;
        };

        let meta = T::meta();
        for link in &item_links {
            if let Some(signal) = meta.signal(link.signal_index) {
                (signal.accessor)(item).disconnect(link.connection);
            }
        }

        tracing::trace!(
            target: targets::BRIDGE,
            item = meta.type_name,
            connections = item_links.len(),
            "item disconnected"
        );
        item_links.len()
    }

    /// Returns `true` if `item` is currently wired.
    pub(crate) fn is_connected(&self, item: &Arc<T>) -> bool {
        self.links.lock().contains_key(&identity(item))
    }

    /// Number of wired items.
    pub(crate) fn connected_items(&self) -> usize {
        self.links.lock().len()
    }
}
