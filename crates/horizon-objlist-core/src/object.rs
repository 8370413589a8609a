//! Object identity and parent ownership.
//!
//! Items placed in an owning list model carry an [`ObjectBase`]: a stable
//! [`ObjectId`] plus a parent slot. A model adopts an item by writing its own
//! id into the slot, and only destroys items whose parent is still that model
//! when they are removed.
//!
//! # Example
//!
//! ```
//! use horizon_objlist_core::{Object, ObjectBase, ObjectId};
//!
//! struct Task {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Task {
//!     fn object_base(&self) -> &ObjectBase {
//!         &self.base
//!     }
//! }
//!
//! let owner = ObjectId::next();
//! let task = Task { base: ObjectBase::new() };
//! assert!(task.base.parent().is_none());
//!
//! task.base.set_parent(Some(owner));
//! assert_eq!(task.base.parent(), Some(owner));
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// A global counter for generating unique object IDs.
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for an object or a model.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value of this id.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity and parent slot for an object.
///
/// Include this as a field (conventionally named `base`) in item types that
/// should be usable with an owning list model.
pub struct ObjectBase {
    id: ObjectId,
    parent: Mutex<Option<ObjectId>>,
}

impl ObjectBase {
    /// Create a new, unparented object base with a fresh id.
    pub fn new() -> Self {
        Self {
            id: ObjectId::next(),
            parent: Mutex::new(None),
        }
    }

    /// Get this object's id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the current parent, if any.
    pub fn parent(&self) -> Option<ObjectId> {
        *self.parent.lock()
    }

    /// Returns `true` if the object has a parent.
    pub fn has_parent(&self) -> bool {
        self.parent.lock().is_some()
    }

    /// Set (or clear) the parent, returning the previous one.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> Option<ObjectId> {
        std::mem::replace(&mut *self.parent.lock(), parent)
    }

    /// Set the parent only if the object currently has none.
    ///
    /// Returns `true` if the parent was set.
    pub fn adopt(&self, parent: ObjectId) -> bool {
        let mut slot = self.parent.lock();
        if slot.is_none() {
            *slot = Some(parent);
            true
        } else {
            false
        }
    }

    /// Clear the parent only if it is currently `parent`.
    ///
    /// Returns `true` if the parent was cleared.
    pub fn release(&self, parent: ObjectId) -> bool {
        let mut slot = self.parent.lock();
        if *slot == Some(parent) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase")
            .field("id", &self.id)
            .field("parent", &self.parent())
            .finish()
    }
}

/// Base trait for objects that carry an [`ObjectBase`].
pub trait Object: Send + Sync + 'static {
    /// Get the object's base (id and parent slot).
    fn object_base(&self) -> &ObjectBase;

    /// Get this object's unique identifier.
    fn object_id(&self) -> ObjectId {
        self.object_base().id()
    }
}
