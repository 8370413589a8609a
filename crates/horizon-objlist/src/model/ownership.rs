//! Ownership policies for list adapters.
//!
//! A list adapter holds every item as an `Arc<T>`. The policy decides what
//! happens around that reference when an item enters or leaves the model:
//!
//! - [`Exclusive`]: the model adopts unparented items. On removal it clears
//!   the parent slot, if it still holds it, and defers dropping its reference
//!   until the host drains the model's queue.
//! - [`Shared`]: the model contributes one reference per occupied row and
//!   drops it immediately on removal.

use std::sync::Arc;

use horizon_objlist_core::logging::targets;
use horizon_objlist_core::{Object, ObjectId, SharedTaskQueue};

/// What a list adapter does with item references on insert and removal.
pub trait OwnershipPolicy<T>: Send + Sync + 'static {
    /// Policy name, used in log output.
    const NAME: &'static str;

    /// Called for every item that enters the model.
    fn adopt(item: &Arc<T>, owner: ObjectId);

    /// Called with the model's reference to an item that left the model.
    ///
    /// Returns `true` if destruction was deferred to `deferred`.
    fn release(item: Arc<T>, owner: ObjectId, deferred: &SharedTaskQueue) -> bool;
}

/// The model owns its items through their parent slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exclusive;

impl<T: Object> OwnershipPolicy<T> for Exclusive {
    const NAME: &'static str = "exclusive";

    fn adopt(item: &Arc<T>, owner: ObjectId) {
        if item.object_base().adopt(owner) {
            tracing::trace!(
                target: targets::MODEL,
                item = %item.object_id(),
                owner = %owner,
                "item adopted"
            );
        }
    }

    fn release(item: Arc<T>, owner: ObjectId, deferred: &SharedTaskQueue) -> bool {
        // Unparent now; only the drop waits for the drain.
        if !item.object_base().release(owner) {
            return false;
        }

        tracing::debug!(
            target: targets::MODEL,
            item = %item.object_id(),
            owner = %owner,
            "item destruction deferred"
        );
        deferred.post(move || drop(item));
        true
    }
}

/// Items are shared by reference counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shared;

impl<T: Send + Sync + 'static> OwnershipPolicy<T> for Shared {
    const NAME: &'static str = "shared";

    fn adopt(_item: &Arc<T>, _owner: ObjectId) {}

    fn release(item: Arc<T>, _owner: ObjectId, _deferred: &SharedTaskQueue) -> bool {
        drop(item);
        false
    }
}
