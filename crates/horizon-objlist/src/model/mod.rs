//! List models for Horizon ObjList.
//!
//! # Core Types
//!
//! - `ModelIndex`: Identifies a row in a model
//! - `ItemRole`: Specifies what piece of an item to access
//! - `RoleRegistry`: Role ids and names discovered from an item type
//! - `ItemModel`: The view-facing contract
//! - `AbstractListModel`: The untyped list contract
//! - `ListAdapter`: The generic list model, with `ObjectListModel` and
//!   `SharedObjectListModel` as its two ownership flavours
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  notify  ┌─────────────┐  data_changed  ┌──────────┐
//! │    Item     │─────────>│ ListAdapter │───────────────>│   View   │
//! │ (ItemMeta)  │          │  + Registry │  rows_* pairs  │          │
//! └─────────────┘          │  + UidIndex │                └──────────┘
//!                          └─────────────┘
//! ```
//!
//! Views query models using `ModelIndex` and `ItemRole` to get `ItemData`.
//! Items report changes through their notify signals; the model re-emits
//! them as `data_changed` for the row the item occupies.

mod adapter;
mod bridge;
mod contract;
mod index;
mod ownership;
mod registry;
mod role;
mod traits;
mod uid_index;

pub use adapter::{ListAdapter, ObjectListModel, SharedObjectListModel};
pub use contract::{AbstractListModel, ListSignals};
pub use index::ModelIndex;
pub use ownership::{Exclusive, OwnershipPolicy, Shared};
pub use registry::{
    DISPLAY_ROLE_NAME, OBJECT_ROLE_NAME, ROLE_NAME_BLACKLIST, RoleRegistry, is_blacklisted,
};
pub use role::ItemRole;
pub use traits::{ItemModel, ModelSignals};

static_assertions::assert_impl_all!(ModelSignals: Send, Sync);
static_assertions::assert_impl_all!(ListSignals: Send, Sync);
static_assertions::assert_impl_all!(RoleRegistry: Send, Sync);
