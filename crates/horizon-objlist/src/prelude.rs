//! Prelude module for Horizon ObjList.
//!
//! ```ignore
//! use horizon_objlist::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot and property types (`Signal`, `Property`)
//! - Item declaration (`ListItem` trait and derive, `ObjectBase`)
//! - The list models and their contracts

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::property::Property;
pub use crate::signal::{ConnectionId, Signal};

// ============================================================================
// Items
// ============================================================================

pub use crate::object::{Object, ObjectBase, ObjectId};
pub use crate::{ItemData, ListItem, ObjectRef};

// ============================================================================
// Models
// ============================================================================

pub use crate::config::ModelConfig;
pub use crate::model::{
    AbstractListModel, ItemModel, ItemRole, ListSignals, ModelIndex, ModelSignals,
    ObjectListModel, SharedObjectListModel,
};
