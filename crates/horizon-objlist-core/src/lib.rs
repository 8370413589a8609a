//! Core systems for Horizon ObjList.
//!
//! This crate provides the foundations the list models are built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous notifications
//! - **Property System**: Values with change detection
//! - **Descriptor Tables**: Static per-type property and signal metadata
//! - **Object Identity**: Ids and parent slots for ownership tracking
//! - **Task Queue**: Deferred work drained at the host's idle point
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_objlist_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod data;
mod error;
pub mod logging;
pub mod meta;
pub mod object;
pub mod property;
pub mod signal;
pub mod task;

pub use data::{ItemData, ObjectRef, PropertyValue, downcast_object};
pub use error::{ObjlistError, Result};
pub use logging::PerfSpan;
pub use meta::{
    ItemMeta, ListItem, PropertyDescriptor, ReadFn, SignalAccessor, SignalDescriptor, WriteFn,
};
pub use object::{Object, ObjectBase, ObjectId};
pub use property::{Property, PropertyError};
pub use signal::{ConnectionId, Signal, SignalEmitter};
pub use task::{SharedTaskQueue, TaskQueue};
