//! Horizon ObjList - Object list models for Horizon Lattice views.
//!
//! This crate adapts collections of items to the list-view data-binding
//! contract: every property an item type declares becomes a named role, and
//! every insertion, removal, move, and property change becomes the matching
//! view notification.
//!
//! - [`ObjectListModel`]: owns its items through their parent slot
//! - [`SharedObjectListModel`]: shares reference-counted items
//! - [`ModelConfig`]: exposed roles, display role, and unique-id role
//!
//! # Example
//!
//! ```
//! use horizon_objlist::prelude::*;
//!
//! #[derive(Default, ListItem)]
//! struct Contact {
//!     base: ObjectBase,
//!     #[property(notify = "name_changed")]
//!     name: Property<String>,
//!     #[property(notify = "email_changed")]
//!     email: Property<String>,
//!     #[signal]
//!     name_changed: Signal<String>,
//!     #[signal]
//!     email_changed: Signal<String>,
//! }
//!
//! let model = ObjectListModel::<Contact>::with_config(
//!     ModelConfig::new().with_uid_role("email"),
//! );
//! model.signals().data_changed.connect(|(top_left, _, roles)| {
//!     println!("row {} changed: {:?}", top_left.row(), roles);
//! });
//!
//! model.append_new();
//! model.set_property(0, "email", "ada@example.com".into()).unwrap();
//! assert_eq!(model.index_of_uid("ada@example.com"), Some(0));
//! ```

pub use horizon_objlist_core::*;
pub use horizon_objlist_macros::*;

pub mod config;
pub mod model;
pub mod prelude;

pub use config::{ConfigError, ConfigResult, ModelConfig};
pub use model::{ObjectListModel, SharedObjectListModel};
