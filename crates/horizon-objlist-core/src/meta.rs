//! Static descriptor tables for list items.
//!
//! Every item type usable in a list model publishes an [`ItemMeta`]: the
//! ordered list of its properties (name, accessor pair, optional change
//! notification) and the signals those notifications are emitted on. The table
//! is built once, usually by `#[derive(ListItem)]`, and consulted by models for
//! role discovery, value access and change subscription.
//!
//! # Example
//!
//! ```
//! use horizon_objlist_core::{
//!     ItemData, ItemMeta, ListItem, Property, PropertyDescriptor, PropertyError, Signal,
//!     SignalDescriptor, SignalEmitter,
//! };
//!
//! struct Tag {
//!     label: Property<String>,
//!     label_changed: Signal<String>,
//! }
//!
//! fn read_label(tag: &Tag) -> ItemData {
//!     ItemData::from(tag.label.get())
//! }
//!
//! fn write_label(tag: &Tag, value: ItemData) -> Result<bool, PropertyError> {
//!     let label = value.into_string().ok_or(PropertyError::TypeMismatch {
//!         expected: "String",
//!         got: "other",
//!     })?;
//!     let changed = tag.label.set(label.clone());
//!     if changed {
//!         tag.label_changed.emit(label);
//!     }
//!     Ok(changed)
//! }
//!
//! fn label_changed(tag: &Tag) -> &dyn SignalEmitter {
//!     &tag.label_changed
//! }
//!
//! static TAG_META: ItemMeta<Tag> = ItemMeta {
//!     type_name: "Tag",
//!     properties: &[PropertyDescriptor::new("label", "String", read_label)
//!         .with_write(write_label)
//!         .with_notify("label_changed")],
//!     signals: &[SignalDescriptor::new("label_changed", label_changed)],
//! };
//!
//! impl ListItem for Tag {
//!     fn meta() -> &'static ItemMeta<Self> {
//!         &TAG_META
//!     }
//! }
//!
//! let tag = Tag { label: Property::new("a".into()), label_changed: Signal::new() };
//! assert_eq!(Tag::meta().read(&tag, "label"), Some(ItemData::from("a")));
//! assert_eq!(Tag::meta().write(&tag, "label", "b".into()), Ok(true));
//! ```

use std::fmt;

use crate::data::ItemData;
use crate::property::PropertyError;
use crate::signal::SignalEmitter;

/// Reads a property value from an item.
pub type ReadFn<T> = fn(&T) -> ItemData;

/// Writes a property value to an item, returning whether it changed.
///
/// Writers are responsible for emitting the property's notify signal.
pub type WriteFn<T> = fn(&T, ItemData) -> Result<bool, PropertyError>;

/// Returns one of the item's signals as a type-erased emitter.
pub type SignalAccessor<T> = fn(&T) -> &dyn SignalEmitter;

/// Describes one property of an item type.
pub struct PropertyDescriptor<T: 'static> {
    /// The property name.
    pub name: &'static str,
    /// The value type name (for debugging).
    pub type_name: &'static str,
    /// Getter.
    pub read: ReadFn<T>,
    /// Setter; `None` for read-only properties.
    pub write: Option<WriteFn<T>>,
    /// The name of the signal emitted when this property changes (if any).
    pub notify: Option<&'static str>,
}

impl<T: 'static> PropertyDescriptor<T> {
    /// Create a read-only property descriptor without change notification.
    pub const fn new(name: &'static str, type_name: &'static str, read: ReadFn<T>) -> Self {
        Self {
            name,
            type_name,
            read,
            write: None,
            notify: None,
        }
    }

    /// Attach a setter.
    pub const fn with_write(mut self, write: WriteFn<T>) -> Self {
        self.write = Some(write);
        self
    }

    /// Attach a change notification signal by name.
    pub const fn with_notify(mut self, signal: &'static str) -> Self {
        self.notify = Some(signal);
        self
    }

    /// Returns `true` if the property has no setter.
    pub fn is_read_only(&self) -> bool {
        self.write.is_none()
    }
}

impl<T: 'static> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("read_only", &self.is_read_only())
            .field("notify", &self.notify)
            .finish()
    }
}

/// Describes one signal of an item type.
pub struct SignalDescriptor<T: 'static> {
    /// The signal name.
    pub name: &'static str,
    /// Accessor returning the signal on a given item.
    pub accessor: SignalAccessor<T>,
}

impl<T: 'static> SignalDescriptor<T> {
    /// Create a signal descriptor.
    pub const fn new(name: &'static str, accessor: SignalAccessor<T>) -> Self {
        Self { name, accessor }
    }
}

impl<T: 'static> fmt::Debug for SignalDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// The complete descriptor table of an item type.
pub struct ItemMeta<T: 'static> {
    /// The item type name.
    pub type_name: &'static str,
    /// Properties in declaration order.
    pub properties: &'static [PropertyDescriptor<T>],
    /// Signals in declaration order.
    pub signals: &'static [SignalDescriptor<T>],
}

impl<T: 'static> ItemMeta<T> {
    /// Number of declared properties.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Get a property by declaration index.
    pub fn property(&self, index: usize) -> Option<&PropertyDescriptor<T>> {
        self.properties.get(index)
    }

    /// Find a property and its index by name.
    pub fn property_by_name(&self, name: &str) -> Option<(usize, &PropertyDescriptor<T>)> {
        self.properties
            .iter()
            .enumerate()
            .find(|(_, prop)| prop.name == name)
    }

    /// Iterate over property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|prop| prop.name)
    }

    /// Get a signal by declaration index.
    pub fn signal(&self, index: usize) -> Option<&SignalDescriptor<T>> {
        self.signals.get(index)
    }

    /// Find a signal's index by name.
    pub fn signal_index(&self, name: &str) -> Option<usize> {
        self.signals.iter().position(|sig| sig.name == name)
    }

    /// Index of the signal a property notifies on, if it has one and the
    /// signal is declared.
    pub fn notify_signal_index(&self, property: &PropertyDescriptor<T>) -> Option<usize> {
        property.notify.and_then(|name| self.signal_index(name))
    }

    /// Read a property by name. Returns `None` if there is no such property.
    pub fn read(&self, item: &T, name: &str) -> Option<ItemData> {
        self.property_by_name(name).map(|(_, prop)| (prop.read)(item))
    }

    /// Write a property by name.
    ///
    /// Returns `Ok(true)` if the value changed.
    pub fn write(&self, item: &T, name: &str, value: ItemData) -> Result<bool, PropertyError> {
        let (_, prop) = self.property_by_name(name).ok_or_else(|| PropertyError::NotFound {
            name: name.to_string(),
        })?;
        let write = prop.write.ok_or_else(|| PropertyError::ReadOnly {
            name: name.to_string(),
        })?;
        write(item, value)
    }
}

impl<T: 'static> fmt::Debug for ItemMeta<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemMeta")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .field("signals", &self.signals)
            .finish()
    }
}

/// Trait implemented by every type that can live in a list model.
///
/// Usually derived with `#[derive(ListItem)]`.
pub trait ListItem: Send + Sync + 'static {
    /// The static descriptor table for this type.
    fn meta() -> &'static ItemMeta<Self>
    where
        Self: Sized;
}
