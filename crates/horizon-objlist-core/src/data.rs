//! Type-erased values exchanged between items, models and views.
//!
//! [`ItemData`] is what a property getter returns and a property setter
//! accepts. [`ObjectRef`] is the untyped handle used wherever an item crosses
//! a type-erased boundary (the abstract list contract, domain signals, the
//! `qtObject` role).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An untyped, shared handle to a list item.
///
/// Convert back to the concrete item type with [`downcast_object`].
pub type ObjectRef = Arc<dyn Any + Send + Sync>;

/// Downcast an untyped item handle to its concrete type.
///
/// Returns `None` when the handle points at a different type.
pub fn downcast_object<T: Any + Send + Sync>(object: &ObjectRef) -> Option<Arc<T>> {
    Arc::clone(object).downcast::<T>().ok()
}

/// Type-erased container for item data.
///
/// # Example
///
/// ```
/// use horizon_objlist_core::ItemData;
///
/// let data = ItemData::from("Hello");
/// assert_eq!(data.as_str(), Some("Hello"));
/// assert_eq!(ItemData::from(7).to_string_lossy(), "7");
/// ```
#[derive(Clone, Default)]
pub enum ItemData {
    /// No data.
    #[default]
    None,
    /// String data.
    String(String),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data.
    Bool(bool),
    /// A list item (used by the `qtObject` role and bulk exports).
    Object(ObjectRef),
    /// A list of values.
    List(Vec<ItemData>),
}

impl ItemData {
    /// Returns `true` if this is `ItemData::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    /// Returns a short name for the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ItemData::None => "None",
            ItemData::String(_) => "String",
            ItemData::Int(_) => "Int",
            ItemData::Float(_) => "Float",
            ItemData::Bool(_) => "Bool",
            ItemData::Object(_) => "Object",
            ItemData::List(_) => "List",
        }
    }

    /// Returns the string value, if this is string data.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ItemData::String(s) => Some(s),
            _ => None,
        }
    }

    /// Consumes the data and returns the string, if this is string data.
    pub fn into_string(self) -> Option<String> {
        match self {
            ItemData::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is integer data.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemData::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ItemData::Float(n) => Some(*n),
            ItemData::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is boolean data.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ItemData::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the item handle, if this is object data.
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            ItemData::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Downcasts object data to a concrete item type.
    pub fn downcast_object<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.as_object().and_then(downcast_object::<T>)
    }

    /// Returns the list, if this is list data.
    pub fn as_list(&self) -> Option<&[ItemData]> {
        match self {
            ItemData::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts scalar data to its textual form.
    ///
    /// `None`, objects and lists convert to an empty string.
    pub fn to_string_lossy(&self) -> String {
        match self {
            ItemData::String(s) => s.clone(),
            ItemData::Int(n) => n.to_string(),
            ItemData::Float(n) => n.to_string(),
            ItemData::Bool(b) => b.to_string(),
            ItemData::None | ItemData::Object(_) | ItemData::List(_) => String::new(),
        }
    }
}

impl fmt::Debug for ItemData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemData::None => write!(f, "None"),
            ItemData::String(s) => f.debug_tuple("String").field(s).finish(),
            ItemData::Int(n) => f.debug_tuple("Int").field(n).finish(),
            ItemData::Float(n) => f.debug_tuple("Float").field(n).finish(),
            ItemData::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            ItemData::Object(obj) => write!(f, "Object({:p})", Arc::as_ptr(obj)),
            ItemData::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl PartialEq for ItemData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ItemData::None, ItemData::None) => true,
            (ItemData::String(a), ItemData::String(b)) => a == b,
            (ItemData::Int(a), ItemData::Int(b)) => a == b,
            (ItemData::Float(a), ItemData::Float(b)) => a == b,
            (ItemData::Bool(a), ItemData::Bool(b)) => a == b,
            (ItemData::Object(a), ItemData::Object(b)) => Arc::ptr_eq(a, b),
            (ItemData::List(a), ItemData::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for ItemData {
    fn from(s: &str) -> Self {
        ItemData::String(s.to_string())
    }
}

impl From<String> for ItemData {
    fn from(s: String) -> Self {
        ItemData::String(s)
    }
}

impl From<&String> for ItemData {
    fn from(s: &String) -> Self {
        ItemData::String(s.clone())
    }
}

impl From<i32> for ItemData {
    fn from(n: i32) -> Self {
        ItemData::Int(n as i64)
    }
}

impl From<i64> for ItemData {
    fn from(n: i64) -> Self {
        ItemData::Int(n)
    }
}

impl From<u32> for ItemData {
    fn from(n: u32) -> Self {
        ItemData::Int(n as i64)
    }
}

impl From<f32> for ItemData {
    fn from(n: f32) -> Self {
        ItemData::Float(n as f64)
    }
}

impl From<f64> for ItemData {
    fn from(n: f64) -> Self {
        ItemData::Float(n)
    }
}

impl From<bool> for ItemData {
    fn from(b: bool) -> Self {
        ItemData::Bool(b)
    }
}

impl From<ObjectRef> for ItemData {
    fn from(obj: ObjectRef) -> Self {
        ItemData::Object(obj)
    }
}

impl From<Vec<ItemData>> for ItemData {
    fn from(items: Vec<ItemData>) -> Self {
        ItemData::List(items)
    }
}

/// A value type that can be stored in an item property.
///
/// Descriptor tables use this trait to convert between a property's concrete
/// type and [`ItemData`].
pub trait PropertyValue: Clone + PartialEq + Send + Sync + 'static {
    /// Type name reported in type mismatch errors.
    const TYPE_NAME: &'static str;

    /// Convert the value into item data.
    fn to_item_data(&self) -> ItemData;

    /// Convert item data back into the value, if the variant is compatible.
    fn from_item_data(data: &ItemData) -> Option<Self>;
}

impl PropertyValue for String {
    const TYPE_NAME: &'static str = "String";

    fn to_item_data(&self) -> ItemData {
        ItemData::String(self.clone())
    }

    fn from_item_data(data: &ItemData) -> Option<Self> {
        data.as_str().map(str::to_string)
    }
}

impl PropertyValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn to_item_data(&self) -> ItemData {
        ItemData::Bool(*self)
    }

    fn from_item_data(data: &ItemData) -> Option<Self> {
        data.as_bool()
    }
}

impl PropertyValue for i32 {
    const TYPE_NAME: &'static str = "i32";

    fn to_item_data(&self) -> ItemData {
        ItemData::Int(*self as i64)
    }

    fn from_item_data(data: &ItemData) -> Option<Self> {
        data.as_int().and_then(|n| i32::try_from(n).ok())
    }
}

impl PropertyValue for i64 {
    const TYPE_NAME: &'static str = "i64";

    fn to_item_data(&self) -> ItemData {
        ItemData::Int(*self)
    }

    fn from_item_data(data: &ItemData) -> Option<Self> {
        data.as_int()
    }
}

impl PropertyValue for u32 {
    const TYPE_NAME: &'static str = "u32";

    fn to_item_data(&self) -> ItemData {
        ItemData::Int(*self as i64)
    }

    fn from_item_data(data: &ItemData) -> Option<Self> {
        data.as_int().and_then(|n| u32::try_from(n).ok())
    }
}

impl PropertyValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn to_item_data(&self) -> ItemData {
        ItemData::Float(*self as f64)
    }

    fn from_item_data(data: &ItemData) -> Option<Self> {
        data.as_float().map(|n| n as f32)
    }
}

impl PropertyValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn to_item_data(&self) -> ItemData {
        ItemData::Float(*self)
    }

    fn from_item_data(data: &ItemData) -> Option<Self> {
        data.as_float()
    }
}
