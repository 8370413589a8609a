//! Data roles for list models.
//!
//! Roles define which piece of an item a view is asking for. The list
//! adapters expose every introspected property as a `User` role, plus the
//! `qtObject` pseudo-role for the item itself and an optional `Display` alias.

/// Roles for accessing different aspects of item data.
///
/// # Role Allocation
///
/// - **Display**: The `display` alias, backed by a configured property
/// - **Edit**: Value for editing; list adapters treat it like `Display`
/// - **User(0)**: The `qtObject` pseudo-role (the item itself)
/// - **User(1 + n)**: The property at declaration index `n`
///
/// # Example
///
/// ```
/// use horizon_objlist::model::ItemRole;
///
/// assert_eq!(ItemRole::OBJECT.value(), 256);
/// assert_eq!(ItemRole::for_property(2), ItemRole::User(3));
/// assert_eq!(ItemRole::from_value(259), Some(ItemRole::User(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum ItemRole {
    /// Primary text to display.
    Display = 0,

    /// Value for editing.
    Edit = 2,

    /// Application-specific data. Values start at 256.
    User(u32) = 256,
}

impl ItemRole {
    /// The pseudo-role that returns the item itself.
    pub const OBJECT: ItemRole = ItemRole::User(0);

    /// The role allocated to the property at `property_index`.
    ///
    /// Indices past `u32::MAX - 1` saturate to `User(u32::MAX)`.
    #[inline]
    pub const fn for_property(property_index: usize) -> Self {
        if property_index >= u32::MAX as usize {
            ItemRole::User(u32::MAX)
        } else {
            ItemRole::User(property_index as u32 + 1)
        }
    }

    /// The property index this role was allocated for, if it is a property
    /// role.
    pub fn property_index(&self) -> Option<usize> {
        match self {
            ItemRole::User(n) if *n > 0 => Some((*n - 1) as usize),
            _ => None,
        }
    }

    /// Returns `true` if this is a user-defined role.
    #[inline]
    pub fn is_user_role(&self) -> bool {
        matches!(self, ItemRole::User(_))
    }

    /// Returns the numeric value of this role.
    ///
    /// Standard roles have fixed values 0-255.
    /// User roles have values >= 256, saturating at `u32::MAX`.
    pub fn value(&self) -> u32 {
        match self {
            ItemRole::Display => 0,
            ItemRole::Edit => 2,
            ItemRole::User(n) => 256u32.saturating_add(*n),
        }
    }

    /// Creates an ItemRole from a numeric value.
    ///
    /// Returns `None` for values that do not name a known role.
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(ItemRole::Display),
            2 => Some(ItemRole::Edit),
            0..=255 => None,
            n => Some(ItemRole::User(n - 256)),
        }
    }
}
