//! Role discovery from an item type's descriptor table.

use std::collections::{HashMap, HashSet};

use horizon_objlist_core::ItemMeta;
use horizon_objlist_core::logging::targets;

use super::role::ItemRole;

/// Property names that can never be exposed as roles, since declarative
/// templates reserve them.
pub const ROLE_NAME_BLACKLIST: &[&str] = &["id", "index", "class", "model", "modelData"];

/// Role name of the pseudo-role returning the item itself.
pub const OBJECT_ROLE_NAME: &str = "qtObject";

/// Role name of the display alias.
pub const DISPLAY_ROLE_NAME: &str = "display";

/// Returns `true` if `name` may not be used as a role name.
pub fn is_blacklisted(name: &str) -> bool {
    ROLE_NAME_BLACKLIST.contains(&name)
}

/// The immutable role table of a list model.
///
/// Built once per model from the item type's [`ItemMeta`]. Role ids are
/// derived from property declaration order, so they stay stable whether or
/// not a property ends up exposed.
///
/// # Example
///
/// ```ignore
/// let registry = RoleRegistry::build(Person::meta(), &[], Some("name"));
/// assert_eq!(registry.role_for_name("name"), Some(ItemRole::User(1)));
/// assert_eq!(registry.role_for_name("display"), Some(ItemRole::Display));
/// ```
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    /// Exposed roles ordered by role value.
    roles: Vec<(ItemRole, &'static str)>,
    /// Notify signal index to the role it reports.
    signal_roles: HashMap<usize, ItemRole>,
    /// The property backing the display alias, with its own role.
    display: Option<(&'static str, ItemRole)>,
}

impl RoleRegistry {
    /// Build the registry for an item type.
    ///
    /// `exposed` restricts the exposed properties when non-empty. `display`
    /// names the property that backs the `display` alias. Rejected names are
    /// logged and skipped; construction never fails.
    pub fn build<T: 'static>(
        meta: &ItemMeta<T>,
        exposed: &[String],
        display: Option<&str>,
    ) -> Self {
        let mut roles = vec![(ItemRole::OBJECT, OBJECT_ROLE_NAME)];
        let mut signal_roles = HashMap::new();
        let mut seen = HashSet::new();

        for (index, prop) in meta.properties.iter().enumerate() {
            let role = ItemRole::for_property(index);

            if is_blacklisted(prop.name) {
                tracing::warn!(
                    target: targets::ROLES,
                    item = meta.type_name,
                    property = prop.name,
                    "property name is reserved and cannot be a role (id, index, class, model, modelData)"
                );
                continue;
            }
            if !exposed.is_empty() && !exposed.iter().any(|name| name == prop.name) {
                continue;
            }
            if !seen.insert(prop.name) {
                tracing::warn!(
                    target: targets::ROLES,
                    item = meta.type_name,
                    property = prop.name,
                    "duplicate property name skipped"
                );
                continue;
            }

            roles.push((role, prop.name));
            if let Some(signal_index) = meta.notify_signal_index(prop) {
                signal_roles.insert(signal_index, role);
            } else if let Some(signal) = prop.notify {
                tracing::warn!(
                    target: targets::ROLES,
                    item = meta.type_name,
                    property = prop.name,
                    signal,
                    "notify signal is not declared; changes will not propagate"
                );
            }
        }

        for name in exposed {
            if meta.property_by_name(name).is_none() {
                tracing::warn!(
                    target: targets::ROLES,
                    item = meta.type_name,
                    property = name.as_str(),
                    "requested role has no matching property"
                );
            }
        }

        let display = display.and_then(|name| match meta.property_by_name(name) {
            Some((index, prop)) => Some((prop.name, ItemRole::for_property(index))),
            None => {
                tracing::warn!(
                    target: targets::ROLES,
                    item = meta.type_name,
                    property = name,
                    "display property does not exist; display role not registered"
                );
                None
            }
        });
        if display.is_some() {
            roles.push((ItemRole::Display, DISPLAY_ROLE_NAME));
        }

        roles.sort_by_key(|(role, _)| role.value());

        tracing::debug!(
            target: targets::ROLES,
            item = meta.type_name,
            roles = roles.len(),
            notify_signals = signal_roles.len(),
            "role registry built"
        );

        Self {
            roles,
            signal_roles,
            display,
        }
    }

    /// All exposed roles with their names, ordered by role value.
    pub fn role_names(&self) -> &[(ItemRole, &'static str)] {
        &self.roles
    }

    /// Look up a role by its name.
    ///
    /// A property name resolves to the property's own role, even when the
    /// property also backs the display alias.
    pub fn role_for_name(&self, name: &str) -> Option<ItemRole> {
        self.roles
            .iter()
            .find(|(_, role_name)| *role_name == name)
            .map(|(role, _)| *role)
    }

    /// Returns `true` if the role is exposed by this registry.
    pub fn contains(&self, role: ItemRole) -> bool {
        self.roles.iter().any(|(r, _)| *r == role)
    }

    /// The property a role reads from.
    ///
    /// `Display` and `Edit` resolve to the display property. The `qtObject`
    /// role and unknown roles have no property.
    pub fn property_name(&self, role: ItemRole) -> Option<&'static str> {
        match role {
            ItemRole::Display | ItemRole::Edit => self.display_property(),
            ItemRole::OBJECT => None,
            _ => self
                .roles
                .iter()
                .find(|(r, _)| *r == role)
                .map(|(_, name)| *name),
        }
    }

    /// The role reported when the signal at `signal_index` fires.
    pub fn role_for_signal(&self, signal_index: usize) -> Option<ItemRole> {
        self.signal_roles.get(&signal_index).copied()
    }

    /// Every notify signal index the bridge subscribes to, with its role.
    pub fn notify_signals(&self) -> impl Iterator<Item = (usize, ItemRole)> + '_ {
        self.signal_roles.iter().map(|(index, role)| (*index, *role))
    }

    /// The property backing the display alias, if configured.
    pub fn display_property(&self) -> Option<&'static str> {
        self.display.map(|(name, _)| name)
    }

    /// Returns `true` if `role` is the role of the display property.
    pub fn is_display_backing(&self, role: ItemRole) -> bool {
        self.display.is_some_and(|(_, display_role)| display_role == role)
    }

    /// Number of exposed roles, pseudo-roles included.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns `true` if no role is exposed. Never the case for a built
    /// registry, which always carries `qtObject`.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
