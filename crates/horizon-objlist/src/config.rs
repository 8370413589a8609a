//! Construction-time configuration for list models.
//!
//! A [`ModelConfig`] names which properties become roles, which property
//! backs the `display` alias, and which property keys the unique-id index.
//! It is usually built in code, but can also be loaded from TOML:
//!
//! ```
//! use horizon_objlist::ModelConfig;
//!
//! let config = ModelConfig::from_toml_str(r#"
//! exposed_roles = ["name", "age"]
//! display_role = "name"
//! uid_role = "key"
//! "#).unwrap();
//!
//! assert_eq!(config.exposed_roles, vec!["name", "age"]);
//! assert_eq!(config.uid_role.as_deref(), Some("key"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or saving a [`ModelConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing error.
    #[error("Failed to parse model config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Failed to serialize model config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File I/O error.
    #[error("Failed to read model config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A role name field holds an empty string.
    #[error("Empty role name in '{field}'")]
    EmptyRoleName { field: &'static str },
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration for a list model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Properties to expose as roles. Empty exposes every property that is
    /// not reserved.
    pub exposed_roles: Vec<String>,
    /// Property backing the `display` role.
    pub display_role: Option<String>,
    /// Property keying the unique-id index.
    pub uid_role: Option<String>,
}

impl ModelConfig {
    /// Creates a configuration that exposes every property.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the exposed roles to the given property names.
    pub fn with_exposed_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exposed_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Back the `display` role with the given property.
    pub fn with_display_role(mut self, property: impl Into<String>) -> Self {
        self.display_role = Some(property.into());
        self
    }

    /// Key the unique-id index on the given property.
    pub fn with_uid_role(mut self, property: impl Into<String>) -> Self {
        self.uid_role = Some(property.into());
        self
    }

    /// Check that no role name is empty.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.exposed_roles.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyRoleName {
                field: "exposed_roles",
            });
        }
        if self.display_role.as_deref() == Some("") {
            return Err(ConfigError::EmptyRoleName {
                field: "display_role",
            });
        }
        if self.uid_role.as_deref() == Some("") {
            return Err(ConfigError::EmptyRoleName { field: "uid_role" });
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
        Self::from_toml_str(&content)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }
}
