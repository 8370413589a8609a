//! Error types for Horizon ObjList core.

use std::fmt;

use crate::property::PropertyError;

/// The main error type for core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjlistError {
    /// Property-related error.
    Property(PropertyError),
    /// The model has no role with this name.
    UnknownRole(String),
    /// The row does not address an item in the model.
    RowOutOfRange {
        /// The requested row.
        row: usize,
        /// The number of rows in the model.
        count: usize,
    },
}

impl fmt::Display for ObjlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(err) => write!(f, "Property error: {err}"),
            Self::UnknownRole(name) => write!(f, "Unknown role '{name}'"),
            Self::RowOutOfRange { row, count } => {
                write!(f, "Row {row} is out of range for a model with {count} rows")
            }
        }
    }
}

impl std::error::Error for ObjlistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Property(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PropertyError> for ObjlistError {
    fn from(err: PropertyError) -> Self {
        Self::Property(err)
    }
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, ObjlistError>;
