//! Sheet error types
//!
//! The runtime path of a sheet never fails; these cover loading and
//! validating configuration.

use thiserror::Error;

/// Sheet-related errors
#[derive(Error, Debug)]
pub enum SheetError {
    /// Config file could not be read
    #[error("Failed to read sheet config: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid TOML for a sheet
    #[error("Failed to parse sheet config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Failed to serialize sheet config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A config value is out of range
    #[error("Invalid sheet config value `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl SheetError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for sheet operations
pub type Result<T> = std::result::Result<T, SheetError>;
