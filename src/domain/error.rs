//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the key-path and tree rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid configuration key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("root element name must not be empty")]
    EmptyRootName,

    #[error("root element name '{0}' is not a valid XML element name")]
    InvalidRootName(String),
}

impl DomainError {
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
