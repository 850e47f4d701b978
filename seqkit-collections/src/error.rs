//! Error types for the collection types.

use thiserror::Error;

/// Errors that can occur when mutating or constructing a collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The key is already mapped
    #[error("An item with the same key has already been added")]
    DuplicateKey,

    /// The value is already claimed by another key
    #[error("An item with the same value has already been added")]
    DuplicateValue,

    /// A constructor argument broke its contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CollectionError {
    /// Returns `true` if the failure was caused by an existing key or value.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            CollectionError::DuplicateKey | CollectionError::DuplicateValue
        )
    }
}
