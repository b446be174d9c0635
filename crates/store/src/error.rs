use thiserror::Error;

/// Errors that can occur when interacting with a repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No aggregate with this id is stored.
    #[error("{aggregate_type} not found: {id}")]
    NotFound {
        aggregate_type: &'static str,
        id: String,
    },

    /// Saving would break a uniqueness rule of the store.
    #[error("{aggregate_type} with {field} '{value}' already exists")]
    Conflict {
        aggregate_type: &'static str,
        field: &'static str,
        value: String,
    },

    /// A stored record no longer passes domain validation.
    #[error("Stored {aggregate_type} {id} is corrupted: {code}")]
    Corrupted {
        aggregate_type: &'static str,
        id: String,
        code: &'static str,
    },

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "STORE_NOT_FOUND",
            StoreError::Conflict { .. } => "STORE_CONFLICT",
            StoreError::Corrupted { .. } => "STORE_CORRUPTED",
            StoreError::Serialization(_) => "STORE_SERIALIZATION",
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;
