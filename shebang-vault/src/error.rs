//! Vault error types.

use thiserror::Error;

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Why a submitted key was refused. Nothing is persisted on any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("key name must not be empty")]
    EmptyName,

    #[error("key content must not be empty")]
    EmptyContent,

    #[error("invalid PEM format: expected BEGIN and PRIVATE KEY markers")]
    InvalidPem,

    #[error("key name already exists: {0}")]
    DuplicateName(String),
}

/// Errors that can occur in vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("no key at index {index} (vault holds {len})")]
    NotFound { index: usize, len: usize },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VaultError {
    /// True for the not-found family (empty vault or index out of range).
    pub fn is_not_found(&self) -> bool {
        matches!(self, VaultError::NotFound { .. })
    }
}
