//! Domain layer error types
//!
//! All errors that can occur in domain layer operations.

use thiserror::Error;

/// Main domain error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Entity not found
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Persisted history file exists but cannot be read as sections
    #[error("History storage is corrupt: {0}")]
    StorageCorrupt(String),

    /// Read, write or delete failed on the underlying file system
    #[error("Storage IO error: {0}")]
    StorageIo(String),
}

impl DomainError {
    /// Whether the store can recover from this error by starting empty
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::StorageCorrupt(_))
    }
}
