//! Error types for opinion persistence.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while storing or reading opinions.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An opinion with the same text already exists.
    #[error("Opinion already exists: {0}")]
    Duplicate(String),

    /// SQLite failure.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be decoded.
    #[error("Corrupt row: {0}")]
    Corrupt(String),

    /// Storage internals failed.
    #[error("Storage error: {0}")]
    Internal(String),
}
