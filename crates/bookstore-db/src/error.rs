//! # Database Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / poisoned lock                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (bookstore-core) ← What the services see                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError::Store                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use bookstore_core::StoreError;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Reading or writing a catalog file failed.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not valid JSON for the expected shape.
    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// A catalog parsed but breaks a record invariant.
    ///
    /// ## When This Occurs
    /// - Negative book price
    /// - Two books with the same id
    /// - Two clients with the same id or name
    /// - An owned-books entry with a zero count
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A thread panicked while holding the table lock.
    #[error("Table lock poisoned")]
    LockPoisoned,
}

impl DbError {
    /// Creates an Io error for a given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DbError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an InvalidCatalog error.
    pub fn invalid(message: impl Into<String>) -> Self {
        DbError::InvalidCatalog(message.into())
    }
}

/// Convert DbError to the core crate's StoreError.
///
/// ## Error Mapping
/// ```text
/// DbError::LockPoisoned → StoreError::Unavailable
/// Other                 → StoreError::Failed
/// ```
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::LockPoisoned => StoreError::Unavailable(err.to_string()),
            other => StoreError::Failed(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
