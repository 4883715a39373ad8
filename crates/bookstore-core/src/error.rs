//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                                                              │
//! │  ├── Validation(ValidationError)  - malformed input                     │
//! │  ├── NotFound { entity, id }      - referenced record is missing        │
//! │  ├── Conflict(ConflictError)      - uniqueness, stock, payment          │
//! │  └── Store(StoreError)            - the Store itself failed             │
//! │                                                                         │
//! │  bookstore-db errors (separate crate)                                   │
//! │  └── DbError → StoreError at the trait boundary                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (IDs, names, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every error reports a stable [`ErrorKind`] for programmatic handling

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::money::Money;
use crate::types::{BookId, ClientId};

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the client and book services.
///
/// A service returns the first failing precondition and writes nothing to
/// the store in that case.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input was malformed (empty name, non-positive amount, book not owned).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced client or book does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    /// The request is well-formed but clashes with current state.
    #[error("Conflict: {0}")]
    Conflict(#[from] ConflictError),

    /// The underlying store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Creates a NotFound error for a client.
    pub fn client_not_found(id: ClientId) -> Self {
        CoreError::NotFound {
            entity: Entity::Client,
            id: id.to_string(),
        }
    }

    /// Creates a NotFound error for a book.
    pub fn book_not_found(id: BookId) -> Self {
        CoreError::NotFound {
            entity: Entity::Book,
            id: id.to_string(),
        }
    }

    /// Returns the stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) => ErrorKind::ValidationError,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Conflict(_) => ErrorKind::Conflict,
            CoreError::Store(_) => ErrorKind::StoreError,
        }
    }
}

/// The kind of record a [`CoreError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Client,
    Book,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Client => f.write_str("Client"),
            Entity::Book => f.write_str("Book"),
        }
    }
}

// =============================================================================
// Error Kind
// =============================================================================

/// Machine-readable error classification.
///
/// ## Usage by callers
/// ```rust,ignore
/// match err.kind() {
///     ErrorKind::ValidationError => respond(400, err),
///     ErrorKind::NotFound => respond(404, err),
///     ErrorKind::Conflict => respond(409, err),
///     ErrorKind::StoreError => respond(500, err),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed input (400)
    ValidationError,

    /// Referenced record does not exist (404)
    NotFound,

    /// Uniqueness, stock or payment conflict (409)
    Conflict,

    /// Store failure (500)
    StoreError,
}

impl ErrorKind {
    /// Returns the code string, identical to the serialized form.
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::StoreError => "STORE_ERROR",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before the services look anything up, except for
/// [`ValidationError::NotOwned`] which needs the client record.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A refund was requested for a book the client does not hold.
    #[error("Client {client_id} does not own book {book_id}")]
    NotOwned { client_id: ClientId, book_id: BookId },
}

// =============================================================================
// Conflict Error
// =============================================================================

/// The request clashes with the current state of the store.
#[derive(Debug, Error)]
pub enum ConflictError {
    /// Another client already uses this name.
    #[error("Client name '{name}' already exists")]
    DuplicateName { name: String },

    /// The book has no copies left.
    #[error("Book {book_id} is out of stock")]
    OutOfStock { book_id: BookId },

    /// The tendered amount does not cover the price.
    ///
    /// ## User Workflow
    /// ```text
    /// Book price: 10.00
    /// Tendered:    5.00
    ///      │
    ///      ▼
    /// InsufficientFunds { price: 10.00, tendered: 5.00 }
    /// ```
    #[error("Amount {tendered} is not enough for price {price}")]
    InsufficientFunds { price: Money, tendered: Money },

    /// Restocking would push the book's quantity past `u32::MAX`.
    #[error("Book {book_id} cannot hold any more stock")]
    StockOverflow { book_id: BookId },

    /// The client's copy count of a book is already at `u32::MAX`.
    #[error("Client {client_id} cannot hold more copies of book {book_id}")]
    OwnedCountOverflow { client_id: ClientId, book_id: BookId },
}

// =============================================================================
// Store Error
// =============================================================================

/// Failures reported by a [`crate::Store`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached or is in an unusable state.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed an operation.
    #[error("Store operation failed: {0}")]
    Failed(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
