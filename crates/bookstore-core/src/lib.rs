//! # bookstore-core: Pure Business Logic for the Bookstore
//!
//! This crate is the **heart** of the bookstore. It holds the client and book
//! records, the money type, and the two transactional services. It performs
//! no I/O of its own: every read and write goes through the [`Store`] trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (adapter, outside this workspace)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ bookstore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐  │   │
//! │  │   │ClientService│    │ BookService │    │ types / money    │  │   │
//! │  │   │ create      │    │ purchase    │    │ Client, Book     │  │   │
//! │  │   │ rename      │    │ refund      │    │ Money            │  │   │
//! │  │   └──────┬──────┘    └──────┬──────┘    └──────────────────┘  │   │
//! │  │          └────────┬─────────┘                                   │   │
//! │  │                   ▼                                             │   │
//! │  │             trait Store                                         │   │
//! │  └───────────────────┬─────────────────────────────────────────────┘   │
//! │                      │                                                  │
//! │  ┌───────────────────▼─────────────────────────────────────────────┐   │
//! │  │              bookstore-db (in-memory Store)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Client, Book) and their identifiers
//! - [`money`] - Exact decimal money
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`store`] - The persistence seam
//! - [`service`] - ClientService and BookService
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use bookstore_core::{BookService, ClientService, Money};
//!
//! let clients = ClientService::new(&store);
//! let client = clients.create("alice")?;
//!
//! let books = BookService::new(&store);
//! let change = books.purchase(client.id, book_id, Money::from_cents(2000))?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ConflictError, CoreError, CoreResult, Entity, ErrorKind, StoreError, ValidationError};
pub use money::Money;
pub use service::{BookService, ClientService};
pub use store::{Store, StoreResult};
pub use types::*;
