//! # bookstore-db: Storage Layer for the Bookstore
//!
//! This crate provides an in-memory implementation of
//! [`bookstore_core::Store`], plus JSON seed catalogs to populate it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Data Flow                              │
//! │                                                                         │
//! │  ClientService / BookService                                           │
//! │       │  (through trait Store)                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   bookstore-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌─────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │   Catalog   │  │   │
//! │  │   │ (database.rs) │    │ (client, book) │    │ (JSON seed) │  │   │
//! │  │   │               │◄───│                │    │             │  │   │
//! │  │   │ Arc<Mutex<    │    │ ClientRepo     │    │ books[]     │  │   │
//! │  │   │   Tables>>    │    │ BookRepo       │    │ clients[]   │  │   │
//! │  │   └───────────────┘    └────────────────┘    └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`database`] - Database handle and configuration
//! - [`catalog`] - Seed catalog files
//! - [`error`] - Database error types
//! - [`repository`] - Client and book repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookstore_core::ClientService;
//! use bookstore_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env())?;
//! let client = ClientService::new(&db).create("alice")?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod database;
pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::Catalog;
pub use database::{Database, DbConfig};
pub use error::{DbError, DbResult};

// Repository re-exports for convenience
pub use repository::book::BookRepository;
pub use repository::client::ClientRepository;
