//! # Database Handle
//!
//! Configuration and the shared in-memory tables.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      In-Memory Database                                 │
//! │                                                                         │
//! │  DbConfig::from_env() ← optional seed catalog path                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config) ← create tables + load catalog                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │        Arc<Mutex<Tables>>                │                           │
//! │  │   clients: ClientId → Client             │                           │
//! │  │   books:   BookId   → Book               │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ every clone of Database shares the same tables                 │
//! │       ▼                                                                 │
//! │  clients() / books() / impl Store                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Each single read or upsert holds the lock for its own duration only.
//! Nothing spans the client and book writes of a purchase.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use bookstore_core::{Book, BookId, Client, ClientId, Store, StoreResult};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{DbError, DbResult};
use crate::repository::book::BookRepository;
use crate::repository::client::ClientRepository;

/// Environment variable naming the seed catalog to load at startup.
pub const SEED_PATH_ENV: &str = "BOOKSTORE_SEED_PATH";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new().seed_path("./catalog.json");
/// let db = Database::new(config)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    /// JSON catalog loaded into the tables on startup.
    /// Default: none (empty tables)
    pub seed_path: Option<PathBuf>,
}

impl DbConfig {
    /// Creates a configuration with empty tables.
    pub fn new() -> Self {
        DbConfig::default()
    }

    /// Sets the catalog file to load on startup.
    pub fn seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(path.into());
        self
    }

    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BOOKSTORE_SEED_PATH`: catalog file to load
    pub fn from_env() -> Self {
        let mut config = DbConfig::default();

        if let Ok(path) = std::env::var(SEED_PATH_ENV) {
            if !path.is_empty() {
                config.seed_path = Some(PathBuf::from(path));
            }
        }

        config
    }
}

// =============================================================================
// Tables
// =============================================================================

/// The raw record maps behind every repository.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) clients: HashMap<ClientId, Client>,
    pub(crate) books: HashMap<BookId, Book>,
}

pub(crate) type SharedTables = Arc<Mutex<Tables>>;

/// Acquires the table lock, mapping poisoning to an error.
pub(crate) fn lock(tables: &SharedTables) -> DbResult<MutexGuard<'_, Tables>> {
    tables.lock().map_err(|_| DbError::LockPoisoned)
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap; all clones see the same tables.
#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: SharedTables,
}

impl Database {
    /// Creates the tables and loads the configured catalog, if any.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - The catalog could not be read or is invalid
    pub fn new(config: DbConfig) -> DbResult<Self> {
        let db = Database::in_memory();

        match &config.seed_path {
            Some(path) => {
                info!(path = %path.display(), "Loading seed catalog");
                let catalog = Catalog::load(path)?;
                db.load_catalog(catalog)?;
            }
            None => debug!("No seed catalog configured"),
        }

        Ok(db)
    }

    /// Creates an empty database.
    pub fn in_memory() -> Self {
        Database::default()
    }

    /// Inserts every record of a catalog, replacing records with equal ids.
    pub fn load_catalog(&self, catalog: Catalog) -> DbResult<()> {
        catalog.validate()?;

        let mut tables = lock(&self.tables)?;
        let (books, clients) = (catalog.books.len(), catalog.clients.len());

        for book in catalog.books {
            tables.books.insert(book.id, book);
        }
        for client in catalog.clients {
            tables.clients.insert(client.id, client);
        }

        info!(books, clients, "Catalog loaded");
        Ok(())
    }

    /// Exports the current tables as a catalog.
    pub fn snapshot(&self) -> DbResult<Catalog> {
        Ok(Catalog {
            books: self.books().list()?,
            clients: self.clients().list()?,
        })
    }

    /// Returns the client repository.
    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.tables.clone())
    }

    /// Returns the book repository.
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.tables.clone())
    }

    /// Checks if the tables are still usable.
    ///
    /// ## Returns
    /// * `true` - The lock can be taken
    /// * `false` - A writer panicked and poisoned the lock
    pub fn health_check(&self) -> bool {
        lock(&self.tables).is_ok()
    }
}

impl Store for Database {
    fn find_client_by_id(&self, id: ClientId) -> StoreResult<Option<Client>> {
        Ok(self.clients().get_by_id(id)?)
    }

    fn find_client_by_name(&self, name: &str) -> StoreResult<Option<Client>> {
        Ok(self.clients().get_by_name(name)?)
    }

    fn find_book_by_id(&self, id: BookId) -> StoreResult<Option<Book>> {
        Ok(self.books().get_by_id(id)?)
    }

    fn save_client(&self, client: &Client) -> StoreResult<()> {
        Ok(self.clients().upsert(client)?)
    }

    fn save_book(&self, book: &Book) -> StoreResult<()> {
        Ok(self.books().upsert(book)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
