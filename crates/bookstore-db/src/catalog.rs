//! # Seed Catalogs
//!
//! JSON files used to populate a [`crate::Database`] at startup.
//!
//! ## File Format
//! ```json
//! {
//!   "books": [
//!     { "id": "7f1c…", "price": "12.99", "quantity": 4 }
//!   ],
//!   "clients": [
//!     {
//!       "id": "a9e2…",
//!       "name": "alice",
//!       "owned_books": { "7f1c…": 1 },
//!       "created_at": "2024-01-01T00:00:00Z"
//!     }
//!   ]
//! }
//! ```
//!
//! Both arrays are optional. A catalog is validated on load and on save,
//! so the tables never start out breaking a record invariant.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bookstore_core::validation::validate_price;
use bookstore_core::{Book, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Books and clients to preload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub books: Vec<Book>,

    #[serde(default)]
    pub clients: Vec<Client>,
}

impl Catalog {
    /// Reads and validates a catalog file.
    pub fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| DbError::io(path, e))?;
        let catalog: Catalog = serde_json::from_str(&raw)?;
        catalog.validate()?;

        debug!(
            path = %path.display(),
            books = catalog.books.len(),
            clients = catalog.clients.len(),
            "Catalog read"
        );
        Ok(catalog)
    }

    /// Validates and writes the catalog as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> DbResult<()> {
        let path = path.as_ref();
        self.validate()?;

        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).map_err(|e| DbError::io(path, e))?;

        debug!(path = %path.display(), books = self.books.len(), "Catalog written");
        Ok(())
    }

    /// Checks the record invariants the services rely on.
    ///
    /// ## Rules
    /// - Book ids are unique and prices are not negative
    /// - Client ids and names are unique, and names are not empty
    /// - Every owned-books count is at least 1 and names a book in the catalog
    pub fn validate(&self) -> DbResult<()> {
        let mut book_ids = HashSet::new();
        for book in &self.books {
            if !book_ids.insert(book.id) {
                return Err(DbError::invalid(format!("duplicate book id {}", book.id)));
            }
            validate_price(book.price)
                .map_err(|e| DbError::invalid(format!("book {}: {e}", book.id)))?;
        }

        let mut client_ids = HashSet::new();
        let mut names = HashSet::new();
        for client in &self.clients {
            if !client_ids.insert(client.id) {
                return Err(DbError::invalid(format!("duplicate client id {}", client.id)));
            }
            if client.name.is_empty() {
                return Err(DbError::invalid(format!("client {} has no name", client.id)));
            }
            if !names.insert(client.name.as_str()) {
                return Err(DbError::invalid(format!(
                    "duplicate client name '{}'",
                    client.name
                )));
            }
            if let Some((book_id, _)) = client.owned_books.iter().find(|(_, count)| **count == 0) {
                return Err(DbError::invalid(format!(
                    "client {} owns zero copies of book {}",
                    client.id, book_id
                )));
            }
            if let Some(book_id) = client.owned_books.keys().find(|id| !book_ids.contains(*id)) {
                return Err(DbError::invalid(format!(
                    "client {} owns unknown book {}",
                    client.id, book_id
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
