//! # Domain Types
//!
//! Core records used throughout the bookstore.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌─────────────────────────┐       │
//! │  │        Client            │        │          Book           │       │
//! │  │  ──────────────────────  │        │  ─────────────────────  │       │
//! │  │  id (ClientId, UUID v4)  │        │  id (BookId, external)  │       │
//! │  │  name (unique)           │  ───►  │  price (Money)          │       │
//! │  │  owned_books             │        │  quantity (u32)         │       │
//! │  │    BookId → copies ≥ 1   │        └─────────────────────────┘       │
//! │  └──────────────────────────┘                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are plain values. Services load a copy from the store, mutate it,
//! and write the whole record back.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a client, generated by the bookstore on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        ClientId(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        ClientId(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        ClientId::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ClientId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ClientId)
    }
}

/// Identifier of a book. Assigned by the catalog, never by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        BookId(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for BookId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(BookId)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A registered client able to buy books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier, immutable after creation.
    pub id: ClientId,

    /// Display name, unique across all clients.
    pub name: String,

    /// Copies currently held, per book. Counts are always at least 1.
    #[serde(default)]
    pub owned_books: BTreeMap<BookId, u32>,

    /// When the client was registered.
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Creates a client with a fresh identifier and no books.
    pub fn new(name: impl Into<String>) -> Self {
        Client {
            id: ClientId::new(),
            name: name.into(),
            owned_books: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Number of copies of `book_id` the client holds (0 if none).
    pub fn owned_copies(&self, book_id: BookId) -> u32 {
        self.owned_books.get(&book_id).copied().unwrap_or(0)
    }

    /// Records one more copy of `book_id`.
    ///
    /// Returns `false`, leaving the count untouched, if it is already at
    /// `u32::MAX`.
    pub fn add_copy(&mut self, book_id: BookId) -> bool {
        let count = self.owned_books.entry(book_id).or_insert(0);
        match count.checked_add(1) {
            Some(next) => {
                *count = next;
                true
            }
            None => false,
        }
    }

    /// Gives back one copy of `book_id`.
    ///
    /// The entry is removed when the last copy goes, so no zero counts are
    /// ever stored. Returns `false` if the client held no copy.
    pub fn remove_copy(&mut self, book_id: BookId) -> bool {
        match self.owned_books.get_mut(&book_id) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.owned_books.remove(&book_id);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// A catalog item with a unit price and available stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Catalog identifier.
    pub id: BookId,

    /// Unit price, never negative.
    pub price: Money,

    /// Copies available for sale.
    pub quantity: u32,
}

impl Book {
    pub fn new(id: BookId, price: Money, quantity: u32) -> Self {
        Book {
            id,
            price,
            quantity,
        }
    }

    /// Checks if at least one copy can be sold.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
