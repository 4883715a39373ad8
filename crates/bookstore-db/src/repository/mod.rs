//! # Repository Module
//!
//! Table access for the bookstore records.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  impl Store for Database                                               │
//! │       │                                                                 │
//! │       │  db.clients().get_by_name("alice")                             │
//! │       ▼                                                                 │
//! │  ClientRepository                 BookRepository                       │
//! │  ├── get_by_id(&self, id)         ├── get_by_id(&self, id)             │
//! │  ├── get_by_name(&self, name)     ├── upsert(&self, book)              │
//! │  ├── upsert(&self, client)        ├── list(&self)                      │
//! │  ├── list(&self)                  └── count(&self)                     │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<Mutex<Tables>>                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ClientRepository`](client::ClientRepository) - Client lookup and upsert
//! - [`BookRepository`](book::BookRepository) - Book lookup and upsert

pub mod book;
pub mod client;
