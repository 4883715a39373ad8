//! # Services
//!
//! The two transactional services of the bookstore.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Each call is one read-modify-write:                                    │
//! │                                                                         │
//! │    read records ──► check preconditions ──► mutate copies ──► save      │
//! │                          │                                              │
//! │                          └── first failure returns, nothing is saved    │
//! │                                                                         │
//! │  Calls are synchronous and hold no lock across the sequence.           │
//! │  Two concurrent calls on the same client or book can interleave and    │
//! │  lose an update; callers that share a store across threads must        │
//! │  serialize those calls themselves.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`ClientService`] - register and rename clients
//! - [`BookService`] - purchase and refund books

pub mod book;
pub mod client;

pub use book::BookService;
pub use client::ClientService;
