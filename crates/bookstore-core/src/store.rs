//! # Store
//!
//! The persistence seam the services are written against.
//!
//! ```text
//! ClientService ─┐
//!                ├──► &dyn Store ──► bookstore-db::Database (in-memory)
//! BookService ───┘                   or any other implementation
//! ```
//!
//! Implementations only promise single-record reads and upserts. There is no
//! transaction spanning a client and a book; see the services for what that
//! means under concurrent use.

use std::sync::Arc;

use crate::error::StoreError;
use crate::types::{Book, BookId, Client, ClientId};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Lookup and upsert of client and book records.
pub trait Store {
    /// Returns the client with this id, if any.
    fn find_client_by_id(&self, id: ClientId) -> StoreResult<Option<Client>>;

    /// Returns the client with exactly this name, if any.
    fn find_client_by_name(&self, name: &str) -> StoreResult<Option<Client>>;

    /// Returns the book with this id, if any.
    fn find_book_by_id(&self, id: BookId) -> StoreResult<Option<Book>>;

    /// Inserts or replaces a client record.
    fn save_client(&self, client: &Client) -> StoreResult<()>;

    /// Inserts or replaces a book record.
    fn save_book(&self, book: &Book) -> StoreResult<()>;
}

impl<S: Store + ?Sized> Store for &S {
    fn find_client_by_id(&self, id: ClientId) -> StoreResult<Option<Client>> {
        (**self).find_client_by_id(id)
    }

    fn find_client_by_name(&self, name: &str) -> StoreResult<Option<Client>> {
        (**self).find_client_by_name(name)
    }

    fn find_book_by_id(&self, id: BookId) -> StoreResult<Option<Book>> {
        (**self).find_book_by_id(id)
    }

    fn save_client(&self, client: &Client) -> StoreResult<()> {
        (**self).save_client(client)
    }

    fn save_book(&self, book: &Book) -> StoreResult<()> {
        (**self).save_book(book)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn find_client_by_id(&self, id: ClientId) -> StoreResult<Option<Client>> {
        (**self).find_client_by_id(id)
    }

    fn find_client_by_name(&self, name: &str) -> StoreResult<Option<Client>> {
        (**self).find_client_by_name(name)
    }

    fn find_book_by_id(&self, id: BookId) -> StoreResult<Option<Book>> {
        (**self).find_book_by_id(id)
    }

    fn save_client(&self, client: &Client) -> StoreResult<()> {
        (**self).save_client(client)
    }

    fn save_book(&self, book: &Book) -> StoreResult<()> {
        (**self).save_book(book)
    }
}

// =============================================================================
// Test Double
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    //! A map-backed store that records every call, so tests can assert on
    //! which lookups ran and in what order.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// One recorded store call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        FindClientById(ClientId),
        FindClientByName(String),
        FindBookById(BookId),
        SaveClient(ClientId),
        SaveBook(BookId),
    }

    #[derive(Debug, Default)]
    pub struct SpyStore {
        clients: Mutex<HashMap<ClientId, Client>>,
        books: Mutex<HashMap<BookId, Book>>,
        calls: Mutex<Vec<Call>>,
        fail_with: Mutex<Option<String>>,
        fail_after: Mutex<Option<usize>>,
    }

    impl SpyStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds a client without recording a call.
        pub fn with_client(self, client: Client) -> Self {
            self.clients.lock().unwrap().insert(client.id, client);
            self
        }

        /// Seeds a book without recording a call.
        pub fn with_book(self, book: Book) -> Self {
            self.books.lock().unwrap().insert(book.id, book);
            self
        }

        /// Makes every subsequent call fail with `StoreError::Unavailable`.
        pub fn fail(&self, reason: &str) {
            *self.fail_with.lock().unwrap() = Some(reason.to_string());
        }

        /// Lets the next `calls` calls through, then fails every later one.
        pub fn fail_after(&self, calls: usize) {
            *self.fail_after.lock().unwrap() = Some(calls);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn saves(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, Call::SaveClient(_) | Call::SaveBook(_)))
                .count()
        }

        pub fn client(&self, id: ClientId) -> Option<Client> {
            self.clients.lock().unwrap().get(&id).cloned()
        }

        pub fn book(&self, id: BookId) -> Option<Book> {
            self.books.lock().unwrap().get(&id).cloned()
        }

        fn record(&self, call: Call) -> StoreResult<()> {
            let made = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(call);
                calls.len()
            };
            if let Some(reason) = self.fail_with.lock().unwrap().as_ref() {
                return Err(StoreError::Unavailable(reason.clone()));
            }
            match *self.fail_after.lock().unwrap() {
                Some(limit) if made > limit => {
                    Err(StoreError::Unavailable(format!("failing call {made}")))
                }
                _ => Ok(()),
            }
        }
    }

    impl Store for SpyStore {
        fn find_client_by_id(&self, id: ClientId) -> StoreResult<Option<Client>> {
            self.record(Call::FindClientById(id))?;
            Ok(self.client(id))
        }

        fn find_client_by_name(&self, name: &str) -> StoreResult<Option<Client>> {
            self.record(Call::FindClientByName(name.to_string()))?;
            Ok(self
                .clients
                .lock()
                .unwrap()
                .values()
                .find(|c| c.name == name)
                .cloned())
        }

        fn find_book_by_id(&self, id: BookId) -> StoreResult<Option<Book>> {
            self.record(Call::FindBookById(id))?;
            Ok(self.book(id))
        }

        fn save_client(&self, client: &Client) -> StoreResult<()> {
            self.record(Call::SaveClient(client.id))?;
            self.clients.lock().unwrap().insert(client.id, client.clone());
            Ok(())
        }

        fn save_book(&self, book: &Book) -> StoreResult<()> {
            self.record(Call::SaveBook(book.id))?;
            self.books.lock().unwrap().insert(book.id, book.clone());
            Ok(())
        }
    }
}
