//! # Book Repository
//!
//! Table operations for books. Books are never deleted here; stock only
//! moves through `BookService`.

use bookstore_core::{Book, BookId};
use tracing::debug;

use crate::database::{lock, SharedTables};
use crate::error::DbResult;

/// Repository for book records.
#[derive(Debug, Clone)]
pub struct BookRepository {
    tables: SharedTables,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub(crate) fn new(tables: SharedTables) -> Self {
        BookRepository { tables }
    }

    /// Gets a book by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub fn get_by_id(&self, id: BookId) -> DbResult<Option<Book>> {
        let tables = lock(&self.tables)?;
        let book = tables.books.get(&id).cloned();

        debug!(book_id = %id, found = book.is_some(), "Book lookup by id");
        Ok(book)
    }

    /// Inserts or replaces a book.
    pub fn upsert(&self, book: &Book) -> DbResult<()> {
        let mut tables = lock(&self.tables)?;
        tables.books.insert(book.id, book.clone());

        debug!(book_id = %book.id, quantity = book.quantity, "Book saved");
        Ok(())
    }

    /// Lists all books, ordered by id.
    pub fn list(&self) -> DbResult<Vec<Book>> {
        let tables = lock(&self.tables)?;
        let mut books: Vec<Book> = tables.books.values().cloned().collect();
        books.sort_by_key(|b| b.id);
        Ok(books)
    }

    /// Counts catalog books.
    pub fn count(&self) -> DbResult<usize> {
        Ok(lock(&self.tables)?.books.len())
    }

    /// Sums available copies across the catalog.
    pub fn total_stock(&self) -> DbResult<u64> {
        let tables = lock(&self.tables)?;
        Ok(tables.books.values().map(|b| u64::from(b.quantity)).sum())
    }
}
