//! # Book Service
//!
//! Purchase and refund of single book copies.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase(client_id, book_id, tendered)                                 │
//! │       │                                                                 │
//! │       ├── tendered <= 0?       → Validation (no store access)          │
//! │       ├── client missing?      → NotFound(Client)                      │
//! │       ├── book missing?        → NotFound(Book)                        │
//! │       ├── quantity == 0?       → Conflict(OutOfStock)                  │
//! │       ├── tendered < price?    → Conflict(InsufficientFunds)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  book.quantity -= 1, client.owned_books[book] += 1                     │
//! │  save_book, save_client                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  change due = tendered - price                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A refund reverses one purchase and returns the book's current price.
//! For every book, stock plus all copies held by clients stays constant.

use tracing::{debug, info};

use crate::error::{ConflictError, CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::store::Store;
use crate::types::{Book, BookId, Client, ClientId};
use crate::validation::validate_tendered_amount;

/// Sells and takes back book copies.
///
/// ## Usage
/// ```rust,ignore
/// let service = BookService::new(&db);
///
/// let change = service.purchase(client_id, book_id, Money::from_cents(2000))?;
/// let refunded = service.refund(client_id, book_id)?;
/// ```
#[derive(Debug, Clone)]
pub struct BookService<S> {
    store: S,
}

impl<S: Store> BookService<S> {
    /// Creates a new BookService over the given store.
    pub fn new(store: S) -> Self {
        BookService { store }
    }

    /// Sells one copy of a book to a client.
    ///
    /// ## Returns
    /// * `Ok(Money)` - change due, exactly `tendered - price`
    /// * `Err(Validation)` - `tendered` is zero or negative
    /// * `Err(NotFound)` - client or book does not exist
    /// * `Err(Conflict)` - book out of stock, `tendered` below the price, or
    ///   the client's copy count already at `u32::MAX`
    pub fn purchase(
        &self,
        client_id: ClientId,
        book_id: BookId,
        tendered: Money,
    ) -> CoreResult<Money> {
        validate_tendered_amount(tendered)?;

        let (mut client, mut book) = self.load(client_id, book_id)?;

        if !book.in_stock() {
            debug!(%book_id, "Purchase rejected: out of stock");
            return Err(ConflictError::OutOfStock { book_id }.into());
        }

        if tendered < book.price {
            debug!(%book_id, price = %book.price, %tendered, "Purchase rejected: insufficient funds");
            return Err(ConflictError::InsufficientFunds {
                price: book.price,
                tendered,
            }
            .into());
        }

        if !client.add_copy(book_id) {
            debug!(%client_id, %book_id, "Purchase rejected: owned count at maximum");
            return Err(ConflictError::OwnedCountOverflow { client_id, book_id }.into());
        }
        book.quantity -= 1;

        self.store.save_book(&book)?;
        self.store.save_client(&client)?;

        let change = tendered - book.price;
        info!(
            %client_id,
            %book_id,
            price = %book.price,
            %change,
            remaining = book.quantity,
            "Book purchased"
        );
        Ok(change)
    }

    /// Takes back one copy of a book from a client.
    ///
    /// ## Returns
    /// * `Ok(Money)` - amount refunded, the book's current price
    /// * `Err(NotFound)` - client or book does not exist
    /// * `Err(Validation)` - the client holds no copy of the book
    /// * `Err(Conflict)` - the book's stock is already at `u32::MAX`
    pub fn refund(&self, client_id: ClientId, book_id: BookId) -> CoreResult<Money> {
        let (mut client, mut book) = self.load(client_id, book_id)?;

        if !client.remove_copy(book_id) {
            debug!(%client_id, %book_id, "Refund rejected: book not owned");
            return Err(ValidationError::NotOwned { client_id, book_id }.into());
        }

        book.quantity = book.quantity.checked_add(1).ok_or_else(|| {
            debug!(%book_id, "Refund rejected: stock at maximum");
            ConflictError::StockOverflow { book_id }
        })?;

        self.store.save_book(&book)?;
        self.store.save_client(&client)?;

        info!(
            %client_id,
            %book_id,
            refunded = %book.price,
            still_owned = client.owned_copies(book_id),
            "Book refunded"
        );
        Ok(book.price)
    }

    /// Loads the client, then the book, failing on the first missing one.
    fn load(&self, client_id: ClientId, book_id: BookId) -> CoreResult<(Client, Book)> {
        let client = self
            .store
            .find_client_by_id(client_id)?
            .ok_or_else(|| CoreError::client_not_found(client_id))?;

        let book = self
            .store
            .find_book_by_id(book_id)?
            .ok_or_else(|| CoreError::book_not_found(book_id))?;

        Ok((client, book))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::error::{Entity, ErrorKind, StoreError};
    use crate::store::testing::{Call, SpyStore};

    fn book(price_cents: i64, quantity: u32) -> Book {
        Book::new(
            BookId::from_uuid(Uuid::new_v4()),
            Money::from_cents(price_cents),
            quantity,
        )
    }

    fn client() -> Client {
        Client::new("test")
    }

    fn total_units(store: &SpyStore, client_id: ClientId, book_id: BookId) -> u32 {
        store.book(book_id).unwrap().quantity + store.client(client_id).unwrap().owned_copies(book_id)
    }

    // -------------------------------------------------------------------------
    // purchase: preconditions
    // -------------------------------------------------------------------------

    #[test]
    fn test_purchase_rejects_non_positive_amount_before_any_lookup() {
        // Neither record exists; the amount check must win anyway
        let store = SpyStore::new();
        let service = BookService::new(&store);
        let client_id = ClientId::new();
        let book_id = BookId::from_uuid(Uuid::new_v4());

        for cents in [0, -1, -1000] {
            let err = service
                .purchase(client_id, book_id, Money::from_cents(cents))
                .unwrap_err();
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::MustBePositive { .. })
            ));
        }

        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_purchase_unknown_client() {
        let b = book(1000, 1);
        let store = SpyStore::new().with_book(b.clone());
        let service = BookService::new(&store);
        let unknown = ClientId::new();

        let err = service
            .purchase(unknown, b.id, Money::from_cents(2000))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::NotFound {
                entity: Entity::Client,
                ..
            }
        ));
        assert_eq!(store.calls(), vec![Call::FindClientById(unknown)]);
    }

    #[test]
    fn test_purchase_unknown_book() {
        let c = client();
        let store = SpyStore::new().with_client(c.clone());
        let service = BookService::new(&store);
        let unknown = BookId::from_uuid(Uuid::new_v4());

        let err = service
            .purchase(c.id, unknown, Money::from_cents(2000))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::NotFound {
                entity: Entity::Book,
                ..
            }
        ));
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_purchase_out_of_stock() {
        let c = client();
        let b = book(1000, 0);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        // Underpaying too: stock is checked before funds
        let err = service
            .purchase(c.id, b.id, Money::from_cents(1))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Conflict(ConflictError::OutOfStock { .. })
        ));
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_purchase_insufficient_funds() {
        let c = client();
        let b = book(1000, 1);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        let err = service
            .purchase(c.id, b.id, Money::from_cents(999))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Conflict(ConflictError::InsufficientFunds { .. })
        ));
        assert_eq!(store.book(b.id).unwrap().quantity, 1);
        assert!(store.client(c.id).unwrap().owned_books.is_empty());
        assert_eq!(store.saves(), 0);
    }

    // -------------------------------------------------------------------------
    // purchase: effects
    // -------------------------------------------------------------------------

    #[test]
    fn test_purchase_moves_one_unit_and_returns_change() {
        let c = client();
        let b = book(1000, 2);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);
        let before = total_units(&store, c.id, b.id);

        let change = service
            .purchase(c.id, b.id, Money::from_cents(2000))
            .unwrap();

        assert_eq!(change, Money::from_cents(1000));
        assert_eq!(store.book(b.id).unwrap().quantity, 1);
        assert_eq!(store.client(c.id).unwrap().owned_copies(b.id), 1);
        assert_eq!(total_units(&store, c.id, b.id), before);
        assert_eq!(
            store.calls(),
            vec![
                Call::FindClientById(c.id),
                Call::FindBookById(b.id),
                Call::SaveBook(b.id),
                Call::SaveClient(c.id),
            ]
        );
    }

    #[test]
    fn test_purchase_scenario_until_out_of_stock() {
        let c = client();
        let b = book(1000, 2);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        let change = service
            .purchase(c.id, b.id, Money::from_cents(2000))
            .unwrap();
        assert_eq!(change, Money::from_cents(1000));
        assert_eq!(store.book(b.id).unwrap().quantity, 1);
        assert_eq!(store.client(c.id).unwrap().owned_copies(b.id), 1);

        let change = service
            .purchase(c.id, b.id, Money::from_cents(1000))
            .unwrap();
        assert!(change.is_zero());
        assert_eq!(store.book(b.id).unwrap().quantity, 0);
        assert_eq!(store.client(c.id).unwrap().owned_copies(b.id), 2);

        let err = service
            .purchase(c.id, b.id, Money::from_cents(1000))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.client(c.id).unwrap().owned_copies(b.id), 2);
    }

    #[test]
    fn test_purchase_change_is_exact_decimal() {
        let c = client();
        let b = Book::new(
            BookId::from_uuid(Uuid::new_v4()),
            "9.99".parse().unwrap(),
            1,
        );
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        let change = service
            .purchase(c.id, b.id, "10.005".parse().unwrap())
            .unwrap();

        assert_eq!(change.to_string(), "0.015");
    }

    #[test]
    fn test_purchase_free_book() {
        let c = client();
        let b = book(0, 1);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        let change = service.purchase(c.id, b.id, Money::from_cents(1)).unwrap();

        assert_eq!(change, Money::from_cents(1));
    }

    #[test]
    fn test_purchase_at_max_owned_count_writes_nothing() {
        let mut c = client();
        let b = book(1000, 1);
        c.owned_books.insert(b.id, u32::MAX);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        let err = service
            .purchase(c.id, b.id, Money::from_cents(1000))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Conflict(ConflictError::OwnedCountOverflow { .. })
        ));
        assert_eq!(store.book(b.id), Some(b));
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_purchase_keeps_stock_when_client_save_fails() {
        let c = client();
        let b = book(1000, 2);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        // find client, find book and save book succeed; save client fails
        store.fail_after(3);
        let service = BookService::new(&store);

        let err = service
            .purchase(c.id, b.id, Money::from_cents(1000))
            .unwrap_err();

        assert!(matches!(err, CoreError::Store(StoreError::Unavailable(_))));
        assert_eq!(store.calls().last(), Some(&Call::SaveClient(c.id)));
        // No rollback: the book write stays, the copy is lost
        assert_eq!(store.book(b.id).unwrap().quantity, 1);
        assert_eq!(store.client(c.id).unwrap().owned_copies(b.id), 0);
    }

    // -------------------------------------------------------------------------
    // refund
    // -------------------------------------------------------------------------

    #[test]
    fn test_refund_unknown_client() {
        let b = book(1000, 1);
        let store = SpyStore::new().with_book(b.clone());
        let service = BookService::new(&store);

        let err = service.refund(ClientId::new(), b.id).unwrap_err();

        assert!(matches!(
            err,
            CoreError::NotFound {
                entity: Entity::Client,
                ..
            }
        ));
    }

    #[test]
    fn test_refund_unknown_book() {
        let c = client();
        let store = SpyStore::new().with_client(c.clone());
        let service = BookService::new(&store);

        let err = service
            .refund(c.id, BookId::from_uuid(Uuid::new_v4()))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::NotFound {
                entity: Entity::Book,
                ..
            }
        ));
    }

    #[test]
    fn test_refund_book_not_owned() {
        let c = client();
        let b = book(1000, 2);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        let err = service.refund(c.id, b.id).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotOwned { .. })
        ));
        assert_eq!(store.book(b.id).unwrap().quantity, 2);
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_refund_at_max_stock_writes_nothing() {
        let mut c = client();
        let b = book(100, u32::MAX);
        c.add_copy(b.id);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        let err = service.refund(c.id, b.id).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Conflict(ConflictError::StockOverflow { .. })
        ));
        assert_eq!(store.book(b.id).unwrap().quantity, u32::MAX);
        assert_eq!(store.client(c.id), Some(c));
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_refund_restocks_and_returns_price() {
        let mut c = client();
        let b = book(1000, 2);
        c.add_copy(b.id);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);
        let before = total_units(&store, c.id, b.id);

        let refunded = service.refund(c.id, b.id).unwrap();

        assert_eq!(refunded, Money::from_cents(1000));
        assert_eq!(store.book(b.id).unwrap().quantity, 3);
        assert_eq!(total_units(&store, c.id, b.id), before);
    }

    #[test]
    fn test_refund_scenario_single_and_multi_copy() {
        let mut c = client();
        let book_a = book(1000, 2);
        let book_b = book(1000, 2);
        c.add_copy(book_a.id);
        c.add_copy(book_b.id);
        c.add_copy(book_b.id);
        let store = SpyStore::new()
            .with_client(c.clone())
            .with_book(book_a.clone())
            .with_book(book_b.clone());
        let service = BookService::new(&store);

        service.refund(c.id, book_b.id).unwrap();
        let owned = store.client(c.id).unwrap().owned_books;
        assert_eq!(owned.get(&book_a.id), Some(&1));
        assert_eq!(owned.get(&book_b.id), Some(&1));

        service.refund(c.id, book_a.id).unwrap();
        let owned = store.client(c.id).unwrap().owned_books;
        assert!(!owned.contains_key(&book_a.id));
        assert_eq!(owned.get(&book_b.id), Some(&1));
    }

    #[test]
    fn test_purchase_then_refund_restores_state() {
        let c = client();
        let b = book(1250, 1);
        let store = SpyStore::new().with_client(c.clone()).with_book(b.clone());
        let service = BookService::new(&store);

        service
            .purchase(c.id, b.id, Money::from_cents(1250))
            .unwrap();
        let refunded = service.refund(c.id, b.id).unwrap();

        assert_eq!(refunded, Money::from_cents(1250));
        assert_eq!(store.book(b.id), Some(b));
        assert_eq!(store.client(c.id), Some(c));
    }
}
