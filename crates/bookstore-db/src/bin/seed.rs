//! # Seed Catalog Generator
//!
//! Writes a catalog of test books for development, then loads it back and
//! runs one purchase and one refund through the services as a sanity check.
//!
//! ## Usage
//! ```bash
//! # Generate 200 books (default)
//! cargo run -p bookstore-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p bookstore-db --bin seed -- --count 1000
//!
//! # Specify output path
//! cargo run -p bookstore-db --bin seed -- --out ./data/catalog.json
//!
//! # Write to the path the database loads at startup
//! BOOKSTORE_SEED_PATH=./data/catalog.json cargo run -p bookstore-db --bin seed
//! ```
//!
//! The written file can be loaded with `BOOKSTORE_SEED_PATH=<file>`.

use std::env;
use std::path::PathBuf;

use bookstore_core::{Book, BookId, BookService, ClientService, Money};
use bookstore_db::{Catalog, Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_COUNT: usize = 200;
const DEFAULT_OUT: &str = "./catalog.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    // BOOKSTORE_SEED_PATH picks the default output, --out overrides it
    let mut config = DbConfig::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    config = config.seed_path(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bookstore Seed Catalog Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of books to generate (default: {DEFAULT_COUNT})");
                println!("  -o, --out <PATH>    Catalog file path (default: $BOOKSTORE_SEED_PATH or {DEFAULT_OUT})");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let out = config
        .seed_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));

    println!("Bookstore Seed Catalog Generator");
    println!("================================");
    println!("Output: {}", out.display());
    println!("Books:  {count}");
    println!();

    let catalog = Catalog {
        books: (0..count).map(generate_book).collect(),
        clients: Vec::new(),
    };
    catalog.save(&out)?;
    println!("✓ Wrote {} books", catalog.books.len());

    // Reload through the normal startup path
    let db = Database::new(config.seed_path(&out))?;
    let stock = db.books().total_stock()?;
    println!("✓ Reloaded catalog: {} books, {} copies", db.books().count()?, stock);

    verify(&db)?;

    println!();
    println!("✓ Seed complete!");
    Ok(())
}

/// Buys and refunds one copy to prove the catalog works with the services.
fn verify(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let Some(book) = db.books().list()?.into_iter().find(Book::in_stock) else {
        println!("⚠ No book in stock, skipping purchase check");
        return Ok(());
    };

    let client = ClientService::new(db).create("seed-check")?;
    let books = BookService::new(db);

    let change = books.purchase(client.id, book.id, book.price + Money::from_cents(100))?;
    let refunded = books.refund(client.id, book.id)?;
    info!(book_id = %book.id, %change, %refunded, "Sanity check passed");

    println!("✓ Purchase/refund check: change {change}, refunded {refunded}");
    Ok(())
}

/// Generates a single book with deterministic price and stock.
fn generate_book(seed: usize) -> Book {
    // Price: 4.99 - 44.98
    let price_cents = 499 + ((seed * 37) % 4000) as i64;

    // Stock: 0 - 20, so some books are sold out
    let quantity = (seed % 21) as u32;

    Book::new(
        BookId::from_uuid(Uuid::new_v4()),
        Money::from_cents(price_cents),
        quantity,
    )
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bookstore_core=trace` - Show trace for the services only
/// - Default: INFO, DEBUG for bookstore crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookstore_core=debug,bookstore_db=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
