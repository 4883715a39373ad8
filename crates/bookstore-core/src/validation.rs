//! # Validation Module
//!
//! Input checks that run before the services touch the store.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every service call checks, in this order:                              │
//! │                                                                         │
//! │  1. Format      ← THIS MODULE (no store access)                        │
//! │  2. Existence   ← store lookup by id                                   │
//! │  3. State       ← uniqueness, stock, payment, ownership                │
//! │                                                                         │
//! │  The first failure is returned; nothing is written.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a client name.
///
/// ## Rules
/// - Must not be empty
///
/// Whitespace is kept as typed; `" "` is a valid, distinct name.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_client_name;
///
/// assert!(validate_client_name("alice").is_ok());
/// assert!(validate_client_name("").is_err());
/// ```
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount tendered for a purchase.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_tendered_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a book's unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free books)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
