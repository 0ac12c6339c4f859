//! # Error Types
//!
//! Domain-specific error types for gvs-core.
//!
//! ## Error Hierarchy
//! ```text
//!  gvs-core errors (this file)
//!  |- CoreError        - business rule violations (not-found, stock, price)
//!  |- ValidationError  - field-level input failures
//!
//!  gvs-db errors (separate crate)
//!  |- DbError          - database operation failures
//!  |- CheckoutError    - what the sale submitter sees:
//!                        Validation(CoreError) | Transaction(DbError)
//! ```
//!
//! Per the propagation policy: `CoreError`/`ValidationError` are detected
//! before any write and surface to the caller verbatim; persistence failures
//! roll the whole unit of work back before they are re-raised.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations detected while validating a sale.
///
/// Variants carry enough context (ids, bounds, quantities) for the caller to
/// correct the input and resubmit; nothing here is retried automatically.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No active client with the given id.
    #[error("Client not found: {0}")]
    ClientNotFound(i64),

    /// No product with the given id.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Requested quantity exceeds the product's current stock.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// Agreed unit price falls outside the +/-20% band around the
    /// recommended price. Bounds are inclusive.
    #[error("Price out of range for product {product_id}: {offered_cents} not in [{min_cents}, {max_cents}] cents")]
    PriceOutOfRange {
        product_id: i64,
        offered_cents: i64,
        min_cents: i64,
        max_cents: i64,
    },

    /// A sale must contain at least one line.
    #[error("Sale must contain at least one line item")]
    EmptySale,

    /// Field-level validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation errors.
///
/// Used both by the sale validator (quantities, discounts) and by the
/// client/product directory checks before inserts.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Invalid format (e.g. malformed DNI or phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience alias for field-level validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 3,
            available: 50,
            requested: 60,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 3: available 50, requested 60"
        );

        let err = CoreError::ClientNotFound(7);
        assert_eq!(err.to_string(), "Client not found: 7");
    }

    #[test]
    fn test_price_out_of_range_message() {
        let err = CoreError::PriceOutOfRange {
            product_id: 3,
            offered_cents: 1300,
            min_cents: 800,
            max_cents: 1200,
        };
        assert_eq!(
            err.to_string(),
            "Price out of range for product 3: 1300 not in [800, 1200] cents"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive { field: "quantity" };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
