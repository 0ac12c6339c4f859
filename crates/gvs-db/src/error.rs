//! # Database Error Types
//!
//! Error types for database operations and sale submission.
//!
//! ## Error Flow
//! ```text
//!  SQLite error (sqlx::Error)
//!       |
//!       v
//!  DbError            categorized, with context where sqlx gives any
//!       |
//!       v
//!  CheckoutError      what submit() raises:
//!  |- Validation      CoreError, detected before any write, verbatim
//!  |- Transaction     DbError, raised only after a full rollback
//! ```

use thiserror::Error;

use gvs_core::CoreError;

// =============================================================================
// DbError
// =============================================================================

/// Database operation errors.
///
/// Wraps sqlx errors with enough categorization for callers to distinguish
/// constraint problems from infrastructure failures.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found (no row for the given id).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Unique constraint violation (duplicate DNI, duplicate product code).
    #[error("Duplicate {field}: already exists")]
    UniqueViolation { field: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A guarded stock decrement would have driven stock below zero.
    ///
    /// Raised inside the checkout transaction when the stock observed during
    /// validation no longer covers the line being persisted.
    #[error("Stock underflow for product {product_id}: requested {requested}")]
    StockUnderflow { product_id: i64, requested: i64 },

    /// Database connection failed (missing file, permissions, disk full).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DbError::NotFound { entity, id }
    }
}

/// Convert sqlx errors to DbError.
///
/// SQLite reports constraint failures only through its message text, so the
/// mapping inspects it:
/// `"UNIQUE constraint failed: <table>.<column>"` and
/// `"FOREIGN KEY constraint failed"`.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record",
                id: -1,
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation { field }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// CheckoutError
// =============================================================================

/// Errors raised by [`crate::checkout::Checkout::submit`].
///
/// The two arms match the propagation policy: validation failures occur
/// before any write and surface unchanged; transaction failures are raised
/// only after the entire unit of work has been rolled back.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The draft failed validation; the database was not written to.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// Persistence failed; every write of this attempt was rolled back.
    #[error("Sale transaction failed: {0}")]
    Transaction(#[source] DbError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DbError::not_found("Client", 7);
        assert_eq!(err.to_string(), "Client not found: 7");

        let err = DbError::StockUnderflow {
            product_id: 3,
            requested: 30,
        };
        assert_eq!(err.to_string(), "Stock underflow for product 3: requested 30");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: CheckoutError = CoreError::EmptySale.into();
        // Transparent: the caller sees the CoreError message verbatim.
        assert_eq!(err.to_string(), CoreError::EmptySale.to_string());
    }

    #[test]
    fn test_transaction_error_wraps_cause() {
        let err = CheckoutError::Transaction(DbError::StockUnderflow {
            product_id: 3,
            requested: 30,
        });
        assert!(err.to_string().starts_with("Sale transaction failed"));
    }
}
