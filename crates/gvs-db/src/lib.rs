//! # gvs-db: Database Layer for GVS
//!
//! SQLite persistence for the sales-management system, and the checkout
//! coordinator that turns a validated [`gvs_core::SaleDraft`] into durable
//! rows inside one transaction.
//!
//! ## Architecture Position
//! ```text
//!  Caller (GUI / console, out of scope)
//!       |
//!       |  db.checkout().submit(draft)
//!       v
//!  gvs-db (THIS CRATE)
//!  |- pool        SqlitePool, WAL mode, config
//!  |- migrations  embedded schema (001_initial_schema.sql, ...)
//!  |- repository  clients / products / sales
//!  |- checkout    validate -> persist -> commit | rollback
//!       |
//!       v
//!  SQLite database file (or :memory: in tests)
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and checkout error types
//! - [`repository`] - Repository implementations
//! - [`checkout`] - The sale transaction coordinator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gvs_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/gvs.db")).await?;
//!
//! let receipt = db.checkout().submit(draft).await?;
//! println!("sale #{} total {}", receipt.sale_id, receipt.total());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::Checkout;
pub use error::{CheckoutError, DbError};
pub use pool::{Database, DbConfig};

pub use repository::client::ClientRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
