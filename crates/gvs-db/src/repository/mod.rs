//! # Repository Module
//!
//! Database repository implementations for GVS.
//!
//! ## Repository Pattern
//! ```text
//!  Caller
//!    |   db.products().get_by_id(3)
//!    v
//!  ProductRepository              SQL isolated here
//!    |
//!    v
//!  SQLite
//! ```
//!
//! Pool-backed reads and standalone writes live on `&self` methods; the
//! write operations that must join the checkout unit of work instead take a
//! `&mut SqliteConnection`, so the coordinator can run them all on one
//! transaction and commit or roll back as a unit.
//!
//! ## Available Repositories
//!
//! - [`client::ClientRepository`] - Client directory CRUD
//! - [`product::ProductRepository`] - Product catalog CRUD and stock
//! - [`sale::SaleRepository`] - Sale reads, void, and transaction-scoped writes

pub mod client;
pub mod product;
pub mod sale;
