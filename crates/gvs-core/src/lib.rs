//! # gvs-core: Pure Business Logic for GVS
//!
//! This crate is the heart of the sales-management system. It contains every
//! business rule as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//!   Front-end (GUI / console)          out of scope
//!        |
//!   gvs-db (SQLite, repositories,      drives the rules below inside
//!           checkout transaction)      its unit of work
//!        |
//!   gvs-core (THIS CRATE)              money, pricing, validation
//!
//!   NO I/O - NO DATABASE - PURE FUNCTIONS
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Client, Product, Sale, SaleLine, drafts)
//! - [`money`] - Money type with integer-cents arithmetic (no floating point)
//! - [`pricing`] - Line amounts, sale totals, and the recommended-price band
//! - [`validation`] - Business rule validation for sales, clients, products
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output - validation is idempotent
//! 2. **Integer Money**: all monetary values are cents (i64), never floats
//! 3. **Explicit Errors**: typed enums via `thiserror`, never strings or panics
//!
//! ## Example
//!
//! ```rust
//! use gvs_core::money::Money;
//! use gvs_core::pricing;
//!
//! // 5 units at 9.50 with a 10% line discount
//! let amount = pricing::line_amount(5, Money::from_cents(950), 10);
//! assert_eq!(amount.cents(), 4275); // 42.75
//! ```

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Allowed deviation of an agreed unit price from the recommended price,
/// in basis points (2000 = +/-20%). Bounds are inclusive: a price exactly
/// at 80% or 120% of the recommended price is accepted.
pub const PRICE_BAND_BPS: i64 = 2_000;

/// Maximum percentage discount, per line and globally.
pub const MAX_DISCOUNT_PCT: i64 = 100;

/// Maximum length of a client name.
pub const MAX_CLIENT_NAME_LEN: usize = 30;

/// Maximum length of a client surname.
pub const MAX_CLIENT_SURNAME_LEN: usize = 50;
