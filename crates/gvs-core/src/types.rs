//! # Domain Types
//!
//! Core domain records used throughout GVS.
//!
//! ## Type Overview
//! ```text
//!  Client ----< Sale ----< SaleLine >---- Product
//!  (directory)  (header)   (ordered)      (catalog)
//!
//!  Drafts (caller input, no ids):
//!    SaleDraft { client_id, date, global discount, lines: Vec<LineDraft> }
//!
//!  SaleReceipt: what Checkout::submit returns (generated id + final total).
//! ```
//!
//! All records are plain immutable values; ids are assigned by the database
//! on insert (AUTOINCREMENT), never by the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Client
// =============================================================================

/// A client in the directory. Referenced by many sales; immutable during a
/// sale submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    /// Database-assigned identifier.
    pub id: i64,

    pub name: String,
    pub surname: String,

    /// National identity document, unique per client.
    pub dni: String,

    pub phone: Option<String>,

    /// Usual address.
    pub home_address: String,

    /// Delivery address, may differ from the usual one.
    pub shipping_address: String,

    /// When the client was registered.
    pub registered_at: DateTime<Utc>,

    /// Soft-delete flag; only active clients can buy.
    pub is_active: bool,
}

impl Client {
    /// Full display name ("name surname").
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Payload for registering a new client. The id, registration timestamp and
/// active flag are assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub surname: String,
    pub dni: String,
    pub phone: Option<String>,
    pub home_address: String,
    pub shipping_address: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Database-assigned identifier.
    pub id: i64,

    /// Business code, unique per product.
    pub code: String,

    pub description: String,

    /// Recommended price in cents (> 0). Agreed sale prices must stay
    /// within +/-20% of this value.
    pub recommended_price_cents: i64,

    /// Current stock level (>= 0).
    pub stock: i64,

    /// Threshold below which the product counts as low on stock.
    pub min_stock: i64,

    /// Soft-delete flag.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the recommended price as Money.
    #[inline]
    pub fn recommended_price(&self) -> Money {
        Money::from_cents(self.recommended_price_cents)
    }

    /// Checks whether the requested quantity is covered by current stock.
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Checks whether the product has fallen below its minimum stock.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock < self.min_stock
    }
}

/// Payload for adding a new product to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub description: String,
    pub recommended_price_cents: i64,
    pub stock: i64,
    pub min_stock: i64,
}

// =============================================================================
// Sale Status
// =============================================================================

/// Status tag of a persisted sale.
///
/// Checkout writes sales as `Completed` directly; `Voided` is only reached
/// through an explicit void afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    #[default]
    Completed,
    Voided,
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale header.
///
/// `total_cents` is derived: it is recomputed from the persisted lines inside
/// the checkout transaction and is the only authoritative total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub client_id: i64,
    pub sale_date: NaiveDate,
    /// Whole-percentage discount applied to the sum of line amounts (0-100).
    pub global_discount_pct: i64,
    pub total_cents: i64,
    pub notes: Option<String>,
    pub status: SaleStatus,
}

impl Sale {
    /// Returns the final total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// One product line within a persisted sale. Created together with its sale,
/// never independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Agreed unit price at time of sale (frozen; may differ from the
    /// catalog's recommended price within the allowed band).
    pub unit_price_cents: i64,
    /// Per-line whole-percentage discount (0-100).
    pub discount_pct: i64,
    /// quantity * unit price, minus the line discount.
    pub amount_cents: i64,
}

impl SaleLine {
    /// Returns the computed line amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Drafts (checkout input)
// =============================================================================

/// A proposed line item, as submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDraft {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub discount_pct: i64,
}

/// A candidate sale as built by the caller. Carries no id and no total:
/// both are produced by the checkout transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    pub client_id: i64,
    pub sale_date: NaiveDate,
    pub global_discount_pct: i64,
    pub notes: Option<String>,
    pub lines: Vec<LineDraft>,
}

// =============================================================================
// Receipt (checkout output)
// =============================================================================

/// Result of a committed sale submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// Generated sale identifier.
    pub sale_id: i64,
    /// Final total, recomputed from the persisted lines.
    pub total_cents: i64,
}

impl SaleReceipt {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_product() -> Product {
        Product {
            id: 3,
            code: "WIDGET-01".to_string(),
            description: "Widget".to_string(),
            recommended_price_cents: 1000,
            stock: 50,
            min_stock: 10,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_name() {
        let client = Client {
            id: 7,
            name: "Ana".to_string(),
            surname: "Garcia Perez".to_string(),
            dni: "12345678Z".to_string(),
            phone: None,
            home_address: String::new(),
            shipping_address: String::new(),
            registered_at: Utc::now(),
            is_active: true,
        };
        assert_eq!(client.full_name(), "Ana Garcia Perez");
    }

    #[test]
    fn test_has_stock() {
        let product = sample_product();
        assert!(product.has_stock(50));
        assert!(!product.has_stock(51));
    }

    #[test]
    fn test_low_stock() {
        let mut product = sample_product();
        assert!(!product.is_low_stock());
        product.stock = 9;
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_sale_status_default() {
        assert_eq!(SaleStatus::default(), SaleStatus::Completed);
    }

    #[test]
    fn test_draft_deserializes_from_caller_json() {
        // The payload shape a front-end submits to checkout
        let payload = r#"{
            "client_id": 7,
            "sale_date": "2026-03-14",
            "global_discount_pct": 5,
            "notes": "phone order",
            "lines": [
                {"product_id": 3, "quantity": 5, "unit_price_cents": 950, "discount_pct": 10}
            ]
        }"#;

        let draft: SaleDraft = serde_json::from_str(payload).unwrap();
        assert_eq!(draft.client_id, 7);
        assert_eq!(
            draft.sale_date,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
        );
        assert_eq!(draft.global_discount_pct, 5);
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].unit_price_cents, 950);
    }

    #[test]
    fn test_receipt_serializes_for_caller() {
        let receipt = SaleReceipt {
            sale_id: 42,
            total_cents: 4275,
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["sale_id"], 42);
        assert_eq!(json["total_cents"], 4275);
    }
}
