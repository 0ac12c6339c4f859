//! # Validation Module
//!
//! Business rule validation for GVS.
//!
//! ## Validation Strategy
//! ```text
//!  Layer 1: this module          pure rule checks, no I/O
//!       |                        (quantity, discount, stock, price band,
//!       |                         client/product field rules)
//!       v
//!  Layer 2: gvs-db checkout      fetches client/product rows, maps missing
//!       |                        rows to NotFound, runs the checks below
//!       v                        for every line BEFORE opening a transaction
//!  Layer 3: SQLite               NOT NULL / UNIQUE / CHECK / FK constraints
//! ```
//!
//! Every function here is a pure read of its arguments: calling a validator
//! twice on the same unmodified input produces the same result both times.
//! A single failure aborts the whole sale; there is no partial acceptance of
//! valid lines.

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::pricing;
use crate::types::{LineDraft, NewClient, NewProduct, Product, SaleDraft};
use crate::{MAX_CLIENT_NAME_LEN, MAX_CLIENT_SURNAME_LEN, MAX_DISCOUNT_PCT};

// =============================================================================
// Sale Validators
// =============================================================================

/// Validates a line quantity: must be strictly positive.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }
    Ok(())
}

/// Validates a whole-percentage discount: must be within 0-100 inclusive.
pub fn validate_discount_pct(pct: i64) -> ValidationResult<()> {
    if !(0..=MAX_DISCOUNT_PCT).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "discount",
            min: 0,
            max: MAX_DISCOUNT_PCT,
        });
    }
    Ok(())
}

/// Validates the draft's shape and scalar fields: at least one line, every
/// quantity positive, every discount (line and global) within range.
///
/// Runs before any catalog lookup so an obviously malformed draft is
/// rejected without touching the repository at all.
pub fn validate_draft(draft: &SaleDraft) -> CoreResult<()> {
    if draft.lines.is_empty() {
        return Err(CoreError::EmptySale);
    }

    validate_discount_pct(draft.global_discount_pct)?;

    for line in &draft.lines {
        validate_quantity(line.quantity)?;
        validate_discount_pct(line.discount_pct)?;
    }

    Ok(())
}

/// Validates one draft line against its fetched product: sufficient stock
/// and an agreed price within the inclusive +/-20% recommended-price band.
///
/// The caller has already resolved `line.product_id` to `product`; a missing
/// product is reported as [`CoreError::ProductNotFound`] before this runs.
pub fn validate_line(product: &Product, line: &LineDraft) -> CoreResult<()> {
    if !product.has_stock(line.quantity) {
        return Err(CoreError::InsufficientStock {
            product_id: product.id,
            available: product.stock,
            requested: line.quantity,
        });
    }

    let offered = crate::Money::from_cents(line.unit_price_cents);
    if !pricing::price_within_band(offered, product.recommended_price()) {
        let (min, max) = pricing::price_band(product.recommended_price());
        return Err(CoreError::PriceOutOfRange {
            product_id: product.id,
            offered_cents: line.unit_price_cents,
            min_cents: min.cents(),
            max_cents: max.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Client Field Validators
// =============================================================================

/// Validates a new client's fields before insertion.
pub fn validate_new_client(client: &NewClient) -> ValidationResult<()> {
    let name = client.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    if name.len() > MAX_CLIENT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_CLIENT_NAME_LEN,
        });
    }

    let surname = client.surname.trim();
    if surname.is_empty() {
        return Err(ValidationError::Required { field: "surname" });
    }
    if surname.len() > MAX_CLIENT_SURNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "surname",
            max: MAX_CLIENT_SURNAME_LEN,
        });
    }

    if client.dni.trim().is_empty() {
        return Err(ValidationError::Required { field: "dni" });
    }

    if let Some(phone) = &client.phone {
        validate_phone(phone)?;
    }

    Ok(())
}

/// Validates a phone number: digits only, 6 to 15 of them.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone",
            reason: "must contain only digits",
        });
    }

    if !(6..=15).contains(&phone.len()) {
        return Err(ValidationError::OutOfRange {
            field: "phone",
            min: 6,
            max: 15,
        });
    }

    Ok(())
}

// =============================================================================
// Product Field Validators
// =============================================================================

/// Validates a product business code.
///
/// ```rust
/// use gvs_core::validation::validate_product_code;
///
/// assert!(validate_product_code("WIDGET-01").is_ok());
/// assert!(validate_product_code("").is_err());
/// assert!(validate_product_code("has space").is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required { field: "code" });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code",
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code",
            reason: "must contain only letters, numbers, hyphens, and underscores",
        });
    }

    Ok(())
}

/// Validates a new product's fields before insertion.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_code(&product.code)?;

    if product.description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description",
        });
    }

    if product.recommended_price_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "recommended price",
        });
    }

    if product.stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock",
            min: 0,
            max: i64::MAX,
        });
    }

    if product.min_stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "min_stock",
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
