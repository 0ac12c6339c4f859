//! # Pricing Module
//!
//! Line amounts, sale totals and the recommended-price band.
//!
//! ## Total Invariant
//! ```text
//!  amount_i = quantity_i * unit_price_i, minus line discount_i
//!  total    = (sum of amount_i) minus global discount
//! ```
//! The total is always recomputed from persisted line amounts inside the
//! checkout transaction; a caller-supplied total is never trusted.
//!
//! Inputs are pre-validated by [`crate::validation`]; these functions have no
//! side effects and no error paths.

use crate::money::Money;
use crate::PRICE_BAND_BPS;

/// Computes the amount of one line: `quantity * unit_price`, minus the
/// per-line percentage discount.
///
/// ```rust
/// use gvs_core::money::Money;
/// use gvs_core::pricing::line_amount;
///
/// // 5 x 9.50 with 10% off = 42.75
/// assert_eq!(line_amount(5, Money::from_cents(950), 10).cents(), 4275);
/// ```
pub fn line_amount(quantity: i64, unit_price: Money, discount_pct: i64) -> Money {
    unit_price
        .multiply_quantity(quantity)
        .apply_discount_pct(discount_pct)
}

/// Applies the global discount to a subtotal of line amounts.
pub fn sale_total(lines_subtotal: Money, global_discount_pct: i64) -> Money {
    lines_subtotal.apply_discount_pct(global_discount_pct)
}

/// Returns the inclusive `[min, max]` unit-price band around a recommended
/// price: +/-20%, i.e. `[recommended * 0.8, recommended * 1.2]`.
///
/// Computed in integer basis points so the bounds are exact; a fractional
/// lower bound is rounded up and a fractional upper bound rounded down,
/// keeping both endpoints genuinely attainable in cents.
pub fn price_band(recommended: Money) -> (Money, Money) {
    let cents = recommended.cents() as i128;
    let low = PRICE_BAND_BPS as i128; // subtracted
    let min = (cents * (10_000 - low) + 9_999) / 10_000; // ceil
    let max = (cents * (10_000 + low)) / 10_000; // floor
    (Money::from_cents(min as i64), Money::from_cents(max as i64))
}

/// Checks whether an offered unit price lies within the inclusive +/-20%
/// band around the recommended price.
///
/// The comparison is done on exact integer cross-products, so prices at
/// exactly 80% or 120% of the recommended price are accepted even when the
/// band endpoints are not whole cents.
pub fn price_within_band(offered: Money, recommended: Money) -> bool {
    let offered = offered.cents() as i128 * 10_000;
    let rec = recommended.cents() as i128;
    offered >= rec * (10_000 - PRICE_BAND_BPS as i128)
        && offered <= rec * (10_000 + PRICE_BAND_BPS as i128)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_amount_reference_scenario() {
        // 5 units at 9.50 with 10% line discount -> 42.75
        let amount = line_amount(5, Money::from_cents(950), 10);
        assert_eq!(amount.cents(), 4275);
    }

    #[test]
    fn test_line_amount_no_discount() {
        assert_eq!(line_amount(3, Money::from_cents(1000), 0).cents(), 3000);
    }

    #[test]
    fn test_line_amount_full_discount() {
        assert_eq!(line_amount(3, Money::from_cents(1000), 100).cents(), 0);
    }

    #[test]
    fn test_sale_total_with_global_discount() {
        let subtotal = Money::from_cents(10_000);
        assert_eq!(sale_total(subtotal, 10).cents(), 9_000);
        assert_eq!(sale_total(subtotal, 0).cents(), 10_000);
    }

    #[test]
    fn test_band_bounds_inclusive() {
        let recommended = Money::from_cents(1000); // 10.00

        // Exactly 80% and exactly 120% are accepted
        assert!(price_within_band(Money::from_cents(800), recommended));
        assert!(price_within_band(Money::from_cents(1200), recommended));

        // One cent outside either bound is rejected
        assert!(!price_within_band(Money::from_cents(799), recommended));
        assert!(!price_within_band(Money::from_cents(1201), recommended));
    }

    #[test]
    fn test_band_inside() {
        let recommended = Money::from_cents(1000);
        assert!(price_within_band(Money::from_cents(950), recommended));
        assert!(price_within_band(recommended, recommended));
    }

    #[test]
    fn test_band_fractional_bounds() {
        // Recommended 9.99: band is [7.992, 11.988]. 7.99 is below the exact
        // lower bound, 8.00 is inside; 11.98 inside, 11.99 above.
        let recommended = Money::from_cents(999);
        assert!(!price_within_band(Money::from_cents(799), recommended));
        assert!(price_within_band(Money::from_cents(800), recommended));
        assert!(price_within_band(Money::from_cents(1198), recommended));
        assert!(!price_within_band(Money::from_cents(1199), recommended));

        // price_band reports whole-cent attainable endpoints
        let (min, max) = price_band(recommended);
        assert_eq!(min.cents(), 800);
        assert_eq!(max.cents(), 1198);
    }

    #[test]
    fn test_band_whole_cent_endpoints() {
        let (min, max) = price_band(Money::from_cents(1000));
        assert_eq!(min.cents(), 800);
        assert_eq!(max.cents(), 1200);
    }
}
