//! # Checkout Coordinator
//!
//! Turns a caller-built [`SaleDraft`] into durable rows, or into nothing.
//!
//! ## Submission Lifecycle
//! ```text
//!  Pending
//!     |
//!     v
//!  Validating        pure reads: client, products, stock, price band,
//!     |              discounts, non-empty line list
//!     |-- failure -> Aborted: no database write happened, the error
//!     |              surfaces verbatim (CheckoutError::Validation)
//!     v
//!  Persisting        ONE transaction:
//!     |                1. insert header (placeholder total) -> sale id
//!     |                2. per line, in input order:
//!     |                     compute amount, insert line,
//!     |                     guarded stock decrement
//!     |                3. SUM(amount_cents) over the persisted lines
//!     |                4. apply global discount, update header total
//!     |-- failure -> RolledBack: every write of the attempt is discarded
//!     |              (header, lines, decrements), then
//!     |              CheckoutError::Transaction wraps the cause
//!     v
//!  Committed         returns SaleReceipt { sale_id, total_cents }
//! ```
//!
//! ## Why the total is recomputed inside the transaction
//! The global discount must apply to exactly the line amounts that were
//! persisted, not to a caller-side estimate. Summing the just-written rows
//! inside the same transaction makes total/line drift impossible, whatever
//! the caller sent.
//!
//! ## Stock policy
//! Stock is decremented explicitly here, line by line, inside the same
//! transaction as the inserts. The decrement is guarded (`stock >= qty`), so
//! the "stock never goes negative" invariant holds even when validation's
//! stock snapshot is stale by the time the write runs, e.g. when two lines
//! of one draft sell the same product.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use crate::error::{CheckoutError, DbResult};
use crate::repository::client::ClientRepository;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use gvs_core::{pricing, validation, CoreError, Money, Product, SaleDraft, SaleReceipt};

/// The sale transaction coordinator.
///
/// Cheap to clone; obtained from [`crate::Database::checkout`].
#[derive(Debug, Clone)]
pub struct Checkout {
    pool: SqlitePool,
}

impl Checkout {
    /// Creates a new coordinator over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Checkout { pool }
    }

    /// Submits a sale: validate, persist atomically, return the generated id
    /// and the recomputed total.
    ///
    /// ## Errors
    /// - [`CheckoutError::Validation`] - the draft broke a business rule;
    ///   nothing was written. The caller may correct the input and resubmit.
    /// - [`CheckoutError::Transaction`] - persistence failed; the unit of
    ///   work was rolled back completely before this was raised.
    pub async fn submit(&self, draft: SaleDraft) -> Result<SaleReceipt, CheckoutError> {
        debug!(
            client_id = draft.client_id,
            lines = draft.lines.len(),
            "Validating sale draft"
        );

        let products = self.validate(&draft).await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CheckoutError::Transaction(e.into()))?;

        match persist(&mut tx, &draft).await {
            Ok(receipt) => {
                tx.commit()
                    .await
                    .map_err(|e| CheckoutError::Transaction(e.into()))?;

                info!(
                    sale_id = receipt.sale_id,
                    total = %receipt.total(),
                    lines = products.len(),
                    "Sale committed"
                );
                Ok(receipt)
            }
            Err(err) => {
                // Explicit rollback; dropping the transaction would do the
                // same, but the failure should be durable before we re-raise.
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                warn!(error = %err, "Sale transaction rolled back");
                Err(CheckoutError::Transaction(err))
            }
        }
    }

    /// Runs every validation of the draft before any write: shape and
    /// scalars first, then the client lookup (once), then each line against
    /// its product. All reads, no side effects; a single failure aborts the
    /// whole sale.
    ///
    /// Returns the fetched products, in line order, for logging use.
    async fn validate(&self, draft: &SaleDraft) -> Result<Vec<Product>, CheckoutError> {
        validation::validate_draft(draft).map_err(CheckoutError::Validation)?;

        let clients = ClientRepository::new(self.pool.clone());
        clients
            .get_active_by_id(draft.client_id)
            .await
            .map_err(CheckoutError::Transaction)?
            .ok_or(CheckoutError::Validation(CoreError::ClientNotFound(
                draft.client_id,
            )))?;

        let catalog = ProductRepository::new(self.pool.clone());
        let mut products = Vec::with_capacity(draft.lines.len());

        for line in &draft.lines {
            let product = catalog
                .get_by_id(line.product_id)
                .await
                .map_err(CheckoutError::Transaction)?
                .ok_or(CheckoutError::Validation(CoreError::ProductNotFound(
                    line.product_id,
                )))?;

            validation::validate_line(&product, line).map_err(CheckoutError::Validation)?;
            products.push(product);
        }

        Ok(products)
    }
}

/// The persisting half of the unit of work. Every statement runs on the one
/// transaction; any error propagates to `submit`, which rolls back.
async fn persist(tx: &mut Transaction<'_, Sqlite>, draft: &SaleDraft) -> DbResult<SaleReceipt> {
    let sale_id = SaleRepository::insert_header(
        tx,
        draft.client_id,
        draft.sale_date,
        draft.global_discount_pct,
        draft.notes.as_deref(),
        gvs_core::SaleStatus::Completed,
    )
    .await?;

    for line in &draft.lines {
        let amount = pricing::line_amount(
            line.quantity,
            Money::from_cents(line.unit_price_cents),
            line.discount_pct,
        );

        SaleRepository::insert_line(tx, sale_id, line, amount.cents()).await?;
        ProductRepository::decrement_stock(tx, line.product_id, line.quantity).await?;
    }

    // Authoritative total: read back what was persisted, then discount.
    let subtotal = SaleRepository::sum_line_amounts(tx, sale_id).await?;
    let total = pricing::sale_total(Money::from_cents(subtotal), draft.global_discount_pct);

    SaleRepository::update_total(tx, sale_id, total.cents()).await?;

    Ok(SaleReceipt {
        sale_id,
        total_cents: total.cents(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
