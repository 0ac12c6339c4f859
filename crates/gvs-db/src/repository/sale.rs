//! # Sale Repository
//!
//! Database operations for sale headers and their lines.
//!
//! ## Write Path
//! ```text
//!  All sale writes go through the checkout unit of work:
//!
//!    insert_header(conn, ..)   placeholder total, returns generated id
//!    insert_line(conn, ..)     one row per draft line, in input order
//!    sum_line_amounts(conn)    authoritative subtotal from persisted rows
//!    update_total(conn, ..)    final header total
//!
//!  These take `&mut SqliteConnection` so the coordinator can run them all
//!  on one transaction. A sale header is never written outside of it.
//! ```
//! Reads and `void_sale` operate on the pool like any other repository.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use gvs_core::{LineDraft, Sale, SaleLine, SaleStatus};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // Pool-backed reads
    // =========================================================================

    /// Gets a sale header by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, client_id, sale_date, global_discount_pct,
                   total_cents, notes, status
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets the lines of a sale, in insertion order.
    pub async fn get_lines(&self, sale_id: i64) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, sale_id, product_id, quantity,
                   unit_price_cents, discount_pct, amount_cents
            FROM sale_lines
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists sales for a client, newest first.
    pub async fn list_by_client(&self, client_id: i64, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, client_id, sale_date, global_discount_pct,
                   total_cents, notes, status
            FROM sales
            WHERE client_id = ?1
            ORDER BY sale_date DESC, id DESC
            LIMIT ?2
            "#,
        )
        .bind(client_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts persisted sales (used by tests to prove rollback completeness).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts persisted sale lines.
    pub async fn count_lines(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_lines")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Voids a completed sale.
    pub async fn void_sale(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Voiding sale");

        let result = sqlx::query("UPDATE sales SET status = 'voided' WHERE id = ?1 AND status = 'completed'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale (completed)", id));
        }

        Ok(())
    }

    // =========================================================================
    // Transaction-scoped writes (checkout unit of work)
    // =========================================================================

    /// Inserts a sale header with a placeholder total of 0 and returns the
    /// generated sale id. The real total is written by [`Self::update_total`]
    /// once all lines are persisted.
    pub async fn insert_header(
        conn: &mut SqliteConnection,
        client_id: i64,
        sale_date: NaiveDate,
        global_discount_pct: i64,
        notes: Option<&str>,
        status: SaleStatus,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO sales (
                client_id, sale_date, global_discount_pct,
                total_cents, notes, status
            ) VALUES (?1, ?2, ?3, 0, ?4, ?5)
            "#,
        )
        .bind(client_id)
        .bind(sale_date)
        .bind(global_discount_pct)
        .bind(notes)
        .bind(status)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Inserts one line, tagged with the generated sale id and its computed
    /// amount.
    pub async fn insert_line(
        conn: &mut SqliteConnection,
        sale_id: i64,
        line: &LineDraft,
        amount_cents: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sale_lines (
                sale_id, product_id, quantity,
                unit_price_cents, discount_pct, amount_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(sale_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.unit_price_cents)
        .bind(line.discount_pct)
        .bind(amount_cents)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Sums the amounts of the lines persisted so far for a sale. This is
    /// the authoritative subtotal: it reads back exactly what was written,
    /// never what the caller claimed.
    pub async fn sum_line_amounts(conn: &mut SqliteConnection, sale_id: i64) -> DbResult<i64> {
        let total: Option<i64> =
            sqlx::query_scalar("SELECT SUM(amount_cents) FROM sale_lines WHERE sale_id = ?1")
                .bind(sale_id)
                .fetch_one(conn)
                .await?;

        Ok(total.unwrap_or(0))
    }

    /// Writes the recomputed total into the sale header.
    pub async fn update_total(
        conn: &mut SqliteConnection,
        sale_id: i64,
        total_cents: i64,
    ) -> DbResult<()> {
        let result = sqlx::query("UPDATE sales SET total_cents = ?2 WHERE id = ?1")
            .bind(sale_id)
            .bind(total_cents)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", sale_id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use gvs_core::{NewClient, NewProduct};

    async fn seeded_db() -> (Database, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let client = db
            .clients()
            .insert(&NewClient {
                name: "Ana".to_string(),
                surname: "Garcia".to_string(),
                dni: "12345678Z".to_string(),
                phone: None,
                home_address: String::new(),
                shipping_address: String::new(),
            })
            .await
            .unwrap();

        let product = db
            .products()
            .insert(&NewProduct {
                code: "WIDGET-01".to_string(),
                description: "Widget".to_string(),
                recommended_price_cents: 1000,
                stock: 50,
                min_stock: 10,
            })
            .await
            .unwrap();

        (db, client.id, product.id)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[tokio::test]
    async fn test_header_lines_total_roundtrip() {
        let (db, client_id, product_id) = seeded_db().await;

        let mut tx = db.pool().begin().await.unwrap();

        let sale_id = SaleRepository::insert_header(
            &mut tx,
            client_id,
            date(),
            0,
            Some("first order"),
            SaleStatus::Completed,
        )
        .await
        .unwrap();
        assert!(sale_id > 0);

        let line = LineDraft {
            product_id,
            quantity: 5,
            unit_price_cents: 950,
            discount_pct: 10,
        };
        SaleRepository::insert_line(&mut tx, sale_id, &line, 4275)
            .await
            .unwrap();

        assert_eq!(
            SaleRepository::sum_line_amounts(&mut tx, sale_id)
                .await
                .unwrap(),
            4275
        );

        SaleRepository::update_total(&mut tx, sale_id, 4275)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let sale = db.sales().get_by_id(sale_id).await.unwrap().unwrap();
        assert_eq!(sale.total_cents, 4275);
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.notes.as_deref(), Some("first order"));

        let lines = db.sales().get_lines(sale_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount_cents, 4275);
    }

    #[tokio::test]
    async fn test_lines_keep_input_order() {
        let (db, client_id, product_id) = seeded_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        let sale_id = SaleRepository::insert_header(
            &mut tx,
            client_id,
            date(),
            0,
            None,
            SaleStatus::Completed,
        )
        .await
        .unwrap();

        for qty in [3, 1, 2] {
            let line = LineDraft {
                product_id,
                quantity: qty,
                unit_price_cents: 1000,
                discount_pct: 0,
            };
            SaleRepository::insert_line(&mut tx, sale_id, &line, qty * 1000)
                .await
                .unwrap();
        }
        tx.commit().await.unwrap();

        let lines = db.sales().get_lines(sale_id).await.unwrap();
        let quantities: Vec<i64> = lines.iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_void_sale() {
        let (db, client_id, _) = seeded_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        let sale_id = SaleRepository::insert_header(
            &mut tx,
            client_id,
            date(),
            0,
            None,
            SaleStatus::Completed,
        )
        .await
        .unwrap();
        tx.commit().await.unwrap();

        db.sales().void_sale(sale_id).await.unwrap();
        let sale = db.sales().get_by_id(sale_id).await.unwrap().unwrap();
        assert_eq!(sale.status, SaleStatus::Voided);

        // Voiding twice fails: no longer a completed sale
        assert!(db.sales().void_sale(sale_id).await.is_err());
    }
}
