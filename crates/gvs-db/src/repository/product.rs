//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Stock Updates
//! ```text
//!  Restocking / corrections:  adjust_stock(id, delta)   pool-backed
//!  Selling:                   decrement_stock(conn, ..) transaction-scoped,
//!                             guarded so stock never goes negative
//! ```
//! The guarded decrement is an associated function taking a connection: it
//! only ever runs inside the checkout unit of work, never on its own.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use gvs_core::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "id, code, description, recommended_price_cents, \
                               stock, min_stock, is_active, created_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Adds a new product and returns it with its generated id.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the code already exists.
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        debug!(code = %new.code, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                code, description, recommended_price_cents,
                stock, min_stock, is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)
            "#,
        )
        .bind(&new.code)
        .bind(&new.description)
        .bind(new.recommended_price_cents)
        .bind(new.stock)
        .bind(new.min_stock)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            code: new.code.clone(),
            description: new.description.clone(),
            recommended_price_cents: new.recommended_price_cents,
            stock: new.stock,
            min_stock: new.min_stock,
            is_active: true,
            created_at: now,
        })
    }

    /// Gets a product by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its business code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ?1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Updates an existing product's catalog fields.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                code = ?2,
                description = ?3,
                recommended_price_cents = ?4,
                stock = ?5,
                min_stock = ?6,
                is_active = ?7
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.code)
        .bind(&product.description)
        .bind(product.recommended_price_cents)
        .bind(product.stock)
        .bind(product.min_stock)
        .bind(product.is_active)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Adjusts stock by a delta (positive for restocking, negative for
    /// corrections). Unguarded; for sales use [`Self::decrement_stock`].
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let result = sqlx::query("UPDATE products SET stock = stock + ?2 WHERE id = ?1")
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Decrements stock for a sold quantity, inside the checkout transaction.
    ///
    /// The `WHERE stock >= qty` guard makes the decrement fail (zero rows)
    /// instead of driving stock negative when the stock observed during
    /// validation has been consumed by an earlier line of the same sale.
    /// The caller treats that failure as fatal and rolls the whole unit of
    /// work back.
    pub async fn decrement_stock(
        conn: &mut SqliteConnection,
        product_id: i64,
        quantity: i64,
    ) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE products SET stock = stock - ?2 WHERE id = ?1 AND stock >= ?2")
                .bind(product_id)
                .bind(quantity)
                .execute(conn)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::StockUnderflow {
                product_id,
                requested: quantity,
            });
        }

        Ok(())
    }

    /// Lists active products that have fallen below their minimum stock.
    pub async fn list_low_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 AND stock < min_stock ORDER BY code"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Soft-deletes a product. Historical sale lines keep referencing it.
    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let result = sqlx::query("UPDATE products SET is_active = 0 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn widget(code: &str, stock: i64) -> NewProduct {
        NewProduct {
            code: code.to_string(),
            description: "Widget".to_string(),
            recommended_price_cents: 1000,
            stock,
            min_stock: 10,
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = repo.insert(&widget("WIDGET-01", 50)).await.unwrap();
        assert!(product.id > 0);

        let by_id = repo.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(by_id.code, "WIDGET-01");
        assert_eq!(by_id.stock, 50);

        let by_code = repo.get_by_code("WIDGET-01").await.unwrap().unwrap();
        assert_eq!(by_code.id, product.id);
    }

    #[tokio::test]
    async fn test_adjust_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = repo.insert(&widget("WIDGET-01", 50)).await.unwrap();
        repo.adjust_stock(product.id, 25).await.unwrap();

        let fetched = repo.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 75);
    }

    #[tokio::test]
    async fn test_guarded_decrement() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        let product = repo.insert(&widget("WIDGET-01", 5)).await.unwrap();

        let mut conn = db.pool().acquire().await.unwrap();

        ProductRepository::decrement_stock(&mut conn, product.id, 5)
            .await
            .unwrap();

        // Stock is now 0; any further decrement must fail, not go negative
        let err = ProductRepository::decrement_stock(&mut conn, product.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::StockUnderflow { requested: 1, .. }));

        drop(conn);
        let fetched = repo.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 0);
    }

    #[tokio::test]
    async fn test_low_stock_listing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&widget("OK-01", 50)).await.unwrap();
        let low = repo.insert(&widget("LOW-01", 3)).await.unwrap();

        let listed = repo.list_low_stock().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, low.id);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&widget("WIDGET-01", 50)).await.unwrap();
        let err = repo.insert(&widget("WIDGET-01", 10)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
