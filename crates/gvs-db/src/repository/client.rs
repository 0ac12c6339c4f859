//! # Client Repository
//!
//! Database operations for the client directory.
//!
//! Repositories are storage-only: field rules (`gvs_core::validation::
//! validate_new_client`) run at the caller's boundary before `insert`, the
//! same way sale rules run in the checkout coordinator before persisting.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use gvs_core::{Client, NewClient};

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Registers a new client and returns it with its generated id.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the DNI already exists.
    pub async fn insert(&self, new: &NewClient) -> DbResult<Client> {
        debug!(dni = %new.dni, "Inserting client");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO clients (
                name, surname, dni, phone,
                home_address, shipping_address,
                registered_at, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)
            "#,
        )
        .bind(&new.name)
        .bind(&new.surname)
        .bind(&new.dni)
        .bind(&new.phone)
        .bind(&new.home_address)
        .bind(&new.shipping_address)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        Ok(Client {
            id,
            name: new.name.clone(),
            surname: new.surname.clone(),
            dni: new.dni.clone(),
            phone: new.phone.clone(),
            home_address: new.home_address.clone(),
            shipping_address: new.shipping_address.clone(),
            registered_at: now,
            is_active: true,
        })
    }

    /// Gets a client by id, active or not.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, surname, dni, phone,
                   home_address, shipping_address,
                   registered_at, is_active
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Gets an *active* client by id. Deactivated clients are treated as
    /// absent: they cannot be attached to new sales.
    pub async fn get_active_by_id(&self, id: i64) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, surname, dni, phone,
                   home_address, shipping_address,
                   registered_at, is_active
            FROM clients
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Updates a client's mutable fields.
    pub async fn update(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, "Updating client");

        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = ?2,
                surname = ?3,
                dni = ?4,
                phone = ?5,
                home_address = ?6,
                shipping_address = ?7,
                is_active = ?8
            WHERE id = ?1
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.surname)
        .bind(&client.dni)
        .bind(&client.phone)
        .bind(&client.home_address)
        .bind(&client.shipping_address)
        .bind(client.is_active)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", client.id));
        }

        Ok(())
    }

    /// Deactivates a client (soft delete). Historical sales keep referencing
    /// the row; new sales are rejected during validation.
    pub async fn deactivate(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deactivating client");

        let result = sqlx::query("UPDATE clients SET is_active = 0 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }

    /// Lists active clients ordered by surname.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, surname, dni, phone,
                   home_address, shipping_address,
                   registered_at, is_active
            FROM clients
            WHERE is_active = 1
            ORDER BY surname, name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn new_client(dni: &str) -> NewClient {
        NewClient {
            name: "Ana".to_string(),
            surname: "Garcia".to_string(),
            dni: dni.to_string(),
            phone: Some("600123456".to_string()),
            home_address: "C/ Mayor 1".to_string(),
            shipping_address: "C/ Mayor 1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        let client = repo.insert(&new_client("12345678Z")).await.unwrap();
        assert!(client.id > 0);
        assert!(client.is_active);

        let fetched = repo.get_by_id(client.id).await.unwrap().unwrap();
        assert_eq!(fetched.dni, "12345678Z");
        assert_eq!(fetched.full_name(), "Ana Garcia");
    }

    #[tokio::test]
    async fn test_duplicate_dni_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        repo.insert(&new_client("12345678Z")).await.unwrap();
        let err = repo.insert(&new_client("12345678Z")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_active_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        let client = repo.insert(&new_client("12345678Z")).await.unwrap();
        repo.deactivate(client.id).await.unwrap();

        assert!(repo.get_active_by_id(client.id).await.unwrap().is_none());
        // Still present for historical reads
        assert!(repo.get_by_id(client.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_deactivate_missing_client() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.clients().deactivate(999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { id: 999, .. }));
    }
}
