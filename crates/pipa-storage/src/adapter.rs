// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use pipa_config::model::StorageConfig;
use pipa_core::{
    AdapterType, Customer, HealthStatus, NewCustomer, NewOrder, NewSealReport, Order, OrderStatus,
    PhotoStatus, PipaError, PluginAdapter, SealReport, StorageAdapter,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed persistence gateway.
///
/// The database is opened by [`StorageAdapter::initialize`]; every other
/// operation fails with a storage error until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, PipaError> {
        self.db
            .get()
            .ok_or_else(|| PipaError::storage("storage not initialized, call initialize() first"))
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PipaError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PipaError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), PipaError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| PipaError::storage("storage already initialized"))?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), PipaError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    // --- Customer operations ---

    async fn get_customer_by_phone(&self, phone: &str) -> Result<Option<Customer>, PipaError> {
        queries::customers::get_customer_by_phone(self.db()?, phone).await
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, PipaError> {
        queries::customers::create_customer(self.db()?, customer).await
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), PipaError> {
        queries::customers::update_customer(self.db()?, customer).await
    }

    async fn update_customer_state(&self, phone: &str, state: &str) -> Result<(), PipaError> {
        queries::customers::update_customer_state(self.db()?, phone, state).await
    }

    // --- Order operations ---

    async fn get_last_order(&self, customer_id: i64) -> Result<Option<Order>, PipaError> {
        queries::orders::get_last_order(self.db()?, customer_id).await
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, PipaError> {
        queries::orders::get_order(self.db()?, id).await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order, PipaError> {
        queries::orders::create_order(self.db()?, order).await
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<(), PipaError> {
        queries::orders::update_order_status(self.db()?, id, status).await
    }

    async fn list_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, PipaError> {
        queries::orders::list_orders_by_status(self.db()?, status).await
    }

    // --- Seal report operations ---

    async fn create_seal_report(&self, report: &NewSealReport) -> Result<SealReport, PipaError> {
        queries::seal_reports::create_seal_report(self.db()?, report).await
    }

    async fn get_last_seal_report(
        &self,
        customer_id: i64,
    ) -> Result<Option<SealReport>, PipaError> {
        queries::seal_reports::get_last_seal_report(self.db()?, customer_id).await
    }

    async fn update_seal_report_photo(
        &self,
        id: i64,
        photo: PhotoStatus,
    ) -> Result<(), PipaError> {
        queries::seal_reports::update_seal_report_photo(self.db()?, id, photo).await
    }
}
