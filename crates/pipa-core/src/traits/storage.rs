// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence gateway trait.

use async_trait::async_trait;

use crate::error::PipaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{
    Customer, NewCustomer, NewOrder, NewSealReport, Order, OrderStatus, PhotoStatus, SealReport,
};

/// Durable storage for customers, orders and seal reports.
///
/// Lookups report a missing row as `Ok(None)`. Updates of a missing row
/// return [`PipaError::NotFound`]. Driver failures are
/// [`PipaError::Storage`].
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection).
    async fn initialize(&self) -> Result<(), PipaError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), PipaError>;

    // --- Customer operations ---

    async fn get_customer_by_phone(&self, phone: &str) -> Result<Option<Customer>, PipaError>;

    /// Registers a customer and returns the stored record.
    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, PipaError>;

    /// Overwrites every mutable field of the customer identified by `customer.phone`.
    async fn update_customer(&self, customer: &Customer) -> Result<(), PipaError>;

    async fn update_customer_state(&self, phone: &str, state: &str) -> Result<(), PipaError>;

    // --- Order operations ---

    /// Most recently created order of a customer.
    async fn get_last_order(&self, customer_id: i64) -> Result<Option<Order>, PipaError>;

    async fn get_order(&self, id: i64) -> Result<Option<Order>, PipaError>;

    async fn create_order(&self, order: &NewOrder) -> Result<Order, PipaError>;

    /// Persisted orders are immutable except for their status.
    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<(), PipaError>;

    /// Orders in the given status, oldest first.
    async fn list_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, PipaError>;

    // --- Seal report operations ---

    async fn create_seal_report(&self, report: &NewSealReport) -> Result<SealReport, PipaError>;

    async fn get_last_seal_report(
        &self,
        customer_id: i64,
    ) -> Result<Option<SealReport>, PipaError>;

    async fn update_seal_report_photo(
        &self,
        id: i64,
        photo: PhotoStatus,
    ) -> Result<(), PipaError>;
}
