// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage adapter for state machine tests.
//!
//! Behaves like the SQLite adapter for lookups, updates and ordering, and
//! can be told to fail order writes or every call.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use pipa_core::traits::adapter::PluginAdapter;
use pipa_core::traits::storage::StorageAdapter;
use pipa_core::types::{
    AdapterType, Category, Customer, HealthStatus, NewCustomer, NewOrder, NewSealReport, Order,
    OrderStatus, PhotoStatus, SEAL_REPORT_OPEN, SealReport,
};
use pipa_core::PipaError;

const FIXED_TIMESTAMP: &str = "2026-01-01T00:00:00.000Z";

#[derive(Default)]
struct Tables {
    customers: Vec<Customer>,
    orders: Vec<Order>,
    seal_reports: Vec<SealReport>,
}

#[derive(Default)]
pub struct MockStorage {
    tables: Mutex<Tables>,
    fail_order_writes: AtomicBool,
    unavailable: AtomicBool,
}

fn injected(what: &str) -> PipaError {
    PipaError::storage(format!("injected failure: {what}"))
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_order` and `update_order_status` fail.
    pub fn set_fail_order_writes(&self, fail: bool) {
        self.fail_order_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every call fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self, what: &str) -> Result<(), PipaError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(injected(what));
        }
        Ok(())
    }

    fn check_order_write(&self, what: &str) -> Result<(), PipaError> {
        self.check(what)?;
        if self.fail_order_writes.load(Ordering::SeqCst) {
            return Err(injected(what));
        }
        Ok(())
    }

    /// Every stored order, in creation order.
    pub async fn orders(&self) -> Vec<Order> {
        self.tables.lock().await.orders.clone()
    }

    pub async fn seal_reports(&self) -> Vec<SealReport> {
        self.tables.lock().await.seal_reports.clone()
    }

    pub async fn customer(&self, phone: &str) -> Option<Customer> {
        self.tables
            .lock()
            .await
            .customers
            .iter()
            .find(|c| c.phone == phone)
            .cloned()
    }

    /// Insert or replace a customer directly, bypassing the trait.
    pub async fn put_customer(&self, customer: Customer) {
        let mut tables = self.tables.lock().await;
        tables.customers.retain(|c| c.phone != customer.phone);
        tables.customers.push(customer);
    }
}

#[async_trait]
impl PluginAdapter for MockStorage {
    fn name(&self) -> &str {
        "mock-storage"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PipaError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("unavailable".to_string()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PipaError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MockStorage {
    async fn initialize(&self) -> Result<(), PipaError> {
        self.check("initialize")
    }

    async fn close(&self) -> Result<(), PipaError> {
        Ok(())
    }

    async fn get_customer_by_phone(&self, phone: &str) -> Result<Option<Customer>, PipaError> {
        self.check("get_customer_by_phone")?;
        Ok(self.customer(phone).await)
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, PipaError> {
        self.check("create_customer")?;
        let mut tables = self.tables.lock().await;
        if tables.customers.iter().any(|c| c.phone == customer.phone) {
            return Err(PipaError::storage(format!(
                "UNIQUE constraint failed: customers.phone ({})",
                customer.phone
            )));
        }
        let created = Customer {
            id: tables.customers.len() as i64 + 1,
            phone: customer.phone.clone(),
            given_name: String::new(),
            paternal_surname: String::new(),
            maternal_surname: String::new(),
            conversation_state: customer.conversation_state.clone(),
            door_color: None,
            facade_color: None,
            red_code: false,
            strikes: 0,
            blocked: false,
            category: Category::Standard,
            created_at: FIXED_TIMESTAMP.to_string(),
            updated_at: FIXED_TIMESTAMP.to_string(),
        };
        tables.customers.push(created.clone());
        Ok(created)
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), PipaError> {
        self.check("update_customer")?;
        let mut tables = self.tables.lock().await;
        let stored = tables
            .customers
            .iter_mut()
            .find(|c| c.phone == customer.phone)
            .ok_or_else(|| PipaError::not_found("customer", &customer.phone))?;
        *stored = Customer {
            id: stored.id,
            created_at: stored.created_at.clone(),
            ..customer.clone()
        };
        Ok(())
    }

    async fn update_customer_state(&self, phone: &str, state: &str) -> Result<(), PipaError> {
        self.check("update_customer_state")?;
        let mut tables = self.tables.lock().await;
        let stored = tables
            .customers
            .iter_mut()
            .find(|c| c.phone == phone)
            .ok_or_else(|| PipaError::not_found("customer", phone))?;
        stored.conversation_state = state.to_string();
        Ok(())
    }

    async fn get_last_order(&self, customer_id: i64) -> Result<Option<Order>, PipaError> {
        self.check("get_last_order")?;
        Ok(self
            .tables
            .lock()
            .await
            .orders
            .iter()
            .rev()
            .find(|o| o.customer_id == customer_id)
            .cloned())
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, PipaError> {
        self.check("get_order")?;
        Ok(self
            .tables
            .lock()
            .await
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order, PipaError> {
        self.check_order_write("create_order")?;
        let mut tables = self.tables.lock().await;
        let created = Order {
            id: tables.orders.len() as i64 + 1,
            customer_id: order.customer_id,
            variant: order.variant,
            liters: order.liters,
            amount: order.amount,
            unit_price: order.unit_price,
            payment: order.payment,
            address: order.address.clone(),
            door_color: order.door_color.clone(),
            facade_color: order.facade_color.clone(),
            red_code: order.red_code,
            cylinder_count: order.cylinder_count,
            tracking_codes: order.tracking_codes.clone(),
            window: order.window,
            status: order.status,
            created_at: FIXED_TIMESTAMP.to_string(),
            updated_at: FIXED_TIMESTAMP.to_string(),
        };
        tables.orders.push(created.clone());
        Ok(created)
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<(), PipaError> {
        self.check_order_write("update_order_status")?;
        let mut tables = self.tables.lock().await;
        let stored = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| PipaError::not_found("order", id))?;
        stored.status = status;
        Ok(())
    }

    async fn list_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, PipaError> {
        self.check("list_orders_by_status")?;
        Ok(self
            .tables
            .lock()
            .await
            .orders
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect())
    }

    async fn create_seal_report(&self, report: &NewSealReport) -> Result<SealReport, PipaError> {
        self.check("create_seal_report")?;
        let mut tables = self.tables.lock().await;
        let created = SealReport {
            id: tables.seal_reports.len() as i64 + 1,
            customer_id: report.customer_id,
            order_id: report.order_id,
            description: report.description.clone(),
            status: SEAL_REPORT_OPEN.to_string(),
            photo: PhotoStatus::NotRequested,
            reported_at: FIXED_TIMESTAMP.to_string(),
        };
        tables.seal_reports.push(created.clone());
        Ok(created)
    }

    async fn get_last_seal_report(
        &self,
        customer_id: i64,
    ) -> Result<Option<SealReport>, PipaError> {
        self.check("get_last_seal_report")?;
        Ok(self
            .tables
            .lock()
            .await
            .seal_reports
            .iter()
            .rev()
            .find(|r| r.customer_id == customer_id)
            .cloned())
    }

    async fn update_seal_report_photo(
        &self,
        id: i64,
        photo: PhotoStatus,
    ) -> Result<(), PipaError> {
        self.check("update_seal_report_photo")?;
        let mut tables = self.tables.lock().await;
        let stored = tables
            .seal_reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| PipaError::not_found("seal report", id))?;
        stored.photo = photo;
        Ok(())
    }
}
