// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Pipa workspace.
//!
//! Enumerations are persisted as their `Display` strings, so the
//! `strum(serialize)` values below are part of the storage format and must
//! not change between releases.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Provider-assigned identifier of a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Storage,
}

// --- Messages ---

/// A text message received from a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender phone number as reported by the provider.
    pub from: String,
    pub body: String,
}

/// A text message addressed to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub to: String,
    pub body: String,
}

impl OutboundMessage {
    pub fn text(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            body: body.into(),
        }
    }
}

// --- Customers ---

/// Customer service tier. Premium customers pick a delivery window.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
pub enum Category {
    #[default]
    #[strum(serialize = "Estandar")]
    Standard,
    #[strum(serialize = "Premium")]
    Premium,
}

/// A phone-identified account with its persisted conversation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub phone: String,
    pub given_name: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    /// Opaque resumption token of the conversation state machine.
    pub conversation_state: String,
    pub door_color: Option<String>,
    pub facade_color: Option<String>,
    pub red_code: bool,
    pub strikes: u32,
    pub blocked: bool,
    pub category: Category,
    pub created_at: String,
    pub updated_at: String,
}

impl Customer {
    /// True once the customer has given their name.
    pub fn is_registered(&self) -> bool {
        !self.given_name.is_empty()
    }

    pub fn is_premium(&self) -> bool {
        self.category == Category::Premium
    }

    /// Name in "given paternal maternal" order, skipping empty parts.
    pub fn display_name(&self) -> String {
        [
            self.given_name.as_str(),
            self.paternal_surname.as_str(),
            self.maternal_surname.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Fields required to register a customer on first contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub phone: String,
    pub conversation_state: String,
}

// --- Orders ---

/// What is being delivered and how its quantity was expressed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
pub enum ServiceVariant {
    #[strum(serialize = "estacionario_litros")]
    TankByVolume,
    #[strum(serialize = "estacionario_dinero")]
    TankByMoney,
    #[strum(serialize = "estacionario_tabulador")]
    TankByPercentage,
    #[strum(serialize = "cilindro_recarga")]
    CylinderRecharge,
    #[strum(serialize = "cilindro_canje")]
    CylinderExchange,
}

impl ServiceVariant {
    pub fn is_tank(self) -> bool {
        matches!(
            self,
            Self::TankByVolume | Self::TankByMoney | Self::TankByPercentage
        )
    }

    /// Status a freshly confirmed order of this variant starts in.
    pub fn initial_status(self) -> OrderStatus {
        match self {
            Self::CylinderRecharge => OrderStatus::PendingPickup,
            _ => OrderStatus::Pending,
        }
    }

    /// Customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::TankByVolume => "Tanque estacionario (por litros)",
            Self::TankByMoney => "Tanque estacionario (por monto)",
            Self::TankByPercentage => "Tanque estacionario (por porcentaje)",
            Self::CylinderRecharge => "Recarga de cilindro",
            Self::CylinderExchange => "Canje de cilindro",
        }
    }
}

/// Lifecycle of a persisted order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
pub enum OrderStatus {
    #[strum(serialize = "pendiente")]
    Pending,
    #[strum(serialize = "pendiente_recoleccion")]
    PendingPickup,
    #[strum(serialize = "entregado")]
    Delivered,
    #[strum(serialize = "cancelado")]
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
pub enum PaymentMethod {
    #[strum(serialize = "efectivo")]
    Cash,
    #[strum(serialize = "tarjeta")]
    Card,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Card => "Tarjeta (terminal)",
        }
    }
}

/// Preferred delivery window, offered to premium customers only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
pub enum DeliveryWindow {
    #[strum(serialize = "Mañana")]
    Morning,
    #[strum(serialize = "Tarde")]
    Afternoon,
}

/// A persisted delivery request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub variant: ServiceVariant,
    pub liters: f64,
    pub amount: f64,
    pub unit_price: f64,
    pub payment: PaymentMethod,
    pub address: String,
    pub door_color: Option<String>,
    pub facade_color: Option<String>,
    pub red_code: bool,
    pub cylinder_count: u32,
    pub tracking_codes: Vec<String>,
    pub window: Option<DeliveryWindow>,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// A confirmed draft ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: i64,
    pub variant: ServiceVariant,
    pub liters: f64,
    pub amount: f64,
    pub unit_price: f64,
    pub payment: PaymentMethod,
    pub address: String,
    pub door_color: Option<String>,
    pub facade_color: Option<String>,
    pub red_code: bool,
    pub cylinder_count: u32,
    pub tracking_codes: Vec<String>,
    pub window: Option<DeliveryWindow>,
    pub status: OrderStatus,
}

// --- Seal reports ---

/// Whether the customer sent evidence for a seal report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
pub enum PhotoStatus {
    #[default]
    #[strum(serialize = "sin_foto")]
    NotRequested,
    #[strum(serialize = "solicitada")]
    Requested,
    #[strum(serialize = "recibida")]
    Received,
}

/// A customer-initiated tamper report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealReport {
    pub id: i64,
    pub customer_id: i64,
    pub order_id: Option<i64>,
    pub description: String,
    pub status: String,
    pub photo: PhotoStatus,
    pub reported_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSealReport {
    pub customer_id: i64,
    pub order_id: Option<i64>,
    pub description: String,
}

/// Status a newly created seal report starts in.
pub const SEAL_REPORT_OPEN: &str = "pendiente";
