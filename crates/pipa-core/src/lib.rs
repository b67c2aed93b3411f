// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pipa ordering bot.
//!
//! This crate provides the error taxonomy, the domain types (customers,
//! orders, seal reports) and the adapter traits that the conversation core
//! consumes. Storage and messaging implementations live in their own crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PipaError;
pub use types::{
    AdapterType, Category, Customer, DeliveryWindow, HealthStatus, InboundMessage, MessageId,
    NewCustomer, NewOrder, NewSealReport, Order, OrderStatus, OutboundMessage, PaymentMethod,
    PhotoStatus, SealReport, ServiceVariant,
};

pub use traits::{ChannelAdapter, PluginAdapter, StorageAdapter};
