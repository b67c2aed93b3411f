// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for domain records used across test suites.

use pipa_core::types::{
    Category, Customer, NewCustomer, NewOrder, OrderStatus, PaymentMethod, ServiceVariant,
};

pub fn new_customer(phone: &str, state: &str) -> NewCustomer {
    NewCustomer {
        phone: phone.to_string(),
        conversation_state: state.to_string(),
    }
}

/// A registered standard customer sitting in `state`.
pub fn registered_customer(id: i64, phone: &str, state: &str) -> Customer {
    Customer {
        id,
        phone: phone.to_string(),
        given_name: "Juan".to_string(),
        paternal_surname: "Pérez".to_string(),
        maternal_surname: "López".to_string(),
        conversation_state: state.to_string(),
        door_color: None,
        facade_color: None,
        red_code: false,
        strikes: 0,
        blocked: false,
        category: Category::Standard,
        created_at: "2026-01-01T00:00:00.000Z".to_string(),
        updated_at: "2026-01-01T00:00:00.000Z".to_string(),
    }
}

/// A cash tank order quoted by volume.
pub fn tank_order(customer_id: i64, liters: f64, price: f64) -> NewOrder {
    NewOrder {
        customer_id,
        variant: ServiceVariant::TankByVolume,
        liters,
        amount: liters * price,
        unit_price: price,
        payment: PaymentMethod::Cash,
        address: "Calle X".to_string(),
        door_color: None,
        facade_color: None,
        red_code: false,
        cylinder_count: 0,
        tracking_codes: Vec::new(),
        window: None,
        status: OrderStatus::Pending,
    }
}

/// A card recharge order with one tracking code per cylinder.
pub fn recharge_order(customer_id: i64, codes: &[&str], price: f64) -> NewOrder {
    NewOrder {
        customer_id,
        variant: ServiceVariant::CylinderRecharge,
        liters: 0.0,
        amount: 0.0,
        unit_price: price,
        payment: PaymentMethod::Card,
        address: "Calle Y".to_string(),
        door_color: None,
        facade_color: None,
        red_code: false,
        cylinder_count: codes.len() as u32,
        tracking_codes: codes.iter().map(|c| c.to_string()).collect(),
        window: None,
        status: OrderStatus::PendingPickup,
    }
}
