// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order queries.
//!
//! Orders are written once and afterwards only change status.

use pipa_core::{NewOrder, Order, OrderStatus, PipaError};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, params};

use crate::database::{Database, map_tr_err};
use crate::queries::{parse_column, parse_optional_column};

const COLUMNS: &str = "id, customer_id, variant, liters, amount, unit_price, payment, address,
    door_color, facade_color, red_code, cylinder_count, tracking_codes, delivery_window, status,
    created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    let codes: String = row.get(12)?;
    let tracking_codes = serde_json::from_str(&codes)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e)))?;
    Ok(Order {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        variant: parse_column(row, 2)?,
        liters: row.get(3)?,
        amount: row.get(4)?,
        unit_price: row.get(5)?,
        payment: parse_column(row, 6)?,
        address: row.get(7)?,
        door_color: row.get(8)?,
        facade_color: row.get(9)?,
        red_code: row.get(10)?,
        cylinder_count: row.get(11)?,
        tracking_codes,
        window: parse_optional_column(row, 13)?,
        status: parse_column(row, 14)?,
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
    })
}

/// Most recent order of a customer, by insertion order.
pub async fn get_last_order(db: &Database, customer_id: i64) -> Result<Option<Order>, PipaError> {
    db.connection()
        .call(move |conn| -> Result<Option<Order>, rusqlite::Error> {
            conn.query_row(
                &format!(
                    "SELECT {COLUMNS} FROM orders WHERE customer_id = ?1 ORDER BY id DESC LIMIT 1"
                ),
                params![customer_id],
                from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_order(db: &Database, id: i64) -> Result<Option<Order>, PipaError> {
    db.connection()
        .call(move |conn| -> Result<Option<Order>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM orders WHERE id = ?1"),
                params![id],
                from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a confirmed order and return the stored row.
pub async fn create_order(db: &Database, order: &NewOrder) -> Result<Order, PipaError> {
    let codes = serde_json::to_string(&order.tracking_codes).map_err(PipaError::storage)?;
    let order = order.clone();
    db.connection()
        .call(move |conn| -> Result<Order, rusqlite::Error> {
            conn.execute(
                "INSERT INTO orders (customer_id, variant, liters, amount, unit_price, payment,
                    address, door_color, facade_color, red_code, cylinder_count, tracking_codes,
                    delivery_window, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    order.customer_id,
                    order.variant.to_string(),
                    order.liters,
                    order.amount,
                    order.unit_price,
                    order.payment.to_string(),
                    order.address,
                    order.door_color,
                    order.facade_color,
                    order.red_code,
                    order.cylinder_count,
                    codes,
                    order.window.map(|w| w.to_string()),
                    order.status.to_string(),
                ],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM orders WHERE id = ?1"),
                params![id],
                from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}

pub async fn update_order_status(
    db: &Database,
    id: i64,
    status: OrderStatus,
) -> Result<(), PipaError> {
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE orders SET status = ?1,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![status.to_string(), id],
            )
        })
        .await
        .map_err(map_tr_err)?;

    if changed == 0 {
        return Err(PipaError::not_found("order", id));
    }
    Ok(())
}

/// Orders in `status`, oldest first.
pub async fn list_orders_by_status(
    db: &Database,
    status: OrderStatus,
) -> Result<Vec<Order>, PipaError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Order>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM orders WHERE status = ?1 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![status.to_string()], from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
