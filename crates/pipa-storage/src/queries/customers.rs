// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer queries.

use pipa_core::{Customer, NewCustomer, PipaError};
use rusqlite::{OptionalExtension, Row, params};

use crate::database::{Database, map_tr_err};
use crate::queries::parse_column;

const COLUMNS: &str = "id, phone, given_name, paternal_surname, maternal_surname,
    conversation_state, door_color, facade_color, red_code, strikes, blocked, category,
    created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        phone: row.get(1)?,
        given_name: row.get(2)?,
        paternal_surname: row.get(3)?,
        maternal_surname: row.get(4)?,
        conversation_state: row.get(5)?,
        door_color: row.get(6)?,
        facade_color: row.get(7)?,
        red_code: row.get(8)?,
        strikes: row.get(9)?,
        blocked: row.get(10)?,
        category: parse_column(row, 11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub async fn get_customer_by_phone(
    db: &Database,
    phone: &str,
) -> Result<Option<Customer>, PipaError> {
    let phone = phone.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Customer>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM customers WHERE phone = ?1"),
                params![phone],
                from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a customer and return the stored row.
pub async fn create_customer(db: &Database, customer: &NewCustomer) -> Result<Customer, PipaError> {
    let customer = customer.clone();
    db.connection()
        .call(move |conn| -> Result<Customer, rusqlite::Error> {
            conn.execute(
                "INSERT INTO customers (phone, conversation_state) VALUES (?1, ?2)",
                params![customer.phone, customer.conversation_state],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM customers WHERE id = ?1"),
                params![id],
                from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite the mutable fields of the customer with `customer.phone`.
pub async fn update_customer(db: &Database, customer: &Customer) -> Result<(), PipaError> {
    let customer = customer.clone();
    let phone = customer.phone.clone();
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE customers SET
                    given_name = ?1, paternal_surname = ?2, maternal_surname = ?3,
                    conversation_state = ?4, door_color = ?5, facade_color = ?6,
                    red_code = ?7, strikes = ?8, blocked = ?9, category = ?10,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE phone = ?11",
                params![
                    customer.given_name,
                    customer.paternal_surname,
                    customer.maternal_surname,
                    customer.conversation_state,
                    customer.door_color,
                    customer.facade_color,
                    customer.red_code,
                    customer.strikes,
                    customer.blocked,
                    customer.category.to_string(),
                    customer.phone,
                ],
            )
        })
        .await
        .map_err(map_tr_err)?;

    if changed == 0 {
        return Err(PipaError::not_found("customer", phone));
    }
    Ok(())
}

pub async fn update_customer_state(db: &Database, phone: &str, state: &str) -> Result<(), PipaError> {
    let key = phone.to_string();
    let state = state.to_string();
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE customers SET conversation_state = ?1,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE phone = ?2",
                params![state, key],
            )
        })
        .await
        .map_err(map_tr_err)?;

    if changed == 0 {
        return Err(PipaError::not_found("customer", phone));
    }
    Ok(())
}
