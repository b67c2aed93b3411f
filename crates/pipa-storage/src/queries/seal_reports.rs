// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seal report queries.

use pipa_core::{NewSealReport, PhotoStatus, PipaError, SealReport};
use rusqlite::{OptionalExtension, Row, params};

use crate::database::{Database, map_tr_err};
use crate::queries::parse_column;

const COLUMNS: &str =
    "id, customer_id, order_id, description, status, photo_status, reported_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<SealReport> {
    Ok(SealReport {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        order_id: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        photo: parse_column(row, 5)?,
        reported_at: row.get(6)?,
    })
}

pub async fn create_seal_report(
    db: &Database,
    report: &NewSealReport,
) -> Result<SealReport, PipaError> {
    let report = report.clone();
    db.connection()
        .call(move |conn| -> Result<SealReport, rusqlite::Error> {
            conn.execute(
                "INSERT INTO seal_reports (customer_id, order_id, description, status, photo_status)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    report.customer_id,
                    report.order_id,
                    report.description,
                    pipa_core::types::SEAL_REPORT_OPEN,
                    PhotoStatus::NotRequested.to_string(),
                ],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM seal_reports WHERE id = ?1"),
                params![id],
                from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_last_seal_report(
    db: &Database,
    customer_id: i64,
) -> Result<Option<SealReport>, PipaError> {
    db.connection()
        .call(move |conn| -> Result<Option<SealReport>, rusqlite::Error> {
            conn.query_row(
                &format!(
                    "SELECT {COLUMNS} FROM seal_reports
                     WHERE customer_id = ?1 ORDER BY id DESC LIMIT 1"
                ),
                params![customer_id],
                from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn update_seal_report_photo(
    db: &Database,
    id: i64,
    photo: PhotoStatus,
) -> Result<(), PipaError> {
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE seal_reports SET photo_status = ?1 WHERE id = ?2",
                params![photo.to_string(), id],
            )
        })
        .await
        .map_err(map_tr_err)?;

    if changed == 0 {
        return Err(PipaError::not_found("seal report", id));
    }
    Ok(())
}
