// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence gateway for the Pipa ordering bot.
//!
//! WAL-mode SQLite with embedded refinery migrations, a single background
//! connection thread via `tokio-rusqlite`, and typed queries for customers,
//! orders and seal reports.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
