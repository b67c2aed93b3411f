// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp webhook gateway.
//!
//! Receives provider notifications over HTTP, verifies them and hands each
//! text message to the [`StateDispatcher`](pipa_bot::StateDispatcher) on a
//! background task, so the provider gets its 200 without waiting for the
//! conversation turn.

pub mod handlers;
pub mod payload;
pub mod server;
pub mod signature;

pub use server::{GatewayState, router, start_server};
