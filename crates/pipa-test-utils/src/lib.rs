// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Pipa.
//!
//! Provides mock adapters for fast, deterministic tests without a database
//! or a messaging provider.
//!
//! # Components
//!
//! - [`MockChannel`] - captures outbound messages, can be switched to fail
//! - [`MockStorage`] - in-memory persistence gateway with failure injection

pub mod fixtures;
pub mod mock_channel;
pub mod mock_storage;

pub use mock_channel::MockChannel;
pub use mock_storage::MockStorage;
