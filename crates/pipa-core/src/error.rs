// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by the Pipa crates.

use thiserror::Error;

/// The primary error type used across adapter traits and the conversation core.
///
/// User-correctable input problems are not errors: handlers answer them with a
/// re-prompt. Everything here aborts the current transition.
#[derive(Debug, Error)]
pub enum PipaError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, row decoding).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A keyed record that an update targets does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A persisted conversation state that no handler recognizes.
    #[error("unknown conversation state: {state:?}")]
    UnknownState { state: String },

    /// The session no longer holds the order draft the current state needs.
    #[error("no order draft in session")]
    MissingDraft,

    /// Messaging channel errors (HTTP failure, provider rejection).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipaError {
    /// Shorthand for a storage error wrapping any error type.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage {
            source: source.into(),
        }
    }

    /// Shorthand for a channel error without an underlying cause.
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Returns true for failures of the persistence gateway.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::NotFound { .. })
    }
}
