// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging gateway trait.

use async_trait::async_trait;

use crate::error::PipaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{MessageId, OutboundMessage};

/// Outbound delivery of text replies to a customer's phone.
///
/// Delivery is at-least-once from the caller's point of view: a returned
/// error means the provider did not accept the message, not that the
/// customer never saw it.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Sends a message and returns the provider's message id.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PipaError>;
}
