// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A channel that only logs outbound messages. Used in development.

use async_trait::async_trait;
use tracing::info;

use pipa_core::{AdapterType, ChannelAdapter, HealthStatus, MessageId, OutboundMessage, PipaError, PluginAdapter};

#[derive(Debug, Default)]
pub struct LogChannel;

impl LogChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PluginAdapter for LogChannel {
    fn name(&self) -> &str {
        "log"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, PipaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PipaError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for LogChannel {
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PipaError> {
        let id = format!("log-{}", uuid::Uuid::new_v4());
        info!(to = %msg.to, message_id = %id, body = %msg.body, "outbound message");
        Ok(MessageId(id))
    }
}
