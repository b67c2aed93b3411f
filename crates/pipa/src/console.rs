// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A channel that prints replies to the terminal.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use colored::Colorize;
use pipa_core::{
    AdapterType, ChannelAdapter, HealthStatus, MessageId, OutboundMessage, PipaError, PluginAdapter,
};

#[derive(Debug, Default)]
pub struct ConsoleChannel {
    sent: AtomicU64,
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reply text as printed: a colored sender tag, then each line indented.
pub fn render(msg: &OutboundMessage) -> String {
    let mut out = format!(
        "{} {}\n",
        "pipa".cyan().bold(),
        format!("→ {}", msg.to).dimmed()
    );
    for line in msg.body.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[async_trait]
impl PluginAdapter for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
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
impl ChannelAdapter for ConsoleChannel {
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PipaError> {
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        println!("{}", render(&msg));
        Ok(MessageId(format!("console-{n}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_indents_every_line() {
        colored::control::set_override(false);
        let text = render(&OutboundMessage::text("521", "uno\ndos"));
        assert_eq!(text, "pipa → 521\n  uno\n  dos\n");
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let channel = ConsoleChannel::new();
        let a = channel.send(OutboundMessage::text("521", "a")).await.unwrap();
        let b = channel.send(OutboundMessage::text("521", "b")).await.unwrap();
        assert_eq!(a.0, "console-1");
        assert_eq!(b.0, "console-2");
    }
}
