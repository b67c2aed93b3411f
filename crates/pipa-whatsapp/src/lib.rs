// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound WhatsApp messaging for the Pipa ordering bot.
//!
//! Each provider implements [`ChannelAdapter`]. [`build_channel`] picks one
//! from the `[whatsapp]` configuration section.

pub mod log;
pub mod meta;
pub mod twilio;

use std::sync::Arc;
use std::time::Duration;

use pipa_config::model::{ProviderKind, WhatsAppConfig};
use pipa_core::{ChannelAdapter, PipaError};

pub use log::LogChannel;
pub use meta::MetaCloudChannel;
pub use twilio::TwilioChannel;

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the messaging gateway named by `config.provider`.
pub fn build_channel(config: &WhatsAppConfig) -> Result<Arc<dyn ChannelAdapter>, PipaError> {
    let channel: Arc<dyn ChannelAdapter> = match config.provider {
        ProviderKind::Meta => Arc::new(MetaCloudChannel::new(config)?),
        ProviderKind::Twilio => Arc::new(TwilioChannel::new(config)?),
        ProviderKind::Log => Arc::new(LogChannel::new()),
    };
    tracing::info!(provider = channel.name(), "messaging channel ready");
    Ok(channel)
}

fn http_client() -> Result<reqwest::Client, PipaError> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| PipaError::Channel {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str, PipaError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PipaError::Config(format!("whatsapp.{key} is required for this provider"))),
    }
}

fn request_failed(provider: &str, e: reqwest::Error) -> PipaError {
    PipaError::Channel {
        message: format!("{provider} request failed: {e}"),
        source: Some(Box::new(e)),
    }
}
