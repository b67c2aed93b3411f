// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp Business Cloud API client.
//!
//! Sends text messages with `POST {api_base}/{phone_number_id}/messages`
//! authenticated by a bearer access token.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pipa_config::model::WhatsAppConfig;
use pipa_core::{AdapterType, ChannelAdapter, HealthStatus, MessageId, OutboundMessage, PipaError, PluginAdapter};

use crate::{http_client, request_failed, required};

const DEFAULT_API_BASE: &str = "https://graph.facebook.com/v15.0";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

pub struct MetaCloudChannel {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl std::fmt::Debug for MetaCloudChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaCloudChannel")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"[redacted]")
            .finish()
    }
}

impl MetaCloudChannel {
    /// Requires `phone_number_id` and `access_token`.
    pub fn new(config: &WhatsAppConfig) -> Result<Self, PipaError> {
        let phone_number_id = required(&config.phone_number_id, "phone_number_id")?;
        let access_token = required(&config.access_token, "access_token")?;
        let base = config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        Ok(Self {
            client: http_client()?,
            endpoint: format!("{base}/{phone_number_id}/messages"),
            access_token: access_token.to_string(),
        })
    }
}

#[async_trait]
impl PluginAdapter for MetaCloudChannel {
    fn name(&self) -> &str {
        "meta"
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
impl ChannelAdapter for MetaCloudChannel {
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PipaError> {
        let request = SendRequest {
            messaging_product: "whatsapp",
            to: msg.to.trim_start_matches('+'),
            kind: "text",
            text: TextBody { body: &msg.body },
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| request_failed("meta", e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| request_failed("meta", e))?;
        if !status.is_success() {
            let detail = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => format!(
                    "{} (code {})",
                    envelope.error.message,
                    envelope.error.code.unwrap_or_default()
                ),
                Err(_) => body,
            };
            warn!(to = %msg.to, status = %status, "meta rejected message");
            return Err(PipaError::channel(format!("meta API returned {status}: {detail}")));
        }

        let parsed: SendResponse = serde_json::from_str(&body).map_err(|e| PipaError::Channel {
            message: format!("unexpected meta response: {e}"),
            source: Some(Box::new(e)),
        })?;
        let id = parsed
            .messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .ok_or_else(|| PipaError::channel("meta response carried no message id"))?;
        debug!(to = %msg.to, message_id = %id, "message sent");
        Ok(MessageId(id))
    }
}
