// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio Programmable Messaging client for WhatsApp senders.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pipa_config::model::WhatsAppConfig;
use pipa_core::{AdapterType, ChannelAdapter, HealthStatus, MessageId, OutboundMessage, PipaError, PluginAdapter};

use crate::{http_client, request_failed, required};

const DEFAULT_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Serialize)]
struct SendForm<'a> {
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "Body")]
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

/// Twilio addresses WhatsApp numbers as `whatsapp:<number>`.
fn whatsapp_address(number: &str) -> String {
    if number.starts_with("whatsapp:") {
        number.to_string()
    } else {
        format!("whatsapp:{number}")
    }
}

pub struct TwilioChannel {
    client: reqwest::Client,
    endpoint: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl std::fmt::Debug for TwilioChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioChannel")
            .field("endpoint", &self.endpoint)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[redacted]")
            .field("from", &self.from)
            .finish()
    }
}

impl TwilioChannel {
    /// Requires `twilio_account_sid`, `twilio_auth_token` and `from_number`.
    pub fn new(config: &WhatsAppConfig) -> Result<Self, PipaError> {
        let account_sid = required(&config.twilio_account_sid, "twilio_account_sid")?;
        let auth_token = required(&config.twilio_auth_token, "twilio_auth_token")?;
        let from = required(&config.from_number, "from_number")?;
        let base = config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        Ok(Self {
            client: http_client()?,
            endpoint: format!("{base}/2010-04-01/Accounts/{account_sid}/Messages.json"),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from: whatsapp_address(from),
        })
    }
}

#[async_trait]
impl PluginAdapter for TwilioChannel {
    fn name(&self) -> &str {
        "twilio"
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
impl ChannelAdapter for TwilioChannel {
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PipaError> {
        let to = whatsapp_address(&msg.to);
        let form = serde_urlencoded::to_string(SendForm {
            from: &self.from,
            to: &to,
            body: &msg.body,
        })
        .map_err(|e| PipaError::Channel {
            message: format!("failed to encode twilio form: {e}"),
            source: Some(Box::new(e)),
        })?;

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form)
            .send()
            .await
            .map_err(|e| request_failed("twilio", e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| request_failed("twilio", e))?;
        if !status.is_success() {
            let detail = match serde_json::from_str::<ApiError>(&body) {
                Ok(err) => format!("{} (code {})", err.message, err.code.unwrap_or_default()),
                Err(_) => body,
            };
            warn!(to = %msg.to, status = %status, "twilio rejected message");
            return Err(PipaError::channel(format!("twilio API returned {status}: {detail}")));
        }

        let parsed: SendResponse = serde_json::from_str(&body).map_err(|e| PipaError::Channel {
            message: format!("unexpected twilio response: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(to = %msg.to, message_id = %parsed.sid, "message sent");
        Ok(MessageId(parsed.sid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn channel(base: &str) -> TwilioChannel {
        TwilioChannel::new(&WhatsAppConfig {
            provider: pipa_config::model::ProviderKind::Twilio,
            api_base: Some(base.to_string()),
            twilio_account_sid: Some("AC123".into()),
            twilio_auth_token: Some("secret".into()),
            from_number: Some("+14155238886".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn prefixes_whatsapp_once() {
        assert_eq!(whatsapp_address("+521"), "whatsapp:+521");
        assert_eq!(whatsapp_address("whatsapp:+521"), "whatsapp:+521");
    }

    #[tokio::test]
    async fn posts_form_with_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(header_exists("authorization"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string(
                "From=whatsapp%3A%2B14155238886&To=whatsapp%3A%2B5215550001&Body=hola+mundo",
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sid": "SM0001",
                "status": "queued"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = channel(&server.uri())
            .send(OutboundMessage::text("+5215550001", "hola mundo"))
            .await
            .unwrap();
        assert_eq!(id.0, "SM0001");
    }

    #[tokio::test]
    async fn rejected_send_reports_twilio_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": 63007,
                "message": "Twilio could not find a Channel with the specified From address",
                "status": 400
            })))
            .mount(&server)
            .await;

        let err = channel(&server.uri())
            .send(OutboundMessage::text("+521", "hola"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("63007"));
    }
}
