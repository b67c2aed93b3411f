// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound webhook bodies.
//!
//! Two shapes are accepted: a flat `{"messages": [{"from", "body"}]}` list
//! and the Cloud API notification `entry[].changes[].value.messages[]`.
//! Status callbacks carry no messages and decode to an empty list.

use pipa_core::InboundMessage;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WebhookPayload {
    Flat { messages: Vec<InboundMessage> },
    Cloud { entry: Vec<Entry> },
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Change {
    value: ChangeValue,
}

#[derive(Debug, Deserialize)]
struct ChangeValue {
    #[serde(default)]
    messages: Vec<CloudMessage>,
}

#[derive(Debug, Deserialize)]
struct CloudMessage {
    from: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<CloudText>,
}

#[derive(Debug, Deserialize)]
struct CloudText {
    body: String,
}

impl From<CloudMessage> for InboundMessage {
    /// Non-text messages become a `[type]` placeholder.
    fn from(msg: CloudMessage) -> Self {
        let body = match (msg.text, msg.kind) {
            (Some(text), _) => text.body,
            (None, Some(kind)) => format!("[{kind}]"),
            (None, None) => String::new(),
        };
        InboundMessage {
            from: msg.from,
            body,
        }
    }
}

/// Decode every message carried by a webhook body.
pub fn parse(body: &[u8]) -> Result<Vec<InboundMessage>, serde_json::Error> {
    let payload: WebhookPayload = serde_json::from_slice(body)?;
    Ok(match payload {
        WebhookPayload::Flat { messages } => messages,
        WebhookPayload::Cloud { entry } => entry
            .into_iter()
            .flat_map(|e| e.changes)
            .flat_map(|c| c.value.messages)
            .map(InboundMessage::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_shape() {
        let msgs = parse(br#"{"messages":[{"from":"5215550001","body":"hola"}]}"#).unwrap();
        assert_eq!(
            msgs,
            vec![InboundMessage {
                from: "5215550001".into(),
                body: "hola".into()
            }]
        );
    }

    #[test]
    fn cloud_shape_with_text_and_media() {
        let body = serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "messages": [
                            {"from": "5215550001", "id": "wamid.1", "type": "text", "text": {"body": "1"}},
                            {"from": "5215550001", "id": "wamid.2", "type": "image", "image": {"id": "m"}}
                        ]
                    }
                }]
            }]
        });
        let msgs = parse(body.to_string().as_bytes()).unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].body, "1");
        assert_eq!(msgs[1].body, "[image]");
    }

    #[test]
    fn status_callback_has_no_messages() {
        let body = br#"{"entry":[{"changes":[{"value":{"statuses":[{"id":"wamid.1","status":"read"}]}}]}]}"#;
        assert!(parse(body).unwrap().is_empty());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse(b"not json").is_err());
        assert!(parse(br#"{"hello":"world"}"#).is_err());
    }
}
