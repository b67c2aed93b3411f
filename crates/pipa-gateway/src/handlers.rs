// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook request handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use pipa_core::InboundMessage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::payload;
use crate::server::GatewayState;
use crate::signature::{self, SIGNATURE_HEADER};

/// Query of the subscription handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /webhook
///
/// Echoes the challenge when the verify token matches.
pub async fn verify_subscription(
    State(state): State<GatewayState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let token_matches = matches!(
        (state.verify_token.as_deref(), params.verify_token.as_deref()),
        (Some(expected), Some(given)) if expected == given
    );
    match (params.mode.as_deref(), params.challenge) {
        (Some("subscribe"), Some(challenge)) if token_matches => {
            info!("webhook subscription verified");
            (StatusCode::OK, challenge).into_response()
        }
        _ => {
            warn!("webhook verification rejected");
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

/// POST /webhook
///
/// Answers as soon as the body is accepted; each message is processed on a
/// tracked background task.
pub async fn receive_messages(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Some(secret) = state.app_secret.as_deref() {
        let header = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());
        if let Err(e) = signature::verify(secret, header, &body) {
            warn!(reason = ?e, "webhook signature rejected");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let messages = match payload::parse(&body) {
        Ok(messages) => messages,
        Err(e) => {
            warn!(error = %e, "malformed webhook body");
            return StatusCode::BAD_REQUEST;
        }
    };
    debug!(count = messages.len(), "webhook accepted");

    // One task per sender keeps each phone's messages in arrival order.
    for (phone, bodies) in by_sender(messages) {
        let bot = state.bot.clone();
        state.tasks.spawn(async move {
            for body in bodies {
                if let Err(e) = bot.handle(&phone, &body).await {
                    warn!(phone = %phone, error = %e, "inbound message failed");
                }
            }
        });
    }
    StatusCode::OK
}

/// Message bodies grouped by sender, in order of first appearance.
fn by_sender(messages: Vec<InboundMessage>) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for msg in messages {
        match groups.iter_mut().find(|(phone, _)| *phone == msg.from) {
            Some((_, bodies)) => bodies.push(msg.body),
            None => groups.push((msg.from, vec![msg.body])),
        }
    }
    groups
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_params_use_hub_names() {
        let params = params_from("hub.mode=subscribe&hub.verify_token=tok&hub.challenge=42");
        assert_eq!(params.mode.as_deref(), Some("subscribe"));
        assert_eq!(params.verify_token.as_deref(), Some("tok"));
        assert_eq!(params.challenge.as_deref(), Some("42"));
    }

    fn params_from(query: &str) -> VerifyParams {
        let uri: axum::http::Uri = format!("/webhook?{query}").parse().unwrap();
        Query::<VerifyParams>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn messages_are_grouped_by_sender_in_order() {
        let msg = |from: &str, body: &str| InboundMessage {
            from: from.into(),
            body: body.into(),
        };
        let groups = by_sender(vec![
            msg("521", "hola"),
            msg("522", "buenas"),
            msg("521", "Pérez López Juan"),
        ]);
        assert_eq!(
            groups,
            vec![
                ("521".to_string(), vec!["hola".to_string(), "Pérez López Juan".to_string()]),
                ("522".to_string(), vec!["buenas".to_string()]),
            ]
        );
    }

    #[test]
    fn health_serializes() {
        let json = serde_json::to_string(&HealthResponse { status: "ok" }).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }
}
