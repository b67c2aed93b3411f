// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use pipa_bot::{BotSettings, StateDispatcher, replies};
use pipa_config::model::WhatsAppConfig;
use pipa_gateway::signature;
use pipa_gateway::{GatewayState, router};
use pipa_test_utils::{MockChannel, MockStorage};
use tower::ServiceExt;

const LIMIT: usize = 64 * 1024;

struct Fixture {
    channel: Arc<MockChannel>,
    storage: Arc<MockStorage>,
    state: GatewayState,
}

fn fixture(app_secret: Option<&str>) -> Fixture {
    let storage = Arc::new(MockStorage::new());
    let channel = Arc::new(MockChannel::new());
    let bot = StateDispatcher::new(storage.clone(), channel.clone(), BotSettings::default()).unwrap();
    let config = WhatsAppConfig {
        verify_token: Some("verify-me".into()),
        app_secret: app_secret.map(str::to_string),
        ..Default::default()
    };
    Fixture {
        channel,
        storage,
        state: GatewayState::new(Arc::new(bot), &config),
    }
}

impl Fixture {
    async fn drain(&self) {
        self.state.tasks.close();
        self.state.tasks.wait().await;
        self.state.tasks.reopen();
    }
}

fn post(body: &str, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::post("/webhook").header("content-type", "application/json");
    if let Some(sig) = signature {
        builder = builder.header("X-Hub-Signature-256", sig);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let f = fixture(None);
    let response = router(f.state.clone(), LIMIT)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], br#"{"status":"ok"}"#);
}

#[tokio::test]
async fn handshake_echoes_challenge() {
    let f = fixture(None);
    let response = router(f.state.clone(), LIMIT)
        .oneshot(
            Request::get("/webhook?hub.mode=subscribe&hub.verify_token=verify-me&hub.challenge=1158201444")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"1158201444");
}

#[tokio::test]
async fn handshake_with_wrong_token_is_forbidden() {
    let f = fixture(None);
    for uri in [
        "/webhook?hub.mode=subscribe&hub.verify_token=nope&hub.challenge=1",
        "/webhook?hub.mode=unsubscribe&hub.verify_token=verify-me&hub.challenge=1",
        "/webhook",
    ] {
        let response = router(f.state.clone(), LIMIT)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn flat_message_is_dispatched() {
    let f = fixture(None);
    let response = router(f.state.clone(), LIMIT)
        .oneshot(post(r#"{"messages":[{"from":"5215550001","body":"hola"}]}"#, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    f.drain().await;
    assert_eq!(
        f.channel.sent_to("5215550001").await,
        vec![replies::REGISTRATION.to_string()]
    );
    assert!(f.storage.customer("5215550001").await.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn batched_messages_from_one_phone_keep_their_order() {
    let body = r#"{"messages":[
        {"from":"5215550001","body":"hola"},
        {"from":"5215550002","body":"hola"},
        {"from":"5215550001","body":"Pérez López Juan"},
        {"from":"5215550002","body":"Gómez Ruiz Ana"}
    ]}"#;
    for _ in 0..50 {
        let f = fixture(None);
        let response = router(f.state.clone(), LIMIT)
            .oneshot(post(body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        f.drain().await;
        for phone in ["5215550001", "5215550002"] {
            let customer = f.storage.customer(phone).await.unwrap();
            assert_eq!(customer.conversation_state, "ESPERANDO_TIPO_SERVICIO", "{phone}");
            assert!(customer.is_registered());
        }
    }
}

#[tokio::test]
async fn signed_cloud_notification_is_dispatched() {
    let f = fixture(Some("app-secret"));
    let body = serde_json::json!({
        "object": "whatsapp_business_account",
        "entry": [{"changes": [{"value": {"messages": [
            {"from": "5215550009", "type": "text", "text": {"body": "reportar sello"}}
        ]}}]}]
    })
    .to_string();
    let sig = signature::sign("app-secret", body.as_bytes()).unwrap();

    let response = router(f.state.clone(), LIMIT)
        .oneshot(post(&body, Some(sig)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    f.drain().await;
    assert_eq!(f.storage.seal_reports().await.len(), 1);
}

#[tokio::test]
async fn bad_or_missing_signature_is_unauthorized() {
    let f = fixture(Some("app-secret"));
    let body = r#"{"messages":[{"from":"5215550001","body":"hola"}]}"#;
    let wrong = signature::sign("other-secret", body.as_bytes()).unwrap();

    for sig in [None, Some(wrong)] {
        let response = router(f.state.clone(), LIMIT)
            .oneshot(post(body, sig))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    f.drain().await;
    assert_eq!(f.channel.sent_count().await, 0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let f = fixture(None);
    let response = router(f.state.clone(), LIMIT)
        .oneshot(post("{not json", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let f = fixture(None);
    let big = format!(r#"{{"messages":[{{"from":"1","body":"{}"}}]}}"#, "x".repeat(2048));
    let response = router(f.state.clone(), 1024)
        .oneshot(post(&big, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
