// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware and shared state for the webhook.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};
use pipa_bot::StateDispatcher;
use pipa_config::model::{GatewayConfig, WhatsAppConfig};
use pipa_core::PipaError;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub bot: Arc<StateDispatcher>,
    /// Token expected during the subscription handshake. `None` rejects every handshake.
    pub verify_token: Option<String>,
    /// Key of `X-Hub-Signature-256`. `None` accepts unsigned bodies.
    pub app_secret: Option<String>,
    /// Background tasks processing accepted messages.
    pub tasks: TaskTracker,
}

impl GatewayState {
    pub fn new(bot: Arc<StateDispatcher>, whatsapp: &WhatsAppConfig) -> Self {
        Self {
            bot,
            verify_token: whatsapp.verify_token.clone(),
            app_secret: whatsapp.app_secret.clone(),
            tasks: TaskTracker::new(),
        }
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("verify_token", &self.verify_token.as_ref().map(|_| "[redacted]"))
            .field("app_secret", &self.app_secret.as_ref().map(|_| "[redacted]"))
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

/// Routes:
/// - GET /webhook (subscription handshake)
/// - POST /webhook (inbound messages)
/// - GET /health
pub fn router(state: GatewayState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(
            "/webhook",
            get(handlers::verify_subscription).post(handlers::receive_messages),
        )
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the webhook until `shutdown` is cancelled.
///
/// Returns once in-flight requests finished. Message tasks already spawned
/// keep running on `state.tasks`; the caller drains them.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), PipaError> {
    let app = router(state, config.max_body_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PipaError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("webhook server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| PipaError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("webhook server stopped");
    Ok(())
}
