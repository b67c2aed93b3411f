// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level Pipa configuration.
///
/// Every section is optional and defaults to values suitable for local
/// development with the log-only messaging provider.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipaConfig {
    /// Conversation behavior.
    #[serde(default)]
    pub bot: BotConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Messaging provider credentials.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Webhook HTTP server.
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Conversation state machine settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Phrase that opens a seal report from any state (case-insensitive).
    #[serde(default = "default_seal_keyword")]
    pub seal_keyword: String,

    /// Upper bound for cylinders in one order.
    #[serde(default = "default_max_cylinders")]
    pub max_cylinders: u32,

    /// Strikes after which a customer is blocked.
    #[serde(default = "default_strike_limit")]
    pub strike_limit: u32,

    /// Delay before the "cylinder picked up" notice of a recharge order.
    #[serde(default = "default_pickup_notice_delay_secs")]
    pub pickup_notice_delay_secs: u64,

    /// Deadline for processing a single inbound message.
    #[serde(default = "default_message_deadline_secs")]
    pub message_deadline_secs: u64,

    /// How often idle sessions are pruned from memory. 0 disables pruning.
    #[serde(default = "default_session_idle_prune_secs")]
    pub session_idle_prune_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            seal_keyword: default_seal_keyword(),
            max_cylinders: default_max_cylinders(),
            strike_limit: default_strike_limit(),
            pickup_notice_delay_secs: default_pickup_notice_delay_secs(),
            message_deadline_secs: default_message_deadline_secs(),
            session_idle_prune_secs: default_session_idle_prune_secs(),
        }
    }
}

fn default_seal_keyword() -> String {
    "REPORTAR SELLO".to_string()
}

fn default_max_cylinders() -> u32 {
    3
}

fn default_strike_limit() -> u32 {
    3
}

fn default_pickup_notice_delay_secs() -> u64 {
    10
}

fn default_message_deadline_secs() -> u64 {
    30
}

fn default_session_idle_prune_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Price of one liter of gas, applied to every tank quote.
    #[serde(default = "default_price_per_liter")]
    pub price_per_liter: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_liter: default_price_per_liter(),
        }
    }
}

fn default_price_per_liter() -> f64 {
    12.50
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("pipa").join("pipa.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("pipa.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Which messaging API delivers replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// WhatsApp Business Cloud API.
    Meta,
    /// Twilio WhatsApp sandbox or sender.
    Twilio,
    /// Log replies instead of sending them.
    #[default]
    Log,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Overrides the provider's API base URL.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Meta Cloud API sender phone number id.
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Meta Cloud API access token.
    #[serde(default)]
    pub access_token: Option<String>,

    /// App secret used to verify `X-Hub-Signature-256`. `None` skips verification.
    #[serde(default)]
    pub app_secret: Option<String>,

    /// Token echoed back during webhook subscription.
    #[serde(default)]
    pub verify_token: Option<String>,

    #[serde(default)]
    pub twilio_account_sid: Option<String>,

    #[serde(default)]
    pub twilio_auth_token: Option<String>,

    /// Sender number for Twilio, without the `whatsapp:` prefix.
    #[serde(default)]
    pub from_number: Option<String>,
}

/// Webhook HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_host")]
    pub host: String,

    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Largest accepted webhook body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
