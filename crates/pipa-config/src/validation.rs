// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Collects every violation instead of failing on the first one, so a
//! misconfigured deployment is fixed in one pass.

use crate::diagnostic::ConfigError;
use crate::model::{PipaConfig, ProviderKind};

/// Valid range for the per-message deadline, in seconds.
pub const MESSAGE_DEADLINE_RANGE: std::ops::RangeInclusive<u64> = 5..=30;

/// Valid range for the per-order cylinder bound.
pub const MAX_CYLINDERS_RANGE: std::ops::RangeInclusive<u32> = 1..=20;

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &PipaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let price = config.pricing.price_per_liter;
    if !price.is_finite() || price <= 0.0 {
        errors.push(ConfigError::validation(format!(
            "pricing.price_per_liter must be a positive number, got {price}"
        )));
    }

    if config.bot.seal_keyword.trim().is_empty() {
        errors.push(ConfigError::validation("bot.seal_keyword must not be empty"));
    }

    if !MAX_CYLINDERS_RANGE.contains(&config.bot.max_cylinders) {
        errors.push(ConfigError::validation(format!(
            "bot.max_cylinders must be between {} and {}, got {}",
            MAX_CYLINDERS_RANGE.start(),
            MAX_CYLINDERS_RANGE.end(),
            config.bot.max_cylinders
        )));
    }

    if config.bot.strike_limit == 0 {
        errors.push(ConfigError::validation("bot.strike_limit must be at least 1"));
    }

    if !MESSAGE_DEADLINE_RANGE.contains(&config.bot.message_deadline_secs) {
        errors.push(ConfigError::validation(format!(
            "bot.message_deadline_secs must be between {} and {}, got {}",
            MESSAGE_DEADLINE_RANGE.start(),
            MESSAGE_DEADLINE_RANGE.end(),
            config.bot.message_deadline_secs
        )));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation("storage.database_path must not be empty"));
    }

    let host = config.gateway.host.trim();
    let host_ok = host.parse::<std::net::IpAddr>().is_ok()
        || (!host.is_empty()
            && host
                .chars()
                .all(|c| c.is_alphanumeric() || c == '.' || c == '-'));
    if !host_ok {
        errors.push(ConfigError::validation(format!(
            "gateway.host `{host}` is not a valid IP address or hostname"
        )));
    }

    if config.gateway.max_body_bytes < 1024 {
        errors.push(ConfigError::validation(format!(
            "gateway.max_body_bytes must be at least 1024, got {}",
            config.gateway.max_body_bytes
        )));
    }

    let wa = &config.whatsapp;
    let required: &[(&str, &Option<String>)] = match wa.provider {
        ProviderKind::Meta => &[
            ("whatsapp.phone_number_id", &wa.phone_number_id),
            ("whatsapp.access_token", &wa.access_token),
        ],
        ProviderKind::Twilio => &[
            ("whatsapp.twilio_account_sid", &wa.twilio_account_sid),
            ("whatsapp.twilio_auth_token", &wa.twilio_auth_token),
            ("whatsapp.from_number", &wa.from_number),
        ],
        ProviderKind::Log => &[],
    };
    for (key, value) in required {
        if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
            errors.push(ConfigError::validation(format!(
                "{key} is required for the {:?} provider",
                wa.provider
            )));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&PipaConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = PipaConfig::default();
        config.pricing.price_per_liter = 0.0;
        config.bot.max_cylinders = 0;
        config.bot.message_deadline_secs = 60;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_nan_price() {
        let mut config = PipaConfig::default();
        config.pricing.price_per_liter = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn meta_provider_requires_credentials() {
        let mut config = PipaConfig::default();
        config.whatsapp.provider = ProviderKind::Meta;
        config.whatsapp.phone_number_id = Some("1234".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("whatsapp.access_token"));
    }
}
