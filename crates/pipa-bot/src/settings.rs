// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime knobs derived from [`PipaConfig`].

use std::time::Duration;

use pipa_config::model::PipaConfig;

use crate::input;
use crate::pricing::PriceList;

#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Normalized seal trigger phrase.
    pub seal_keyword: String,
    pub max_cylinders: u32,
    pub strike_limit: u32,
    pub pickup_notice_delay: Duration,
    pub message_deadline: Duration,
    pub prices: PriceList,
}

impl BotSettings {
    pub fn from_config(config: &PipaConfig) -> Self {
        let bot = &config.bot;
        Self {
            seal_keyword: input::normalize(&bot.seal_keyword),
            max_cylinders: bot.max_cylinders,
            strike_limit: bot.strike_limit,
            pickup_notice_delay: Duration::from_secs(bot.pickup_notice_delay_secs),
            message_deadline: Duration::from_secs(bot.message_deadline_secs),
            prices: PriceList::new(config.pricing.price_per_liter),
        }
    }

    /// True when `text` contains the seal trigger phrase.
    pub fn is_seal_trigger(&self, text: &str) -> bool {
        !self.seal_keyword.is_empty() && input::normalize(text).contains(&self.seal_keyword)
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self::from_config(&PipaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_trigger_ignores_case_and_accents() {
        let settings = BotSettings::default();
        assert!(settings.is_seal_trigger("reportar sello"));
        assert!(settings.is_seal_trigger("Quiero REPORTAR SELLO roto!"));
        assert!(!settings.is_seal_trigger("reportar"));
    }

    #[test]
    fn defaults_follow_config() {
        let settings = BotSettings::default();
        assert_eq!(settings.max_cylinders, 3);
        assert_eq!(settings.strike_limit, 3);
        assert_eq!(settings.pickup_notice_delay, Duration::from_secs(10));
        assert_eq!(settings.prices.price_per_liter(), 12.5);
    }
}
