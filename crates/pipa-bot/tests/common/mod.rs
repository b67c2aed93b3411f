// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared harness: a dispatcher wired to in-memory mocks.

#![allow(dead_code)]

use std::sync::Arc;

use pipa_bot::{BotSettings, StateDispatcher};
use pipa_core::{Customer, PipaError};
use pipa_test_utils::{MockChannel, MockStorage};

pub struct Harness {
    pub storage: Arc<MockStorage>,
    pub channel: Arc<MockChannel>,
    pub bot: StateDispatcher,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(BotSettings::default())
    }

    pub fn with_settings(settings: BotSettings) -> Self {
        let storage = Arc::new(MockStorage::new());
        let channel = Arc::new(MockChannel::new());
        let bot = StateDispatcher::new(storage.clone(), channel.clone(), settings)
            .expect("standard registry is complete");
        Self {
            storage,
            channel,
            bot,
        }
    }

    pub async fn send(&self, phone: &str, text: &str) -> Result<(), PipaError> {
        self.bot.handle(phone, text).await
    }

    /// Send a sequence of messages that must all succeed.
    pub async fn script(&self, phone: &str, lines: &[&str]) {
        for line in lines {
            self.send(phone, line)
                .await
                .unwrap_or_else(|e| panic!("message {line:?} failed: {e}"));
        }
    }

    pub async fn customer(&self, phone: &str) -> Customer {
        self.storage
            .customer(phone)
            .await
            .unwrap_or_else(|| panic!("no customer {phone}"))
    }

    pub async fn state(&self, phone: &str) -> String {
        self.customer(phone).await.conversation_state
    }

    pub async fn last_reply(&self, phone: &str) -> String {
        self.channel.last_to(phone).await.unwrap_or_default()
    }

    pub async fn replies(&self, phone: &str) -> Vec<String> {
        self.channel.sent_to(phone).await
    }

    /// Register `phone` as "Pérez López Juan"; leaves it at the service type question.
    pub async fn register(&self, phone: &str) {
        self.script(phone, &["hola", "Pérez López Juan"]).await;
    }

    pub async fn has_draft(&self, phone: &str) -> bool {
        self.bot.sessions().session(phone).lock().await.draft.is_some()
    }
}
