// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-phone conversation context and its registry.
//!
//! Each phone owns one [`SessionContext`] behind an async mutex. Holding the
//! lock for a whole turn serializes messages from the same phone while
//! unrelated phones proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::draft::OrderDraft;

/// In-memory state carried between turns of one conversation.
#[derive(Debug, Default)]
pub struct SessionContext {
    pub phone: String,
    /// Order being assembled, if any.
    pub draft: Option<OrderDraft>,
    /// Order awaiting the customer's delivery confirmation.
    pub tracked_order: Option<i64>,
    /// Order already stored from the current draft, kept until the
    /// confirmation reply is delivered.
    pub confirmed_order: Option<i64>,
}

impl SessionContext {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Nothing worth keeping in memory.
    pub fn is_idle(&self) -> bool {
        self.draft.is_none() && self.tracked_order.is_none() && self.confirmed_order.is_none()
    }

    /// Drop the draft and anything derived from it.
    pub fn discard_draft(&mut self) {
        self.draft = None;
        self.confirmed_order = None;
    }
}

/// Registry of live sessions keyed by phone.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Mutex<SessionContext>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session for `phone`, created on first use.
    pub fn session(&self, phone: &str) -> Arc<Mutex<SessionContext>> {
        if let Some(existing) = self.sessions.get(phone) {
            return Arc::clone(existing.value());
        }
        Arc::clone(
            self.sessions
                .entry(phone.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(SessionContext::new(phone))))
                .value(),
        )
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Remove sessions that are idle, unlocked and not referenced elsewhere.
    ///
    /// Returns how many sessions were dropped.
    pub fn prune_idle(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| {
            if Arc::strong_count(session) > 1 {
                return true;
            }
            match session.try_lock() {
                Ok(ctx) => !ctx.is_idle(),
                Err(_) => true,
            }
        });
        let pruned = before.saturating_sub(self.sessions.len());
        if pruned > 0 {
            debug!(pruned, remaining = self.sessions.len(), "pruned idle sessions");
        }
        pruned
    }
}
