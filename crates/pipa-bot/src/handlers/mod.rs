// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One handler per conversation state.
//!
//! A handler has two entry points. [`StateHandler::on_enter`] asks the
//! question for its state. [`StateHandler::on_input`] validates the reply
//! and either re-prompts ([`Transition::Stay`]) or names the next state.
//! Handlers never persist the conversation state themselves; the dispatcher
//! does that after the next state's prompt went out.

mod checkout;
mod cylinder;
mod incidents;
mod onboarding;
mod tank;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pipa_core::{ChannelAdapter, Customer, OutboundMessage, PipaError, StorageAdapter};
use strum::IntoEnumIterator;

use crate::draft::{CylinderDraft, OrderDraft, TankDraft};
use crate::scheduler::NotificationScheduler;
use crate::session::SessionContext;
use crate::settings::BotSettings;
use crate::state::ConversationState;

pub(crate) use incidents::open_seal_report;

/// Shared collaborators of every turn.
pub struct BotDeps {
    pub storage: Arc<dyn StorageAdapter>,
    pub channel: Arc<dyn ChannelAdapter>,
    pub settings: BotSettings,
    pub scheduler: Arc<NotificationScheduler>,
}

/// Outcome of processing one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The reply was rejected and a re-prompt was sent.
    Stay,
    Enter(ConversationState),
}

/// Everything a handler may touch while processing one message.
pub struct Turn<'a> {
    pub deps: &'a BotDeps,
    pub customer: Customer,
    pub session: &'a mut SessionContext,
}

impl<'a> Turn<'a> {
    pub fn new(deps: &'a BotDeps, customer: Customer, session: &'a mut SessionContext) -> Self {
        Self {
            deps,
            customer,
            session,
        }
    }

    pub fn phone(&self) -> &str {
        &self.customer.phone
    }

    pub fn settings(&self) -> &BotSettings {
        &self.deps.settings
    }

    pub fn storage(&self) -> &dyn StorageAdapter {
        self.deps.storage.as_ref()
    }

    /// Send a reply to the customer of this turn.
    pub async fn say(&self, text: impl Into<String> + Send) -> Result<(), PipaError> {
        self.deps
            .channel
            .send(OutboundMessage::text(self.phone(), text))
            .await
            .map(|_| ())
    }

    pub fn draft(&mut self) -> Result<&mut OrderDraft, PipaError> {
        self.session.draft.as_mut().ok_or(PipaError::MissingDraft)
    }

    pub fn tank(&mut self) -> Result<&mut TankDraft, PipaError> {
        self.draft()?.tank_mut().ok_or(PipaError::MissingDraft)
    }

    pub fn cylinder(&mut self) -> Result<&mut CylinderDraft, PipaError> {
        self.draft()?.cylinder_mut().ok_or(PipaError::MissingDraft)
    }

    /// Where a finished side flow leaves the conversation. Customers who
    /// never gave their name are sent to registration.
    pub fn resting_state(&self) -> ConversationState {
        if self.customer.is_registered() {
            ConversationState::Initial
        } else {
            ConversationState::AwaitingName
        }
    }

    /// Persist the profile fields of the customer.
    pub async fn save_customer(&self) -> Result<(), PipaError> {
        self.deps.storage.update_customer(&self.customer).await
    }
}

#[async_trait]
pub trait StateHandler: Send + Sync {
    fn state(&self) -> ConversationState;

    /// Send the prompt of this state.
    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError>;

    /// Validate a reply received while in this state.
    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError>;
}

/// Table of handlers keyed by state.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<ConversationState, Box<dyn StateHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry covering every state.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        onboarding::register(&mut registry);
        tank::register(&mut registry);
        cylinder::register(&mut registry);
        checkout::register(&mut registry);
        incidents::register(&mut registry);
        registry
    }

    /// Add a handler, replacing any previous one for the same state.
    pub fn register(&mut self, handler: impl StateHandler + 'static) {
        self.handlers.insert(handler.state(), Box::new(handler));
    }

    pub fn get(&self, state: ConversationState) -> Result<&dyn StateHandler, PipaError> {
        self.handlers
            .get(&state)
            .map(|handler| &**handler)
            .ok_or_else(|| PipaError::Internal(format!("no handler registered for {state}")))
    }

    /// States without a handler.
    pub fn missing(&self) -> Vec<ConversationState> {
        ConversationState::iter()
            .filter(|state| !self.handlers.contains_key(state))
            .collect()
    }
}
