// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes inbound messages to state handlers and runs operator actions.
//!
//! Every turn and every operator action for a phone runs under that phone's
//! session lock. A turn is:
//!
//! 1. seal keyword interrupt, from any state;
//! 2. blocked customers get a fixed rejection;
//! 3. unknown phones are registered;
//! 4. the handler of the persisted state processes the reply, and the next
//!    state is persisted only after its prompt was delivered.

use std::sync::Arc;

use pipa_core::{
    Category, ChannelAdapter, Customer, NewCustomer, Order, OrderStatus, OutboundMessage,
    PipaError, StorageAdapter,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::handlers::{self, BotDeps, HandlerRegistry, Transition, Turn};
use crate::replies;
use crate::scheduler::NotificationScheduler;
use crate::session::{SessionContext, SessionRegistry};
use crate::settings::BotSettings;
use crate::state::ConversationState;

/// Result of [`StateDispatcher::assign_strike`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeOutcome {
    pub strikes: u32,
    pub blocked: bool,
}

pub struct StateDispatcher {
    deps: BotDeps,
    registry: HandlerRegistry,
    sessions: SessionRegistry,
}

impl StateDispatcher {
    /// A dispatcher with the standard handler table.
    pub fn new(
        storage: Arc<dyn StorageAdapter>,
        channel: Arc<dyn ChannelAdapter>,
        settings: BotSettings,
    ) -> Result<Self, PipaError> {
        let scheduler = Arc::new(NotificationScheduler::new(Arc::clone(&channel)));
        let deps = BotDeps {
            storage,
            channel,
            settings,
            scheduler,
        };
        Self::with_registry(deps, HandlerRegistry::standard())
    }

    /// Fails when any conversation state lacks a handler.
    pub fn with_registry(deps: BotDeps, registry: HandlerRegistry) -> Result<Self, PipaError> {
        let missing = registry.missing();
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            return Err(PipaError::Internal(format!(
                "no handler registered for: {}",
                names.join(", ")
            )));
        }
        Ok(Self {
            deps,
            registry,
            sessions: SessionRegistry::new(),
        })
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn scheduler(&self) -> &Arc<NotificationScheduler> {
        &self.deps.scheduler
    }

    pub fn settings(&self) -> &BotSettings {
        &self.deps.settings
    }

    /// Process one inbound message within the configured deadline.
    pub async fn handle(&self, phone: &str, text: &str) -> Result<(), PipaError> {
        let deadline = self.deps.settings.message_deadline;
        match tokio::time::timeout(deadline, self.handle_locked(phone, text)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(phone, deadline_secs = deadline.as_secs(), "message processing deadline exceeded");
                Err(PipaError::Timeout { duration: deadline })
            }
        }
    }

    async fn handle_locked(&self, phone: &str, text: &str) -> Result<(), PipaError> {
        let session = self.session(phone);
        let mut ctx = session.lock().await;
        self.process(phone, text, &mut ctx).await
    }

    fn session(&self, phone: &str) -> Arc<Mutex<SessionContext>> {
        self.sessions.session(phone)
    }

    async fn process(
        &self,
        phone: &str,
        text: &str,
        ctx: &mut SessionContext,
    ) -> Result<(), PipaError> {
        let storage = &self.deps.storage;
        let seal = self.deps.settings.is_seal_trigger(text);

        let customer = match storage.get_customer_by_phone(phone).await {
            Ok(Some(customer)) => customer,
            Ok(None) if seal => {
                storage
                    .create_customer(&NewCustomer {
                        phone: phone.to_string(),
                        conversation_state: ConversationState::Initial.to_string(),
                    })
                    .await?
            }
            Ok(None) => return self.register(phone).await,
            Err(e) => {
                error!(phone, error = %e, "customer lookup failed");
                self.notify(phone, replies::GENERIC_FAILURE).await;
                return Err(e);
            }
        };

        let mut turn = Turn::new(&self.deps, customer, ctx);

        if seal {
            let result = self.seal_interrupt(&mut turn, text).await;
            return self.settle(&mut turn, result).await;
        }

        if turn.customer.blocked {
            info!(phone, "message from blocked customer rejected");
            self.notify(phone, replies::BLOCKED).await;
            return Ok(());
        }

        let Some(state) = ConversationState::from_id(&turn.customer.conversation_state) else {
            let unknown = turn.customer.conversation_state.clone();
            error!(phone, state = %unknown, "unknown conversation state, resetting to initial");
            let initial = ConversationState::Initial.to_string();
            if let Err(e) = storage.update_customer_state(phone, &initial).await {
                error!(phone, error = %e, "failed to reset conversation state");
            }
            turn.session.discard_draft();
            self.notify(phone, replies::GENERIC_FAILURE).await;
            return Err(PipaError::UnknownState { state: unknown });
        };

        let result = self.step(&mut turn, state, text).await;
        self.settle(&mut turn, result).await
    }

    /// First contact: ask for the name and store the customer.
    async fn register(&self, phone: &str) -> Result<(), PipaError> {
        self.deps
            .channel
            .send(OutboundMessage::text(phone, replies::REGISTRATION))
            .await?;
        self.deps
            .storage
            .create_customer(&NewCustomer {
                phone: phone.to_string(),
                conversation_state: ConversationState::AwaitingName.to_string(),
            })
            .await?;
        info!(phone, "new customer awaiting registration");
        Ok(())
    }

    async fn seal_interrupt(&self, turn: &mut Turn<'_>, text: &str) -> Result<(), PipaError> {
        turn.session.discard_draft();
        self.deps.scheduler.cancel(turn.phone());
        handlers::open_seal_report(turn, text).await?;
        self.enter(turn, ConversationState::AwaitingSealPhoto).await
    }

    async fn step(
        &self,
        turn: &mut Turn<'_>,
        state: ConversationState,
        text: &str,
    ) -> Result<(), PipaError> {
        let handler = self.registry.get(state)?;
        debug!(phone = turn.phone(), state = %state, "handling reply");
        match handler.on_input(turn, text).await? {
            Transition::Stay => {
                debug!(phone = turn.phone(), state = %state, "reply rejected, state unchanged");
                Ok(())
            }
            Transition::Enter(next) => self.enter(turn, next).await,
        }
    }

    /// Prompt for `next`, then persist it.
    async fn enter(&self, turn: &mut Turn<'_>, next: ConversationState) -> Result<(), PipaError> {
        self.registry.get(next)?.on_enter(turn).await?;
        let id = next.to_string();
        self.deps
            .storage
            .update_customer_state(turn.phone(), &id)
            .await?;
        debug!(
            phone = turn.phone(),
            from = %turn.customer.conversation_state,
            to = %id,
            "transition"
        );
        turn.customer.conversation_state = id;
        Ok(())
    }

    /// Report a failed turn to the customer.
    async fn settle(
        &self,
        turn: &mut Turn<'_>,
        result: Result<(), PipaError>,
    ) -> Result<(), PipaError> {
        match result {
            Ok(()) => Ok(()),
            Err(PipaError::MissingDraft) => {
                warn!(
                    phone = turn.phone(),
                    state = %turn.customer.conversation_state,
                    "order draft lost, restarting from the option menu"
                );
                turn.session.discard_draft();
                turn.say(replies::DRAFT_EXPIRED).await?;
                self.enter(turn, ConversationState::AwaitingOption).await
            }
            Err(e) => {
                error!(
                    phone = turn.phone(),
                    state = %turn.customer.conversation_state,
                    error = %e,
                    "turn failed"
                );
                self.notify(turn.phone(), replies::GENERIC_FAILURE).await;
                Err(e)
            }
        }
    }

    /// Best-effort message; failures are only logged.
    async fn notify(&self, phone: &str, text: impl Into<String> + Send) {
        if let Err(e) = self
            .deps
            .channel
            .send(OutboundMessage::text(phone, text))
            .await
        {
            warn!(phone, error = %e, "failed to send message");
        }
    }

    async fn require_customer(&self, phone: &str) -> Result<Customer, PipaError> {
        self.deps
            .storage
            .get_customer_by_phone(phone)
            .await?
            .ok_or_else(|| PipaError::not_found("customer", phone))
    }

    // --- Operator actions ---

    /// Add a missed-delivery strike; the configured limit blocks the customer.
    pub async fn assign_strike(&self, phone: &str) -> Result<StrikeOutcome, PipaError> {
        let session = self.session(phone);
        let mut ctx = session.lock().await;

        let mut customer = self.require_customer(phone).await?;
        customer.strikes = customer.strikes.saturating_add(1);
        let limit = self.deps.settings.strike_limit;
        let reached = customer.strikes >= limit;
        customer.blocked = customer.blocked || reached;
        self.deps.storage.update_customer(&customer).await?;

        let outcome = StrikeOutcome {
            strikes: customer.strikes,
            blocked: customer.blocked,
        };
        info!(phone, strikes = outcome.strikes, blocked = outcome.blocked, "strike assigned");

        if outcome.blocked {
            self.deps.scheduler.cancel(phone);
            ctx.discard_draft();
            ctx.tracked_order = None;
            self.notify(phone, replies::strike_block(outcome.strikes)).await;
        } else {
            self.notify(phone, replies::strike_warning(&customer, limit)).await;
        }
        Ok(outcome)
    }

    /// Returns `false` when the customer already was premium.
    pub async fn promote_to_premium(&self, phone: &str) -> Result<bool, PipaError> {
        let session = self.session(phone);
        let _ctx = session.lock().await;

        let mut customer = self.require_customer(phone).await?;
        if customer.is_premium() {
            debug!(phone, "customer already premium");
            return Ok(false);
        }
        customer.category = Category::Premium;
        self.deps.storage.update_customer(&customer).await?;
        info!(phone, "customer promoted to premium");
        self.notify(phone, replies::PROMOTED).await;
        Ok(true)
    }

    /// Ask the customer to confirm receipt of `order_id`, or of their last order.
    ///
    /// Returns the id of the order being confirmed.
    pub async fn request_delivery_confirmation(
        &self,
        phone: &str,
        order_id: Option<i64>,
    ) -> Result<i64, PipaError> {
        let session = self.session(phone);
        let mut ctx = session.lock().await;

        let customer = self.require_customer(phone).await?;
        let order = match order_id {
            Some(id) => self
                .deps
                .storage
                .get_order(id)
                .await?
                .filter(|order| order.customer_id == customer.id),
            None => self.deps.storage.get_last_order(customer.id).await?,
        };
        let Some(order) = order else {
            let key = order_id.map_or_else(|| phone.to_string(), |id| id.to_string());
            return Err(PipaError::not_found("order", key));
        };

        ctx.tracked_order = Some(order.id);
        let mut turn = Turn::new(&self.deps, customer, &mut ctx);
        if let Err(e) = self.enter(&mut turn, ConversationState::DeliveryConfirm).await {
            turn.session.tracked_order = None;
            return Err(e);
        }
        info!(phone, order_id = order.id, "delivery confirmation requested");
        Ok(order.id)
    }

    /// Recharge progress: the cylinder reached the plant.
    pub async fn notify_arrived_at_plant(&self, phone: &str) -> Result<(), PipaError> {
        self.send_progress(phone, replies::ARRIVED_AT_PLANT).await
    }

    /// Recharge progress: refilling has started.
    pub async fn notify_refill_started(&self, phone: &str) -> Result<(), PipaError> {
        self.send_progress(phone, replies::REFILL_STARTED).await
    }

    async fn send_progress(&self, phone: &str, text: &str) -> Result<(), PipaError> {
        let session = self.session(phone);
        let _ctx = session.lock().await;

        self.require_customer(phone).await?;
        self.deps
            .channel
            .send(OutboundMessage::text(phone, text))
            .await?;
        info!(phone, "recharge progress notice sent");
        Ok(())
    }

    /// Orders waiting for delivery or pickup, in id order.
    pub async fn daily_route(&self) -> Result<Vec<Order>, PipaError> {
        let mut route = self
            .deps
            .storage
            .list_orders_by_status(OrderStatus::Pending)
            .await?;
        route.extend(
            self.deps
                .storage
                .list_orders_by_status(OrderStatus::PendingPickup)
                .await?,
        );
        route.sort_by_key(|order| order.id);
        info!(stops = route.len(), "daily route generated");
        Ok(route)
    }

    /// Drop idle sessions from memory.
    pub fn prune_idle_sessions(&self) -> usize {
        self.sessions.prune_idle()
    }
}
