// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation core of the Pipa gas delivery bot.
//!
//! [`StateDispatcher`] receives one text message at a time per phone, runs
//! the handler of the customer's persisted conversation state and replies
//! through the configured [`ChannelAdapter`](pipa_core::ChannelAdapter).
//! Operator actions (strikes, promotions, delivery confirmation, recharge
//! notices, the daily route) go through the same dispatcher so they
//! serialize with the customer's own messages.

pub mod dispatcher;
pub mod draft;
pub mod handlers;
pub mod input;
pub mod pricing;
pub mod replies;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod shutdown;
pub mod state;
pub mod tracking;

pub use dispatcher::{StateDispatcher, StrikeOutcome};
pub use handlers::{BotDeps, HandlerRegistry, StateHandler, Transition, Turn};
pub use scheduler::NotificationScheduler;
pub use session::{SessionContext, SessionRegistry};
pub use settings::BotSettings;
pub use state::ConversationState;
