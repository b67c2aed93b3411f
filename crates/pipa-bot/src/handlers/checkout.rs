// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common tail of every order: payment, address, colors, delivery window and
//! the final confirmation that stores the order.

use async_trait::async_trait;
use pipa_core::{DeliveryWindow, Order, OrderStatus, PaymentMethod, PipaError, ServiceVariant};
use tracing::{debug, info, warn};

use super::{HandlerRegistry, StateHandler, Transition, Turn};
use crate::input::{self, YesNo, choose};
use crate::replies;
use crate::state::ConversationState;

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry.register(AwaitingPayment);
    registry.register(AwaitingAddress);
    registry.register(AwaitingAddressConfirm);
    registry.register(AwaitingFacadeColor);
    registry.register(AwaitingDoorColor);
    registry.register(AwaitingDeliveryWindow);
    registry.register(FinalConfirm);
}

/// Premium customers pick a window before the summary.
fn after_address(turn: &Turn<'_>) -> ConversationState {
    if turn.customer.is_premium() {
        ConversationState::AwaitingDeliveryWindow
    } else {
        ConversationState::FinalConfirm
    }
}

/// Trimmed free text, `None` when nothing is left.
fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

struct AwaitingPayment;

#[async_trait]
impl StateHandler for AwaitingPayment {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingPayment
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        let text = replies::ask_payment(turn.draft()?);
        turn.say(text).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let payment = choose(
            text,
            &[
                (PaymentMethod::Cash, &["1", "efectivo", "cash"][..]),
                (PaymentMethod::Card, &["2", "tarjeta", "terminal", "card"][..]),
            ],
        );
        let Some(payment) = payment else {
            turn.say(replies::INVALID_PAYMENT).await?;
            return Ok(Transition::Stay);
        };
        turn.draft()?.payment = Some(payment);
        Ok(Transition::Enter(ConversationState::AwaitingAddress))
    }
}

struct AwaitingAddress;

#[async_trait]
impl StateHandler for AwaitingAddress {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingAddress
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_ADDRESS).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let Some(address) = non_empty(text) else {
            turn.say(replies::EMPTY_ADDRESS).await?;
            return Ok(Transition::Stay);
        };
        turn.draft()?.address = Some(address);
        Ok(Transition::Enter(ConversationState::AwaitingAddressConfirm))
    }
}

struct AwaitingAddressConfirm;

#[async_trait]
impl StateHandler for AwaitingAddressConfirm {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingAddressConfirm
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        let address = turn.draft()?.address.clone().ok_or(PipaError::MissingDraft)?;
        turn.say(replies::confirm_address(&address)).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        match input::yes_no(text) {
            Some(YesNo::Yes) => Ok(Transition::Enter(after_address(turn))),
            Some(YesNo::No) => Ok(Transition::Enter(ConversationState::AwaitingFacadeColor)),
            None => {
                turn.say(replies::INVALID_YES_NO).await?;
                Ok(Transition::Stay)
            }
        }
    }
}

struct AwaitingFacadeColor;

#[async_trait]
impl StateHandler for AwaitingFacadeColor {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingFacadeColor
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_FACADE_COLOR).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let Some(color) = non_empty(text) else {
            turn.say(replies::EMPTY_COLOR).await?;
            return Ok(Transition::Stay);
        };
        turn.draft()?.facade_color = Some(color);
        Ok(Transition::Enter(ConversationState::AwaitingDoorColor))
    }
}

struct AwaitingDoorColor;

#[async_trait]
impl StateHandler for AwaitingDoorColor {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingDoorColor
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_DOOR_COLOR).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let Some(color) = non_empty(text) else {
            turn.say(replies::EMPTY_COLOR).await?;
            return Ok(Transition::Stay);
        };

        let draft = turn.draft()?;
        draft.door_color = Some(color);
        draft.red_code = true;
        let facade = draft.facade_color.clone();
        let door = draft.door_color.clone();

        turn.customer.facade_color = facade;
        turn.customer.door_color = door;
        turn.customer.red_code = true;
        turn.save_customer().await?;
        info!(phone = turn.phone(), "red code set for delivery address");

        turn.say(replies::COLORS_SAVED).await?;
        Ok(Transition::Enter(after_address(turn)))
    }
}

struct AwaitingDeliveryWindow;

#[async_trait]
impl StateHandler for AwaitingDeliveryWindow {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingDeliveryWindow
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_DELIVERY_WINDOW).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let window = choose(
            text,
            &[
                (DeliveryWindow::Morning, &["1", "manana", "morning", "am"][..]),
                (DeliveryWindow::Afternoon, &["2", "tarde", "afternoon", "pm"][..]),
            ],
        );
        let Some(window) = window else {
            turn.say(replies::INVALID_DELIVERY_WINDOW).await?;
            return Ok(Transition::Stay);
        };
        turn.draft()?.window = Some(window);
        Ok(Transition::Enter(ConversationState::FinalConfirm))
    }
}

struct FinalConfirm;

impl FinalConfirm {
    /// The order for the current draft, stored at most once per draft.
    async fn store_order(&self, turn: &mut Turn<'_>) -> Result<Order, PipaError> {
        if let Some(id) = turn.session.confirmed_order {
            debug!(phone = turn.phone(), order_id = id, "order already stored, resending confirmation");
            return turn
                .storage()
                .get_order(id)
                .await?
                .ok_or_else(|| PipaError::not_found("order", id));
        }

        let customer_id = turn.customer.id;
        let prices = turn.settings().prices;
        let new_order = turn.draft()?.to_new_order(customer_id, &prices).map_err(|e| {
            warn!(error = %e, "draft cannot be turned into an order");
            PipaError::MissingDraft
        })?;
        let order = turn.storage().create_order(&new_order).await?;
        turn.session.confirmed_order = Some(order.id);
        info!(
            phone = turn.phone(),
            order_id = order.id,
            variant = %order.variant,
            amount = order.amount,
            "order created"
        );
        Ok(order)
    }
}

#[async_trait]
impl StateHandler for FinalConfirm {
    fn state(&self) -> ConversationState {
        ConversationState::FinalConfirm
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        let draft = turn.draft()?;
        let variant = draft.variant().ok_or(PipaError::MissingDraft)?;
        let text = replies::final_summary(draft, variant);
        turn.say(text).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        match input::yes_no(text) {
            Some(YesNo::Yes) => {
                let order = self.store_order(turn).await?;
                let mut reply = replies::order_confirmed(&order);
                let recharge = order.variant == ServiceVariant::CylinderRecharge;
                if recharge {
                    reply = format!("{reply}\n\n{}", replies::PICKUP_SCHEDULED);
                }
                turn.say(reply).await?;

                if recharge {
                    let delay = turn.settings().pickup_notice_delay;
                    turn.deps
                        .scheduler
                        .schedule(turn.phone(), delay, replies::CYLINDER_PICKED_UP);
                }
                turn.session.discard_draft();
                Ok(Transition::Enter(ConversationState::Initial))
            }
            Some(YesNo::No) => {
                if let Some(id) = turn.session.confirmed_order {
                    turn.storage()
                        .update_order_status(id, OrderStatus::Cancelled)
                        .await?;
                    info!(phone = turn.phone(), order_id = id, "stored order cancelled");
                }
                turn.session.discard_draft();
                turn.say(replies::ORDER_CANCELLED).await?;
                Ok(Transition::Enter(ConversationState::Initial))
            }
            None => {
                turn.say(replies::INVALID_FINAL_CONFIRM).await?;
                Ok(Transition::Stay)
            }
        }
    }
}
