// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Greeting, option menu, registration and the repeat-last-order shortcut.

use async_trait::async_trait;
use pipa_core::{Order, OrderStatus, PipaError, ServiceVariant};
use tracing::{debug, info};

use super::{HandlerRegistry, StateHandler, Transition, Turn};
use crate::draft::{self, OrderDraft};
use crate::input::{self, choose};
use crate::replies;
use crate::state::ConversationState;
use crate::tracking;

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry.register(Initial);
    registry.register(AwaitingOption);
    registry.register(AwaitingName);
    registry.register(AwaitingServiceType);
}

struct Initial;

#[async_trait]
impl StateHandler for Initial {
    fn state(&self) -> ConversationState {
        ConversationState::Initial
    }

    async fn on_enter(&self, _turn: &mut Turn<'_>) -> Result<(), PipaError> {
        Ok(())
    }

    async fn on_input(&self, _turn: &mut Turn<'_>, _text: &str) -> Result<Transition, PipaError> {
        Ok(Transition::Enter(ConversationState::AwaitingOption))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Repeat,
    NewOrder,
    UpdateProfile,
}

const REPEAT_WORDS: &[&str] = &["repetir", "repeat", "igual", "lo mismo", "mismo"];
const NEW_WORDS: &[&str] = &["nuevo", "nuevo pedido", "new", "new order", "pedido", "pedir"];
const UPDATE_WORDS: &[&str] = &["actualizar", "actualizar datos", "datos", "update", "perfil"];

fn menu_choice(text: &str, has_last_order: bool) -> Option<MenuChoice> {
    let reply = input::normalize(text);
    let numbered = if has_last_order {
        match reply.as_str() {
            "1" => Some(MenuChoice::Repeat),
            "2" => Some(MenuChoice::NewOrder),
            "3" => Some(MenuChoice::UpdateProfile),
            _ => None,
        }
    } else {
        match reply.as_str() {
            "1" => Some(MenuChoice::NewOrder),
            "2" => Some(MenuChoice::UpdateProfile),
            _ => None,
        }
    };
    numbered.or_else(|| {
        let choice = choose(
            &reply,
            &[
                (MenuChoice::Repeat, REPEAT_WORDS),
                (MenuChoice::NewOrder, NEW_WORDS),
                (MenuChoice::UpdateProfile, UPDATE_WORDS),
            ],
        )?;
        (choice != MenuChoice::Repeat || has_last_order).then_some(choice)
    })
}

/// The customer's most recent order, unless it was cancelled.
async fn repeatable_order(turn: &Turn<'_>) -> Result<Option<Order>, PipaError> {
    let last = turn.storage().get_last_order(turn.customer.id).await?;
    Ok(last.filter(|order| order.status != OrderStatus::Cancelled))
}

struct AwaitingOption;

#[async_trait]
impl StateHandler for AwaitingOption {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingOption
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        let last = repeatable_order(turn).await?;
        let price = turn.settings().prices.price_per_liter();
        let menu = replies::option_menu(&turn.customer, last.as_ref().map(|order| (order, price)));
        turn.say(menu).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let last = repeatable_order(turn).await?;
        let Some(choice) = menu_choice(text, last.is_some()) else {
            debug!(phone = turn.phone(), "unrecognized menu option");
            let choices = if last.is_some() { 3 } else { 2 };
            turn.say(replies::invalid_option(choices)).await?;
            return Ok(Transition::Stay);
        };

        match (choice, last) {
            (MenuChoice::Repeat, Some(last)) => {
                let codes = if last.variant == ServiceVariant::CylinderRecharge {
                    tracking::generate_codes(last.cylinder_count)
                } else {
                    Vec::new()
                };
                let repeat = draft::repeat_order(&last, &turn.settings().prices, codes);
                let order = turn.storage().create_order(&repeat).await?;
                info!(
                    phone = turn.phone(),
                    order_id = order.id,
                    variant = %order.variant,
                    "repeat order created"
                );
                turn.say(replies::repeat_confirmed(&order)).await?;
                if order.variant == ServiceVariant::CylinderRecharge {
                    let delay = turn.settings().pickup_notice_delay;
                    turn.deps
                        .scheduler
                        .schedule(turn.phone(), delay, replies::CYLINDER_PICKED_UP);
                }
                Ok(Transition::Enter(ConversationState::Initial))
            }
            (MenuChoice::Repeat, None) => {
                turn.say(replies::invalid_option(2)).await?;
                Ok(Transition::Stay)
            }
            (MenuChoice::NewOrder, _) if !turn.customer.is_registered() => {
                Ok(Transition::Enter(ConversationState::AwaitingName))
            }
            (MenuChoice::NewOrder, _) => Ok(Transition::Enter(ConversationState::AwaitingServiceType)),
            (MenuChoice::UpdateProfile, _) => Ok(Transition::Enter(ConversationState::AwaitingName)),
        }
    }
}

struct AwaitingName;

#[async_trait]
impl StateHandler for AwaitingName {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingName
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        if turn.customer.is_registered() {
            turn.say(replies::ASK_NAME).await
        } else {
            turn.say(replies::REGISTRATION).await
        }
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let Some(name) = input::parse_full_name(text) else {
            turn.say(replies::NAME_TOO_SHORT).await?;
            return Ok(Transition::Stay);
        };

        let first_registration = !turn.customer.is_registered();
        turn.customer.paternal_surname = name.paternal_surname;
        turn.customer.maternal_surname = name.maternal_surname;
        turn.customer.given_name = name.given_name;
        turn.save_customer().await?;

        if first_registration {
            info!(phone = turn.phone(), "customer registered");
            turn.say(replies::welcome_registered(&turn.customer)).await?;
            Ok(Transition::Enter(ConversationState::AwaitingServiceType))
        } else {
            info!(phone = turn.phone(), "customer profile updated");
            turn.say(replies::PROFILE_UPDATED).await?;
            Ok(Transition::Enter(ConversationState::AwaitingOption))
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ServiceKind {
    Tank,
    Cylinder,
}

struct AwaitingServiceType;

#[async_trait]
impl StateHandler for AwaitingServiceType {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingServiceType
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_SERVICE_TYPE).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let kind = choose(
            text,
            &[
                (
                    ServiceKind::Tank,
                    &["1", "tanque", "tanque estacionario", "estacionario", "tank", "stationary"][..],
                ),
                (ServiceKind::Cylinder, &["2", "cilindro", "cylinder"][..]),
            ],
        );

        match kind {
            Some(ServiceKind::Tank) => {
                turn.session.draft = Some(OrderDraft::tank());
                Ok(Transition::Enter(ConversationState::AwaitingMeasureMethod))
            }
            Some(ServiceKind::Cylinder) => {
                turn.session.draft = Some(OrderDraft::cylinder());
                Ok(Transition::Enter(ConversationState::AwaitingCylinderMode))
            }
            None => {
                turn.say(replies::INVALID_SERVICE_TYPE).await?;
                Ok(Transition::Stay)
            }
        }
    }
}
