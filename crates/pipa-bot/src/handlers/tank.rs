// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stationary tank branch: measuring method and quantity capture.

use async_trait::async_trait;
use pipa_core::PipaError;
use tracing::debug;

use super::{HandlerRegistry, StateHandler, Transition, Turn};
use crate::draft::MeasureMethod;
use crate::input::{self, choose};
use crate::replies;
use crate::state::ConversationState;

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry.register(AwaitingMeasureMethod);
    registry.register(AwaitingVolume);
    registry.register(AwaitingMoney);
    registry.register(AwaitingCapacity);
    registry.register(AwaitingPercentage);
}

struct AwaitingMeasureMethod;

#[async_trait]
impl StateHandler for AwaitingMeasureMethod {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingMeasureMethod
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        let price = turn.settings().prices.price_per_liter();
        turn.say(replies::ask_measure_method(price)).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let method = choose(
            text,
            &[
                (
                    MeasureMethod::ByVolume,
                    &["1", "litros", "por litros", "volumen", "by volume", "volume", "liters"][..],
                ),
                (
                    MeasureMethod::ByMoney,
                    &["2", "dinero", "por dinero", "monto", "por monto", "by money", "money"][..],
                ),
                (
                    MeasureMethod::ByPercentage { capacity: None },
                    &[
                        "3",
                        "porcentaje",
                        "por porcentaje",
                        "tabulador",
                        "by percentage",
                        "percentage",
                    ][..],
                ),
            ],
        );

        let Some(method) = method else {
            turn.say(replies::INVALID_MEASURE_METHOD).await?;
            return Ok(Transition::Stay);
        };

        let tank = turn.tank()?;
        tank.method = Some(method);
        tank.quote = None;
        let next = match method {
            MeasureMethod::ByVolume => ConversationState::AwaitingVolume,
            MeasureMethod::ByMoney => ConversationState::AwaitingMoney,
            MeasureMethod::ByPercentage { .. } => ConversationState::AwaitingCapacity,
        };
        Ok(Transition::Enter(next))
    }
}

struct AwaitingVolume;

#[async_trait]
impl StateHandler for AwaitingVolume {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingVolume
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_VOLUME).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let Some(liters) = input::parse_amount(text) else {
            debug!(phone = turn.phone(), "rejected volume");
            turn.say(replies::INVALID_VOLUME).await?;
            return Ok(Transition::Stay);
        };
        let quote = turn.settings().prices.by_volume(liters);
        turn.tank()?.quote = Some(quote);
        Ok(Transition::Enter(ConversationState::AwaitingPayment))
    }
}

struct AwaitingMoney;

#[async_trait]
impl StateHandler for AwaitingMoney {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingMoney
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_MONEY).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let Some(amount) = input::parse_amount(text) else {
            debug!(phone = turn.phone(), "rejected money amount");
            turn.say(replies::INVALID_MONEY).await?;
            return Ok(Transition::Stay);
        };
        let quote = turn.settings().prices.by_money(amount);
        turn.tank()?.quote = Some(quote);
        Ok(Transition::Enter(ConversationState::AwaitingPayment))
    }
}

struct AwaitingCapacity;

#[async_trait]
impl StateHandler for AwaitingCapacity {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingCapacity
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_CAPACITY).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let Some(capacity) = input::parse_amount(text) else {
            debug!(phone = turn.phone(), "rejected tank capacity");
            turn.say(replies::INVALID_CAPACITY).await?;
            return Ok(Transition::Stay);
        };
        turn.tank()?.method = Some(MeasureMethod::ByPercentage {
            capacity: Some(capacity),
        });
        Ok(Transition::Enter(ConversationState::AwaitingPercentage))
    }
}

struct AwaitingPercentage;

#[async_trait]
impl StateHandler for AwaitingPercentage {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingPercentage
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_PERCENTAGE).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let Some(percent) = input::parse_amount(text) else {
            debug!(phone = turn.phone(), "rejected percentage");
            turn.say(replies::INVALID_PERCENTAGE).await?;
            return Ok(Transition::Stay);
        };

        let capacity = match turn.tank()?.method {
            Some(MeasureMethod::ByPercentage {
                capacity: Some(capacity),
            }) => capacity,
            _ => return Err(PipaError::MissingDraft),
        };

        match turn.settings().prices.by_percentage(capacity, percent) {
            Ok(quote) => {
                turn.tank()?.quote = Some(quote);
                Ok(Transition::Enter(ConversationState::AwaitingPayment))
            }
            Err(e) => {
                debug!(phone = turn.phone(), error = %e, "percentage out of range");
                turn.say(replies::PERCENTAGE_OUT_OF_RANGE).await?;
                Ok(Transition::Stay)
            }
        }
    }
}
