// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cylinder branch: recharge or exchange, quantity and tracking codes.

use async_trait::async_trait;
use pipa_core::PipaError;
use tracing::debug;

use super::{HandlerRegistry, StateHandler, Transition, Turn};
use crate::draft::CylinderMode;
use crate::input::{self, YesNo, choose};
use crate::replies;
use crate::state::ConversationState;
use crate::tracking;

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry.register(AwaitingCylinderMode);
    registry.register(AwaitingCylinderQuantity);
    registry.register(AwaitingCodeConfirm);
}

struct AwaitingCylinderMode;

#[async_trait]
impl StateHandler for AwaitingCylinderMode {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingCylinderMode
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_CYLINDER_MODE).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let mode = choose(
            text,
            &[
                (CylinderMode::Recharge, &["1", "recarga", "recargar", "recharge", "refill"][..]),
                (CylinderMode::Exchange, &["2", "canje", "cambio", "intercambio", "exchange", "swap"][..]),
            ],
        );
        let Some(mode) = mode else {
            turn.say(replies::INVALID_CYLINDER_MODE).await?;
            return Ok(Transition::Stay);
        };

        let cylinder = turn.cylinder()?;
        cylinder.mode = Some(mode);
        cylinder.count = 0;
        cylinder.codes.clear();
        Ok(Transition::Enter(ConversationState::AwaitingCylinderQuantity))
    }
}

struct AwaitingCylinderQuantity;

#[async_trait]
impl StateHandler for AwaitingCylinderQuantity {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingCylinderQuantity
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        let max = turn.settings().max_cylinders;
        turn.say(replies::ask_cylinder_quantity(max)).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        let max = turn.settings().max_cylinders;
        let Some(count) = input::parse_count(text).filter(|n| *n <= max) else {
            debug!(phone = turn.phone(), max, "rejected cylinder quantity");
            turn.say(replies::invalid_cylinder_quantity(max)).await?;
            return Ok(Transition::Stay);
        };

        let cylinder = turn.cylinder()?;
        let mode = cylinder.mode.ok_or(PipaError::MissingDraft)?;
        cylinder.count = count;
        match mode {
            CylinderMode::Recharge => {
                cylinder.codes = tracking::generate_codes(count);
                Ok(Transition::Enter(ConversationState::AwaitingCodeConfirm))
            }
            CylinderMode::Exchange => {
                cylinder.codes.clear();
                Ok(Transition::Enter(ConversationState::AwaitingPayment))
            }
        }
    }
}

struct AwaitingCodeConfirm;

#[async_trait]
impl StateHandler for AwaitingCodeConfirm {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingCodeConfirm
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        let text = replies::confirm_tracking_codes(&turn.cylinder()?.codes);
        turn.say(text).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        match input::yes_no(text) {
            Some(YesNo::Yes) => Ok(Transition::Enter(ConversationState::AwaitingPayment)),
            Some(YesNo::No) => {
                let cylinder = turn.cylinder()?;
                cylinder.mode = None;
                cylinder.count = 0;
                cylinder.codes.clear();
                Ok(Transition::Enter(ConversationState::AwaitingCylinderMode))
            }
            None => {
                turn.say(replies::INVALID_YES_NO).await?;
                Ok(Transition::Stay)
            }
        }
    }
}
