// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seal reports, delivery confirmation and rating.

use async_trait::async_trait;
use pipa_core::{NewSealReport, OrderStatus, PhotoStatus, PipaError, SealReport};
use tracing::{info, warn};

use super::{HandlerRegistry, StateHandler, Transition, Turn};
use crate::input::{self, YesNo};
use crate::replies;
use crate::state::ConversationState;

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry.register(ReportingSeal);
    registry.register(AwaitingSealPhoto);
    registry.register(ReceivingSealPhoto);
    registry.register(DeliveryConfirm);
    registry.register(AwaitingRating);
}

/// Store a seal report and acknowledge it.
///
/// The report is attached to the tracked order when the customer is
/// confirming a delivery, otherwise to their last order.
pub(crate) async fn open_seal_report(
    turn: &mut Turn<'_>,
    description: &str,
) -> Result<SealReport, PipaError> {
    let order_id = match turn.session.tracked_order.take() {
        Some(id) => Some(id),
        None => turn
            .storage()
            .get_last_order(turn.customer.id)
            .await?
            .map(|order| order.id),
    };
    let report = turn
        .storage()
        .create_seal_report(&NewSealReport {
            customer_id: turn.customer.id,
            order_id,
            description: description.trim().to_string(),
        })
        .await?;
    warn!(
        phone = turn.phone(),
        report_id = report.id,
        order_id = ?report.order_id,
        "seal report opened"
    );
    turn.say(replies::SEAL_REPORT_RECEIVED).await?;
    Ok(report)
}

async fn last_report(turn: &Turn<'_>) -> Result<SealReport, PipaError> {
    turn.storage()
        .get_last_seal_report(turn.customer.id)
        .await?
        .ok_or_else(|| PipaError::not_found("seal report", turn.customer.id))
}

struct ReportingSeal;

#[async_trait]
impl StateHandler for ReportingSeal {
    fn state(&self) -> ConversationState {
        ConversationState::ReportingSeal
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_SEAL_DESCRIPTION).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        if text.trim().is_empty() {
            turn.say(replies::EMPTY_SEAL_DESCRIPTION).await?;
            return Ok(Transition::Stay);
        }
        open_seal_report(turn, text).await?;
        Ok(Transition::Enter(ConversationState::AwaitingSealPhoto))
    }
}

struct AwaitingSealPhoto;

#[async_trait]
impl StateHandler for AwaitingSealPhoto {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingSealPhoto
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::ASK_SEAL_PHOTO).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        match input::yes_no(text) {
            Some(YesNo::Yes) => {
                let report = last_report(turn).await?;
                turn.storage()
                    .update_seal_report_photo(report.id, PhotoStatus::Requested)
                    .await?;
                Ok(Transition::Enter(ConversationState::ReceivingSealPhoto))
            }
            Some(YesNo::No) => {
                turn.say(replies::SEAL_REPORT_WITHOUT_PHOTO).await?;
                Ok(Transition::Enter(turn.resting_state()))
            }
            None => {
                turn.say(replies::INVALID_YES_NO).await?;
                Ok(Transition::Stay)
            }
        }
    }
}

struct ReceivingSealPhoto;

#[async_trait]
impl StateHandler for ReceivingSealPhoto {
    fn state(&self) -> ConversationState {
        ConversationState::ReceivingSealPhoto
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::SEND_SEAL_PHOTO).await
    }

    /// Media content is not inspected; any message counts as the photo.
    async fn on_input(&self, turn: &mut Turn<'_>, _text: &str) -> Result<Transition, PipaError> {
        let report = last_report(turn).await?;
        turn.storage()
            .update_seal_report_photo(report.id, PhotoStatus::Received)
            .await?;
        info!(phone = turn.phone(), report_id = report.id, "seal photo received");
        turn.say(replies::SEAL_PHOTO_RECEIVED).await?;
        Ok(Transition::Enter(turn.resting_state()))
    }
}

/// The order being confirmed, falling back to the customer's last order.
async fn confirming_order(turn: &Turn<'_>) -> Result<i64, PipaError> {
    if let Some(id) = turn.session.tracked_order {
        return Ok(id);
    }
    turn.storage()
        .get_last_order(turn.customer.id)
        .await?
        .map(|order| order.id)
        .ok_or_else(|| PipaError::not_found("order", turn.phone()))
}

struct DeliveryConfirm;

#[async_trait]
impl StateHandler for DeliveryConfirm {
    fn state(&self) -> ConversationState {
        ConversationState::DeliveryConfirm
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        let order_id = confirming_order(turn).await?;
        turn.say(replies::ask_delivery_confirmation(order_id)).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        match input::yes_no(text) {
            Some(YesNo::Yes) => {
                let order_id = confirming_order(turn).await?;
                turn.storage()
                    .update_order_status(order_id, OrderStatus::Delivered)
                    .await?;
                turn.session.tracked_order = None;
                info!(phone = turn.phone(), order_id, "delivery confirmed by customer");
                Ok(Transition::Enter(ConversationState::AwaitingRating))
            }
            Some(YesNo::No) => {
                // Keep the tracked order so the report is attached to it.
                let order_id = confirming_order(turn).await?;
                turn.session.tracked_order = Some(order_id);
                Ok(Transition::Enter(ConversationState::ReportingSeal))
            }
            None => {
                turn.say(replies::INVALID_YES_NO).await?;
                Ok(Transition::Stay)
            }
        }
    }
}

struct AwaitingRating;

#[async_trait]
impl StateHandler for AwaitingRating {
    fn state(&self) -> ConversationState {
        ConversationState::AwaitingRating
    }

    async fn on_enter(&self, turn: &mut Turn<'_>) -> Result<(), PipaError> {
        turn.say(replies::RATING_MENU).await
    }

    async fn on_input(&self, turn: &mut Turn<'_>, text: &str) -> Result<Transition, PipaError> {
        match input::parse_count(text).filter(|stars| *stars <= 5) {
            Some(stars) => {
                info!(phone = turn.phone(), stars, "service rated");
                turn.say(replies::RATING_THANKS).await?;
                Ok(Transition::Enter(ConversationState::Initial))
            }
            None => Ok(Transition::Enter(ConversationState::AwaitingOption)),
        }
    }
}
